// vim: tw=80
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    *,
    spanned::Spanned
};

use crate::{
    gen_mock_ident,
    mock_function::MockFunction
};

/// Everything needed to generate the mock of one trait
pub(crate) struct MockTrait {
    methods: Vec<MockFunction>,
    mock_ident: Ident,
    trait_ident: Ident,
    unsafety: Option<Token![unsafe]>,
    vis: Visibility
}

impl MockTrait {
    /// Validate the trait.  Every problem found is reported, not just the
    /// first one.
    pub fn new(item: &ItemTrait) -> Result<Self> {
        let mut errors = Vec::new();
        if !item.generics.params.is_empty() ||
            item.generics.where_clause.is_some()
        {
            errors.push(Error::new(item.generics.span(),
                "#[mockable] does not support generic traits"));
        }
        let mut methods = Vec::new();
        for trait_item in item.items.iter() {
            match trait_item {
                TraitItem::Fn(method) => match MockFunction::new(method) {
                    Ok(mf) => methods.push(mf),
                    Err(e) => errors.push(e)
                },
                other => errors.push(Error::new(other.span(),
                    "#[mockable] only supports traits whose items are all methods"))
            }
        }
        if let Some(e) = errors.into_iter().reduce(|mut acc, e| {
            acc.combine(e);
            acc
        }) {
            return Err(e);
        }
        Ok(MockTrait {
            methods,
            mock_ident: gen_mock_ident(&item.ident),
            trait_ident: item.ident.clone(),
            unsafety: item.unsafety,
            vis: item.vis.clone()
        })
    }

    /// Generate the mock struct, its constructors, and the trait impl
    pub fn gen(&self) -> TokenStream {
        let mock_ident = &self.mock_ident;
        let mock_name = mock_ident.to_string();
        let trait_ident = &self.trait_ident;
        let trait_name = trait_ident.to_string();
        let unsafety = &self.unsafety;
        let vis = &self.vis;
        let doc = format!("Mock version of the `{trait_name}` trait");
        let mock_var = format_ident!("__safemock");
        let fields = self.methods.iter()
            .map(MockFunction::field);
        let inits = self.methods.iter()
            .map(|mf| mf.initializer(&mock_var));
        let trait_methods = self.methods.iter()
            .map(MockFunction::trait_method);
        quote!(
            #[doc = #doc]
            #vis struct #mock_ident {
                #(#fields,)*
                #mock_var: ::safemock::Mock
            }
            impl #mock_ident {
                #vis fn new() -> Self {
                    let #mock_var = ::safemock::Mock::new(#trait_name);
                    #mock_ident {
                        #(#inits,)*
                        #mock_var
                    }
                }
            }
            impl ::std::default::Default for #mock_ident {
                fn default() -> Self {
                    Self::new()
                }
            }
            impl ::std::fmt::Debug for #mock_ident {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>)
                    -> ::std::fmt::Result
                {
                    f.debug_struct(#mock_name)
                        .field("methods", &self.#mock_var.methods())
                        .finish()
                }
            }
            #unsafety impl #trait_ident for #mock_ident {
                #(#trait_methods)*
            }
        )
    }
}

#[cfg(test)]
mod t {
    use super::*;
    use pretty_assertions::assert_eq;

    fn check_err(item: TokenStream, msgs: &[&str]) {
        let item: ItemTrait = parse2(item).unwrap();
        match MockTrait::new(&item) {
            Ok(_) => panic!("expected errors {msgs:?}"),
            Err(e) => assert_eq!(msgs,
                e.into_iter().map(|e| e.to_string()).collect::<Vec<_>>())
        }
    }

    #[test]
    fn generate() {
        let item: ItemTrait = parse2(quote!(
            pub trait Foo {
                fn foo(&self, x: u32) -> u32;
                #[cfg(unix)]
                fn bar(&mut self, name: &str);
            }
        )).unwrap();
        let expected = quote!(
            #[doc = "Mock version of the `Foo` trait"]
            pub struct MockFoo {
                pub foo: ::safemock::Method<u32>,
                #[cfg(unix)]
                pub bar: ::safemock::Method<()>,
                __safemock: ::safemock::Mock
            }
            impl MockFoo {
                pub fn new() -> Self {
                    let __safemock = ::safemock::Mock::new("Foo");
                    MockFoo {
                        foo: __safemock.method::<u32>("foo"),
                        #[cfg(unix)]
                        bar: __safemock.method::<()>("bar"),
                        __safemock
                    }
                }
            }
            impl ::std::default::Default for MockFoo {
                fn default() -> Self {
                    Self::new()
                }
            }
            impl ::std::fmt::Debug for MockFoo {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>)
                    -> ::std::fmt::Result
                {
                    f.debug_struct("MockFoo")
                        .field("methods", &self.__safemock.methods())
                        .finish()
                }
            }
            impl Foo for MockFoo {
                fn foo(&self, x: u32) -> u32 {
                    self.foo.call((x,)).into_value()
                }
                #[cfg(unix)]
                fn bar(&mut self, name: &str) {
                    self.bar.call((name,));
                }
            }
        );
        let mt = MockTrait::new(&item).unwrap();
        assert_eq!(expected.to_string(), mt.gen().to_string());
    }

    #[test]
    fn unsafe_trait() {
        let item: ItemTrait = parse2(quote!(
            unsafe trait Foo {
                fn foo(&self);
            }
        )).unwrap();
        let output = MockTrait::new(&item).unwrap().gen().to_string();
        let expected = quote!(unsafe impl Foo for MockFoo).to_string();
        assert!(output.contains(&expected), "{output}");
    }

    #[test]
    fn generic_trait() {
        check_err(quote!(trait Foo<T> { fn foo(&self, t: T); }),
                  &["#[mockable] does not support generic traits"]);
    }

    #[test]
    fn associated_items() {
        check_err(quote!(
            trait Foo {
                type Item;
                const X: u32;
                fn foo(&self) -> u32;
            }),
            &["#[mockable] only supports traits whose items are all methods",
              "#[mockable] only supports traits whose items are all methods"]);
    }

    #[test]
    fn reports_every_bad_method() {
        check_err(quote!(
            trait Foo {
                async fn foo(&self);
                fn bar() -> u32;
                fn baz(&self) -> u32;
            }),
            &["#[mockable] does not support async methods",
              "#[mockable] only supports methods with a self receiver"]);
    }
}
