// vim: tw=80
//! Proc Macros for use with SafeMock
//!
//! You probably don't want to use this crate directly.  Instead, you use its
//! reexports via the [`safemock`](../safemock/index.html) crate.

extern crate proc_macro;

use proc_macro2::TokenStream;
use syn::spanned::Spanned;

mod mock_function;
mod mock_trait;
use crate::mock_trait::MockTrait;

/// Generate a mock identifier from the regular one: eg "Foo" => "MockFoo"
fn gen_mock_ident(ident: &syn::Ident) -> syn::Ident {
    syn::Ident::new(&format!("Mock{ident}"), ident.span())
}

fn do_mockable(attrs: TokenStream, input: TokenStream) -> TokenStream {
    let mut output = input.clone();
    let generated = if attrs.is_empty() {
        syn::parse2::<syn::Item>(input)
            .and_then(|item| match item {
                syn::Item::Trait(item) => MockTrait::new(&item),
                other => Err(syn::Error::new(other.span(),
                    "#[mockable] can only be applied to traits"))
            }).map(|mt| mt.gen())
    } else {
        Err(syn::Error::new(attrs.span(),
            "#[mockable] does not take any arguments"))
    };
    match generated {
        Ok(ts) => output.extend(ts),
        Err(e) => output.extend(e.to_compile_error())
    }
    output
}

/// Generate a mock struct for a trait.
///
/// The struct is named after the trait with "Mock" prepended.  It implements
/// the trait, and has a public
/// [`Method`](../safemock/struct.Method.html) field for each of the trait's
/// methods, with the same name as the method.  Use those fields to stub and
/// verify calls.  Create the struct with `new` or `default`.
///
/// Every argument must implement `serde::Serialize`, and every return type
/// must be `Clone + 'static`.
///
/// # Examples
///
/// ```ignore
/// use safemock::*;
///
/// #[mockable]
/// pub trait Foo {
///     fn foo(&self, key: i16) -> u32;
///     fn bar(&mut self, name: &str);
/// }
///
/// let mut mock = MockFoo::new();
/// when(mock.foo.call((7,))).return_value(42);
/// assert_eq!(42, mock.foo(7));
/// mock.bar("x");
/// verify(&mock.bar).called_with(("x",));
/// ```
///
/// Traits with generic parameters, associated types or constants, or generic
/// or `async` methods are not supported.
/// ```compile_fail
/// # use safemock_derive::mockable;
/// #[mockable]
/// trait Foo {
///     fn foo<T>(&self, t: T);
/// }
/// ```
#[proc_macro_attribute]
pub fn mockable(attrs: proc_macro::TokenStream,
                input: proc_macro::TokenStream) -> proc_macro::TokenStream
{
    do_mockable(attrs.into(), input.into()).into()
}
