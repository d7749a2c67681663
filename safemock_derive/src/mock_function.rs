// vim: tw=80
use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    *,
    spanned::Spanned
};

/// One mocked trait method.
pub(crate) struct MockFunction {
    /// `#[cfg]` attributes, copied to everything generated for the method
    cfg_attrs: Vec<Attribute>,
    /// Names of the arguments, excluding the receiver
    args: Vec<Ident>,
    name: Ident,
    /// Return type.  `None` for methods that return `()`.
    output: Option<Type>,
    sig: Signature
}

impl MockFunction {
    pub fn new(method: &TraitItemFn) -> Result<Self> {
        let sig = &method.sig;
        if let Some(asyncness) = &sig.asyncness {
            return Err(Error::new(asyncness.span(),
                "#[mockable] does not support async methods"));
        }
        if let Some(param) = sig.generics.params.iter()
            .find(|p| !matches!(p, GenericParam::Lifetime(_)))
        {
            return Err(Error::new(param.span(),
                "#[mockable] does not support generic methods"));
        }
        if sig.receiver().is_none() {
            return Err(Error::new(sig.ident.span(),
                "#[mockable] only supports methods with a self receiver"));
        }
        if let Some(variadic) = &sig.variadic {
            return Err(Error::new(variadic.span(),
                "#[mockable] does not support variadic methods"));
        }

        let mut args = Vec::new();
        for fn_arg in sig.inputs.iter() {
            let FnArg::Typed(pat_type) = fn_arg else {
                continue;
            };
            if let Type::ImplTrait(_) = &*pat_type.ty {
                return Err(Error::new(pat_type.ty.span(),
                    "#[mockable] does not support impl Trait arguments"));
            }
            match &*pat_type.pat {
                Pat::Ident(pi) if pi.by_ref.is_none() && pi.subpat.is_none()
                    => args.push(pi.ident.clone()),
                pat => return Err(Error::new(pat.span(),
                    "#[mockable] requires every argument to be a plain identifier"))
            }
        }

        let output = match &sig.output {
            ReturnType::Default => None,
            ReturnType::Type(_, ty) => {
                check_output(ty)?;
                match &**ty {
                    Type::Tuple(tuple) if tuple.elems.is_empty() => None,
                    ty => Some(ty.clone())
                }
            }
        };

        let cfg_attrs = method.attrs.iter()
            .filter(|attr| attr.path().is_ident("cfg"))
            .cloned()
            .collect();
        Ok(MockFunction {
            cfg_attrs,
            args,
            name: sig.ident.clone(),
            output,
            sig: sig.clone()
        })
    }

    fn output(&self) -> TokenStream {
        match &self.output {
            Some(ty) => quote!(#ty),
            None => quote!(())
        }
    }

    /// The mock struct's public field for this method
    pub fn field(&self) -> TokenStream {
        let cfg_attrs = &self.cfg_attrs;
        let name = &self.name;
        let output = self.output();
        quote!(
            #(#cfg_attrs)*
            pub #name: ::safemock::Method<#output>
        )
    }

    /// The field's initializer in the mock struct's constructor.  `mock` is
    /// the local variable holding the `safemock::Mock`.
    pub fn initializer(&self, mock: &Ident) -> TokenStream {
        let cfg_attrs = &self.cfg_attrs;
        let name = &self.name;
        let name_str = name.to_string();
        let output = self.output();
        quote!(
            #(#cfg_attrs)*
            #name: #mock.method::<#output>(#name_str)
        )
    }

    /// The method's implementation of the mocked trait
    pub fn trait_method(&self) -> TokenStream {
        let cfg_attrs = &self.cfg_attrs;
        let name = &self.name;
        let args = &self.args;
        let sig = &self.sig;
        let call = quote!(self.#name.call((#(#args,)*)));
        if self.output.is_some() {
            quote!(
                #(#cfg_attrs)*
                #sig {
                    #call.into_value()
                }
            )
        } else {
            quote!(
                #(#cfg_attrs)*
                #sig {
                    #call;
                }
            )
        }
    }
}

/// Reject return types that a stub can't hold: anything that borrows, or that
/// can't be named outside of the trait.
fn check_output(ty: &Type) -> Result<()> {
    match ty {
        Type::Array(ta) => check_output(&ta.elem),
        Type::Group(tg) => check_output(&tg.elem),
        Type::ImplTrait(_) => Err(Error::new(ty.span(),
            "#[mockable] does not support impl Trait return types")),
        Type::Paren(tp) => check_output(&tp.elem),
        Type::Path(tp) => {
            if let Some(qself) = &tp.qself {
                check_output(&qself.ty)?;
            }
            if tp.path.segments.first().is_some_and(|s| s.ident == "Self") {
                return Err(Error::new(ty.span(),
                    "#[mockable] does not support return types containing Self"));
            }
            for seg in tp.path.segments.iter() {
                check_path_arguments(&seg.arguments)?;
            }
            Ok(())
        },
        Type::Ptr(tp) => check_output(&tp.elem),
        Type::Reference(tr) => {
            if !tr.lifetime.as_ref().is_some_and(|lt| lt.ident == "static") {
                return Err(Error::new(ty.span(),
                    "#[mockable] only supports 'static references in return types"));
            }
            check_output(&tr.elem)
        },
        Type::Slice(ts) => check_output(&ts.elem),
        Type::Tuple(tt) => tt.elems.iter().try_for_each(check_output),
        _ => Ok(())
    }
}

fn check_path_arguments(arguments: &PathArguments) -> Result<()> {
    match arguments {
        PathArguments::None => Ok(()),
        PathArguments::AngleBracketed(abga) => {
            for arg in abga.args.iter() {
                match arg {
                    GenericArgument::Lifetime(lt) if lt.ident != "static" =>
                        return Err(Error::new(lt.span(),
                            "#[mockable] only supports 'static lifetimes in return types")),
                    GenericArgument::Type(ty) => check_output(ty)?,
                    _ => ()
                }
            }
            Ok(())
        },
        PathArguments::Parenthesized(pga) => {
            pga.inputs.iter().try_for_each(check_output)?;
            match &pga.output {
                ReturnType::Default => Ok(()),
                ReturnType::Type(_, ty) => check_output(ty)
            }
        }
    }
}
