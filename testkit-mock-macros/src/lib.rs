//! Procedural macros for testkit-mock
//!
//! This crate provides the `#[testkit_mock::mockable]` attribute macro, which
//! implements a trait for `testkit_mock::Mock` by forwarding every method to
//! `Mock::call`.
//!
//! # Example
//!
//! ```rust,ignore
//! use testkit_mock::{args, mockable, Mock};
//!
//! #[mockable]
//! trait Store {
//!     fn get(&self, key: &str) -> Option<String>;
//! }
//!
//! let store = Mock::new();
//! store.stub().call("get", args!["a"]).returns("1");
//! assert_eq!(store.get("a"), Some("1".to_string()));
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, FnArg, Ident, ItemTrait, Lit, Path, Token, TraitItem, TraitItemFn,
};

/// Configuration options for the mockable macro.
#[derive(Default)]
struct MockableConfig {
    /// Path to the testkit-mock crate (default: `::testkit_mock`)
    prefix: Option<Path>,
}

impl Parse for MockableConfig {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut config = MockableConfig::default();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "prefix" => {
                    let lit: Lit = input.parse()?;
                    if let Lit::Str(s) = lit {
                        config.prefix = Some(s.parse()?);
                    } else {
                        return Err(syn::Error::new_spanned(lit, "prefix must be a string"));
                    }
                }
                _ => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {ident}"),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(config)
    }
}

/// Implements a trait for `testkit_mock::Mock`.
///
/// Each method without a default body becomes a call to `Mock::call` with
/// the method name as the operation and the arguments converted with
/// `Value::from`. The outcome is converted to the return type with
/// `FromOutcome`. Methods with a default body keep it.
///
/// Requirements on the forwarded methods:
///
/// - a `self` receiver
/// - no generic parameters
/// - every argument type convertible into `Value`
/// - a return type implementing `FromOutcome`
///
/// # Configuration Options
///
/// - `prefix = "path"` - Path to the testkit-mock crate, for re-exports
///
/// ```rust,ignore
/// #[testkit_mock::mockable(prefix = "crate::support::mocking")]
/// trait Notifier {
///     fn notify(&self, user: u64, message: String) -> Result<(), NotifyError>;
/// }
/// ```
#[proc_macro_attribute]
pub fn mockable(attr: TokenStream, item: TokenStream) -> TokenStream {
    let config = parse_macro_input!(attr as MockableConfig);
    let input = parse_macro_input!(item as ItemTrait);

    expand_mockable(&config, &input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_mockable(config: &MockableConfig, input: &ItemTrait) -> syn::Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "mockable traits cannot have generic parameters",
        ));
    }

    let krate = config
        .prefix
        .clone()
        .unwrap_or_else(|| syn::parse_quote!(::testkit_mock));
    let trait_name = &input.ident;

    let methods = input
        .items
        .iter()
        .filter_map(|item| match item {
            TraitItem::Fn(method) if method.default.is_none() => Some(method),
            _ => None,
        })
        .map(|method| expand_method(&krate, method))
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(quote! {
        #input

        impl #trait_name for #krate::Mock {
            #(#methods)*
        }
    })
}

fn expand_method(krate: &Path, method: &TraitItemFn) -> syn::Result<TokenStream2> {
    let mut sig = method.sig.clone();

    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "mockable methods cannot have generic parameters",
        ));
    }
    if sig.asyncness.is_some() {
        return Err(syn::Error::new_spanned(
            sig.asyncness,
            "mockable methods cannot be async",
        ));
    }
    if !matches!(sig.inputs.first(), Some(FnArg::Receiver(_))) {
        return Err(syn::Error::new_spanned(
            &sig,
            "mockable methods must take a `self` receiver",
        ));
    }

    // Argument patterns may be anything; rename them so they can be forwarded.
    let mut arg_names = Vec::new();
    for (index, input) in sig.inputs.iter_mut().skip(1).enumerate() {
        if let FnArg::Typed(pat_type) = input {
            let name = format_ident!("__arg{}", index);
            *pat_type.pat = syn::parse_quote!(#name);
            arg_names.push(name);
        }
    }

    let operation = sig.ident.to_string();

    Ok(quote! {
        #sig {
            #krate::FromOutcome::from_outcome(
                #krate::Mock::call(
                    &self,
                    #operation,
                    ::std::vec![#(#krate::Value::from(#arg_names)),*],
                )
            )
        }
    })
}
