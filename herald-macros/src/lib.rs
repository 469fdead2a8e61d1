use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, LitStr, Path, parse_macro_input};

/// Derive macro for implementing the `EventKey` marker trait.
///
/// The type must also implement `Eq`, `Hash` and `Debug`, which are usually
/// derived alongside:
///
/// ```rust,ignore
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EventKey)]
/// enum Event {
///     Opened,
///     Closed,
/// }
/// ```
///
/// The impl names `::herald::EventKey`. Crates that depend on `herald-core`
/// directly can point elsewhere with `#[herald(crate = "herald_core")]`.
#[proc_macro_derive(EventKey, attributes(herald))]
pub fn derive_event_key(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    if let Data::Union(data) = &input.data {
        return syn::Error::new_spanned(data.union_token, "EventKey cannot be derived for unions")
            .to_compile_error()
            .into();
    }

    let krate = match crate_path(&input.attrs) {
        Ok(path) => path,
        Err(err) => return err.to_compile_error().into(),
    };

    let name = &input.ident;
    let mut generics = input.generics.clone();
    if !generics.params.is_empty() {
        // Generic keys are only keys when their parameters make them hashable.
        let (_, ty_generics, _) = input.generics.split_for_impl();
        generics.make_where_clause().predicates.push(syn::parse_quote! {
            #name #ty_generics: ::core::cmp::Eq
                + ::core::hash::Hash
                + ::core::fmt::Debug
                + ::core::marker::Send
                + ::core::marker::Sync
                + 'static
        });
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics #krate::EventKey for #name #ty_generics #where_clause {}
    };

    TokenStream::from(expanded)
}

fn crate_path(attrs: &[Attribute]) -> syn::Result<Path> {
    let mut krate: Path = syn::parse_quote!(::herald);

    for attr in attrs.iter().filter(|a| a.path().is_ident("herald")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let lit: LitStr = meta.value()?.parse()?;
                krate = lit.parse()?;
                Ok(())
            } else {
                Err(meta.error("unknown herald attribute, expected `crate`"))
            }
        })?;
    }

    Ok(krate)
}
