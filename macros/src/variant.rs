//! Implementation of `#[derive(Variant)]`.
//!
//! Expands a user enum into the same triad the built-in `VariantN` types get:
//! reverse-order probing through `tether_core::variant`, a single mismatch
//! report when nothing fits, and nil for the empty variant.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Data, DeriveInput, Fields, Ident, LitStr, Path, Type, parse_macro_input, parse_quote,
};

use crate::common::parse_options;

const ATTR: &str = "variant";

pub fn derive_variant_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// One convertible alternative: `Name(Type)`.
struct Alternative {
    ident: Ident,
    ty: Type,
}

pub(crate) fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let options = parse_options(&input.attrs, ATTR, true)?;
    let krate: Path = options.krate.unwrap_or_else(|| parse_quote!(::tether_core));

    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "[tether] Variant can only be derived for enums",
        ));
    };

    let mut empty: Option<Ident> = None;
    let mut alternatives = Vec::new();
    for variant in &data.variants {
        let marked = parse_options(&variant.attrs, ATTR, false)?.empty;
        match &variant.fields {
            Fields::Unit if marked => {
                if empty.is_some() {
                    return Err(syn::Error::new_spanned(
                        variant,
                        "[tether] only one variant can be marked `#[variant(empty)]`",
                    ));
                }
                empty = Some(variant.ident.clone());
            }
            _ if marked => {
                return Err(syn::Error::new_spanned(
                    variant,
                    "[tether] `#[variant(empty)]` must be on a unit variant",
                ));
            }
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                alternatives.push(Alternative {
                    ident: variant.ident.clone(),
                    ty: fields.unnamed[0].ty.clone(),
                });
            }
            _ => {
                return Err(syn::Error::new_spanned(
                    variant,
                    "[tether] alternatives must be tuple variants with exactly one field",
                ));
            }
        }
    }

    let Some(empty) = empty else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "[tether] mark one unit variant with `#[variant(empty)]`",
        ));
    };
    if alternatives.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "[tether] Variant needs at least one alternative",
        ));
    }

    Ok(generate(&input, &krate, &empty, &alternatives))
}

fn generate(
    input: &DeriveInput,
    krate: &Path,
    empty: &Ident,
    alternatives: &[Alternative],
) -> TokenStream2 {
    let name = &input.ident;
    let name_str = LitStr::new(&name.to_string(), name.span());

    let mut generics = input.generics.clone();
    generics.params.push(parse_quote!(__S: #krate::Stack));
    let (impl_generics, _, _) = generics.split_for_impl();
    let (_, ty_generics, where_clause) = input.generics.split_for_impl();

    let idents: Vec<_> = alternatives.iter().map(|alt| &alt.ident).collect();
    let types: Vec<_> = alternatives.iter().map(|alt| &alt.ty).collect();

    let base_where = where_clause
        .cloned()
        .unwrap_or_else(|| parse_quote!(where));
    let mut push_where = base_where.clone();
    let mut marshal_where = base_where;
    for ty in &types {
        push_where
            .predicates
            .push(parse_quote!(#ty: #krate::Push<__S>));
        marshal_where
            .predicates
            .push(parse_quote!(#ty: #krate::Marshal<__S>));
    }

    quote! {
        impl #impl_generics #krate::Push<__S> for #name #ty_generics #push_where {
            const TYPE: #krate::Type = #krate::Type::Poly;

            fn push(self, stack: &mut __S) -> usize {
                match self {
                    Self::#empty => {
                        #krate::Stack::push_nil(stack);
                        1
                    }
                    #(Self::#idents(value) => #krate::Push::<__S>::push(value, stack),)*
                }
            }
        }

        impl #impl_generics #krate::Marshal<__S> for #name #ty_generics #marshal_where {
            fn check<__H: #krate::Handler + ?Sized>(
                stack: &__S,
                index: i32,
                handler: &mut __H,
                tracking: &mut #krate::Tracking,
            ) -> bool {
                let probes: &[#krate::variant::Probe<__S>] =
                    &[#(#krate::variant::probe::<__S, #types>),*];
                #krate::variant::check_alternatives(stack, index, handler, tracking, probes, #name_str)
            }

            fn get(stack: &mut __S, index: i32, tracking: &mut #krate::Tracking) -> Self {
                let index = #krate::Stack::abs_index(stack, index);
                let probes: &[#krate::variant::Probe<__S>] =
                    &[#(#krate::variant::probe::<__S, #types>),*];
                let getters: &[fn(&mut __S, i32, &mut #krate::Tracking) -> Self] = &[#(
                    |stack: &mut __S, index: i32, tracking: &mut #krate::Tracking| {
                        Self::#idents(<#types as #krate::Marshal<__S>>::get(stack, index, tracking))
                    }
                ),*];
                match #krate::variant::select_alternative(stack, index, probes) {
                    ::core::option::Option::Some(alternative) => {
                        getters[alternative](stack, index, tracking)
                    }
                    ::core::option::Option::None => {
                        tracking.use_slots(1);
                        Self::#empty
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_err(input: DeriveInput) -> String {
        expand(input).err().expect("expansion error").to_string()
    }

    #[test]
    fn test_expands_simple_enum() {
        let input: DeriveInput = parse_quote! {
            enum Scalar {
                #[variant(empty)]
                Nothing,
                Int(i64),
                Text(String),
            }
        };
        let tokens = expand(input).unwrap().to_string().replace(' ', "");
        assert!(tokens.contains("impl<__S:::tether_core::Stack>"));
        assert!(tokens.contains("select_alternative"));
        assert!(tokens.contains("\"Scalar\""));
    }

    #[test]
    fn test_custom_crate_path() {
        let input: DeriveInput = parse_quote! {
            #[variant(crate = tether::tether_core)]
            enum Scalar {
                #[variant(empty)]
                Nothing,
                Int(i64),
            }
        };
        let tokens = expand(input).unwrap().to_string().replace(' ', "");
        assert!(tokens.contains("tether::tether_core::Marshal"));
        assert!(!tokens.contains("<__S:::tether_core"));
    }

    #[test]
    fn test_generic_enum_keeps_user_bounds() {
        let input: DeriveInput = parse_quote! {
            enum Either<L, R> where L: Clone {
                #[variant(empty)]
                Neither,
                Left(L),
                Right(R),
            }
        };
        let tokens = expand(input).unwrap().to_string().replace(' ', "");
        assert!(tokens.contains("L:Clone"));
        assert!(tokens.contains("R:::tether_core::Marshal<__S>"));
    }

    #[test]
    fn test_rejects_struct() {
        let input: DeriveInput = parse_quote! {
            struct NotAnEnum(i64);
        };
        assert_eq!(
            expand_err(input),
            "[tether] Variant can only be derived for enums"
        );
    }

    #[test]
    fn test_requires_empty_variant() {
        let input: DeriveInput = parse_quote! {
            enum Scalar {
                Int(i64),
            }
        };
        assert_eq!(
            expand_err(input),
            "[tether] mark one unit variant with `#[variant(empty)]`"
        );
    }

    #[test]
    fn test_rejects_second_empty_variant() {
        let input: DeriveInput = parse_quote! {
            enum Scalar {
                #[variant(empty)]
                Nothing,
                #[variant(empty)]
                Nil,
                Int(i64),
            }
        };
        assert_eq!(
            expand_err(input),
            "[tether] only one variant can be marked `#[variant(empty)]`"
        );
    }

    #[test]
    fn test_rejects_unmarked_unit_variant() {
        let input: DeriveInput = parse_quote! {
            enum Scalar {
                #[variant(empty)]
                Nothing,
                Other,
            }
        };
        assert_eq!(
            expand_err(input),
            "[tether] alternatives must be tuple variants with exactly one field"
        );
    }

    #[test]
    fn test_rejects_named_fields() {
        let input: DeriveInput = parse_quote! {
            enum Scalar {
                #[variant(empty)]
                Nothing,
                Point { x: i64 },
            }
        };
        assert_eq!(
            expand_err(input),
            "[tether] alternatives must be tuple variants with exactly one field"
        );
    }

    #[test]
    fn test_rejects_marked_tuple_variant() {
        let input: DeriveInput = parse_quote! {
            enum Scalar {
                #[variant(empty)]
                Nothing(i64),
            }
        };
        assert_eq!(
            expand_err(input),
            "[tether] `#[variant(empty)]` must be on a unit variant"
        );
    }

    #[test]
    fn test_requires_an_alternative() {
        let input: DeriveInput = parse_quote! {
            enum Scalar {
                #[variant(empty)]
                Nothing,
            }
        };
        assert_eq!(
            expand_err(input),
            "[tether] Variant needs at least one alternative"
        );
    }
}
