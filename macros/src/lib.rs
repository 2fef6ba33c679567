//! Procedural macros for tether.
//!
//! - `#[derive(Variant)]` - Give a user enum the sum type conversions

extern crate proc_macro;

use proc_macro::TokenStream;

mod common;
mod variant;

/// Derive `Push` and `Marshal` for an enum of alternatives.
///
/// Each alternative is a tuple variant with one convertible field. Exactly
/// one unit variant, marked `#[variant(empty)]`, stands for "no alternative"
/// and maps to nil.
///
/// # Example
///
/// ```ignore
/// use tether_macros::Variant;
///
/// #[derive(Variant)]
/// enum Setting {
///     #[variant(empty)]
///     Unset,
///     Flag(bool),
///     Level(i64),
///     Name(String),
/// }
/// ```
///
/// # Resolution
///
/// Reading probes the alternatives **bottom-up** and takes the first one
/// whose checker accepts the value. Above, the integer `3` reads as
/// `Name("3")` because strings accept numbers; list narrower types last to
/// prefer them.
///
/// # Crate path
///
/// Generated code names `::tether_core`. When only the `tether` facade is a
/// dependency, point the derive at its re-export:
///
/// ```ignore
/// #[derive(tether::Variant)]
/// #[variant(crate = tether::tether_core)]
/// enum Setting { /* ... */ }
/// ```
///
/// # Limitations
///
/// - Only enums are supported
/// - Alternatives with named fields or several fields are rejected
#[proc_macro_derive(Variant, attributes(variant))]
pub fn derive_variant(input: TokenStream) -> TokenStream {
    variant::derive_variant_impl(input)
}
