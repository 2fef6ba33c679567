//! Attribute parsing shared by the derives.

use syn::{Attribute, Path};

/// Options collected from every `#[variant(...)]` attribute on one item.
#[derive(Default)]
pub(crate) struct Options {
    /// `#[variant(empty)]`: this unit variant is the "nothing active" state.
    pub empty: bool,
    /// `#[variant(crate = some::path)]`: where `tether_core` lives.
    pub krate: Option<Path>,
}

/// Parse every `#[<attr_name>(...)]` in `attrs`.
///
/// `allow_crate` says whether `crate = path` is meaningful at this position
/// (on the enum itself, not on its variants).
pub(crate) fn parse_options(
    attrs: &[Attribute],
    attr_name: &str,
    allow_crate: bool,
) -> syn::Result<Options> {
    let mut options = Options::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident(attr_name)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("empty") && !allow_crate {
                if options.empty {
                    return Err(meta.error("[tether] duplicate `empty` option"));
                }
                options.empty = true;
                Ok(())
            } else if meta.path.is_ident("crate") && allow_crate {
                options.krate = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                let expected = if allow_crate {
                    "`crate = path`"
                } else {
                    "`empty`"
                };
                Err(meta.error(format!(
                    "[tether] unknown option for `#[{}]`, expected {}",
                    attr_name, expected
                )))
            }
        })?;
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    #[test]
    fn test_empty_marker() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[variant(empty)])];
        let options = parse_options(&attrs, "variant", false).unwrap();
        assert!(options.empty);
        assert!(options.krate.is_none());
    }

    #[test]
    fn test_crate_path() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[variant(crate = tether::tether_core)])];
        let options = parse_options(&attrs, "variant", true).unwrap();
        let krate = options.krate.expect("crate path");
        assert_eq!(krate.segments.len(), 2);
    }

    #[test]
    fn test_unrelated_attributes_ignored() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[doc = "hi"])];
        let options = parse_options(&attrs, "variant", false).unwrap();
        assert!(!options.empty);
    }

    #[test]
    fn test_options_are_positional() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[variant(empty)])];
        let err = parse_options(&attrs, "variant", true).err().expect("error");
        assert!(err.to_string().starts_with("[tether] unknown option"));
    }
}
