//! Field and variant attributes.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::spanned::Spanned;
use syn::{Expr, Path};

use super::parse::{
    self, check_expr_argument, check_key_argument, check_path_argument, no_arguments,
};
use super::Attribute;
use crate::decl::DeclKind;
use crate::diagnostics::{AttrRef, DiagnosticProducer, Severity};

const FIELD: &[DeclKind] = &[DeclKind::Field];

fn field_producer(
    attr: AttrRef,
    node: &syn::Attribute,
    check: fn(&syn::Attribute) -> syn::Result<()>,
    ignored: Option<Severity>,
) -> DiagnosticProducer {
    let mut producers = vec![
        DiagnosticProducer::Expect {
            attr: attr.clone(),
            kinds: FIELD,
        },
        DiagnosticProducer::CantDuplicate { attr: attr.clone() },
    ];
    if let Some(severity) = ignored {
        producers.push(DiagnosticProducer::CantBeCombined {
            attr: attr.clone(),
            other: IgnoreCoding::NAME,
            severity,
        });
    }
    producers.push(DiagnosticProducer::Arguments {
        attr,
        node: node.clone(),
        check,
    });
    DiagnosticProducer::Aggregated(producers)
}

macro_rules! field_attribute {
    ($(#[$doc:meta])* $ty:ident, $name:literal, $check:expr, $ignored:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $ty {
            node: syn::Attribute,
        }

        impl Attribute for $ty {
            const NAME: &'static str = $name;

            fn new(node: syn::Attribute) -> Self {
                Self { node }
            }

            fn node(&self) -> &syn::Attribute {
                &self.node
            }

            fn diagnoser(&self) -> DiagnosticProducer {
                field_producer(self.attr_ref(), &self.node, $check, $ignored)
            }
        }
    };
}

field_attribute!(
    /// `#[coded_at("key")]`: wire key of a field.
    CodedAt, "coded_at", check_key_argument, Some(Severity::Error)
);
field_attribute!(
    /// `#[coded_by(Helper)]`: `HelperCoder` used for a field.
    CodedBy, "coded_by", check_path_argument, Some(Severity::Error)
);
field_attribute!(
    /// `#[default_value(expr)]`: initializer default and decoding fallback.
    DefaultValue, "default_value", check_expr_argument, None
);
field_attribute!(
    /// `#[initial(expr)]`: the field's declared initial value.
    Initial, "initial", check_expr_argument, None
);
field_attribute!(IgnoreCoding, "ignore_coding", no_arguments, None);
field_attribute!(
    IgnoreDecoding, "ignore_decoding", no_arguments, Some(Severity::Warning)
);
field_attribute!(
    IgnoreEncoding, "ignore_encoding", no_arguments, Some(Severity::Warning)
);

/// `#[coded_as("key")]`: wire key of an enum variant.
#[derive(Debug, Clone)]
pub struct CodedAs {
    node: syn::Attribute,
}

impl Attribute for CodedAs {
    const NAME: &'static str = "coded_as";

    fn new(node: syn::Attribute) -> Self {
        Self { node }
    }

    fn node(&self) -> &syn::Attribute {
        &self.node
    }

    fn diagnoser(&self) -> DiagnosticProducer {
        let attr = self.attr_ref();
        DiagnosticProducer::Aggregated(vec![
            DiagnosticProducer::Expect {
                attr: attr.clone(),
                kinds: &[DeclKind::Variant],
            },
            DiagnosticProducer::CantDuplicate { attr: attr.clone() },
            DiagnosticProducer::Arguments {
                attr,
                node: self.node.clone(),
                check: check_key_argument,
            },
        ])
    }
}

/// Processed field attributes.
#[derive(Debug, Clone, Default)]
pub struct MemberOptions {
    pub key: Option<(String, Span)>,
    pub helper: Option<Path>,
    pub default: Option<Expr>,
    pub initial: Option<Expr>,
    pub ignore_decoding: bool,
    pub ignore_encoding: bool,
}

impl MemberOptions {
    pub fn from_attrs(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut options = MemberOptions::default();
        for attr in attrs {
            if CodedAt::parse(attr).is_some() {
                let key = parse::key_argument(attr)?;
                options.key = Some((key.value(), attr.span()));
            } else if CodedBy::parse(attr).is_some() {
                options.helper = Some(parse::path_argument(attr)?);
            } else if DefaultValue::parse(attr).is_some() {
                options.default = Some(parse::expr_argument(attr)?);
            } else if Initial::parse(attr).is_some() {
                options.initial = Some(parse::expr_argument(attr)?);
            } else if IgnoreCoding::parse(attr).is_some() {
                options.ignore_decoding = true;
                options.ignore_encoding = true;
            } else if IgnoreDecoding::parse(attr).is_some() {
                options.ignore_decoding = true;
            } else if IgnoreEncoding::parse(attr).is_some() {
                options.ignore_encoding = true;
            }
        }
        Ok(options)
    }

    /// Takes no part in coding at all and has no wire key.
    pub fn is_ignored(&self) -> bool {
        self.ignore_decoding && self.ignore_encoding
    }

    /// Value for the member when it is not read from the input.
    pub fn fallback(&self) -> TokenStream {
        match self.default.as_ref().or(self.initial.as_ref()) {
            Some(expr) => default_expr(expr),
            None => quote!(::core::default::Default::default()),
        }
    }
}

/// A default as it is assigned to its member. String literals go through
/// `Into` so they can initialize `String` members; anything else is used as
/// written, which keeps integer and float literals inferring to the member type.
pub fn default_expr(expr: &Expr) -> TokenStream {
    match expr {
        Expr::Lit(syn::ExprLit {
            lit: syn::Lit::Str(_),
            ..
        }) => quote!(::core::convert::Into::into(#expr)),
        _ => quote!(#expr),
    }
}

/// Processed variant attributes.
#[derive(Debug, Clone, Default)]
pub struct VariantOptions {
    pub key: Option<(String, Span)>,
}

impl VariantOptions {
    pub fn from_attrs(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut options = VariantOptions::default();
        for attr in attrs {
            if CodedAs::parse(attr).is_some() {
                let key = parse::key_argument(attr)?;
                options.key = Some((key.value(), attr.span()));
            }
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::Attached;
    use syn::parse_quote;

    fn field<'a>(attrs: &'a [syn::Attribute]) -> Attached<'a> {
        Attached {
            kind: DeclKind::Field,
            name: "value".to_string(),
            attrs,
        }
    }

    #[test]
    fn ignore_coding_sets_both_directions() {
        let attrs: Vec<syn::Attribute> = vec![parse_quote!(#[ignore_coding])];
        let options = MemberOptions::from_attrs(&attrs).unwrap();
        assert!(options.is_ignored());
    }

    #[test]
    fn fallback_prefers_default_value() {
        let attrs: Vec<syn::Attribute> = vec![
            parse_quote!(#[initial(1)]),
            parse_quote!(#[default_value(2)]),
        ];
        let options = MemberOptions::from_attrs(&attrs).unwrap();
        assert_eq!(options.fallback().to_string(), "2");
        assert_eq!(
            MemberOptions::default().fallback().to_string(),
            quote!(::core::default::Default::default()).to_string()
        );
    }

    #[test]
    fn only_string_defaults_are_converted() {
        assert_eq!(
            default_expr(&parse_quote!("x")).to_string(),
            quote!(::core::convert::Into::into("x")).to_string()
        );
        assert_eq!(default_expr(&parse_quote!(vec![1, 2])).to_string(), "vec ! [1 , 2]");
    }

    #[test]
    fn coded_at_conflicts_with_ignore_coding() {
        let attrs: Vec<syn::Attribute> = vec![
            parse_quote!(#[coded_at("k")]),
            parse_quote!(#[ignore_coding]),
        ];
        let coded_at = CodedAt::parse(&attrs[0]).unwrap();
        let found = coded_at.diagnoser().produce(&field(&attrs));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].severity, Severity::Error);
        assert_eq!(found[0].message, "#[coded_at] can't be combined with #[ignore_coding]");
    }

    #[test]
    fn redundant_ignore_is_a_warning() {
        let attrs: Vec<syn::Attribute> = vec![
            parse_quote!(#[ignore_coding]),
            parse_quote!(#[ignore_encoding]),
        ];
        let ignore = IgnoreEncoding::parse(&attrs[1]).unwrap();
        let found = ignore.diagnoser().produce(&field(&attrs));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].severity, Severity::Warning);
    }

    #[test]
    fn coded_as_belongs_on_variants() {
        let attrs: Vec<syn::Attribute> = vec![parse_quote!(#[coded_as("circle")])];
        let coded_as = CodedAs::parse(&attrs[0]).unwrap();
        let found = coded_as.diagnoser().produce(&field(&attrs));
        assert_eq!(found.len(), 1);
        assert!(found[0].message.contains("enum variant declarations, found field"));
    }
}
