//! Catalog of recognized attributes.
//!
//! Every entry parses itself from a `syn::Attribute` whose path is exactly its
//! name, supplies the producer that validates its use, and exposes the
//! arguments the generator reads once validation has passed.

mod container;
mod field;
mod parse;
mod types;

pub use container::{Codable, CodingKeys, ContainerOptions, MemberInit};
pub use field::{
    default_expr, CodedAs, CodedAt, CodedBy, DefaultValue, IgnoreCoding, IgnoreDecoding,
    IgnoreEncoding, Initial, MemberOptions, VariantOptions,
};
pub use types::KeyStrategy;

use crate::diagnostics::{AttrRef, DiagnosticProducer};

pub trait Attribute: Sized {
    const NAME: &'static str;

    fn new(node: syn::Attribute) -> Self;

    fn node(&self) -> &syn::Attribute;

    fn diagnoser(&self) -> DiagnosticProducer;

    /// `Some` exactly when the node's path is the single identifier `NAME`.
    fn parse(node: &syn::Attribute) -> Option<Self> {
        if node.path().is_ident(Self::NAME) {
            Some(Self::new(node.clone()))
        } else {
            None
        }
    }

    fn attr_ref(&self) -> AttrRef {
        AttrRef::new(Self::NAME, self.node())
    }
}

#[derive(Debug, Clone)]
pub enum AnyAttribute {
    Codable(Codable),
    MemberInit(MemberInit),
    CodingKeys(CodingKeys),
    CodedAt(CodedAt),
    CodedAs(CodedAs),
    CodedBy(CodedBy),
    DefaultValue(DefaultValue),
    Initial(Initial),
    IgnoreCoding(IgnoreCoding),
    IgnoreDecoding(IgnoreDecoding),
    IgnoreEncoding(IgnoreEncoding),
}

impl AnyAttribute {
    pub fn parse(node: &syn::Attribute) -> Option<Self> {
        CATALOG.iter().find_map(|entry| (entry.parse)(node))
    }

    pub fn diagnoser(&self) -> DiagnosticProducer {
        match self {
            AnyAttribute::Codable(attr) => attr.diagnoser(),
            AnyAttribute::MemberInit(attr) => attr.diagnoser(),
            AnyAttribute::CodingKeys(attr) => attr.diagnoser(),
            AnyAttribute::CodedAt(attr) => attr.diagnoser(),
            AnyAttribute::CodedAs(attr) => attr.diagnoser(),
            AnyAttribute::CodedBy(attr) => attr.diagnoser(),
            AnyAttribute::DefaultValue(attr) => attr.diagnoser(),
            AnyAttribute::Initial(attr) => attr.diagnoser(),
            AnyAttribute::IgnoreCoding(attr) => attr.diagnoser(),
            AnyAttribute::IgnoreDecoding(attr) => attr.diagnoser(),
            AnyAttribute::IgnoreEncoding(attr) => attr.diagnoser(),
        }
    }
}

pub struct CatalogEntry {
    pub name: &'static str,
    pub parse: fn(&syn::Attribute) -> Option<AnyAttribute>,
}

pub static CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        name: Codable::NAME,
        parse: |node| Codable::parse(node).map(AnyAttribute::Codable),
    },
    CatalogEntry {
        name: MemberInit::NAME,
        parse: |node| MemberInit::parse(node).map(AnyAttribute::MemberInit),
    },
    CatalogEntry {
        name: CodingKeys::NAME,
        parse: |node| CodingKeys::parse(node).map(AnyAttribute::CodingKeys),
    },
    CatalogEntry {
        name: CodedAt::NAME,
        parse: |node| CodedAt::parse(node).map(AnyAttribute::CodedAt),
    },
    CatalogEntry {
        name: CodedAs::NAME,
        parse: |node| CodedAs::parse(node).map(AnyAttribute::CodedAs),
    },
    CatalogEntry {
        name: CodedBy::NAME,
        parse: |node| CodedBy::parse(node).map(AnyAttribute::CodedBy),
    },
    CatalogEntry {
        name: DefaultValue::NAME,
        parse: |node| DefaultValue::parse(node).map(AnyAttribute::DefaultValue),
    },
    CatalogEntry {
        name: Initial::NAME,
        parse: |node| Initial::parse(node).map(AnyAttribute::Initial),
    },
    CatalogEntry {
        name: IgnoreCoding::NAME,
        parse: |node| IgnoreCoding::parse(node).map(AnyAttribute::IgnoreCoding),
    },
    CatalogEntry {
        name: IgnoreDecoding::NAME,
        parse: |node| IgnoreDecoding::parse(node).map(AnyAttribute::IgnoreDecoding),
    },
    CatalogEntry {
        name: IgnoreEncoding::NAME,
        parse: |node| IgnoreEncoding::parse(node).map(AnyAttribute::IgnoreEncoding),
    },
];

pub fn is_catalog_attribute(node: &syn::Attribute) -> bool {
    CATALOG.iter().any(|entry| node.path().is_ident(entry.name))
}

/// Recognized attributes in source order.
pub fn scan(attrs: &[syn::Attribute]) -> Vec<AnyAttribute> {
    attrs.iter().filter_map(AnyAttribute::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn parse_matches_only_the_exact_name() {
        assert!(MemberInit::parse(&parse_quote!(#[member_init])).is_some());
        assert!(MemberInit::parse(&parse_quote!(#[member_init(x)])).is_some());
        assert!(MemberInit::parse(&parse_quote!(#[codable])).is_none());
        assert!(MemberInit::parse(&parse_quote!(#[codable::member_init])).is_none());
        assert!(MemberInit::parse(&parse_quote!(#[member_initializer])).is_none());
    }

    #[test]
    fn catalog_names_are_unique() {
        let mut names: Vec<&str> = CATALOG.iter().map(|entry| entry.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CATALOG.len());
    }

    #[test]
    fn scan_keeps_order_and_skips_foreign_attributes() {
        let attrs: Vec<syn::Attribute> = vec![
            parse_quote!(#[derive(Debug)]),
            parse_quote!(#[ignore_encoding]),
            parse_quote!(#[doc = "x"]),
            parse_quote!(#[coded_at("k")]),
        ];
        let found = scan(&attrs);
        assert_eq!(found.len(), 2);
        assert!(matches!(found[0], AnyAttribute::IgnoreEncoding(_)));
        assert!(matches!(found[1], AnyAttribute::CodedAt(_)));
        assert!(!is_catalog_attribute(&attrs[0]));
        assert!(is_catalog_attribute(&attrs[3]));
    }
}
