//! Declaration-level attributes.

use syn::Type;

use super::parse::{self, check_key_strategy, check_protocol_list, no_arguments};
use super::types::KeyStrategy;
use super::Attribute;
use crate::decl::DeclKind;
use crate::diagnostics::DiagnosticProducer;

const STRUCT_OR_ENUM: &[DeclKind] = &[DeclKind::Struct, DeclKind::Enum];

/// `#[codable]`, `#[codable(Decodable)]`, `#[codable(Encodable)]`.
#[derive(Debug, Clone)]
pub struct Codable {
    node: syn::Attribute,
}

impl Codable {
    /// Requested conformances, in the order written.
    pub fn protocols(&self) -> syn::Result<Vec<Type>> {
        parse::protocol_list(&self.node)
    }
}

impl Attribute for Codable {
    const NAME: &'static str = "codable";

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
                kinds: STRUCT_OR_ENUM,
            },
            DiagnosticProducer::CantDuplicate { attr: attr.clone() },
            DiagnosticProducer::Arguments {
                attr,
                node: self.node.clone(),
                check: check_protocol_list,
            },
        ])
    }
}

/// `#[member_init]`.
#[derive(Debug, Clone)]
pub struct MemberInit {
    node: syn::Attribute,
}

impl Attribute for MemberInit {
    const NAME: &'static str = "member_init";

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
                kinds: &[DeclKind::Struct],
            },
            DiagnosticProducer::CantDuplicate { attr: attr.clone() },
            DiagnosticProducer::Arguments {
                attr,
                node: self.node.clone(),
                check: no_arguments,
            },
        ])
    }
}

/// `#[coding_keys(rename_all = "camelCase")]`.
#[derive(Debug, Clone)]
pub struct CodingKeys {
    node: syn::Attribute,
}

impl CodingKeys {
    pub fn strategy(&self) -> syn::Result<KeyStrategy> {
        parse::key_strategy(&self.node)
    }
}

impl Attribute for CodingKeys {
    const NAME: &'static str = "coding_keys";

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
                kinds: STRUCT_OR_ENUM,
            },
            DiagnosticProducer::CantDuplicate { attr: attr.clone() },
            DiagnosticProducer::MustBeCombined {
                attr: attr.clone(),
                other: Codable::NAME,
            },
            DiagnosticProducer::Arguments {
                attr,
                node: self.node.clone(),
                check: check_key_strategy,
            },
        ])
    }
}

/// What the declaration-level attributes ask for. Read only after the
/// attributes have been validated.
#[derive(Debug, Default)]
pub struct ContainerOptions {
    /// `None` without `#[codable]`.
    pub protocols: Option<Vec<Type>>,
    pub member_init: bool,
    pub strategy: KeyStrategy,
}

impl ContainerOptions {
    pub fn from_attrs(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut options = ContainerOptions::default();
        for attr in attrs {
            if let Some(codable) = Codable::parse(attr) {
                options.protocols = Some(codable.protocols()?);
            } else if MemberInit::parse(attr).is_some() {
                options.member_init = true;
            } else if let Some(keys) = CodingKeys::parse(attr) {
                options.strategy = keys.strategy()?;
            }
        }
        Ok(options)
    }
}
