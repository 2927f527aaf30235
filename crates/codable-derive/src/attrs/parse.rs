//! Argument parsing for catalog attributes.
//!
//! Each function doubles as the `Arguments` check of the attribute it parses,
//! so validation and generation read arguments the same way.

use darling::FromMeta;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, LitStr, Meta, Path, Token, Type};

use super::types::KeyStrategy;

/// Arguments of `#[coding_keys(...)]`.
#[derive(Debug, Default, FromMeta)]
struct CodingKeysArgs {
    rename_all: Option<KeyStrategy>,
}

/// `#[name]` with nothing after it.
pub fn no_arguments(node: &Attribute) -> syn::Result<()> {
    node.meta.require_path_only().map(|_| ())
}

/// `#[name("key")]`; the key must not be empty.
pub fn key_argument(node: &Attribute) -> syn::Result<LitStr> {
    let key: LitStr = node.parse_args()?;
    if key.value().is_empty() {
        return Err(syn::Error::new(key.span(), "coding key must not be empty"));
    }
    Ok(key)
}

pub fn check_key_argument(node: &Attribute) -> syn::Result<()> {
    key_argument(node).map(|_| ())
}

/// `#[coded_by(path::to::Helper)]`.
pub fn path_argument(node: &Attribute) -> syn::Result<Path> {
    node.parse_args()
}

pub fn check_path_argument(node: &Attribute) -> syn::Result<()> {
    path_argument(node).map(|_| ())
}

/// `#[default_value(expr)]`, `#[initial(expr)]`.
pub fn expr_argument(node: &Attribute) -> syn::Result<Expr> {
    node.parse_args()
}

pub fn check_expr_argument(node: &Attribute) -> syn::Result<()> {
    expr_argument(node).map(|_| ())
}

/// Protocols requested by `#[codable]` or `#[codable(A, B)]`. The bare form
/// requests both directions.
pub fn protocol_list(node: &Attribute) -> syn::Result<Vec<Type>> {
    match &node.meta {
        Meta::Path(_) => Ok(vec![
            syn::parse_quote!(Decodable),
            syn::parse_quote!(Encodable),
        ]),
        Meta::List(list) => {
            let types = list.parse_args_with(Punctuated::<Type, Token![,]>::parse_terminated)?;
            Ok(types.into_iter().collect())
        }
        Meta::NameValue(meta) => Err(syn::Error::new_spanned(
            meta,
            "expected #[codable] or #[codable(Decodable, Encodable)]",
        )),
    }
}

pub fn check_protocol_list(node: &Attribute) -> syn::Result<()> {
    protocol_list(node).map(|_| ())
}

/// Key strategy from `#[coding_keys(rename_all = "...")]`.
pub fn key_strategy(node: &Attribute) -> syn::Result<KeyStrategy> {
    CodingKeysArgs::from_meta(&node.meta)
        .map(|args| args.rename_all.unwrap_or_default())
        .map_err(|err| syn::Error::new(err.span(), err.to_string()))
}

pub fn check_key_strategy(node: &Attribute) -> syn::Result<()> {
    key_strategy(node).map(|_| ())
}
