//! Generated coding-key enums.

use std::collections::BTreeMap;

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::{Ident, Visibility};

use crate::context::ExpansionContext;
use crate::diagnostics::{Diagnostic, FixIt};

/// One wire key: the enum variant naming it and the text it encodes as.
#[derive(Debug, Clone)]
pub struct KeyEntry {
    pub variant: Ident,
    pub value: String,
    /// Name of the member or variant the key belongs to.
    pub member: String,
    /// Where a collision on this key is reported.
    pub span: Span,
    /// Attribute that remaps this key.
    pub remap: &'static str,
}

#[derive(Debug, Clone)]
pub struct CodingKeyMap {
    pub ident: Ident,
    pub entries: Vec<KeyEntry>,
}

impl CodingKeyMap {
    pub fn new(type_ident: &Ident) -> Self {
        Self {
            ident: format_ident!("{}CodingKeys", type_ident),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: KeyEntry) {
        self.entries.push(entry);
    }

    /// `TypeCodingKeys::variant`.
    pub fn path(&self, variant: &Ident) -> TokenStream {
        let ident = &self.ident;
        quote!(#ident::#variant)
    }

    pub fn declarations(&self, vis: &Visibility) -> TokenStream {
        let ident = &self.ident;
        let variants: Vec<&Ident> = self.entries.iter().map(|entry| &entry.variant).collect();
        let values: Vec<&str> = self.entries.iter().map(|entry| entry.value.as_str()).collect();
        quote! {
            #[allow(non_camel_case_types, dead_code)]
            #[derive(Clone, Copy, Debug, PartialEq, Eq)]
            #vis enum #ident {
                #(#variants,)*
            }

            impl ::codable::CodingKey for #ident {
                fn string_value(&self) -> &'static str {
                    match *self {
                        #(Self::#variants => #values,)*
                    }
                }
            }
        }
    }
}

/// Report every key in `group` whose text an earlier key already uses.
/// Returns whether any collision was found.
pub fn check_collisions<'a>(
    type_name: &str,
    group: impl IntoIterator<Item = &'a KeyEntry>,
    ctx: &ExpansionContext,
) -> bool {
    let mut seen: BTreeMap<&str, &KeyEntry> = BTreeMap::new();
    let mut collided = false;
    for entry in group {
        match seen.get(entry.value.as_str()) {
            Some(first) => {
                collided = true;
                ctx.diagnose(
                    Diagnostic::error(
                        entry.span,
                        format!(
                            "coding key \"{}\" of `{}` collides with `{}` in `{}`",
                            entry.value, entry.member, first.member, type_name
                        ),
                    )
                    .with_fix_it(FixIt {
                        message: format!(
                            "give `{}` a distinct key with #[{}(\"...\")]",
                            entry.member, entry.remap
                        ),
                        replacement: None,
                    }),
                );
            }
            None => {
                seen.insert(entry.value.as_str(), entry);
            }
        }
    }
    collided
}
