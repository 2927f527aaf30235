//! Diagnostics and the composable producers that validate attribute usage.
//!
//! Every recognized attribute supplies a [`DiagnosticProducer`]. Producers are
//! plain data: running one is a pure function of the attached declaration, so
//! the same input always yields the same findings in the same order.

use proc_macro2::{Span, TokenStream};
use quote::quote_spanned;
use syn::spanned::Spanned;

use crate::decl::{Attached, DeclKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Suggested edit attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixIt {
    pub message: String,
    pub replacement: Option<String>,
}

impl FixIt {
    pub fn remove(attr: &AttrRef) -> Self {
        Self {
            message: format!("remove {}", attr.display()),
            replacement: Some(String::new()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Span,
    pub fix_it: Option<FixIt>,
}

impl Diagnostic {
    pub fn error(span: Span, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            span,
            fix_it: None,
        }
    }

    pub fn warning(span: Span, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            span,
            fix_it: None,
        }
    }

    pub fn with_fix_it(mut self, fix_it: FixIt) -> Self {
        self.fix_it = Some(fix_it);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// One error diagnostic per message carried by `err`.
    pub fn from_syn(err: syn::Error) -> Vec<Self> {
        err.into_iter()
            .map(|e| Self::error(e.span(), e.to_string()))
            .collect()
    }

    /// Message text as shown to the user, fix-it included.
    pub fn rendered_message(&self) -> String {
        match &self.fix_it {
            Some(fix_it) => format!("{}\n\nhelp: {}", self.message, fix_it.message),
            None => self.message.clone(),
        }
    }

    pub fn to_tokens(&self) -> TokenStream {
        match self.severity {
            Severity::Error => syn::Error::new(self.span, self.rendered_message()).to_compile_error(),
            Severity::Warning => {
                // Stable procedural macros cannot emit warnings, so route the
                // message through the deprecation lint at the diagnostic's span.
                let note = self.rendered_message();
                let name = syn::Ident::new("codable_warning", self.span);
                quote_spanned! {self.span=>
                    const _: () = {
                        #[deprecated(note = #note)]
                        #[allow(non_upper_case_globals)]
                        const #name: () = ();
                        let _ = #name;
                    };
                }
            }
        }
    }
}

/// Render diagnostics in order.
pub fn to_compile_tokens(diagnostics: &[Diagnostic]) -> TokenStream {
    diagnostics.iter().map(Diagnostic::to_tokens).collect()
}

/// The attribute a producer reports about.
#[derive(Debug, Clone)]
pub struct AttrRef {
    pub name: &'static str,
    pub span: Span,
}

impl AttrRef {
    pub fn new(name: &'static str, node: &syn::Attribute) -> Self {
        Self {
            name,
            span: node.span(),
        }
    }

    pub fn display(&self) -> String {
        format!("#[{}]", self.name)
    }
}

/// Validation rule over an attribute and the declaration it is attached to.
#[derive(Debug, Clone)]
pub enum DiagnosticProducer {
    /// The attached declaration's kind must be one of `kinds`.
    Expect {
        attr: AttrRef,
        kinds: &'static [DeclKind],
    },
    /// The attribute may appear only once on a declaration.
    CantDuplicate { attr: AttrRef },
    /// The attribute conflicts with `other` on the same declaration.
    CantBeCombined {
        attr: AttrRef,
        other: &'static str,
        severity: Severity,
    },
    /// The attribute needs `other` on the same declaration.
    MustBeCombined { attr: AttrRef, other: &'static str },
    /// The attribute's arguments must parse.
    Arguments {
        attr: AttrRef,
        node: syn::Attribute,
        check: fn(&syn::Attribute) -> syn::Result<()>,
    },
    /// Runs every producer and concatenates their findings in order.
    Aggregated(Vec<DiagnosticProducer>),
}

impl DiagnosticProducer {
    pub fn produce(&self, target: &Attached<'_>) -> Vec<Diagnostic> {
        match self {
            DiagnosticProducer::Expect { attr, kinds } => {
                if kinds.contains(&target.kind) {
                    return Vec::new();
                }
                vec![Diagnostic::error(
                    attr.span,
                    format!(
                        "{} can only be attached to {} declarations, found {} `{}`",
                        attr.display(),
                        DeclKind::describe(kinds),
                        target.kind,
                        target.name,
                    ),
                )
                .with_fix_it(FixIt::remove(attr))]
            }
            DiagnosticProducer::CantDuplicate { attr } => {
                if target.count(attr.name) <= 1 {
                    return Vec::new();
                }
                vec![Diagnostic::error(
                    attr.span,
                    format!(
                        "{} can only be applied once to `{}`",
                        attr.display(),
                        target.name
                    ),
                )
                .with_fix_it(FixIt::remove(attr))]
            }
            DiagnosticProducer::CantBeCombined {
                attr,
                other,
                severity,
            } => {
                if target.count(other) == 0 {
                    return Vec::new();
                }
                let diagnostic = match severity {
                    Severity::Error => Diagnostic::error(
                        attr.span,
                        format!("{} can't be combined with #[{}]", attr.display(), other),
                    ),
                    Severity::Warning => Diagnostic::warning(
                        attr.span,
                        format!("{} is redundant alongside #[{}]", attr.display(), other),
                    ),
                };
                vec![diagnostic.with_fix_it(FixIt::remove(attr))]
            }
            DiagnosticProducer::MustBeCombined { attr, other } => {
                if target.count(other) > 0 {
                    return Vec::new();
                }
                vec![Diagnostic::error(
                    attr.span,
                    format!("{} must be combined with #[{}]", attr.display(), other),
                )
                .with_fix_it(FixIt {
                    message: format!("add #[{other}] to `{}`", target.name),
                    replacement: Some(format!("#[{other}]")),
                })]
            }
            DiagnosticProducer::Arguments { attr, node, check } => match check(node) {
                Ok(()) => Vec::new(),
                Err(err) => err
                    .into_iter()
                    .map(|e| {
                        Diagnostic::error(
                            e.span(),
                            format!("invalid arguments to {}: {}", attr.display(), e),
                        )
                    })
                    .collect(),
            },
            DiagnosticProducer::Aggregated(producers) => producers
                .iter()
                .flat_map(|producer| producer.produce(target))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn attached<'a>(kind: DeclKind, attrs: &'a [syn::Attribute]) -> Attached<'a> {
        Attached {
            kind,
            name: "Target".to_string(),
            attrs,
        }
    }

    fn check_no_args(node: &syn::Attribute) -> syn::Result<()> {
        node.meta.require_path_only().map(|_| ())
    }

    #[test]
    fn expect_names_offending_and_allowed_kinds() {
        let attrs: Vec<syn::Attribute> = vec![parse_quote!(#[member_init])];
        let producer = DiagnosticProducer::Expect {
            attr: AttrRef::new("member_init", &attrs[0]),
            kinds: &[DeclKind::Struct],
        };
        assert!(producer.produce(&attached(DeclKind::Struct, &attrs)).is_empty());

        let found = producer.produce(&attached(DeclKind::Enum, &attrs));
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].message,
            "#[member_init] can only be attached to struct declarations, found enum `Target`"
        );
        assert_eq!(found[0].fix_it, Some(FixIt::remove(&AttrRef::new("member_init", &attrs[0]))));
    }

    #[test]
    fn aggregated_keeps_declared_order_without_short_circuit() {
        let attrs: Vec<syn::Attribute> = vec![
            parse_quote!(#[ignore_decoding(extra)]),
            parse_quote!(#[ignore_coding]),
        ];
        let attr = AttrRef::new("ignore_decoding", &attrs[0]);
        let producer = DiagnosticProducer::Aggregated(vec![
            DiagnosticProducer::Expect {
                attr: attr.clone(),
                kinds: &[DeclKind::Field],
            },
            DiagnosticProducer::CantBeCombined {
                attr: attr.clone(),
                other: "ignore_coding",
                severity: Severity::Warning,
            },
            DiagnosticProducer::Arguments {
                attr,
                node: attrs[0].clone(),
                check: check_no_args,
            },
        ]);

        let found = producer.produce(&attached(DeclKind::Variant, &attrs));
        let severities: Vec<Severity> = found.iter().map(|d| d.severity).collect();
        assert_eq!(
            severities,
            vec![Severity::Error, Severity::Warning, Severity::Error]
        );
        assert!(found[0].message.contains("found enum variant"));
        assert!(found[1].message.contains("redundant"));
        assert!(found[2]
            .message
            .starts_with("invalid arguments to #[ignore_decoding]: "));
    }

    #[test]
    fn must_be_combined_suggests_the_companion() {
        let attrs: Vec<syn::Attribute> = vec![parse_quote!(#[coding_keys(rename_all = "snake_case")])];
        let producer = DiagnosticProducer::MustBeCombined {
            attr: AttrRef::new("coding_keys", &attrs[0]),
            other: "codable",
        };
        let found = producer.produce(&attached(DeclKind::Struct, &attrs));
        assert_eq!(found.len(), 1);
        let fix_it = found[0].fix_it.as_ref().unwrap();
        assert_eq!(fix_it.replacement.as_deref(), Some("#[codable]"));
    }

    #[test]
    fn rendered_message_appends_help() {
        let diagnostic = Diagnostic::error(Span::call_site(), "bad").with_fix_it(FixIt {
            message: "do better".to_string(),
            replacement: None,
        });
        assert_eq!(diagnostic.rendered_message(), "bad\n\nhelp: do better");
    }

    #[test]
    fn warnings_render_through_the_deprecation_lint() {
        let tokens = Diagnostic::warning(Span::call_site(), "careful").to_tokens();
        let text = tokens.to_string();
        assert!(text.contains("deprecated"));
        assert!(text.contains("\"careful\""));
    }
}
