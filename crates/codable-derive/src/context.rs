use std::cell::{Cell, RefCell};

use proc_macro2::Span;
use syn::Ident;

use crate::diagnostics::Diagnostic;

/// Per-invocation state: fresh names and collected diagnostics.
#[derive(Debug, Default)]
pub struct ExpansionContext {
    next_name: Cell<usize>,
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl ExpansionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A name no user code can refer to. Numbering restarts with every
    /// context, so the same input always gets the same names.
    pub fn fresh_name(&self, prefix: &str) -> Ident {
        let n = self.next_name.get();
        self.next_name.set(n + 1);
        Ident::new(&format!("__codable_{prefix}_{n}"), Span::mixed_site())
    }

    pub fn diagnose(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn extend(&self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.borrow_mut().extend(diagnostics);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.borrow().iter().any(Diagnostic::is_error)
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics.into_inner()
    }
}
