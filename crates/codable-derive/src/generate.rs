//! Expansion of one annotated declaration: scan, validate, build, emit.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Generics, Ident, Item};

use crate::attrs::{self, ContainerOptions};
use crate::context::ExpansionContext;
use crate::decl::Declaration;
use crate::diagnostics::{to_compile_tokens, Diagnostic};
use crate::init_gen::Initializer;
use crate::variable::{Method, TypeGenerated, TypeVariable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Rejected,
}

#[derive(Debug)]
pub struct Expansion {
    /// The declaration with catalog attributes removed.
    pub item: Item,
    /// Generated siblings; empty when rejected.
    pub generated: Vec<TokenStream>,
    pub diagnostics: Vec<Diagnostic>,
    pub outcome: Outcome,
}

impl Expansion {
    pub fn into_token_stream(self) -> TokenStream {
        let item = &self.item;
        let generated: &[TokenStream] = match self.outcome {
            Outcome::Accepted => &self.generated,
            Outcome::Rejected => &[],
        };
        let diagnostics = to_compile_tokens(&self.diagnostics);
        quote! {
            #item
            #(#generated)*
            #diagnostics
        }
    }
}

pub fn expand(decl: &Declaration) -> Expansion {
    let ctx = ExpansionContext::new();

    for target in decl.targets() {
        for attr in attrs::scan(target.attrs) {
            ctx.extend(attr.diagnoser().produce(&target));
        }
    }

    let generated = if ctx.has_errors() {
        Vec::new()
    } else {
        build(decl, &ctx)
    };

    let (generated, outcome) = if ctx.has_errors() {
        (Vec::new(), Outcome::Rejected)
    } else {
        (generated, Outcome::Accepted)
    };

    Expansion {
        item: decl.stripped_item(),
        generated,
        diagnostics: ctx.into_diagnostics(),
        outcome,
    }
}

fn build(decl: &Declaration, ctx: &ExpansionContext) -> Vec<TokenStream> {
    let options = match ContainerOptions::from_attrs(&decl.attrs) {
        Ok(options) => options,
        Err(err) => {
            ctx.extend(Diagnostic::from_syn(err));
            return Vec::new();
        }
    };

    let mut generated = Vec::new();

    if options.member_init {
        match Initializer::new(decl) {
            Ok(Some(init)) => generated.push(init.to_token_stream()),
            Ok(None) => {}
            Err(err) => ctx.extend(Diagnostic::from_syn(err)),
        }
    }

    if let Some(conforming_to) = &options.protocols {
        match TypeVariable::new(decl, options.strategy) {
            Ok(Some(variable)) => {
                generated.extend(variable.coding_keys(conforming_to, ctx));
                for method in [Method::DECODE, Method::ENCODE] {
                    if let Some(output) = variable.synthesize(ctx, method, conforming_to) {
                        generated.push(conformance_impl(
                            variable.ident(),
                            variable.generics(),
                            method,
                            output,
                        ));
                    }
                }
            }
            Ok(None) => {}
            Err(err) => ctx.extend(Diagnostic::from_syn(err)),
        }
    }

    generated
}

fn conformance_impl(
    ident: &Ident,
    generics: &Generics,
    method: Method,
    output: TypeGenerated,
) -> TokenStream {
    let mut generics = generics.clone();
    generics
        .make_where_clause()
        .predicates
        .extend(output.predicates);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let conformance = &output.conformance;
    let signature = method.signature();
    let code = &output.code;
    quote! {
        #[automatically_derived]
        impl #impl_generics #conformance for #ident #ty_generics #where_clause {
            #signature {
                #code
            }
        }
    }
}
