//! Attribute macros behind the `codable` crate.
//!
//! `#[codable]` generates a coding-key enum plus `Decodable`/`Encodable`
//! impls; `#[member_init]` generates a memberwise `new`. Whichever marker
//! expands first handles every catalog attribute on the declaration and
//! strips them, so later markers never see the item again.

mod attrs;
mod context;
mod decl;
mod diagnostics;
mod generate;
mod init_gen;
mod variable;

use proc_macro::TokenStream;
use proc_macro2::Span;
use syn::parse_quote;

use decl::Declaration;

#[proc_macro_attribute]
pub fn codable(args: TokenStream, input: TokenStream) -> TokenStream {
    expand_marker("codable", args.into(), input.into()).into()
}

#[proc_macro_attribute]
pub fn member_init(args: TokenStream, input: TokenStream) -> TokenStream {
    expand_marker("member_init", args.into(), input.into()).into()
}

fn expand_marker(
    name: &str,
    args: proc_macro2::TokenStream,
    input: proc_macro2::TokenStream,
) -> proc_macro2::TokenStream {
    let item: syn::Item = match syn::parse2(input) {
        Ok(item) => item,
        Err(err) => return err.to_compile_error(),
    };
    let decl = Declaration::from_item(item).with_marker(marker_attribute(name, args));
    generate::expand(&decl).into_token_stream()
}

/// The invoking marker as the attribute it was written as.
fn marker_attribute(name: &str, args: proc_macro2::TokenStream) -> syn::Attribute {
    let ident = syn::Ident::new(name, Span::call_site());
    if args.is_empty() {
        parse_quote!(#[#ident])
    } else {
        parse_quote!(#[#ident(#args)])
    }
}
