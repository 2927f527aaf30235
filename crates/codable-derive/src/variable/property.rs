use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, Type};

use super::keys::KeyEntry;
use super::Variable;
use crate::attrs::{default_expr, MemberOptions};
use crate::context::ExpansionContext;

/// A keyed container slot.
#[derive(Debug, Clone)]
pub struct PropertyCodingLocation {
    pub container: Ident,
    /// Coding key expression, `TypeCodingKeys::member`.
    pub key: TokenStream,
    /// Reference to the member's value; read when encoding.
    pub access: TokenStream,
}

/// One stored member.
#[derive(Debug, Clone)]
pub struct PropertyVariable {
    /// Local binding used while decoding and when matching enum variants.
    pub ident: Ident,
    pub ty: Type,
    /// Field access on the owning struct, `a` or `0`.
    pub accessor: TokenStream,
    pub key: KeyEntry,
    pub options: MemberOptions,
}

impl PropertyVariable {
    pub fn is_decoded(&self) -> bool {
        !self.options.ignore_decoding
    }

    pub fn is_encoded(&self) -> bool {
        !self.options.ignore_encoding
    }
}

impl Variable for PropertyVariable {
    type CodingLocation = PropertyCodingLocation;
    type Generated = TokenStream;

    fn decoding(&self, ctx: &ExpansionContext, location: &PropertyCodingLocation) -> TokenStream {
        let ident = &self.ident;
        let ty = &self.ty;
        if !self.is_decoded() {
            let fallback = self.options.fallback();
            return quote!(let #ident: #ty = #fallback;);
        }

        let container = &location.container;
        let key = &location.key;
        match (&self.options.helper, &self.options.default) {
            (Some(helper), Some(default)) => {
                let value = ctx.fresh_name("value");
                let default = default_expr(default);
                quote! {
                    let #ident: #ty = match #container.decode_with_if_present::<#helper>(#key) {
                        ::core::result::Result::Ok(::core::option::Option::Some(#value)) => #value,
                        _ => #default,
                    };
                }
            }
            (Some(helper), None) => quote! {
                let #ident: #ty = #container.decode_with::<#helper>(#key)?;
            },
            (None, Some(default)) => {
                let value = ctx.fresh_name("value");
                let default = default_expr(default);
                quote! {
                    let #ident: #ty = match #container.decode_if_present::<#ty>(#key) {
                        ::core::result::Result::Ok(::core::option::Option::Some(#value)) => #value,
                        _ => #default,
                    };
                }
            }
            (None, None) => quote! {
                let #ident: #ty = #container.decode::<#ty>(#key)?;
            },
        }
    }

    fn encoding(&self, _ctx: &ExpansionContext, location: &PropertyCodingLocation) -> TokenStream {
        if !self.is_encoded() {
            return TokenStream::new();
        }

        let container = &location.container;
        let key = &location.key;
        let access = &location.access;
        match &self.options.helper {
            Some(helper) => quote! {
                #container.encode_with::<#helper>(#access, #key)?;
            },
            None => quote! {
                #container.encode(#access, #key)?;
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proc_macro2::Span;
    use syn::parse_quote;

    fn variable(attrs: Vec<syn::Attribute>) -> PropertyVariable {
        PropertyVariable {
            ident: parse_quote!(count),
            ty: parse_quote!(u32),
            accessor: quote!(count),
            key: KeyEntry {
                variant: parse_quote!(count),
                value: "count".to_string(),
                member: "count".to_string(),
                span: Span::call_site(),
                remap: "coded_at",
            },
            options: MemberOptions::from_attrs(&attrs).unwrap(),
        }
    }

    fn location() -> PropertyCodingLocation {
        PropertyCodingLocation {
            container: parse_quote!(container),
            key: quote!(CounterCodingKeys::count),
            access: quote!(&self.count),
        }
    }

    #[test]
    fn plain_members_decode_and_encode_by_key() {
        let ctx = ExpansionContext::new();
        let member = variable(Vec::new());
        assert_eq!(
            member.decoding(&ctx, &location()).to_string(),
            quote!(let count: u32 = container.decode::<u32>(CounterCodingKeys::count)?;).to_string()
        );
        assert_eq!(
            member.encoding(&ctx, &location()).to_string(),
            quote!(container.encode(&self.count, CounterCodingKeys::count)?;).to_string()
        );
    }

    #[test]
    fn helpers_route_both_directions() {
        let ctx = ExpansionContext::new();
        let member = variable(vec![parse_quote!(#[coded_by(AsString)])]);
        assert!(member
            .decoding(&ctx, &location())
            .to_string()
            .contains("decode_with :: < AsString >"));
        assert!(member
            .encoding(&ctx, &location())
            .to_string()
            .contains("encode_with :: < AsString >"));
    }

    #[test]
    fn defaults_cover_missing_and_invalid_values() {
        let ctx = ExpansionContext::new();
        let member = variable(vec![parse_quote!(#[default_value(7)])]);
        let decoded = member.decoding(&ctx, &location()).to_string();
        assert!(decoded.contains("decode_if_present :: < u32 >"));
        assert!(decoded.contains("_ => 7"));
    }

    #[test]
    fn ignored_members_produce_nothing_for_their_direction() {
        let ctx = ExpansionContext::new();
        let member = variable(vec![parse_quote!(#[ignore_encoding])]);
        assert!(member.encoding(&ctx, &location()).is_empty());

        let member = variable(vec![parse_quote!(#[ignore_decoding])]);
        assert_eq!(
            member.decoding(&ctx, &location()).to_string(),
            quote!(let count: u32 = ::core::default::Default::default();).to_string()
        );
    }
}
