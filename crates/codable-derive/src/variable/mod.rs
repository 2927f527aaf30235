//! Things that can be coded: stored members and whole types.

mod keys;
mod property;
mod type_variable;

pub use type_variable::{TypeGenerated, TypeVariable};

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::Ident;

use crate::context::ExpansionContext;

pub trait Variable {
    /// Where the generated code reads from or writes to.
    type CodingLocation;
    type Generated;

    fn decoding(&self, ctx: &ExpansionContext, location: &Self::CodingLocation) -> Self::Generated;

    fn encoding(&self, ctx: &ExpansionContext, location: &Self::CodingLocation) -> Self::Generated;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Decode,
    Encode,
}

/// A conformance method to synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Method {
    pub name: &'static str,
    pub protocol: &'static str,
    pub arg_name: &'static str,
    pub direction: Direction,
}

impl Method {
    pub const DECODE: Method = Method {
        name: "decode",
        protocol: "Decodable",
        arg_name: "decoder",
        direction: Direction::Decode,
    };

    pub const ENCODE: Method = Method {
        name: "encode",
        protocol: "Encodable",
        arg_name: "encoder",
        direction: Direction::Encode,
    };

    pub fn ident(&self) -> Ident {
        Ident::new(self.name, Span::call_site())
    }

    pub fn arg_ident(&self) -> Ident {
        Ident::new(self.arg_name, Span::mixed_site())
    }

    pub fn arg_type(&self) -> TokenStream {
        match self.direction {
            Direction::Decode => quote!(&::codable::Decoder<'_>),
            Direction::Encode => quote!(&mut ::codable::Encoder),
        }
    }

    pub fn protocol_path(&self) -> TokenStream {
        let protocol = Ident::new(self.protocol, Span::call_site());
        quote!(::codable::#protocol)
    }

    /// `fn decode(decoder: ...) -> Result<Self, _>` or
    /// `fn encode(&self, encoder: ...) -> Result<(), _>`.
    pub fn signature(&self) -> TokenStream {
        let name = self.ident();
        let arg = self.arg_ident();
        let arg_type = self.arg_type();
        match self.direction {
            Direction::Decode => quote! {
                fn #name(#arg: #arg_type) -> ::core::result::Result<Self, ::codable::CodingError>
            },
            Direction::Encode => quote! {
                fn #name(&self, #arg: #arg_type) -> ::core::result::Result<(), ::codable::CodingError>
            },
        }
    }
}
