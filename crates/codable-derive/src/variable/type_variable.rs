use proc_macro2::TokenStream;
use quote::{format_ident, quote, ToTokens};
use syn::{Generics, Ident, Type, Visibility, WherePredicate};

use super::keys::{check_collisions, CodingKeyMap, KeyEntry};
use super::property::{PropertyCodingLocation, PropertyVariable};
use super::{Direction, Method, Variable};
use crate::attrs::{KeyStrategy, MemberOptions, VariantOptions};
use crate::context::ExpansionContext;
use crate::decl::{Declaration, DeclKind, FieldStyle, Member};

/// The conformance method being synthesized.
#[derive(Debug, Clone)]
pub struct TypeCodingLocation {
    pub method: Method,
    /// The requested conformance for `method`; `None` when it was not requested.
    pub conformance: Option<Type>,
}

#[derive(Debug, Clone)]
pub struct TypeGenerated {
    /// Method body.
    pub code: TokenStream,
    /// Where-clause additions for the conformance impl.
    pub predicates: Vec<WherePredicate>,
    pub conformance: Type,
}

/// Look up `named` among the requested protocols.
///
/// A candidate spelled exactly `named` is returned as written. Failing that,
/// any candidate whose text merely contains `named` (a qualified path, say)
/// yields a type built from the bare name. This is a textual match, so an
/// unrelated name containing `named` also matches.
pub fn protocol(named: &str, candidates: &[Type]) -> Option<Type> {
    let texts: Vec<String> = candidates
        .iter()
        .map(|candidate| candidate.to_token_stream().to_string().trim().to_string())
        .collect();
    if let Some(index) = texts.iter().position(|text| text == named) {
        return Some(candidates[index].clone());
    }
    if texts.iter().any(|text| text.contains(named)) {
        return syn::parse_str(named).ok();
    }
    None
}

pub fn protocols(names: &[&str], candidates: &[Type]) -> Vec<Type> {
    names
        .iter()
        .filter_map(|name| protocol(name, candidates))
        .collect()
}

#[derive(Debug, Clone)]
pub enum TypeVariable {
    Struct(StructVariable),
    Enum(EnumVariable),
}

#[derive(Debug, Clone)]
pub struct StructVariable {
    pub ident: Ident,
    pub vis: Visibility,
    pub generics: Generics,
    pub style: FieldStyle,
    pub members: Vec<PropertyVariable>,
    pub keys: CodingKeyMap,
}

#[derive(Debug, Clone)]
pub struct EnumVariable {
    pub ident: Ident,
    pub vis: Visibility,
    pub generics: Generics,
    pub cases: Vec<CaseVariable>,
    pub keys: CodingKeyMap,
}

/// One enum variant and its members.
#[derive(Debug, Clone)]
pub struct CaseVariable {
    pub ident: Ident,
    pub key: KeyEntry,
    pub style: FieldStyle,
    pub members: Vec<PropertyVariable>,
}

fn property(
    member: &Member,
    key_variant: Ident,
    strategy: KeyStrategy,
) -> syn::Result<PropertyVariable> {
    let options = MemberOptions::from_attrs(&member.attrs)?;
    let (value, span) = match &options.key {
        Some((key, span)) => (key.clone(), *span),
        None if member.named => (strategy.apply(&member.name()), member.span),
        None => (member.name(), member.span),
    };
    Ok(PropertyVariable {
        ident: member.ident.clone(),
        ty: member.ty.clone(),
        accessor: member.accessor(),
        key: KeyEntry {
            variant: key_variant,
            value,
            member: member.name(),
            span,
            remap: "coded_at",
        },
        options,
    })
}

impl TypeVariable {
    /// `None` for anything but a struct or an enum.
    pub fn new(decl: &Declaration, strategy: KeyStrategy) -> syn::Result<Option<Self>> {
        let ident = match (&decl.ident, decl.kind) {
            (Some(ident), DeclKind::Struct | DeclKind::Enum) => ident.clone(),
            _ => return Ok(None),
        };
        let mut keys = CodingKeyMap::new(&ident);

        if decl.kind == DeclKind::Struct {
            let members = decl
                .fields
                .iter()
                .map(|member| property(member, member.ident.clone(), strategy))
                .collect::<syn::Result<Vec<_>>>()?;
            for member in members.iter().filter(|m| !m.options.is_ignored()) {
                keys.push(member.key.clone());
            }
            return Ok(Some(TypeVariable::Struct(StructVariable {
                ident,
                vis: decl.vis.clone(),
                generics: decl.generics.clone(),
                style: decl.style,
                members,
                keys,
            })));
        }

        let mut cases = Vec::with_capacity(decl.variants.len());
        for variant in &decl.variants {
            let options = VariantOptions::from_attrs(&variant.attrs)?;
            let name = variant.ident.to_string();
            let (value, span) = match options.key {
                Some(key) => key,
                None => (strategy.apply(&name), variant.span),
            };
            let key = KeyEntry {
                variant: variant.ident.clone(),
                value,
                member: name,
                span,
                remap: "coded_as",
            };
            let members = variant
                .fields
                .iter()
                .map(|member| {
                    let key_variant = format_ident!("{}__{}", variant.ident, member.name());
                    property(member, key_variant, strategy)
                })
                .collect::<syn::Result<Vec<_>>>()?;

            keys.push(key.clone());
            for member in members.iter().filter(|m| !m.options.is_ignored()) {
                keys.push(member.key.clone());
            }
            cases.push(CaseVariable {
                ident: variant.ident.clone(),
                key,
                style: variant.style,
                members,
            });
        }
        Ok(Some(TypeVariable::Enum(EnumVariable {
            ident,
            vis: decl.vis.clone(),
            generics: decl.generics.clone(),
            cases,
            keys,
        })))
    }

    pub fn ident(&self) -> &Ident {
        match self {
            TypeVariable::Struct(variable) => &variable.ident,
            TypeVariable::Enum(variable) => &variable.ident,
        }
    }

    pub fn generics(&self) -> &Generics {
        match self {
            TypeVariable::Struct(variable) => &variable.generics,
            TypeVariable::Enum(variable) => &variable.generics,
        }
    }

    pub fn keys(&self) -> &CodingKeyMap {
        match self {
            TypeVariable::Struct(variable) => &variable.keys,
            TypeVariable::Enum(variable) => &variable.keys,
        }
    }

    /// The coding-key enum, or nothing when neither direction is requested.
    /// Key collisions are reported to `ctx`.
    pub fn coding_keys(&self, conforming_to: &[Type], ctx: &ExpansionContext) -> Vec<TokenStream> {
        if protocols(&["Decodable", "Encodable"], conforming_to).is_empty() {
            return Vec::new();
        }

        let vis = match self {
            TypeVariable::Struct(variable) => {
                let name = variable.ident.to_string();
                let coded = variable.members.iter().filter(|m| !m.options.is_ignored());
                check_collisions(&name, coded.map(|m| &m.key), ctx);
                &variable.vis
            }
            TypeVariable::Enum(variable) => {
                let name = variable.ident.to_string();
                check_collisions(&name, variable.cases.iter().map(|case| &case.key), ctx);
                for case in &variable.cases {
                    let coded = case.members.iter().filter(|m| !m.options.is_ignored());
                    check_collisions(&name, coded.map(|m| &m.key), ctx);
                }
                &variable.vis
            }
        };
        vec![self.keys().declarations(vis)]
    }
}

fn bound_predicates(generics: &Generics, method: Method) -> Vec<WherePredicate> {
    let protocol = method.protocol_path();
    generics
        .type_params()
        .map(|param| {
            let ident = &param.ident;
            syn::parse_quote!(#ident: #protocol)
        })
        .collect()
}

fn generated(generics: &Generics, method: Method, code: TokenStream) -> TypeGenerated {
    let protocol = method.protocol_path();
    TypeGenerated {
        code,
        predicates: bound_predicates(generics, method),
        conformance: syn::parse_quote!(#protocol),
    }
}

/// `Self { a, b }`, `Self(_0, _1)` or `Self`, with `path` in place of `Self`.
fn construct(path: TokenStream, style: FieldStyle, members: &[PropertyVariable]) -> TokenStream {
    let idents = members.iter().map(|member| &member.ident);
    match style {
        FieldStyle::Named => quote!(#path { #(#idents),* }),
        FieldStyle::Unnamed => quote!(#path(#(#idents),*)),
        FieldStyle::Unit => path,
    }
}

/// Match pattern binding the members that get encoded.
fn pattern(path: TokenStream, style: FieldStyle, members: &[PropertyVariable]) -> TokenStream {
    match style {
        FieldStyle::Named => {
            let bound: Vec<&Ident> = members
                .iter()
                .filter(|member| member.is_encoded())
                .map(|member| &member.ident)
                .collect();
            if bound.len() == members.len() {
                quote!(#path { #(#bound),* })
            } else {
                quote!(#path { #(#bound,)* .. })
            }
        }
        FieldStyle::Unnamed => {
            let slots = members.iter().map(|member| {
                if member.is_encoded() {
                    member.ident.to_token_stream()
                } else {
                    quote!(_)
                }
            });
            quote!(#path(#(#slots),*))
        }
        FieldStyle::Unit => path,
    }
}

fn decode_members(
    ctx: &ExpansionContext,
    keys: &CodingKeyMap,
    container: &Ident,
    members: &[PropertyVariable],
) -> Vec<TokenStream> {
    members
        .iter()
        .map(|member| {
            let location = PropertyCodingLocation {
                container: container.clone(),
                key: keys.path(&member.key.variant),
                access: TokenStream::new(),
            };
            member.decoding(ctx, &location)
        })
        .collect()
}

fn encode_members<F>(
    ctx: &ExpansionContext,
    keys: &CodingKeyMap,
    container: &Ident,
    members: &[PropertyVariable],
    access: F,
) -> Vec<TokenStream>
where
    F: Fn(&PropertyVariable) -> TokenStream,
{
    members
        .iter()
        .map(|member| {
            let location = PropertyCodingLocation {
                container: container.clone(),
                key: keys.path(&member.key.variant),
                access: access(member),
            };
            member.encoding(ctx, &location)
        })
        .collect()
}

impl Variable for StructVariable {
    type CodingLocation = TypeCodingLocation;
    type Generated = Option<TypeGenerated>;

    fn decoding(&self, ctx: &ExpansionContext, location: &TypeCodingLocation) -> Option<TypeGenerated> {
        location.conformance.as_ref()?;
        let method = location.method;
        let arg = method.arg_ident();
        let keys = &self.keys.ident;
        let container = ctx.fresh_name("container");
        let statements = decode_members(ctx, &self.keys, &container, &self.members);
        let construct = construct(quote!(Self), self.style, &self.members);

        let code = quote! {
            let #container = #arg.container::<#keys>()?;
            #(#statements)*
            ::core::result::Result::Ok(#construct)
        };
        Some(generated(&self.generics, method, code))
    }

    fn encoding(&self, ctx: &ExpansionContext, location: &TypeCodingLocation) -> Option<TypeGenerated> {
        location.conformance.as_ref()?;
        let method = location.method;
        let arg = method.arg_ident();
        let keys = &self.keys.ident;
        let container = ctx.fresh_name("container");
        let statements = encode_members(ctx, &self.keys, &container, &self.members, |member| {
            let accessor = &member.accessor;
            quote!(&self.#accessor)
        });

        let code = quote! {
            #[allow(unused_mut)]
            let mut #container = #arg.container::<#keys>();
            #(#statements)*
            ::core::result::Result::Ok(())
        };
        Some(generated(&self.generics, method, code))
    }
}

impl Variable for EnumVariable {
    type CodingLocation = TypeCodingLocation;
    type Generated = Option<TypeGenerated>;

    /// Externally tagged: the input is an object with exactly one key naming
    /// the variant, whose value holds the variant's members.
    fn decoding(&self, ctx: &ExpansionContext, location: &TypeCodingLocation) -> Option<TypeGenerated> {
        location.conformance.as_ref()?;
        let method = location.method;
        let arg = method.arg_ident();
        let keys = &self.keys.ident;
        let container = ctx.fresh_name("container");
        let tag = ctx.fresh_name("tag");

        let arms: Vec<TokenStream> = self
            .cases
            .iter()
            .map(|case| {
                let text = &case.key.value;
                let variant = &case.key.variant;
                let nested = ctx.fresh_name("decoder");
                let inner = ctx.fresh_name("container");
                let statements = decode_members(ctx, &self.keys, &inner, &case.members);
                let ident = &case.ident;
                let construct = construct(quote!(Self::#ident), case.style, &case.members);
                quote! {
                    #text => {
                        let #nested = #container.nested_decoder(#keys::#variant)?;
                        let #inner = #nested.container::<#keys>()?;
                        #(#statements)*
                        ::core::result::Result::Ok(#construct)
                    }
                }
            })
            .collect();
        let valid = self.cases.iter().map(|case| &case.key.value);

        let code = quote! {
            let #container = #arg.container::<#keys>()?;
            match #container.single_key()? {
                #(#arms)*
                #tag => ::core::result::Result::Err(::codable::CodingError::unknown_variant(
                    #container.coding_path(),
                    #tag,
                    &[#(#valid),*],
                )),
            }
        };
        Some(generated(&self.generics, method, code))
    }

    fn encoding(&self, ctx: &ExpansionContext, location: &TypeCodingLocation) -> Option<TypeGenerated> {
        location.conformance.as_ref()?;
        let method = location.method;
        if self.cases.is_empty() {
            return Some(generated(&self.generics, method, quote!(match *self {})));
        }

        let arg = method.arg_ident();
        let keys = &self.keys.ident;
        let container = ctx.fresh_name("container");

        let arms: Vec<TokenStream> = self
            .cases
            .iter()
            .map(|case| {
                let variant = &case.key.variant;
                let nested = ctx.fresh_name("encoder");
                let inner = ctx.fresh_name("container");
                let statements = encode_members(ctx, &self.keys, &inner, &case.members, |member| {
                    member.ident.to_token_stream()
                });
                let ident = &case.ident;
                let pattern = pattern(quote!(Self::#ident), case.style, &case.members);
                quote! {
                    #pattern => {
                        #container.encode_nested(#keys::#variant, |#nested| {
                            #[allow(unused_mut)]
                            let mut #inner = #nested.container::<#keys>();
                            #(#statements)*
                            ::core::result::Result::Ok(())
                        })?;
                    }
                }
            })
            .collect();

        let code = quote! {
            let mut #container = #arg.container::<#keys>();
            match self {
                #(#arms)*
            }
            ::core::result::Result::Ok(())
        };
        Some(generated(&self.generics, method, code))
    }
}

impl Variable for TypeVariable {
    type CodingLocation = TypeCodingLocation;
    type Generated = Option<TypeGenerated>;

    fn decoding(&self, ctx: &ExpansionContext, location: &TypeCodingLocation) -> Option<TypeGenerated> {
        match self {
            TypeVariable::Struct(variable) => variable.decoding(ctx, location),
            TypeVariable::Enum(variable) => variable.decoding(ctx, location),
        }
    }

    fn encoding(&self, ctx: &ExpansionContext, location: &TypeCodingLocation) -> Option<TypeGenerated> {
        match self {
            TypeVariable::Struct(variable) => variable.encoding(ctx, location),
            TypeVariable::Enum(variable) => variable.encoding(ctx, location),
        }
    }
}

impl TypeVariable {
    /// Synthesize `method` if its protocol is among `conforming_to`.
    pub fn synthesize(
        &self,
        ctx: &ExpansionContext,
        method: Method,
        conforming_to: &[Type],
    ) -> Option<TypeGenerated> {
        let location = TypeCodingLocation {
            method,
            conformance: protocol(method.protocol, conforming_to),
        };
        match method.direction {
            Direction::Decode => self.decoding(ctx, &location),
            Direction::Encode => self.encoding(ctx, &location),
        }
    }
}
