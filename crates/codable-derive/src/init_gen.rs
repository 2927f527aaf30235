//! Memberwise initializer for `#[member_init]`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Expr, Generics, Ident, Type, Visibility};

use crate::attrs::{default_expr, MemberOptions};
use crate::decl::{Declaration, FieldStyle};

#[derive(Debug, Clone)]
pub struct InitParam {
    pub ident: Ident,
    pub ty: Type,
    /// Omitting the parameter yields this value.
    pub default: Option<Expr>,
    /// `with_<name>`, or `with_<index>` for positional members.
    pub setter: Ident,
    accessor: TokenStream,
}

impl InitParam {
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    fn value(&self) -> TokenStream {
        match &self.default {
            Some(expr) => default_expr(expr),
            None => {
                let ident = &self.ident;
                quote!(#ident)
            }
        }
    }
}

/// `new(required...)` plus one `with_<member>` per defaulted member.
#[derive(Debug, Clone)]
pub struct Initializer {
    pub ident: Ident,
    pub vis: Visibility,
    pub generics: Generics,
    pub style: FieldStyle,
    pub params: Vec<InitParam>,
}

impl Initializer {
    /// Parameters in member order; `#[default_value]` takes precedence over
    /// `#[initial]`.
    pub fn new(decl: &Declaration) -> syn::Result<Option<Self>> {
        let ident = match &decl.ident {
            Some(ident) => ident.clone(),
            None => return Ok(None),
        };
        let params = decl
            .fields
            .iter()
            .map(|member| {
                let options = MemberOptions::from_attrs(&member.attrs)?;
                Ok(InitParam {
                    ident: member.ident.clone(),
                    ty: member.ty.clone(),
                    default: options.default.or(options.initial),
                    setter: if member.named {
                        format_ident!("with_{}", member.name())
                    } else {
                        format_ident!("with_{}", member.index)
                    },
                    accessor: member.accessor(),
                })
            })
            .collect::<syn::Result<Vec<_>>>()?;
        Ok(Some(Initializer {
            ident,
            vis: decl.vis.clone(),
            generics: decl.generics.clone(),
            style: decl.style,
            params,
        }))
    }

    pub fn to_token_stream(&self) -> TokenStream {
        let ident = &self.ident;
        let vis = &self.vis;
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let required: Vec<&InitParam> = self.params.iter().filter(|p| p.is_required()).collect();
        let arg_idents = required.iter().map(|param| &param.ident);
        let arg_types = required.iter().map(|param| &param.ty);
        let values = self.params.iter().map(InitParam::value);
        let body = match self.style {
            FieldStyle::Named => {
                let fields = self.params.iter().map(|param| {
                    let ident = &param.ident;
                    match &param.default {
                        Some(_) => {
                            let value = param.value();
                            quote!(#ident: #value)
                        }
                        None => quote!(#ident),
                    }
                });
                quote!(Self { #(#fields),* })
            }
            FieldStyle::Unnamed => quote!(Self(#(#values),*)),
            FieldStyle::Unit => quote!(Self),
        };

        let setters = self.params.iter().filter(|p| !p.is_required()).map(|param| {
            let name = param.ident.to_string();
            let setter = &param.setter;
            let lint = if setter.to_string().contains("__") {
                quote!(#[allow(non_snake_case)])
            } else {
                TokenStream::new()
            };
            let ty = &param.ty;
            let accessor = &param.accessor;
            let doc = format!("Replaces `{}`, which `new` sets to its default.", name.trim_start_matches("r#"));
            quote! {
                #[doc = #doc]
                #[must_use]
                #lint
                #vis fn #setter(mut self, value: #ty) -> Self {
                    self.#accessor = value;
                    self
                }
            }
        });

        let doc = format!("Creates a `{ident}` from its members.");
        quote! {
            #[allow(dead_code)]
            impl #impl_generics #ident #ty_generics #where_clause {
                #[doc = #doc]
                #[allow(clippy::too_many_arguments)]
                #vis fn new(#(#arg_idents: #arg_types),*) -> Self {
                    #body
                }

                #(#setters)*
            }
        }
    }
}
