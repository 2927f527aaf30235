//! Normalized view of the item a marker is attached to.

use std::fmt;

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::spanned::Spanned;
use syn::{Attribute, Fields, Generics, Ident, Index, Item, Type, Visibility};

use crate::attrs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Struct,
    Enum,
    Union,
    Function,
    Trait,
    Impl,
    Field,
    Variant,
    Other,
}

impl DeclKind {
    pub fn name(self) -> &'static str {
        match self {
            DeclKind::Struct => "struct",
            DeclKind::Enum => "enum",
            DeclKind::Union => "union",
            DeclKind::Function => "function",
            DeclKind::Trait => "trait",
            DeclKind::Impl => "impl",
            DeclKind::Field => "field",
            DeclKind::Variant => "enum variant",
            DeclKind::Other => "item",
        }
    }

    /// `"struct"`, `"struct or enum"`, `"struct, enum or union"`.
    pub fn describe(kinds: &[DeclKind]) -> String {
        match kinds {
            [] => String::from("no"),
            [only] => only.name().to_string(),
            [init @ .., last] => {
                let init: Vec<&str> = init.iter().map(|kind| kind.name()).collect();
                format!("{} or {}", init.join(", "), last.name())
            }
        }
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStyle {
    Named,
    Unnamed,
    Unit,
}

impl FieldStyle {
    fn of(fields: &Fields) -> Self {
        match fields {
            Fields::Named(_) => FieldStyle::Named,
            Fields::Unnamed(_) => FieldStyle::Unnamed,
            Fields::Unit => FieldStyle::Unit,
        }
    }
}

/// A stored member: a struct field or a field of an enum variant.
#[derive(Debug, Clone)]
pub struct Member {
    /// Field name, or `_0`, `_1`, ... for positional fields.
    pub ident: Ident,
    pub index: usize,
    pub named: bool,
    pub ty: Type,
    pub attrs: Vec<Attribute>,
    pub span: Span,
}

impl Member {
    fn from_fields(fields: &Fields) -> Vec<Member> {
        fields
            .iter()
            .enumerate()
            .map(|(index, field)| Member {
                ident: field
                    .ident
                    .clone()
                    .unwrap_or_else(|| format_ident!("_{}", index, span = field.span())),
                index,
                named: field.ident.is_some(),
                ty: field.ty.clone(),
                attrs: field.attrs.clone(),
                span: field.span(),
            })
            .collect()
    }

    /// The member's name as written, without a raw-identifier prefix.
    pub fn name(&self) -> String {
        let name = self.ident.to_string();
        match name.strip_prefix("r#") {
            Some(stripped) => stripped.to_string(),
            None => name,
        }
    }

    /// Field access on a value of the owning struct: `a` or `0`.
    pub fn accessor(&self) -> TokenStream {
        if self.named {
            let ident = &self.ident;
            quote!(#ident)
        } else {
            let index = Index::from(self.index);
            quote!(#index)
        }
    }
}

#[derive(Debug, Clone)]
pub struct VariantDecl {
    pub ident: Ident,
    pub attrs: Vec<Attribute>,
    pub style: FieldStyle,
    pub fields: Vec<Member>,
    pub span: Span,
}

/// One declaration that attributes can be attached to, as seen by the
/// diagnostic producers.
#[derive(Debug, Clone)]
pub struct Attached<'a> {
    pub kind: DeclKind,
    pub name: String,
    pub attrs: &'a [Attribute],
}

impl Attached<'_> {
    /// Number of attributes named `name` on this declaration.
    pub fn count(&self, name: &str) -> usize {
        self.attrs
            .iter()
            .filter(|attr| attr.path().is_ident(name))
            .count()
    }
}

#[derive(Debug, Clone)]
pub struct Declaration {
    pub kind: DeclKind,
    pub ident: Option<Ident>,
    pub vis: Visibility,
    pub generics: Generics,
    /// Attributes of the declaration itself, the invoking marker first.
    pub attrs: Vec<Attribute>,
    pub style: FieldStyle,
    pub fields: Vec<Member>,
    pub variants: Vec<VariantDecl>,
    item: Item,
}

impl Declaration {
    pub fn from_item(item: Item) -> Self {
        let mut decl = Declaration {
            kind: DeclKind::Other,
            ident: None,
            vis: Visibility::Inherited,
            generics: Generics::default(),
            attrs: item_attrs(&item).to_vec(),
            style: FieldStyle::Unit,
            fields: Vec::new(),
            variants: Vec::new(),
            item: item.clone(),
        };

        match &item {
            Item::Struct(item) => {
                decl.kind = DeclKind::Struct;
                decl.ident = Some(item.ident.clone());
                decl.vis = item.vis.clone();
                decl.generics = item.generics.clone();
                decl.style = FieldStyle::of(&item.fields);
                decl.fields = Member::from_fields(&item.fields);
            }
            Item::Enum(item) => {
                decl.kind = DeclKind::Enum;
                decl.ident = Some(item.ident.clone());
                decl.vis = item.vis.clone();
                decl.generics = item.generics.clone();
                decl.variants = item
                    .variants
                    .iter()
                    .map(|variant| VariantDecl {
                        ident: variant.ident.clone(),
                        attrs: variant.attrs.clone(),
                        style: FieldStyle::of(&variant.fields),
                        fields: Member::from_fields(&variant.fields),
                        span: variant.span(),
                    })
                    .collect();
            }
            Item::Union(item) => {
                decl.kind = DeclKind::Union;
                decl.ident = Some(item.ident.clone());
                decl.vis = item.vis.clone();
                decl.generics = item.generics.clone();
                decl.style = FieldStyle::Named;
                decl.fields = Member::from_fields(&Fields::Named(item.fields.clone()));
            }
            Item::Fn(item) => {
                decl.kind = DeclKind::Function;
                decl.ident = Some(item.sig.ident.clone());
                decl.vis = item.vis.clone();
            }
            Item::Trait(item) => {
                decl.kind = DeclKind::Trait;
                decl.ident = Some(item.ident.clone());
                decl.vis = item.vis.clone();
            }
            Item::Impl(_) => decl.kind = DeclKind::Impl,
            _ => {}
        }

        decl
    }

    /// Put the invoking marker in front of the declaration's attributes.
    pub fn with_marker(mut self, marker: Attribute) -> Self {
        self.attrs.insert(0, marker);
        self
    }

    pub fn type_name(&self) -> String {
        match &self.ident {
            Some(ident) => ident.to_string(),
            None => self.kind.name().to_string(),
        }
    }

    /// The declaration and each of its members, in source order: the
    /// declaration first, then fields, or each variant followed by its fields.
    pub fn targets(&self) -> Vec<Attached<'_>> {
        let mut targets = vec![Attached {
            kind: self.kind,
            name: self.type_name(),
            attrs: &self.attrs,
        }];
        targets.extend(self.fields.iter().map(Member::attached));
        for variant in &self.variants {
            targets.push(Attached {
                kind: DeclKind::Variant,
                name: variant.ident.to_string(),
                attrs: &variant.attrs,
            });
            targets.extend(variant.fields.iter().map(Member::attached));
        }
        targets
    }

    /// The original item with every catalog attribute removed.
    pub fn stripped_item(&self) -> Item {
        let mut item = self.item.clone();
        if let Some(attrs) = item_attrs_mut(&mut item) {
            attrs.retain(|attr| !attrs::is_catalog_attribute(attr));
        }
        match &mut item {
            Item::Struct(item) => strip_fields(&mut item.fields),
            Item::Enum(item) => {
                for variant in &mut item.variants {
                    variant.attrs.retain(|attr| !attrs::is_catalog_attribute(attr));
                    strip_fields(&mut variant.fields);
                }
            }
            Item::Union(item) => {
                for field in &mut item.fields.named {
                    field.attrs.retain(|attr| !attrs::is_catalog_attribute(attr));
                }
            }
            _ => {}
        }
        item
    }
}

impl Member {
    fn attached(&self) -> Attached<'_> {
        Attached {
            kind: DeclKind::Field,
            name: self.name(),
            attrs: &self.attrs,
        }
    }
}

fn strip_fields(fields: &mut Fields) {
    for field in fields.iter_mut() {
        field.attrs.retain(|attr| !attrs::is_catalog_attribute(attr));
    }
}

fn item_attrs(item: &Item) -> &[Attribute] {
    match item {
        Item::Const(item) => &item.attrs,
        Item::Enum(item) => &item.attrs,
        Item::ExternCrate(item) => &item.attrs,
        Item::Fn(item) => &item.attrs,
        Item::ForeignMod(item) => &item.attrs,
        Item::Impl(item) => &item.attrs,
        Item::Macro(item) => &item.attrs,
        Item::Mod(item) => &item.attrs,
        Item::Static(item) => &item.attrs,
        Item::Struct(item) => &item.attrs,
        Item::Trait(item) => &item.attrs,
        Item::TraitAlias(item) => &item.attrs,
        Item::Type(item) => &item.attrs,
        Item::Union(item) => &item.attrs,
        Item::Use(item) => &item.attrs,
        _ => &[],
    }
}

fn item_attrs_mut(item: &mut Item) -> Option<&mut Vec<Attribute>> {
    match item {
        Item::Const(item) => Some(&mut item.attrs),
        Item::Enum(item) => Some(&mut item.attrs),
        Item::ExternCrate(item) => Some(&mut item.attrs),
        Item::Fn(item) => Some(&mut item.attrs),
        Item::ForeignMod(item) => Some(&mut item.attrs),
        Item::Impl(item) => Some(&mut item.attrs),
        Item::Macro(item) => Some(&mut item.attrs),
        Item::Mod(item) => Some(&mut item.attrs),
        Item::Static(item) => Some(&mut item.attrs),
        Item::Struct(item) => Some(&mut item.attrs),
        Item::Trait(item) => Some(&mut item.attrs),
        Item::TraitAlias(item) => Some(&mut item.attrs),
        Item::Type(item) => Some(&mut item.attrs),
        Item::Union(item) => Some(&mut item.attrs),
        Item::Use(item) => Some(&mut item.attrs),
        _ => None,
    }
}
