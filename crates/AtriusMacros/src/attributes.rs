//! Parsing of the `fhir_type`, `fhir_element` and `fhir_invariant` attributes.

use syn::parse::Parser;
use syn::spanned::Spanned;
use syn::{Attribute, DeriveInput, Ident, LitInt, LitStr, Meta, MetaList, MetaNameValue};

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypeKind {
    Resource,
    Complex,
    Backbone,
}

pub(crate) struct TypeAttrs {
    /// FHIR type name, defaults to the struct name.
    pub name: String,
    pub kind: TypeKind,
}

/// Parses `#[fhir_type(name = "...", kind = "resource" | "complex" | "backbone")]`.
pub(crate) fn parse_type_attrs(input: &DeriveInput) -> syn::Result<TypeAttrs> {
    let mut out = TypeAttrs {
        name: input.ident.to_string(),
        kind: TypeKind::Complex,
    };
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("fhir_type")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                out.name = meta.value()?.parse::<LitStr>()?.value();
                Ok(())
            } else if meta.path.is_ident("kind") {
                let lit: LitStr = meta.value()?.parse()?;
                out.kind = match lit.value().as_str() {
                    "resource" => TypeKind::Resource,
                    "complex" => TypeKind::Complex,
                    "backbone" => TypeKind::Backbone,
                    other => {
                        return Err(syn::Error::new(
                            lit.span(),
                            format!("unknown fhir_type kind `{other}`, expected resource, complex or backbone"),
                        ));
                    }
                };
                Ok(())
            } else {
                Err(meta.error("unsupported fhir_type attribute"))
            }
        })?;
    }
    Ok(out)
}

#[derive(Default)]
pub(crate) struct ElementAttrs {
    pub required: bool,
    pub min: Option<usize>,
    /// Allowed choice type names for `[x]` fields.
    pub choice: Vec<String>,
    /// Allowed reference target resource types.
    pub reference: Vec<String>,
}

fn split_types(lit: &LitStr) -> Vec<String> {
    lit.value()
        .split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses `#[fhir_element(required, min = N, choice = "A|B", reference = "X|Y")]`.
pub(crate) fn parse_element_attrs(attrs: &[Attribute]) -> syn::Result<ElementAttrs> {
    let mut out = ElementAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("fhir_element")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("required") {
                out.required = true;
                Ok(())
            } else if meta.path.is_ident("min") {
                out.min = Some(meta.value()?.parse::<LitInt>()?.base10_parse()?);
                Ok(())
            } else if meta.path.is_ident("choice") {
                out.choice = split_types(&meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("reference") {
                out.reference = split_types(&meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported fhir_element attribute"))
            }
        })?;
    }
    Ok(out)
}

pub(crate) struct InvariantLit {
    pub key: LitStr,
    pub severity: LitStr,
    pub human: LitStr,
    pub expr: LitStr,
    pub path: LitStr,
    /// Associated `fn(&Self) -> bool` that evaluates the constraint.
    pub rule: Option<Ident>,
}

impl InvariantLit {
    pub fn is_warning(&self) -> bool {
        self.severity.value() == "warning"
    }
}

fn parse_fhir_invariant(attr: &Attribute) -> syn::Result<InvariantLit> {
    let Meta::List(MetaList { tokens, .. }) = attr.meta.clone() else {
        return Err(syn::Error::new(attr.span(), "expected #[fhir_invariant(...)]"));
    };

    let parser = syn::punctuated::Punctuated::<MetaNameValue, syn::Token![,]>::parse_terminated;
    let list = parser.parse2(tokens)?;

    let mut key = None;
    let mut severity = None;
    let mut human = None;
    let mut expr = None;
    let mut path = None;
    let mut rule = None;

    for nv in list {
        let span = nv.span();
        let name = nv.path.get_ident().map(|i| i.to_string()).unwrap_or_default();
        let lit = match nv.value {
            syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(s), ..
            }) => s,
            _ => return Err(syn::Error::new(span, "expected string literal")),
        };
        match name.as_str() {
            "key" => key = Some(lit),
            "severity" => severity = Some(lit),
            "human" => human = Some(lit),
            "expr" => expr = Some(lit),
            "path" => path = Some(lit),
            "rule" => rule = Some(Ident::new(&lit.value(), lit.span())),
            other => return Err(syn::Error::new(span, format!("unknown fhir_invariant field `{other}`"))),
        }
    }

    let missing = |name: &str| syn::Error::new(attr.span(), format!("missing required fhir_invariant field: {name}"));

    Ok(InvariantLit {
        key: key.ok_or_else(|| missing("key"))?,
        severity: severity.ok_or_else(|| missing("severity"))?,
        human: human.ok_or_else(|| missing("human"))?,
        expr: expr.ok_or_else(|| missing("expr"))?,
        path: path.ok_or_else(|| missing("path"))?,
        rule,
    })
}

pub(crate) fn parse_invariants(attrs: &[Attribute]) -> syn::Result<Vec<InvariantLit>> {
    attrs
        .iter()
        .filter(|a| a.path().is_ident("fhir_invariant"))
        .map(parse_fhir_invariant)
        .collect()
}
