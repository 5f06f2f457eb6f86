use heck::ToLowerCamelCase;
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::{token, Attribute, Data, DeriveInput, Fields, Ident, Lit, Meta, Type};

use crate::attributes::{parse_element_attrs, ElementAttrs};
use crate::type_helpers::{get_box_inner_type, get_option_inner_type, get_vec_inner_type, last_segment_name};

/// Determines the effective field name for FHIR serialization.
///
/// - If `#[fhir_serde(rename = "customName")]` is present, uses the custom name
/// - Otherwise, converts the Rust field name from `snake_case` to `camelCase`
///
/// ```rust,ignore
/// // Field: implicit_rules: Option<Uri>   -> "implicitRules"
/// // Field: r#type: Option<Uri>           -> "type"
/// ```
pub(crate) fn get_effective_field_name(field: &syn::Field) -> String {
    for attr in &field.attrs {
        if attr.path().is_ident("fhir_serde")
            && let Ok(list) = attr.parse_args_with(Punctuated::<Meta, token::Comma>::parse_terminated)
        {
            for meta in list {
                if let Meta::NameValue(nv) = meta
                    && nv.path.is_ident("rename")
                    && let syn::Expr::Lit(expr_lit) = nv.value
                    && let Lit::Str(lit_str) = expr_lit.lit
                {
                    return lit_str.value();
                }
            }
        }
    }
    field
        .ident
        .as_ref()
        .map(|ident| ident.unraw().to_string().to_lower_camel_case())
        .unwrap_or_default()
}

/// How a field is stored on the model struct.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    /// `T`, always present once built.
    Required,
    /// `Option<T>`
    Optional,
    /// `Option<Box<T>>`, used to break recursive type cycles.
    OptionalBoxed,
    /// `Vec<T>`
    List,
}

pub(crate) struct ModelField<'a> {
    pub ident: &'a Ident,
    /// Element name used in JSON and in visitor callbacks.
    pub name: String,
    pub shape: Shape,
    /// The element type with `Option`, `Vec` and `Box` stripped.
    pub inner: &'a Type,
    /// Last path segment of `inner` (`"Id"`, `"CodeableConcept"`, `"DataType"`).
    pub declared: String,
    pub attrs: ElementAttrs,
    pub docs: Vec<&'a Attribute>,
}

impl ModelField<'_> {
    /// Minimum cardinality of a list field.
    pub fn min(&self) -> usize {
        match (self.attrs.min, self.attrs.required) {
            (Some(min), _) => min,
            (None, true) => 1,
            (None, false) => 0,
        }
    }
}

/// Fields of a model struct, split into elements and the optional hash cache.
pub(crate) struct ModelFields<'a> {
    pub elements: Vec<ModelField<'a>>,
    pub hash_cache: Option<&'a Ident>,
}

pub(crate) fn analyze_fields(input: &DeriveInput) -> syn::Result<ModelFields<'_>> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(&input.ident, "FHIR model derives only support structs"));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(&input.ident, "FHIR model derives require named fields"));
    };

    let mut elements = Vec::new();
    let mut hash_cache = None;
    for field in &named.named {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        if last_segment_name(&field.ty).as_deref() == Some("HashCode") {
            hash_cache = Some(ident);
            continue;
        }

        let attrs = parse_element_attrs(&field.attrs)?;
        let (shape, inner) = if let Some(inner) = get_option_inner_type(&field.ty) {
            match get_box_inner_type(inner) {
                Some(boxed) => (Shape::OptionalBoxed, boxed),
                None => (Shape::Optional, inner),
            }
        } else if let Some(inner) = get_vec_inner_type(&field.ty) {
            (Shape::List, inner)
        } else {
            (Shape::Required, &field.ty)
        };
        if attrs.required && matches!(shape, Shape::Optional | Shape::OptionalBoxed) {
            return Err(syn::Error::new_spanned(
                &field.ty,
                "required elements are declared without Option",
            ));
        }
        let declared = last_segment_name(inner)
            .ok_or_else(|| syn::Error::new_spanned(inner, "unsupported element type"))?;

        elements.push(ModelField {
            ident,
            name: get_effective_field_name(field),
            shape,
            inner,
            declared,
            attrs,
            docs: field.attrs.iter().filter(|a| a.path().is_ident("doc")).collect(),
        });
    }
    Ok(ModelFields { elements, hash_cache })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_field_shapes() {
        let input: DeriveInput = syn::parse_quote! {
            struct Identifier {
                #[fhir_serde(rename = "use")]
                r#use: Option<Element<IdentifierUse, Extension>>,
                r#type: Option<CodeableConcept>,
                #[fhir_element(required, min = 2)]
                given: Vec<String>,
                assigner: Option<Box<Reference>>,
                #[fhir_element(required)]
                instance: Boolean,
                cache: HashCode,
            }
        };
        let fields = analyze_fields(&input).unwrap();
        assert!(fields.hash_cache.is_some());
        let shapes: Vec<_> = fields.elements.iter().map(|f| (f.name.as_str(), f.shape)).collect();
        assert!(shapes[0] == ("use", Shape::Optional));
        assert!(shapes[1] == ("type", Shape::Optional));
        assert!(shapes[2] == ("given", Shape::List));
        assert!(shapes[3] == ("assigner", Shape::OptionalBoxed));
        assert!(shapes[4] == ("instance", Shape::Required));
        assert_eq!(fields.elements[0].declared, "Element");
        assert_eq!(fields.elements[3].declared, "Reference");
        assert_eq!(fields.elements[2].min(), 2);
    }

    #[test]
    fn required_option_is_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            struct Bad {
                #[fhir_element(required)]
                code: Option<Code>,
            }
        };
        assert!(analyze_fields(&input).is_err());
    }
}
