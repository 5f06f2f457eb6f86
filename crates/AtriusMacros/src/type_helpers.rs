//=============================================================================
// Type Analysis Helper Functions
//=============================================================================

use syn::{GenericArgument, Path, PathArguments, Type, TypePath};

/// Extracts `T` from a single-argument generic whose last path segment is `wrapper`.
fn get_wrapped_inner_type<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    if let Type::Path(TypePath {
        path: Path { segments, .. },
        ..
    }) = ty
        && let Some(segment) = segments.last()
        && segment.ident == wrapper
        && let PathArguments::AngleBracketed(args) = &segment.arguments
        && let Some(GenericArgument::Type(inner_ty)) = args.args.first()
    {
        return Some(inner_ty);
    }
    None
}

/// Extracts the inner type from an `Option<T>` type.
///
/// ```rust,ignore
/// // Option<CodeableConcept> -> Some(CodeableConcept)
/// // CodeableConcept         -> None
/// ```
pub(crate) fn get_option_inner_type(ty: &Type) -> Option<&Type> {
    get_wrapped_inner_type(ty, "Option")
}

/// Extracts the inner type from a `Vec<T>` type.
///
/// ```rust,ignore
/// // Vec<Identifier> -> Some(Identifier)
/// ```
pub(crate) fn get_vec_inner_type(ty: &Type) -> Option<&Type> {
    get_wrapped_inner_type(ty, "Vec")
}

/// Extracts the inner type from a `Box<T>` type.
///
/// Boxes break cycles between recursive FHIR types, e.g.
/// `Identifier.assigner: Option<Box<Reference>>` where `Reference` itself
/// holds an `Identifier`.
pub(crate) fn get_box_inner_type(ty: &Type) -> Option<&Type> {
    get_wrapped_inner_type(ty, "Box")
}

/// Returns the identifier of the last path segment (`"Id"` for
/// `crate::r5::Id`, `"Element"` for `Element<Status, Extension>`).
pub(crate) fn last_segment_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(TypePath { path, .. }) => path.segments.last().map(|s| s.ident.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwraps_known_containers() {
        let ty: Type = syn::parse_quote!(Option<Box<Reference>>);
        let inner = get_option_inner_type(&ty).unwrap();
        let boxed = get_box_inner_type(inner).unwrap();
        assert_eq!(last_segment_name(boxed).as_deref(), Some("Reference"));

        let ty: Type = syn::parse_quote!(Vec<crate::r5::Identifier>);
        assert_eq!(last_segment_name(get_vec_inner_type(&ty).unwrap()).as_deref(), Some("Identifier"));
        assert!(get_option_inner_type(&ty).is_none());
    }

    #[test]
    fn generic_element_reports_element() {
        let ty: Type = syn::parse_quote!(Element<MedicationStatus, Extension>);
        assert_eq!(last_segment_name(&ty).as_deref(), Some("Element"));
    }
}
