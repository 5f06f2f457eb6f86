//=============================================================================
// FhirSerde derive: FHIR JSON serialization through the model's builder
//=============================================================================

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::attributes::{parse_type_attrs, TypeKind};
use crate::field_helpers::{analyze_fields, Shape};

/// Generates `Serialize`, `Deserialize` and `JsonField` for a model struct.
///
/// Every element delegates to `crate::serde_support::JsonField`, which knows
/// the FHIR JSON shape of each value kind (primitive `_field` companions,
/// choice suffixes, nested objects). Deserialization fills the type's builder
/// and finishes with a validating `build()`, so unknown keys and invalid
/// content are both reported as JSON errors.
pub(crate) fn generate_fhir_serde_impl(input: &DeriveInput) -> syn::Result<TokenStream> {
    let type_attrs = parse_type_attrs(input)?;
    let fields = analyze_fields(input)?;
    let name = &input.ident;
    let fhir_type = type_attrs.name.as_str();
    let is_resource = type_attrs.kind == TypeKind::Resource;
    let json_field = quote!(crate::serde_support::JsonField);

    let resource_type_out = is_resource.then(|| quote!(map.serialize_entry("resourceType", #fhir_type)?;));
    let resource_type_in = is_resource.then(|| {
        quote! {
            crate::serde_support::take_resource_type(&mut object, #fhir_type).map_err(<D::Error as ::serde::de::Error>::custom)?;
        }
    });

    let writes = fields.elements.iter().map(|f| {
        let ident = f.ident;
        let inner = f.inner;
        let key = f.name.as_str();
        match f.shape {
            Shape::Required => quote! {
                <#inner as #json_field>::write_json(&self.#ident, #key, &mut map)?;
            },
            Shape::Optional => quote! {
                if let ::std::option::Option::Some(value) = &self.#ident {
                    <#inner as #json_field>::write_json(value, #key, &mut map)?;
                }
            },
            Shape::OptionalBoxed => quote! {
                if let ::std::option::Option::Some(value) = self.#ident.as_deref() {
                    <#inner as #json_field>::write_json(value, #key, &mut map)?;
                }
            },
            Shape::List => quote! {
                <#inner as #json_field>::write_json_list(&self.#ident, #key, &mut map)?;
            },
        }
    });

    let reads = fields.elements.iter().map(|f| {
        let ident = f.ident;
        let inner = f.inner;
        let key = f.name.as_str();
        match f.shape {
            Shape::Required | Shape::Optional => quote! {
                builder.#ident = <#inner as #json_field>::read_json(#key, &mut object).map_err(<D::Error as ::serde::de::Error>::custom)?;
            },
            Shape::OptionalBoxed => quote! {
                builder.#ident = <#inner as #json_field>::read_json(#key, &mut object)
                    .map_err(<D::Error as ::serde::de::Error>::custom)?
                    .map(::std::boxed::Box::new);
            },
            Shape::List => quote! {
                builder.#ident = <#inner as #json_field>::read_json_list(#key, &mut object).map_err(<D::Error as ::serde::de::Error>::custom)?;
            },
        }
    });

    Ok(quote! {
        impl ::serde::Serialize for #name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                use ::serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(::std::option::Option::None)?;
                #resource_type_out
                #(#writes)*
                map.end()
            }
        }

        impl<'de> ::serde::Deserialize<'de> for #name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let mut object =
                    <crate::serde_support::JsonObject as ::serde::Deserialize>::deserialize(deserializer)?;
                #resource_type_in
                let mut builder = #name::builder();
                #(#reads)*
                crate::serde_support::deny_unknown(&object, #fhir_type).map_err(<D::Error as ::serde::de::Error>::custom)?;
                builder.build().map_err(<D::Error as ::serde::de::Error>::custom)
            }
        }

        impl #json_field for #name {
            fn write_json<M>(&self, key: &str, map: &mut M) -> ::std::result::Result<(), M::Error>
            where
                M: ::serde::ser::SerializeMap,
            {
                map.serialize_entry(key, self)
            }

            fn write_json_list<M>(values: &[Self], key: &str, map: &mut M) -> ::std::result::Result<(), M::Error>
            where
                M: ::serde::ser::SerializeMap,
            {
                crate::serde_support::write_object_list(values, key, map)
            }

            fn read_json(
                key: &str,
                object: &mut crate::serde_support::JsonObject,
            ) -> ::std::result::Result<::std::option::Option<Self>, ::serde_json::Error> {
                crate::serde_support::read_object(key, object)
            }

            fn read_json_list(
                key: &str,
                object: &mut crate::serde_support::JsonObject,
            ) -> ::std::result::Result<::std::vec::Vec<Self>, ::serde_json::Error> {
                crate::serde_support::read_object_list(key, object)
            }
        }
    })
}
