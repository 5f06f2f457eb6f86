//=============================================================================
// FhirModel derive: builder, accessors, validation, traversal and hashing
//=============================================================================

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::DeriveInput;

use crate::attributes::{parse_invariants, parse_type_attrs, InvariantLit, TypeKind};
use crate::field_helpers::{analyze_fields, ModelField, Shape};

pub(crate) fn generate_fhir_model_impl(input: &DeriveInput) -> syn::Result<TokenStream> {
    let type_attrs = parse_type_attrs(input)?;
    let fields = analyze_fields(input)?;
    let invariants = parse_invariants(&input.attrs)?;

    let name = &input.ident;
    let vis = &input.vis;
    let builder_name = format_ident!("{}Builder", name);
    let fhir_type = type_attrs.name.as_str();
    let support = quote!(::atrius_model_support);

    let kind = match type_attrs.kind {
        TypeKind::Resource => quote!(#support::ModelKind::Resource),
        TypeKind::Complex => quote!(#support::ModelKind::ComplexType),
        TypeKind::Backbone => quote!(#support::ModelKind::BackboneElement),
    };

    let elements = &fields.elements;
    let idents: Vec<_> = elements.iter().map(|f| f.ident).collect();

    let builder_fields = elements.iter().map(|f| {
        let ident = f.ident;
        let inner = f.inner;
        match f.shape {
            Shape::Required | Shape::Optional => quote!(#ident: ::std::option::Option<#inner>),
            Shape::OptionalBoxed => quote!(#ident: ::std::option::Option<::std::boxed::Box<#inner>>),
            Shape::List => quote!(#ident: ::std::vec::Vec<#inner>),
        }
    });

    let builder_defaults = elements.iter().map(|f| {
        let ident = f.ident;
        match f.shape {
            Shape::List => quote!(#ident: ::std::vec::Vec::new()),
            _ => quote!(#ident: ::std::option::Option::None),
        }
    });

    let setters = elements.iter().map(generate_setters);

    let build_fields = elements.iter().map(|f| {
        let ident = f.ident;
        let element = f.name.as_str();
        match f.shape {
            Shape::Required => quote! {
                #ident: #ident.ok_or(#support::ValidationError::MissingRequired {
                    type_name: #fhir_type,
                    element: #element,
                })?
            },
            _ => quote!(#ident),
        }
    });

    let to_builder_fields = elements.iter().map(|f| {
        let ident = f.ident;
        match f.shape {
            Shape::Required => quote!(#ident: ::std::option::Option::Some(self.#ident.clone())),
            _ => quote!(#ident: self.#ident.clone()),
        }
    });

    let (cache_init, hash_body) = match fields.hash_cache {
        Some(cache) => (
            quote!(#cache: #support::HashCode::new(),),
            quote!(self.#cache.get_or_compute(self)),
        ),
        None => (
            quote!(),
            quote! {
                use ::std::hash::{Hash, Hasher};
                let mut hasher = ::std::hash::DefaultHasher::new();
                self.hash(&mut hasher);
                hasher.finish()
            },
        ),
    };

    let accessors = elements.iter().map(|f| {
        let ident = f.ident;
        let inner = f.inner;
        let docs = &f.docs;
        match f.shape {
            Shape::Required => quote! {
                #(#docs)*
                pub fn #ident(&self) -> &#inner {
                    &self.#ident
                }
            },
            Shape::Optional => quote! {
                #(#docs)*
                pub fn #ident(&self) -> ::std::option::Option<&#inner> {
                    self.#ident.as_ref()
                }
            },
            Shape::OptionalBoxed => quote! {
                #(#docs)*
                pub fn #ident(&self) -> ::std::option::Option<&#inner> {
                    self.#ident.as_deref()
                }
            },
            Shape::List => quote! {
                #(#docs)*
                pub fn #ident(&self) -> &[#inner] {
                    &self.#ident
                }
            },
        }
    });

    let field_checks = elements.iter().map(|f| generate_field_checks(f, fhir_type, Target::Model));
    let builder_checks = elements.iter().map(|f| generate_field_checks(f, fhir_type, Target::Builder));
    let value_or_children = if type_attrs.kind == TypeKind::Resource {
        quote!()
    } else {
        quote!(#support::require_value_or_children(self)?;)
    };
    let rule_checks = invariants.iter().filter_map(|inv| generate_rule_check(inv, fhir_type));
    let invariant_consts = invariants.iter().map(|inv| {
        let InvariantLit {
            key,
            human,
            expr,
            path,
            ..
        } = inv;
        let severity = if inv.is_warning() {
            quote!(#support::ValidationSeverity::Warning)
        } else {
            quote!(#support::ValidationSeverity::Error)
        };
        quote! {
            #support::Invariant {
                key: #key,
                severity: #severity,
                human: #human,
                expr: #expr,
                path: #path,
            }
        }
    });

    let visits = elements.iter().map(|f| {
        let ident = f.ident;
        let element = f.name.as_str();
        match f.shape {
            Shape::Required => quote!(#support::accept_required(&self.#ident, #element, visitor);),
            Shape::Optional => quote!(#support::accept_option(self.#ident.as_ref(), #element, visitor);),
            Shape::OptionalBoxed => quote!(#support::accept_option(self.#ident.as_deref(), #element, visitor);),
            Shape::List => quote!(#support::accept_list(&self.#ident, #element, visitor);),
        }
    });

    // `id` is an attribute of elements, not a child.
    let child_checks = elements
        .iter()
        .filter(|f| type_attrs.kind == TypeKind::Resource || f.name != "id")
        .map(|f| {
            let ident = f.ident;
            match f.shape {
                Shape::Required => quote!(true),
                Shape::Optional | Shape::OptionalBoxed => quote!(self.#ident.is_some()),
                Shape::List => quote!(!self.#ident.is_empty()),
            }
        });

    let builder_doc = format!("Builder for [`{name}`]. Validates on `build()` unless disabled.");

    Ok(quote! {
        #[doc = #builder_doc]
        #[derive(Debug, Clone)]
        #vis struct #builder_name {
            #(#builder_fields,)*
            validating: bool,
        }

        impl ::std::default::Default for #builder_name {
            fn default() -> Self {
                #builder_name {
                    #(#builder_defaults,)*
                    validating: true,
                }
            }
        }

        impl #builder_name {
            #(#setters)*

            /// Turns validation on `build()` on or off.
            pub fn validating(mut self, validating: bool) -> Self {
                self.validating = validating;
                self
            }

            pub fn build(self) -> ::std::result::Result<#name, #support::ValidationError> {
                self.check_elements()?;
                let #builder_name { #(#idents,)* validating } = self;
                let built = #name {
                    #(#build_fields,)*
                    #cache_init
                };
                if validating {
                    built.validate_constraints()?;
                } else {
                    ::tracing::debug!(fhir_type = #fhir_type, "built without validation");
                }
                ::std::result::Result::Ok(built)
            }

            /// Element checks in declaration order. Missing required
            /// elements fail even when validation is off.
            fn check_elements(&self) -> ::std::result::Result<(), #support::ValidationError> {
                #(#builder_checks)*
                ::std::result::Result::Ok(())
            }
        }

        impl #name {
            pub fn builder() -> #builder_name {
                #builder_name::default()
            }

            pub fn to_builder(&self) -> #builder_name {
                #builder_name {
                    #(#to_builder_fields,)*
                    validating: true,
                }
            }

            /// Structural hash, computed once per instance.
            pub fn hash_code(&self) -> u64 {
                #hash_body
            }

            #(#accessors)*

            fn validate_constraints(&self) -> ::std::result::Result<(), #support::ValidationError> {
                #value_or_children
                #(#rule_checks)*
                ::std::result::Result::Ok(())
            }
        }

        impl #support::FhirModel for #name {
            type Builder = #builder_name;

            const FHIR_TYPE: &'static str = #fhir_type;
            const KIND: #support::ModelKind = #kind;

            fn invariants() -> &'static [#support::Invariant] {
                const INVARIANTS: &[#support::Invariant] = &[#(#invariant_consts),*];
                INVARIANTS
            }

            fn to_builder(&self) -> #builder_name {
                #name::to_builder(self)
            }

            fn validate(&self) -> ::std::result::Result<(), #support::ValidationError> {
                #(#field_checks)*
                #name::validate_constraints(self)
            }

            fn hash_code(&self) -> u64 {
                #name::hash_code(self)
            }
        }

        impl #support::ModelBuilder for #builder_name {
            type Target = #name;

            fn validating(self, validating: bool) -> Self {
                #builder_name::validating(self, validating)
            }

            fn build(self) -> ::std::result::Result<#name, #support::ValidationError> {
                #builder_name::build(self)
            }
        }

        impl #support::Visitable for #name {
            fn type_name(&self) -> &'static str {
                #fhir_type
            }

            fn accept(
                &self,
                element_name: &str,
                element_index: ::std::option::Option<usize>,
                visitor: &mut dyn #support::Visitor,
            ) {
                #support::accept_with(self, element_name, element_index, visitor, |visitor| {
                    #(#visits)*
                });
            }

            fn has_children(&self) -> bool {
                false #(|| #child_checks)*
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn validate_node(&self) -> ::std::result::Result<(), #support::ValidationError> {
                #support::FhirModel::validate(self)
            }
        }

        impl #support::ValidateField for #name {}
    })
}

fn generate_setters(field: &ModelField<'_>) -> TokenStream {
    let ident = field.ident;
    let inner = field.inner;
    let docs = &field.docs;
    let bare = ident.unraw();
    let clear = format_ident!("clear_{}", bare);
    match field.shape {
        Shape::Required | Shape::Optional => quote! {
            #(#docs)*
            pub fn #ident(mut self, value: impl ::std::convert::Into<#inner>) -> Self {
                self.#ident = ::std::option::Option::Some(value.into());
                self
            }

            pub fn #clear(mut self) -> Self {
                self.#ident = ::std::option::Option::None;
                self
            }
        },
        Shape::OptionalBoxed => quote! {
            #(#docs)*
            pub fn #ident(mut self, value: impl ::std::convert::Into<#inner>) -> Self {
                self.#ident = ::std::option::Option::Some(::std::boxed::Box::new(value.into()));
                self
            }

            pub fn #clear(mut self) -> Self {
                self.#ident = ::std::option::Option::None;
                self
            }
        },
        Shape::List => {
            let set = format_ident!("set_{}", bare);
            quote! {
                #(#docs)*
                /// Appends one value.
                pub fn #ident(mut self, value: impl ::std::convert::Into<#inner>) -> Self {
                    self.#ident.push(value.into());
                    self
                }

                /// Replaces all values.
                pub fn #set<I, V>(mut self, values: I) -> Self
                where
                    I: ::std::iter::IntoIterator<Item = V>,
                    V: ::std::convert::Into<#inner>,
                {
                    self.#ident = values.into_iter().map(::std::convert::Into::into).collect();
                    self
                }

                pub fn #clear(mut self) -> Self {
                    self.#ident = ::std::vec::Vec::new();
                    self
                }
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Target {
    /// The built struct: required elements are plain values.
    Model,
    /// The builder: required elements are still `Option`s.
    Builder,
}

/// Per-element checks in declaration order: presence, field contents,
/// cardinality, choice types, then reference targets.
fn generate_field_checks(field: &ModelField<'_>, fhir_type: &str, target: Target) -> TokenStream {
    let support = quote!(::atrius_model_support);
    let ident = field.ident;
    let element = field.name.as_str();
    let declared = field.declared.as_str();

    let mut per_value = vec![quote! {
        #support::ValidateField::validate_field(value, #fhir_type, #element, #declared)?;
    }];
    if !field.attrs.choice.is_empty() {
        let allowed = &field.attrs.choice;
        per_value.push(quote! {
            #support::choice_element(value, #fhir_type, #element, &[#(#allowed),*])?;
        });
    }
    if !field.attrs.reference.is_empty() {
        let allowed = &field.attrs.reference;
        per_value.push(quote! {
            #support::check_reference_type(value, #fhir_type, #element, &[#(#allowed),*])?;
        });
    }

    let checks = match (field.shape, target) {
        (Shape::Required, Target::Model) => quote! {
            {
                let value = &self.#ident;
                #(#per_value)*
            }
        },
        (Shape::Required, Target::Builder) => {
            return quote! {
                match &self.#ident {
                    ::std::option::Option::Some(value) => {
                        if self.validating {
                            #(#per_value)*
                        }
                    }
                    ::std::option::Option::None => {
                        return ::std::result::Result::Err(#support::ValidationError::MissingRequired {
                            type_name: #fhir_type,
                            element: #element,
                        });
                    }
                }
            };
        }
        (Shape::Optional, _) => quote! {
            if let ::std::option::Option::Some(value) = &self.#ident {
                #(#per_value)*
            }
        },
        (Shape::OptionalBoxed, _) => quote! {
            if let ::std::option::Option::Some(value) = self.#ident.as_deref() {
                #(#per_value)*
            }
        },
        (Shape::List, _) => {
            let min = field.min();
            let cardinality = (min > 0).then(|| {
                quote!(#support::require_non_empty(&self.#ident, #fhir_type, #element, #min)?;)
            });
            quote! {
                #cardinality
                for value in &self.#ident {
                    #(#per_value)*
                }
            }
        }
    };
    match target {
        Target::Model => checks,
        Target::Builder => quote! {
            if self.validating {
                #checks
            }
        },
    }
}

/// Invariants with a `rule` evaluate `Self::rule(&self)`. Errors fail
/// validation, warnings are logged.
fn generate_rule_check(invariant: &InvariantLit, fhir_type: &str) -> Option<TokenStream> {
    let rule = invariant.rule.as_ref()?;
    let key = &invariant.key;
    let human = &invariant.human;
    Some(if invariant.is_warning() {
        quote! {
            if !Self::#rule(self) {
                ::tracing::warn!(fhir_type = #fhir_type, key = #key, "{}", #human);
            }
        }
    } else {
        quote! {
            if !Self::#rule(self) {
                return ::std::result::Result::Err(::atrius_model_support::ValidationError::ConstraintViolated {
                    type_name: #fhir_type,
                    key: #key,
                    human: #human,
                });
            }
        }
    })
}
