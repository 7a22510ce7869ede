// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::builder::Context;
use crate::builder::Error;
use crate::edmx::Facets;
use crate::edmx::QualifiedName as EdmxQualifiedName;
use crate::edmx::TypeName;
use crate::model::IsNullable;
use crate::model::ModelId;
use crate::model::PathKind;
use crate::model::PrimitiveKind;
use crate::model::StructuredKind;
use crate::model::TypeDef;
use crate::model::TypeRef;

impl<'a> Context<'a> {
    /// Resolve type name written in the document into a type
    /// reference. Nullable defaults to true. For collections the
    /// nullable flag and facets apply to the element type.
    ///
    /// # Errors
    ///
    /// - `Error::TypeNotFound` if the name is not known.
    /// - `Error::NotEntityType` if `Ref(..)` wraps a non-entity type.
    /// - `Error::FacetNotSupported` if facets don't fit the type.
    pub(crate) fn resolve_type_ref(
        &self,
        doc: usize,
        model: ModelId,
        name: &'a TypeName,
        nullable: Option<bool>,
        facets: Facets,
    ) -> Result<TypeRef, Error<'a>> {
        match name {
            TypeName::CollectionOf(element) => {
                let element = self.resolve_type_ref(doc, model, element, nullable, facets)?;
                Ok(TypeRef::new(
                    TypeDef::Collection(Box::new(element)),
                    IsNullable::new(false),
                ))
            }
            TypeName::RefOf(entity) => {
                let qname = self.index.resolve(doc, entity.qualified_type_name());
                let id = self
                    .graph
                    .find_structured_type_in(model, &qname.to_string())
                    .ok_or(Error::TypeNotFound(qname))?;
                if self.graph.structured_type(id).kind == StructuredKind::Entity {
                    Ok(TypeRef::new(
                        TypeDef::EntityReference(id),
                        IsNullable::new(nullable.unwrap_or(true)),
                    ))
                } else {
                    Err(Error::NotEntityType(qname))
                }
            }
            TypeName::One(name) => Ok(TypeRef::new(
                self.resolve_type_def(doc, model, name, facets)?,
                IsNullable::new(nullable.unwrap_or(true)),
            )),
        }
    }

    fn resolve_type_def(
        &self,
        doc: usize,
        model: ModelId,
        name: &'a EdmxQualifiedName,
        facets: Facets,
    ) -> Result<TypeDef, Error<'a>> {
        let qname = self.index.resolve(doc, name);
        if qname.is_edm() {
            let local = qname.name.inner().as_str();
            if let Some(kind) = PrimitiveKind::from_name(local) {
                return if kind.supports(&facets) {
                    Ok(TypeDef::Primitive { kind, facets })
                } else {
                    Err(Error::FacetNotSupported(qname))
                };
            }
            let definition = match local {
                "Untyped" => TypeDef::Untyped,
                "ComplexType" => TypeDef::AnyComplex,
                "EntityType" => TypeDef::AnyEntity,
                _ => PathKind::from_name(local)
                    .map(TypeDef::Path)
                    .ok_or(Error::TypeNotFound(qname))?,
            };
            return if facets.is_empty() {
                Ok(definition)
            } else {
                Err(Error::FacetNotSupported(qname))
            };
        }
        let full_name = qname.to_string();
        if let Some(id) = self.graph.find_type_definition_in(model, &full_name) {
            return if self
                .graph
                .type_definition(id)
                .underlying_type
                .supports(&facets)
            {
                Ok(TypeDef::TypeDefinition { id, facets })
            } else {
                Err(Error::FacetNotSupported(qname))
            };
        }
        let definition = if let Some(id) = self.graph.find_enum_type_in(model, &full_name) {
            TypeDef::Enum(id)
        } else if let Some(id) = self.graph.find_structured_type_in(model, &full_name) {
            match self.graph.structured_type(id).kind {
                StructuredKind::Entity => TypeDef::Entity(id),
                StructuredKind::Complex => TypeDef::Complex(id),
            }
        } else {
            return Err(Error::TypeNotFound(qname));
        };
        if facets.is_empty() {
            Ok(definition)
        } else {
            Err(Error::FacetNotSupported(qname))
        }
    }
}

#[cfg(test)]
mod test {
    use crate::builder::test::doc;
    use crate::builder::Context;
    use crate::builder::ErrorKind;
    use crate::edmx::attribute_values::MaxLength;
    use crate::edmx::Edmx;
    use crate::edmx::Facets;
    use crate::edmx::TypeName;
    use crate::model::PathKind;
    use crate::model::PrimitiveKind;
    use crate::model::TypeDef;

    fn docs() -> Vec<Edmx> {
        vec![doc(
            r#"<Schema Namespace="Test.Types" Alias="T">
                 <EntityType Name="Thing"><Property Name="Id" Type="Edm.Int32"/></EntityType>
                 <ComplexType Name="Detail"/>
                 <EnumType Name="Color"><Member Name="Red"/></EnumType>
                 <TypeDefinition Name="Tag" UnderlyingType="Edm.String"/>
               </Schema>"#,
        )]
    }

    fn type_name(v: &str) -> TypeName {
        v.parse().unwrap()
    }

    #[test]
    fn test_primitive_with_facets() {
        let string = type_name("Edm.String");
        let int = type_name("Edm.Int32");
        let docs = docs();
        let mut ctx = Context::new(&docs).unwrap();
        ctx.build_type_headers().unwrap();
        let model = ctx.graph.main_model();
        let facets = Facets {
            max_length: Some(MaxLength::Max),
            ..Facets::default()
        };
        let t = ctx
            .resolve_type_ref(0, model, &string, Some(false), facets)
            .unwrap();
        assert_eq!(
            t.definition,
            TypeDef::Primitive {
                kind: PrimitiveKind::String,
                facets
            }
        );
        assert!(!*t.nullable.inner());
        let kind = ctx
            .resolve_type_ref(0, model, &int, None, facets)
            .unwrap_err()
            .kind();
        assert_eq!(kind, ErrorKind::FacetMismatch);
    }

    #[test]
    fn test_schema_types_through_alias() {
        let names = [
            "T.Thing",
            "Test.Types.Detail",
            "T.Color",
            "T.Tag",
            "Ref(T.Thing)",
            "Edm.Untyped",
            "Edm.NavigationPropertyPath",
            "T.Missing",
            "Ref(T.Detail)",
        ]
        .map(type_name);
        let docs = docs();
        let mut ctx = Context::new(&docs).unwrap();
        ctx.build_type_headers().unwrap();
        let model = ctx.graph.main_model();
        let mut resolved = Vec::new();
        for name in &names {
            resolved.push(
                ctx.resolve_type_ref(0, model, name, None, Facets::default())
                    .map(|t| t.definition)
                    .map_err(|e| e.kind()),
            );
        }
        assert!(matches!(resolved[0], Ok(TypeDef::Entity(_))));
        assert!(matches!(resolved[1], Ok(TypeDef::Complex(_))));
        assert!(matches!(resolved[2], Ok(TypeDef::Enum(_))));
        assert!(matches!(resolved[3], Ok(TypeDef::TypeDefinition { .. })));
        assert!(matches!(resolved[4], Ok(TypeDef::EntityReference(_))));
        assert_eq!(resolved[5], Ok(TypeDef::Untyped));
        assert_eq!(
            resolved[6],
            Ok(TypeDef::Path(PathKind::NavigationPropertyPath))
        );
        assert_eq!(resolved[7], Err(ErrorKind::UnresolvedReference));
        assert_eq!(resolved[8], Err(ErrorKind::UnresolvedReference));
    }

    #[test]
    fn test_collection_is_not_nullable() {
        let name = type_name("Collection(T.Detail)");
        let docs = docs();
        let mut ctx = Context::new(&docs).unwrap();
        ctx.build_type_headers().unwrap();
        let t = ctx
            .resolve_type_ref(
                0,
                ctx.graph.main_model(),
                &name,
                Some(false),
                Facets::default(),
            )
            .unwrap();
        assert!(t.is_collection());
        assert!(!*t.nullable.inner());
        assert!(!*t.element_type().nullable.inner());
        assert!(matches!(t.element_type().definition, TypeDef::Complex(_)));
    }
}
