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

use crate::builder::schema_index::Declared;
use crate::builder::schema_index::StructuredDecl;
use crate::builder::Context;
use crate::builder::Error;
use crate::edmx::enum_type::EnumType as EdmxEnumType;
use crate::edmx::type_definition::TypeDefinition as EdmxTypeDefinition;
use crate::model::EnumMember;
use crate::model::EnumType;
use crate::model::EnumTypeId;
use crate::model::HasStream;
use crate::model::IsAbstract;
use crate::model::IsFlags;
use crate::model::IsOpen;
use crate::model::PrimitiveKind;
use crate::model::QualifiedName;
use crate::model::StructuredType;
use crate::model::StructuredTypeId;
use crate::model::TypeDefinition;
use crate::model::TypeDefinitionId;
use tracing::debug;
use tracing::trace;

impl<'a> Context<'a> {
    /// Build headers of all entity, complex and enum types and type
    /// definitions.
    pub(super) fn build_type_headers(&mut self) -> Result<(), Error<'a>> {
        let structured = self.index.structured().collect::<Vec<_>>();
        for decl in structured {
            self.ensure_structured(decl)?;
        }
        for decl in self.index.enum_types.clone() {
            self.build_enum_type(decl)?;
        }
        for decl in self.index.type_definitions.clone() {
            self.build_type_definition(decl)?;
        }
        debug!(
            structured_types = self.graph.structured_types.len(),
            enum_types = self.graph.enum_types.len(),
            type_definitions = self.graph.type_definitions.len(),
            "type headers are built"
        );
        Ok(())
    }

    /// Return the header of the entity or complex type, building it
    /// (and its base types first) if it doesn't exist yet.
    pub(super) fn ensure_structured(
        &mut self,
        decl: Declared<'a, StructuredDecl<'a>>,
    ) -> Result<StructuredTypeId, Error<'a>> {
        if let Some(id) = self.graph.structured_types_by_name.get(&decl.name.to_string()) {
            return Ok(*id);
        }
        if !self.in_progress.insert(decl.name) {
            return Err(Error::BaseTypeCycle(decl.name));
        }
        let base_type = self
            .ensure_base_type(decl)
            .map_err(Box::new)
            .map_err(|e| Error::StructuredType(decl.name, e))?;
        self.in_progress.remove(&decl.name);
        let (is_abstract, is_open, has_stream) = match decl.item {
            StructuredDecl::Entity(v) => (v.r#abstract, v.open_type, v.has_stream),
            StructuredDecl::Complex(v) => (v.r#abstract, v.open_type, None),
        };
        trace!(name = %decl.name, "structured type header");
        Ok(self.add_structured_type(StructuredType {
            name: decl.name,
            kind: decl.item.kind(),
            base_type,
            is_abstract: IsAbstract::new(is_abstract.unwrap_or(false)),
            is_open: IsOpen::new(is_open.unwrap_or(false)),
            has_stream: HasStream::new(has_stream.unwrap_or(false)),
            declared_key: None,
            properties: Vec::new(),
            navigation_properties: Vec::new(),
            model: decl.model,
        }))
    }

    fn ensure_base_type(
        &mut self,
        decl: Declared<'a, StructuredDecl<'a>>,
    ) -> Result<Option<StructuredTypeId>, Error<'a>> {
        let Some(base) = decl.item.base_type() else {
            return Ok(None);
        };
        let name = self.index.resolve(decl.doc, base);
        let base_decl = self
            .index
            .find_structured(name)
            .ok_or(Error::TypeNotFound(name))?;
        if base_decl.item.kind() != decl.item.kind() {
            return Err(Error::BaseTypeKindMismatch(name));
        }
        self.ensure_structured(base_decl).map(Some)
    }

    fn build_enum_type(
        &mut self,
        decl: Declared<'a, &'a EdmxEnumType>,
    ) -> Result<EnumTypeId, Error<'a>> {
        let enum_type = self
            .enum_type_header(decl)
            .map_err(Box::new)
            .map_err(|e| Error::EnumType(decl.name, e))?;
        trace!(name = %decl.name, members = enum_type.members.len(), "enum type");
        Ok(self.add_enum_type(enum_type))
    }

    fn enum_type_header(
        &self,
        decl: Declared<'a, &'a EdmxEnumType>,
    ) -> Result<EnumType<'a>, Error<'a>> {
        let underlying_type = match &decl.item.underlying_type {
            None => PrimitiveKind::Int32,
            Some(name) => {
                let name = self.index.resolve(decl.doc, name);
                let kind = edm_primitive(name).ok_or(Error::UnderlyingTypeNotFound(name))?;
                if kind.integer_range().is_none() {
                    return Err(Error::InvalidEnumUnderlyingType(name));
                }
                kind
            }
        };
        let (min, max) = underlying_type
            .integer_range()
            .unwrap_or((i64::MIN, i64::MAX));
        let members = decl
            .item
            .members
            .iter()
            .enumerate()
            .map(|(index, member)| {
                member
                    .value
                    .as_ref()
                    .map_or_else(|| i64::try_from(index).ok(), |v| v.parse().ok())
                    .filter(|v| (min..=max).contains(v))
                    .map(|value| EnumMember {
                        name: &member.name,
                        value,
                    })
                    .ok_or_else(|| {
                        Error::InvalidEnumMemberValue(
                            &member.name,
                            member.value.as_deref().unwrap_or_default(),
                        )
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(EnumType {
            name: decl.name,
            underlying_type,
            is_flags: IsFlags::new(decl.item.is_flags.unwrap_or(false)),
            members,
            model: decl.model,
        })
    }

    fn build_type_definition(
        &mut self,
        decl: Declared<'a, &'a EdmxTypeDefinition>,
    ) -> Result<TypeDefinitionId, Error<'a>> {
        let underlying_type = match &decl.item.underlying_type {
            None => Ok(PrimitiveKind::String),
            Some(name) => {
                let name = self.index.resolve(decl.doc, name);
                edm_primitive(name).ok_or(Error::UnderlyingTypeNotFound(name))
            }
        }
        .and_then(|kind| {
            if kind.supports(&decl.item.facets()) {
                Ok(kind)
            } else {
                Err(Error::FacetNotSupported(decl.name))
            }
        })
        .map_err(Box::new)
        .map_err(|e| Error::TypeDefinition(decl.name, e))?;
        trace!(name = %decl.name, "type definition");
        Ok(self.add_type_definition(TypeDefinition {
            name: decl.name,
            underlying_type,
            facets: decl.item.facets(),
            model: decl.model,
        }))
    }
}

/// Primitive kind named by `Edm.<Kind>`.
fn edm_primitive(name: QualifiedName<'_>) -> Option<PrimitiveKind> {
    if name.is_edm() {
        PrimitiveKind::from_name(name.name.inner())
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use crate::builder::test::doc;
    use crate::builder::Context;
    use crate::builder::Error;
    use crate::builder::ErrorKind;
    use crate::builder::SchemaBundle;
    use crate::model::PrimitiveKind;

    #[test]
    fn test_base_type_declared_later_and_in_other_document() {
        let bundle = SchemaBundle {
            edmx_docs: vec![
                doc(r#"<Schema Namespace="A">
                         <EntityType Name="Manager" BaseType="A.Employee"/>
                         <EntityType Name="Employee" BaseType="B.Person"/>
                       </Schema>"#),
                doc(r#"<Schema Namespace="B">
                         <EntityType Name="Person" Abstract="true"/>
                       </Schema>"#),
            ],
        };
        let graph = bundle.build().unwrap();
        let manager = graph.find_entity_type("A.Manager").unwrap();
        let employee = graph.find_entity_type("A.Employee").unwrap();
        let person = graph.find_entity_type("B.Person").unwrap();
        assert_eq!(graph.structured_type(manager).base_type, Some(employee));
        assert_eq!(graph.structured_type(employee).base_type, Some(person));
        assert_eq!(
            graph.base_types(manager).collect::<Vec<_>>(),
            vec![employee, person]
        );
        assert!(*graph.structured_type(person).is_abstract.inner());
        assert!(graph.is_derived_from(manager, person));
    }

    #[test]
    fn test_ensure_structured_is_idempotent() {
        let docs = vec![doc(
            r#"<Schema Namespace="A">
                 <ComplexType Name="Base"/>
                 <ComplexType Name="Derived" BaseType="A.Base"/>
               </Schema>"#,
        )];
        let mut ctx = Context::new(&docs).unwrap();
        ctx.build_type_headers().unwrap();
        let count = ctx.graph.structured_types.len();
        let decls = ctx.index.structured().collect::<Vec<_>>();
        for decl in decls {
            let first = ctx.ensure_structured(decl).unwrap();
            let second = ctx.ensure_structured(decl).unwrap();
            assert_eq!(first, second);
        }
        assert_eq!(ctx.graph.structured_types.len(), count);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_base_type_errors() {
        let cycle = SchemaBundle {
            edmx_docs: vec![doc(r#"<Schema Namespace="A">
                     <EntityType Name="X" BaseType="A.Y"/>
                     <EntityType Name="Y" BaseType="A.X"/>
                   </Schema>"#)],
        };
        let err = cycle.build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnresolvedReference);
        assert!(err.to_string().contains("cyclic base type chain"));

        let mismatch = SchemaBundle {
            edmx_docs: vec![doc(r#"<Schema Namespace="A">
                     <ComplexType Name="C"/>
                     <EntityType Name="E" BaseType="A.C"/>
                   </Schema>"#)],
        };
        let err = mismatch.build().unwrap_err();
        assert!(matches!(err, Error::StructuredType(_, ref e) if matches!(**e, Error::BaseTypeKindMismatch(_))));

        let missing = SchemaBundle {
            edmx_docs: vec![doc(r#"<Schema Namespace="A">
                     <EntityType Name="E" BaseType="A.Missing"/>
                   </Schema>"#)],
        };
        assert_eq!(
            missing.build().unwrap_err().kind(),
            ErrorKind::UnresolvedReference
        );
    }

    #[test]
    fn test_enum_members() {
        let bundle = SchemaBundle {
            edmx_docs: vec![doc(r#"<Schema Namespace="A">
                     <EnumType Name="Color" UnderlyingType="Edm.Byte" IsFlags="true">
                       <Member Name="Red" Value="1"/>
                       <Member Name="Green" Value="2"/>
                       <Member Name="Blue" Value="4"/>
                     </EnumType>
                     <EnumType Name="Size">
                       <Member Name="Small"/>
                       <Member Name="Large"/>
                     </EnumType>
                   </Schema>"#)],
        };
        let graph = bundle.build().unwrap();
        let color = graph.enum_type(graph.find_enum_type("A.Color").unwrap());
        assert_eq!(color.underlying_type, PrimitiveKind::Byte);
        assert!(*color.is_flags.inner());
        assert_eq!(color.members[2].value, 4);
        let size = graph.enum_type(graph.find_enum_type("A.Size").unwrap());
        assert_eq!(size.underlying_type, PrimitiveKind::Int32);
        assert_eq!(size.member("Large"), Some(1));
        assert_eq!(size.members[1].value, 1);
    }

    #[test]
    fn test_enum_errors() {
        let out_of_range = SchemaBundle {
            edmx_docs: vec![doc(r#"<Schema Namespace="A">
                     <EnumType Name="E" UnderlyingType="Edm.SByte">
                       <Member Name="Big" Value="200"/>
                     </EnumType>
                   </Schema>"#)],
        };
        assert_eq!(
            out_of_range.build().unwrap_err().kind(),
            ErrorKind::FacetMismatch
        );
        let not_integer = SchemaBundle {
            edmx_docs: vec![doc(r#"<Schema Namespace="A">
                     <EnumType Name="E" UnderlyingType="Edm.String"/>
                   </Schema>"#)],
        };
        assert_eq!(
            not_integer.build().unwrap_err().kind(),
            ErrorKind::FacetMismatch
        );
        let unknown = SchemaBundle {
            edmx_docs: vec![doc(r#"<Schema Namespace="A">
                     <EnumType Name="E" UnderlyingType="A.Int"/>
                   </Schema>"#)],
        };
        assert_eq!(
            unknown.build().unwrap_err().kind(),
            ErrorKind::UnresolvedReference
        );
    }

    #[test]
    fn test_type_definitions() {
        let bundle = SchemaBundle {
            edmx_docs: vec![doc(r#"<Schema Namespace="A">
                     <TypeDefinition Name="Name" MaxLength="64"/>
                     <TypeDefinition Name="Amount" UnderlyingType="Edm.Decimal" Precision="10" Scale="2"/>
                   </Schema>"#)],
        };
        let graph = bundle.build().unwrap();
        let name = graph.type_definition(graph.find_type_definition("A.Name").unwrap());
        assert_eq!(name.underlying_type, PrimitiveKind::String);
        let amount = graph.type_definition(graph.find_type_definition("A.Amount").unwrap());
        assert_eq!(amount.underlying_type, PrimitiveKind::Decimal);
        assert_eq!(amount.facets.precision, Some(10));

        let bad = SchemaBundle {
            edmx_docs: vec![doc(r#"<Schema Namespace="A">
                     <TypeDefinition Name="Flag" UnderlyingType="Edm.Boolean" MaxLength="1"/>
                   </Schema>"#)],
        };
        assert_eq!(bad.build().unwrap_err().kind(), ErrorKind::FacetMismatch);
    }
}
