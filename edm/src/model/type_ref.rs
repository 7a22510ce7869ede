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

//! Type references: the type of a property, parameter, return value
//! or term together with its nullability and facets.

use crate::edmx::Facets;
use crate::model::EnumTypeId;
use crate::model::IsNullable;
use crate::model::StructuredTypeId;
use crate::model::TypeDefinitionId;

/// Primitive types of the `Edm` namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Binary,
    Boolean,
    Byte,
    Date,
    DateTimeOffset,
    Decimal,
    Double,
    Duration,
    Guid,
    Int16,
    Int32,
    Int64,
    SByte,
    Single,
    Stream,
    String,
    TimeOfDay,
    Geography,
    GeographyPoint,
    GeographyLineString,
    GeographyPolygon,
    GeographyMultiPoint,
    GeographyMultiLineString,
    GeographyMultiPolygon,
    GeographyCollection,
    Geometry,
    GeometryPoint,
    GeometryLineString,
    GeometryPolygon,
    GeometryMultiPoint,
    GeometryMultiLineString,
    GeometryMultiPolygon,
    GeometryCollection,
    /// Abstract `Edm.PrimitiveType`.
    PrimitiveType,
}

const PRIMITIVE_NAMES: &[(&str, PrimitiveKind)] = &[
    ("Binary", PrimitiveKind::Binary),
    ("Boolean", PrimitiveKind::Boolean),
    ("Byte", PrimitiveKind::Byte),
    ("Date", PrimitiveKind::Date),
    ("DateTimeOffset", PrimitiveKind::DateTimeOffset),
    ("Decimal", PrimitiveKind::Decimal),
    ("Double", PrimitiveKind::Double),
    ("Duration", PrimitiveKind::Duration),
    ("Guid", PrimitiveKind::Guid),
    ("Int16", PrimitiveKind::Int16),
    ("Int32", PrimitiveKind::Int32),
    ("Int64", PrimitiveKind::Int64),
    ("SByte", PrimitiveKind::SByte),
    ("Single", PrimitiveKind::Single),
    ("Stream", PrimitiveKind::Stream),
    ("String", PrimitiveKind::String),
    ("TimeOfDay", PrimitiveKind::TimeOfDay),
    ("Geography", PrimitiveKind::Geography),
    ("GeographyPoint", PrimitiveKind::GeographyPoint),
    ("GeographyLineString", PrimitiveKind::GeographyLineString),
    ("GeographyPolygon", PrimitiveKind::GeographyPolygon),
    ("GeographyMultiPoint", PrimitiveKind::GeographyMultiPoint),
    ("GeographyMultiLineString", PrimitiveKind::GeographyMultiLineString),
    ("GeographyMultiPolygon", PrimitiveKind::GeographyMultiPolygon),
    ("GeographyCollection", PrimitiveKind::GeographyCollection),
    ("Geometry", PrimitiveKind::Geometry),
    ("GeometryPoint", PrimitiveKind::GeometryPoint),
    ("GeometryLineString", PrimitiveKind::GeometryLineString),
    ("GeometryPolygon", PrimitiveKind::GeometryPolygon),
    ("GeometryMultiPoint", PrimitiveKind::GeometryMultiPoint),
    ("GeometryMultiLineString", PrimitiveKind::GeometryMultiLineString),
    ("GeometryMultiPolygon", PrimitiveKind::GeometryMultiPolygon),
    ("GeometryCollection", PrimitiveKind::GeometryCollection),
    ("PrimitiveType", PrimitiveKind::PrimitiveType),
];

impl PrimitiveKind {
    /// Primitive kind by its name in the `Edm` namespace.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        PRIMITIVE_NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, k)| *k)
    }

    /// Name in the `Edm` namespace.
    #[must_use]
    pub fn name(self) -> &'static str {
        PRIMITIVE_NAMES
            .iter()
            .find(|(_, k)| *k == self)
            .map_or("PrimitiveType", |(n, _)| n)
    }

    #[must_use]
    pub const fn is_spatial(self) -> bool {
        matches!(
            self,
            Self::Geography
                | Self::GeographyPoint
                | Self::GeographyLineString
                | Self::GeographyPolygon
                | Self::GeographyMultiPoint
                | Self::GeographyMultiLineString
                | Self::GeographyMultiPolygon
                | Self::GeographyCollection
                | Self::Geometry
                | Self::GeometryPoint
                | Self::GeometryLineString
                | Self::GeometryPolygon
                | Self::GeometryMultiPoint
                | Self::GeometryMultiLineString
                | Self::GeometryMultiPolygon
                | Self::GeometryCollection
        )
    }

    /// Temporal types that accept the `Precision` facet.
    #[must_use]
    pub const fn is_temporal(self) -> bool {
        matches!(self, Self::DateTimeOffset | Self::Duration | Self::TimeOfDay)
    }

    /// Range of values of integer kinds. `None` for any other kind.
    #[must_use]
    pub const fn integer_range(self) -> Option<(i64, i64)> {
        match self {
            Self::Byte => Some((u8::MIN as i64, u8::MAX as i64)),
            Self::SByte => Some((i8::MIN as i64, i8::MAX as i64)),
            Self::Int16 => Some((i16::MIN as i64, i16::MAX as i64)),
            Self::Int32 => Some((i32::MIN as i64, i32::MAX as i64)),
            Self::Int64 => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }

    /// Check that only facets applicable to this kind are specified.
    #[must_use]
    pub const fn supports(self, facets: &Facets) -> bool {
        let max_length = matches!(self, Self::Binary | Self::String | Self::Stream);
        let unicode = matches!(self, Self::String);
        let precision = matches!(self, Self::Decimal) || self.is_temporal();
        let scale = matches!(self, Self::Decimal);
        let srid = self.is_spatial();
        (max_length || facets.max_length.is_none())
            && (unicode || facets.unicode.is_none())
            && (precision || facets.precision.is_none())
            && (scale || facets.scale.is_none())
            && (srid || facets.srid.is_none())
    }
}

/// Built-in path types (`Edm.AnnotationPath`, `Edm.PropertyPath`,
/// ...). Values of these types are path expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKind {
    AnnotationPath,
    PropertyPath,
    NavigationPropertyPath,
    AnyPropertyPath,
    ModelElementPath,
}

impl PathKind {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "AnnotationPath" => Some(Self::AnnotationPath),
            "PropertyPath" => Some(Self::PropertyPath),
            "NavigationPropertyPath" => Some(Self::NavigationPropertyPath),
            "AnyPropertyPath" => Some(Self::AnyPropertyPath),
            "ModelElementPath" => Some(Self::ModelElementPath),
            _ => None,
        }
    }
}

/// Definition a type reference points to.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDef {
    Primitive { kind: PrimitiveKind, facets: Facets },
    /// `Edm.Untyped`
    Untyped,
    Path(PathKind),
    /// Abstract `Edm.ComplexType`.
    AnyComplex,
    /// Abstract `Edm.EntityType`.
    AnyEntity,
    Complex(StructuredTypeId),
    Entity(StructuredTypeId),
    Enum(EnumTypeId),
    /// Type definition with facets specified where it is used.
    TypeDefinition {
        id: TypeDefinitionId,
        facets: Facets,
    },
    Collection(Box<TypeRef>),
    /// `Ref(..)` of an entity type.
    EntityReference(StructuredTypeId),
}

/// Fully resolved type reference.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRef {
    pub definition: TypeDef,
    pub nullable: IsNullable,
}

impl TypeRef {
    #[must_use]
    pub const fn new(definition: TypeDef, nullable: IsNullable) -> Self {
        Self {
            definition,
            nullable,
        }
    }

    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self.definition, TypeDef::Collection(_))
    }

    /// Element type of a collection or the type itself.
    #[must_use]
    pub fn element_type(&self) -> &Self {
        match &self.definition {
            TypeDef::Collection(v) => v,
            _ => self,
        }
    }

    /// Structured type of the (element) type, if any.
    #[must_use]
    pub fn structured_type(&self) -> Option<StructuredTypeId> {
        match self.element_type().definition {
            TypeDef::Complex(id) | TypeDef::Entity(id) | TypeDef::EntityReference(id) => Some(id),
            _ => None,
        }
    }

    /// Facets of a primitive or type definition (element) type.
    #[must_use]
    pub fn facets(&self) -> Option<&Facets> {
        match &self.element_type().definition {
            TypeDef::Primitive { facets, .. } | TypeDef::TypeDefinition { facets, .. } => {
                Some(facets)
            }
            _ => None,
        }
    }
}
