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

//! EDMX parser and validator.
//!
//! This is the parsed-document AST consumed by the model builder.
//! Raw `De*` structures mirror the XML layout and are folded into
//! validated structures that group child elements by kind.

/// 3.1 Element edmx:Edmx
pub mod edmx_root;

/// 3.2 Element edmx:DataServices
pub mod data_services;

/// 3.3 Element edmx:Reference
pub mod reference;

/// 5 Schema
pub mod schema;

/// 6 Structural Property / 7 Navigation Property
pub mod property;

/// 8 Entity Type
pub mod entity_type;

/// 9 Complex Type
pub mod complex_type;

/// 10 Enumeration Type
pub mod enum_type;

/// 11 Type Definition
pub mod type_definition;

/// 12 Action and Function
pub mod operation;

/// 13 Entity Container
pub mod entity_container;

/// 14.1 Element edm:Term
pub mod term;

/// 14.3 Element edm:Annotation, 14.4 Constant Expressions, 14.5 Dynamic Expressions
pub mod annotation;

/// 17 Attribute Values
pub mod attribute_values;

use quick_xml::DeError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Reexport of Edmx type to root.
pub type Edmx = edmx_root::Edmx;
/// Reexport of Schema type to root.
pub type Schema = schema::Schema;
/// Reexport of Annotation type to root.
pub type Annotation = annotation::Annotation;
/// Reexport of Expression type to root.
pub type Expression = annotation::Expression;
/// Reexport of Namespace type to root.
pub type Namespace = attribute_values::Namespace;
/// Reexport of `SimpleIdentifier` type to root.
pub type SimpleIdentifier = attribute_values::SimpleIdentifier;
/// Reexport of `QualifiedName` type to root.
pub type QualifiedName = attribute_values::QualifiedName;
/// Reexport of `TypeName` type to root.
pub type TypeName = attribute_values::TypeName;

/// Name of a type local to its schema.
pub type LocalTypeName = SimpleIdentifier;
/// Name of a structural or navigation property.
pub type PropertyName = SimpleIdentifier;
/// Name of an action or function parameter.
pub type ParameterName = SimpleIdentifier;
/// Name of an enum member.
pub type EnumMemberName = SimpleIdentifier;

/// EDMX validation errors.
#[derive(Debug)]
pub enum ValidateError {
    /// XML deserialization error.
    XmlDeserialize(DeError),
    /// Invalid number of `DataServices`.
    WrongDataServicesNumber,
    /// In the `EntityType` too many keys.
    TooManyKeys,
    /// In the `NavigationProperty` too many `OnDelete` items.
    TooManyOnDelete,
    /// In the `Action` or `Function` too many `ReturnType` items.
    TooManyReturnTypes,
    /// More than one value expression where only one is allowed.
    TooManyExpressions,
    /// Required value expression is missing.
    MissingExpression,
    /// Annotation where annotations are not allowed.
    MisplacedAnnotation,
    /// Schema validation error.
    Schema(Namespace, Box<ValidateError>),
    /// `ComplexType` validation error.
    ComplexType(LocalTypeName, Box<ValidateError>),
    /// `EntityType` validation error.
    EntityType(LocalTypeName, Box<ValidateError>),
    /// `NavigationProperty` validation error.
    NavigationProperty(PropertyName, Box<ValidateError>),
    /// `Action` or `Function` validation error.
    Operation(SimpleIdentifier, Box<ValidateError>),
    /// `EntityContainer` validation error.
    EntityContainer(SimpleIdentifier, Box<ValidateError>),
    /// `Annotation` validation error.
    Annotation(QualifiedName, Box<ValidateError>),
    /// `PropertyValue` validation error.
    PropertyValue(PropertyName, Box<ValidateError>),
}

impl Display for ValidateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::XmlDeserialize(err) => write!(f, "xml deserialization error: {err}"),
            Self::WrongDataServicesNumber => {
                "edmx:Edmx must contain exactly one edmx:DataServices element".fmt(f)
            }
            Self::TooManyKeys => "more than one edm:Key".fmt(f),
            Self::TooManyOnDelete => "more than one edm:OnDelete".fmt(f),
            Self::TooManyReturnTypes => "more than one edm:ReturnType".fmt(f),
            Self::TooManyExpressions => "more than one value expression".fmt(f),
            Self::MissingExpression => "value expression is missing".fmt(f),
            Self::MisplacedAnnotation => "annotation is not allowed here".fmt(f),
            Self::Schema(name, err) => write!(f, "schema {name}: {err}"),
            Self::ComplexType(name, err) => write!(f, "complex type {name}: {err}"),
            Self::EntityType(name, err) => write!(f, "entity type {name}: {err}"),
            Self::NavigationProperty(name, err) => write!(f, "navigation property {name}: {err}"),
            Self::Operation(name, err) => write!(f, "operation {name}: {err}"),
            Self::EntityContainer(name, err) => write!(f, "entity container {name}: {err}"),
            Self::Annotation(term, err) => write!(f, "annotation {term}: {err}"),
            Self::PropertyValue(name, err) => write!(f, "property value {name}: {err}"),
        }
    }
}

impl std::error::Error for ValidateError {}

/// Type facets collected from attributes of properties, parameters,
/// return types, terms and type definitions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Facets {
    pub max_length: Option<attribute_values::MaxLength>,
    pub precision: Option<u32>,
    pub scale: Option<attribute_values::Scale>,
    pub srid: Option<attribute_values::Srid>,
    pub unicode: Option<bool>,
}

impl Facets {
    /// No facet is specified.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.max_length.is_none()
            && self.precision.is_none()
            && self.scale.is_none()
            && self.srid.is_none()
            && self.unicode.is_none()
    }
}

/// Common interface of elements that carry inline annotations.
pub trait Annotated {
    fn annotations(&self) -> &[Annotation];
}

macro_rules! impl_annotated {
    ($($t:ty),+ $(,)?) => {
        $(impl Annotated for $t {
            fn annotations(&self) -> &[Annotation] {
                &self.annotations
            }
        })+
    };
}

impl_annotated!(
    annotation::Annotation,
    annotation::PropertyValue,
    complex_type::ComplexType,
    entity_container::EntityContainer,
    entity_container::NavigationSource,
    entity_container::OperationImport,
    entity_type::EntityType,
    enum_type::EnumMember,
    enum_type::EnumType,
    operation::Operation,
    operation::Parameter,
    operation::ReturnType,
    property::NavigationProperty,
    property::StructuralProperty,
    schema::Schema,
    term::Term,
    type_definition::TypeDefinition,
);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_trivial_data() {
        let data = r#"
           <edmx:Edmx Version="4.0">
             <edmx:DataServices>
               <Schema Namespace="Org.OData.Core.V1" Alias="Core">
                  <Term Name="Computed" Type="Core.Tag" DefaultValue="true" AppliesTo="Property">
                    <Annotation Term="Core.Description" String="A value for this property is generated on both insert and update"/>
                  </Term>
               </Schema>
             </edmx:DataServices>
           </edmx:Edmx>"#;
        let edmx = Edmx::parse(data).unwrap();
        assert_eq!(edmx.version, "4.0");
        assert_eq!(edmx.data_services.schemas.len(), 1);
        let schema = &edmx.data_services.schemas[0];
        assert_eq!(schema.alias.as_ref().unwrap().inner(), "Core");
        assert_eq!(schema.terms.len(), 1);
        let term = &schema.terms[0];
        assert_eq!(term.name.inner(), "Computed");
        assert_eq!(term.ttype.as_ref().unwrap().to_string(), "Core.Tag");
        assert_eq!(term.default_value.as_deref(), Some("true"));
        assert_eq!(term.applies_to.as_deref(), Some("Property"));
        assert_eq!(term.annotations.len(), 1);
    }

    #[test]
    fn test_two_data_services_rejected() {
        let data = r#"
           <edmx:Edmx Version="4.0">
             <edmx:DataServices><Schema Namespace="A"/></edmx:DataServices>
             <edmx:DataServices><Schema Namespace="B"/></edmx:DataServices>
           </edmx:Edmx>"#;
        assert!(matches!(
            Edmx::parse(data),
            Err(ValidateError::WrongDataServicesNumber)
        ));
    }
}
