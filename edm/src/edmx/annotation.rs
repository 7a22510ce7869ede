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

//! 14.3 Element edm:Annotation and the expressions it may carry.
//!
//! A value can be given either as an attribute of the annotation
//! (`String="..."`, `Path="..."`) or as a child element. Only the
//! constant, path, collection, record, cast and null expressions are
//! understood; any other element (e.g. `If`, `Apply`) is rejected by
//! the XML deserializer.

use crate::edmx::attribute_values::MaxLength;
use crate::edmx::attribute_values::Scale;
use crate::edmx::attribute_values::Srid;
use crate::edmx::Facets;
use crate::edmx::PropertyName;
use crate::edmx::QualifiedName;
use crate::edmx::SimpleIdentifier;
use crate::edmx::TypeName;
use crate::edmx::ValidateError;
use serde::Deserialize;

/// Kind of a constant expression (14.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantKind {
    Binary,
    Bool,
    Date,
    DateTimeOffset,
    Decimal,
    Duration,
    EnumMember,
    Float,
    Guid,
    Int,
    String,
    TimeOfDay,
}

/// Kind of a path expression (14.5.12 - 14.5.14, 14.5.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathExpressionKind {
    AnnotationPath,
    NavigationPropertyPath,
    Path,
    PropertyPath,
}

/// Validated annotation value.
#[derive(Debug, PartialEq)]
pub enum Expression {
    /// Constant with its literal text.
    Constant(ConstantKind, String),
    /// Path with its literal text.
    Path(PathExpressionKind, String),
    Collection(Vec<Expression>),
    Record(Record),
    Cast(Cast),
    Null,
}

/// 14.5.14 Expression edm:Record
#[derive(Debug, PartialEq)]
pub struct Record {
    pub rtype: Option<QualifiedName>,
    pub property_values: Vec<PropertyValue>,
    pub annotations: Vec<Annotation>,
}

/// 14.5.3 Expression edm:Cast
#[derive(Debug, PartialEq)]
pub struct Cast {
    pub ctype: TypeName,
    pub facets: Facets,
    pub value: Box<Expression>,
}

/// 14.3 Element edm:Annotation
#[derive(Debug, PartialEq, Deserialize)]
#[serde(try_from = "DeAnnotation")]
pub struct Annotation {
    /// 14.3.1 Attribute `Term`
    pub term: QualifiedName,
    /// 14.3.2 Attribute `Qualifier`
    pub qualifier: Option<SimpleIdentifier>,
    /// Value of the annotation. `None` means the term default applies.
    pub value: Option<Expression>,
    /// Annotations of this annotation.
    pub annotations: Vec<Annotation>,
}

/// 14.5.14.2 Element edm:PropertyValue
#[derive(Debug, PartialEq, Deserialize)]
#[serde(try_from = "DePropertyValue")]
pub struct PropertyValue {
    pub property: PropertyName,
    pub value: Expression,
    pub annotations: Vec<Annotation>,
}

/// Constant and path expressions that can be written in attribute
/// notation.
#[derive(Debug, Default)]
struct DeInlineValues {
    binary: Option<String>,
    bool: Option<String>,
    date: Option<String>,
    date_time_offset: Option<String>,
    decimal: Option<String>,
    duration: Option<String>,
    enum_member: Option<String>,
    float: Option<String>,
    guid: Option<String>,
    int: Option<String>,
    string: Option<String>,
    time_of_day: Option<String>,
    annotation_path: Option<String>,
    navigation_property_path: Option<String>,
    path: Option<String>,
    property_path: Option<String>,
}

/// Declares an element struct that accepts attribute notation of
/// constant and path expressions in addition to its own fields.
///
/// `quick-xml` doesn't support `$value` in flattened structs, so
/// attributes are declared on each struct.
macro_rules! with_inline_values {
    ($(#[$meta:meta])* struct $name:ident { $($(#[$fmeta:meta])* $field:ident: $ty:ty,)* }) => {
        $(#[$meta])*
        struct $name {
            $($(#[$fmeta])* $field: $ty,)*
            #[serde(rename = "@Binary")]
            binary: Option<String>,
            #[serde(rename = "@Bool")]
            bool: Option<String>,
            #[serde(rename = "@Date")]
            date: Option<String>,
            #[serde(rename = "@DateTimeOffset")]
            date_time_offset: Option<String>,
            #[serde(rename = "@Decimal")]
            decimal: Option<String>,
            #[serde(rename = "@Duration")]
            duration: Option<String>,
            #[serde(rename = "@EnumMember")]
            enum_member: Option<String>,
            #[serde(rename = "@Float")]
            float: Option<String>,
            #[serde(rename = "@Guid")]
            guid: Option<String>,
            #[serde(rename = "@Int")]
            int: Option<String>,
            #[serde(rename = "@String")]
            string: Option<String>,
            #[serde(rename = "@TimeOfDay")]
            time_of_day: Option<String>,
            #[serde(rename = "@AnnotationPath")]
            annotation_path: Option<String>,
            #[serde(rename = "@NavigationPropertyPath")]
            navigation_property_path: Option<String>,
            #[serde(rename = "@Path")]
            path: Option<String>,
            #[serde(rename = "@PropertyPath")]
            property_path: Option<String>,
        }

        impl $name {
            fn take_inline(&mut self) -> DeInlineValues {
                DeInlineValues {
                    binary: self.binary.take(),
                    bool: self.bool.take(),
                    date: self.date.take(),
                    date_time_offset: self.date_time_offset.take(),
                    decimal: self.decimal.take(),
                    duration: self.duration.take(),
                    enum_member: self.enum_member.take(),
                    float: self.float.take(),
                    guid: self.guid.take(),
                    int: self.int.take(),
                    string: self.string.take(),
                    time_of_day: self.time_of_day.take(),
                    annotation_path: self.annotation_path.take(),
                    navigation_property_path: self.navigation_property_path.take(),
                    path: self.path.take(),
                    property_path: self.property_path.take(),
                }
            }
        }
    };
}

impl DeInlineValues {
    fn into_expressions(self) -> Vec<Expression> {
        use ConstantKind as C;
        use PathExpressionKind as P;
        let constants = [
            (C::Binary, self.binary),
            (C::Bool, self.bool),
            (C::Date, self.date),
            (C::DateTimeOffset, self.date_time_offset),
            (C::Decimal, self.decimal),
            (C::Duration, self.duration),
            (C::EnumMember, self.enum_member),
            (C::Float, self.float),
            (C::Guid, self.guid),
            (C::Int, self.int),
            (C::String, self.string),
            (C::TimeOfDay, self.time_of_day),
        ];
        let paths = [
            (P::AnnotationPath, self.annotation_path),
            (P::NavigationPropertyPath, self.navigation_property_path),
            (P::Path, self.path),
            (P::PropertyPath, self.property_path),
        ];
        constants
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| Expression::Constant(k, v)))
            .chain(
                paths
                    .into_iter()
                    .filter_map(|(k, v)| v.map(|v| Expression::Path(k, v))),
            )
            .collect()
    }
}

/// Child elements that can appear where an expression is expected.
#[derive(Debug, Deserialize)]
enum DeExpressionItem {
    Binary(String),
    Bool(String),
    Date(String),
    DateTimeOffset(String),
    Decimal(String),
    Duration(String),
    EnumMember(String),
    Float(String),
    Guid(String),
    Int(String),
    String(String),
    TimeOfDay(String),
    AnnotationPath(String),
    NavigationPropertyPath(String),
    Path(String),
    PropertyPath(String),
    Collection(DeCollection),
    Record(DeRecord),
    Cast(DeCast),
    Null(DeNull),
    Annotation(Annotation),
}

#[derive(Debug, Deserialize)]
struct DeCollection {
    #[serde(rename = "$value", default)]
    items: Vec<DeExpressionItem>,
}

#[derive(Debug, Deserialize)]
struct DeRecord {
    #[serde(rename = "@Type")]
    rtype: Option<QualifiedName>,
    #[serde(rename = "$value", default)]
    items: Vec<DeRecordItem>,
}

#[derive(Debug, Deserialize)]
enum DeRecordItem {
    PropertyValue(PropertyValue),
    Annotation(Annotation),
}

#[derive(Debug, Deserialize)]
struct DeCast {
    #[serde(rename = "@Type")]
    ctype: TypeName,
    #[serde(rename = "@MaxLength")]
    max_length: Option<MaxLength>,
    #[serde(rename = "@Precision")]
    precision: Option<u32>,
    #[serde(rename = "@Scale")]
    scale: Option<Scale>,
    #[serde(rename = "@SRID")]
    srid: Option<Srid>,
    #[serde(rename = "$value", default)]
    items: Vec<DeExpressionItem>,
}

#[derive(Debug, Deserialize)]
struct DeNull {
    #[serde(rename = "Annotation", default)]
    #[allow(dead_code)]
    annotations: Vec<Annotation>,
}

with_inline_values! {
    #[derive(Debug, Deserialize)]
    struct DeAnnotation {
        #[serde(rename = "@Term")]
        term: QualifiedName,
        #[serde(rename = "@Qualifier")]
        qualifier: Option<SimpleIdentifier>,
        #[serde(rename = "$value", default)]
        items: Vec<DeExpressionItem>,
    }
}

with_inline_values! {
    #[derive(Debug, Deserialize)]
    struct DePropertyValue {
        #[serde(rename = "@Property")]
        property: PropertyName,
        #[serde(rename = "$value", default)]
        items: Vec<DeExpressionItem>,
    }
}

/// Split child elements into value expressions and annotations.
fn validate_items(
    items: Vec<DeExpressionItem>,
) -> Result<(Vec<Expression>, Vec<Annotation>), ValidateError> {
    items
        .into_iter()
        .try_fold((Vec::new(), Vec::new()), |(mut exprs, mut anns), v| {
            match v {
                DeExpressionItem::Annotation(v) => anns.push(v),
                v => exprs.push(v.validate()?),
            }
            Ok((exprs, anns))
        })
}

/// Exactly one expression is allowed.
fn single(exprs: Vec<Expression>) -> Result<Expression, ValidateError> {
    let mut iter = exprs.into_iter();
    let first = iter.next().ok_or(ValidateError::MissingExpression)?;
    if iter.next().is_some() {
        return Err(ValidateError::TooManyExpressions);
    }
    Ok(first)
}

impl DeExpressionItem {
    fn validate(self) -> Result<Expression, ValidateError> {
        use ConstantKind as C;
        use PathExpressionKind as P;
        Ok(match self {
            Self::Binary(v) => Expression::Constant(C::Binary, v),
            Self::Bool(v) => Expression::Constant(C::Bool, v),
            Self::Date(v) => Expression::Constant(C::Date, v),
            Self::DateTimeOffset(v) => Expression::Constant(C::DateTimeOffset, v),
            Self::Decimal(v) => Expression::Constant(C::Decimal, v),
            Self::Duration(v) => Expression::Constant(C::Duration, v),
            Self::EnumMember(v) => Expression::Constant(C::EnumMember, v),
            Self::Float(v) => Expression::Constant(C::Float, v),
            Self::Guid(v) => Expression::Constant(C::Guid, v),
            Self::Int(v) => Expression::Constant(C::Int, v),
            Self::String(v) => Expression::Constant(C::String, v),
            Self::TimeOfDay(v) => Expression::Constant(C::TimeOfDay, v),
            Self::AnnotationPath(v) => Expression::Path(P::AnnotationPath, v),
            Self::NavigationPropertyPath(v) => Expression::Path(P::NavigationPropertyPath, v),
            Self::Path(v) => Expression::Path(P::Path, v),
            Self::PropertyPath(v) => Expression::Path(P::PropertyPath, v),
            Self::Collection(v) => {
                let (exprs, anns) = validate_items(v.items)?;
                if !anns.is_empty() {
                    return Err(ValidateError::MisplacedAnnotation);
                }
                Expression::Collection(exprs)
            }
            Self::Record(v) => {
                let (property_values, annotations) = v.items.into_iter().fold(
                    (Vec::new(), Vec::new()),
                    |(mut pvs, mut anns), v| {
                        match v {
                            DeRecordItem::PropertyValue(v) => pvs.push(v),
                            DeRecordItem::Annotation(v) => anns.push(v),
                        }
                        (pvs, anns)
                    },
                );
                Expression::Record(Record {
                    rtype: v.rtype,
                    property_values,
                    annotations,
                })
            }
            Self::Cast(v) => {
                let (exprs, _) = validate_items(v.items)?;
                Expression::Cast(Cast {
                    ctype: v.ctype,
                    facets: Facets {
                        max_length: v.max_length,
                        precision: v.precision,
                        scale: v.scale,
                        srid: v.srid,
                        unicode: None,
                    },
                    value: Box::new(single(exprs)?),
                })
            }
            Self::Null(_) => Expression::Null,
            Self::Annotation(_) => return Err(ValidateError::MisplacedAnnotation),
        })
    }
}

impl TryFrom<DeAnnotation> for Annotation {
    type Error = ValidateError;

    fn try_from(mut de: DeAnnotation) -> Result<Self, Self::Error> {
        let inline = de.take_inline();
        let term = de.term;
        let wrap = |e| ValidateError::Annotation(term.clone(), Box::new(e));
        let (elements, annotations) = validate_items(de.items).map_err(wrap)?;
        let mut exprs = inline.into_expressions();
        exprs.extend(elements);
        let value = if exprs.is_empty() {
            None
        } else {
            Some(single(exprs).map_err(wrap)?)
        };
        Ok(Self {
            term,
            qualifier: de.qualifier,
            value,
            annotations,
        })
    }
}

impl TryFrom<DePropertyValue> for PropertyValue {
    type Error = ValidateError;

    fn try_from(mut de: DePropertyValue) -> Result<Self, Self::Error> {
        let inline = de.take_inline();
        let property = de.property;
        let wrap = |e| ValidateError::PropertyValue(property.clone(), Box::new(e));
        let (elements, annotations) = validate_items(de.items).map_err(wrap)?;
        let mut exprs = inline.into_expressions();
        exprs.extend(elements);
        let value = single(exprs).map_err(wrap)?;
        Ok(Self {
            property,
            value,
            annotations,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use quick_xml::de::from_str;

    #[test]
    fn test_inline_constant() {
        let ann: Annotation =
            from_str(r#"<Annotation Term="Core.Description" String="Hello"/>"#).unwrap();
        assert_eq!(ann.term.to_string(), "Core.Description");
        assert_eq!(
            ann.value,
            Some(Expression::Constant(ConstantKind::String, "Hello".into()))
        );
    }

    #[test]
    fn test_no_value() {
        let ann: Annotation =
            from_str(r#"<Annotation Term="Core.Computed" Qualifier="Q1"/>"#).unwrap();
        assert!(ann.value.is_none());
        assert_eq!(ann.qualifier.unwrap().inner(), "Q1");
    }

    #[test]
    fn test_element_record_and_collection() {
        let ann: Annotation = from_str(
            r#"<Annotation Term="Capabilities.InsertRestrictions">
                 <Record Type="Capabilities.InsertRestrictionsType">
                   <PropertyValue Property="Insertable" Bool="false"/>
                   <PropertyValue Property="NonInsertableProperties">
                     <Collection>
                       <PropertyPath>Id</PropertyPath>
                       <PropertyPath>Created</PropertyPath>
                     </Collection>
                   </PropertyValue>
                   <Annotation Term="Core.Description" String="nested"/>
                 </Record>
               </Annotation>"#,
        )
        .unwrap();
        let Some(Expression::Record(record)) = ann.value else {
            panic!("record expected");
        };
        assert_eq!(
            record.rtype.unwrap().to_string(),
            "Capabilities.InsertRestrictionsType"
        );
        assert_eq!(record.property_values.len(), 2);
        assert_eq!(record.annotations.len(), 1);
        assert_eq!(
            record.property_values[1].value,
            Expression::Collection(vec![
                Expression::Path(PathExpressionKind::PropertyPath, "Id".into()),
                Expression::Path(PathExpressionKind::PropertyPath, "Created".into()),
            ])
        );
    }

    #[test]
    fn test_two_values_rejected() {
        let result: Result<Annotation, _> = from_str(
            r#"<Annotation Term="Core.Description" String="a"><String>b</String></Annotation>"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_dynamic_expression_rejected() {
        let result: Result<Annotation, _> = from_str(
            r#"<Annotation Term="Core.Description"><If><Bool>true</Bool><String>a</String><String>b</String></If></Annotation>"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_nested_annotation() {
        let ann: Annotation = from_str(
            r#"<Annotation Term="Core.Description" String="a">
                 <Annotation Term="Core.IsLanguageDependent"/>
               </Annotation>"#,
        )
        .unwrap();
        assert_eq!(ann.annotations.len(), 1);
        assert!(ann.value.is_some());
    }
}
