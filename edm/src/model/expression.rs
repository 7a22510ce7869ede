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

//! Typed annotation values.

use crate::edmx::annotation::PathExpressionKind;
use crate::edmx::QualifiedName as EdmxQualifiedName;
use crate::edmx::SimpleIdentifier;
use crate::edmx::TypeName;
use crate::model::EnumTypeId;
use crate::model::PropertyRef;
use crate::model::StructuredTypeId;
use crate::model::TermRef;
use crate::model::TypeRef;
use rust_decimal::Decimal;
use time::Date;
use time::Duration;
use time::OffsetDateTime;
use time::Time;
use uuid::Uuid;

/// Value of a constant expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue<'a> {
    Binary(Vec<u8>),
    Boolean(bool),
    Date(Date),
    DateTimeOffset(OffsetDateTime),
    Decimal(Decimal),
    Duration(Duration),
    Float(f64),
    Guid(Uuid),
    Integer(i64),
    String(&'a str),
    TimeOfDay(Time),
}

/// Annotation inside of an expression (on a record or on a property
/// value of a record).
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionAnnotation<'a> {
    pub term: TermRef<'a>,
    pub qualifier: Option<&'a SimpleIdentifier>,
    pub value: Expression<'a>,
}

/// Property value of a record expression.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordProperty<'a> {
    pub name: &'a SimpleIdentifier,
    /// Property of the record type. `None` for dynamic properties of
    /// open types or when record type is unknown.
    pub property: Option<PropertyRef>,
    pub value: Expression<'a>,
    pub annotations: Vec<ExpressionAnnotation<'a>>,
}

/// Annotation value.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression<'a> {
    /// Typed constant. `text` is the literal as written in the
    /// document.
    Constant {
        value: ConstantValue<'a>,
        text: &'a str,
    },
    /// Members of an enum type. More than one member only for flags.
    EnumMembers {
        enum_type: EnumTypeId,
        members: Vec<usize>,
    },
    /// Enum member literal whose enum type is not in the model. Only
    /// in values of annotations with unresolved terms.
    UnresolvedEnumMember(&'a str),
    Path {
        kind: PathExpressionKind,
        segments: Vec<&'a str>,
    },
    Collection(Vec<Expression<'a>>),
    Record {
        /// `None` if the type is neither written nor known from the
        /// term, or if the written type is not in the model.
        rtype: Option<StructuredTypeId>,
        type_name: Option<&'a EdmxQualifiedName>,
        properties: Vec<RecordProperty<'a>>,
        annotations: Vec<ExpressionAnnotation<'a>>,
    },
    Cast {
        /// `None` if the type is not in the model.
        ctype: Option<TypeRef>,
        type_name: &'a TypeName,
        value: Box<Expression<'a>>,
    },
    Null,
}

impl<'a> Expression<'a> {
    /// String value of a string constant.
    #[must_use]
    pub const fn as_str(&self) -> Option<&'a str> {
        match self {
            Self::Constant {
                value: ConstantValue::String(v),
                ..
            } => Some(*v),
            _ => None,
        }
    }
}
