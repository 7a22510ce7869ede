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

use crate::edmx::attribute_values::MaxLength;
use crate::edmx::attribute_values::Scale;
use crate::edmx::attribute_values::Srid;
use crate::edmx::Annotation;
use crate::edmx::Facets;
use crate::edmx::ParameterName;
use crate::edmx::SimpleIdentifier;
use crate::edmx::TypeName;
use crate::edmx::ValidateError;
use serde::Deserialize;

/// Action or function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Action,
    Function,
}

/// 12.1 Element edm:Action
#[derive(Debug, Deserialize)]
pub struct DeAction {
    /// 12.1.1 Attribute `Name`
    #[serde(rename = "@Name")]
    pub name: SimpleIdentifier,
    /// 12.1.2 Attribute `IsBound`
    #[serde(rename = "@IsBound")]
    pub is_bound: Option<bool>,
    /// 12.1.3 Attribute `EntitySetPath`
    #[serde(rename = "@EntitySetPath")]
    pub entity_set_path: Option<String>,
    #[serde(rename = "$value", default)]
    pub items: Vec<DeOperationItem>,
}

/// 12.2 Element edm:Function
#[derive(Debug, Deserialize)]
pub struct DeFunction {
    /// 12.2.1 Attribute `Name`
    #[serde(rename = "@Name")]
    pub name: SimpleIdentifier,
    /// 12.2.2 Attribute `IsBound`
    #[serde(rename = "@IsBound")]
    pub is_bound: Option<bool>,
    /// 12.2.3 Attribute `IsComposable`
    #[serde(rename = "@IsComposable")]
    pub is_composable: Option<bool>,
    /// 12.2.4 Attribute `EntitySetPath`
    #[serde(rename = "@EntitySetPath")]
    pub entity_set_path: Option<String>,
    #[serde(rename = "$value", default)]
    pub items: Vec<DeOperationItem>,
}

#[derive(Debug, Deserialize)]
pub enum DeOperationItem {
    Parameter(Parameter),
    ReturnType(ReturnType),
    Annotation(Annotation),
}

/// 12.3 Element edm:ReturnType
#[derive(Debug, Deserialize)]
pub struct ReturnType {
    /// 12.3.1 Attribute `Type`
    #[serde(rename = "@Type")]
    pub rtype: TypeName,
    /// 12.3.2 Attribute `Nullable`
    #[serde(rename = "@Nullable")]
    pub nullable: Option<bool>,
    #[serde(rename = "@MaxLength")]
    pub max_length: Option<MaxLength>,
    #[serde(rename = "@Precision")]
    pub precision: Option<u32>,
    #[serde(rename = "@Scale")]
    pub scale: Option<Scale>,
    #[serde(rename = "@SRID")]
    pub srid: Option<Srid>,
    #[serde(rename = "Annotation", default)]
    pub annotations: Vec<Annotation>,
}

impl ReturnType {
    #[must_use]
    pub const fn facets(&self) -> Facets {
        Facets {
            max_length: self.max_length,
            precision: self.precision,
            scale: self.scale,
            srid: self.srid,
            unicode: None,
        }
    }
}

/// 12.4 Element edm:Parameter
#[derive(Debug, Deserialize)]
pub struct Parameter {
    /// 12.4.1 Attribute `Name`
    #[serde(rename = "@Name")]
    pub name: ParameterName,
    /// 12.4.2 Attribute `Type`
    #[serde(rename = "@Type")]
    pub ptype: TypeName,
    /// 12.4.3 Attribute `Nullable`
    #[serde(rename = "@Nullable")]
    pub nullable: Option<bool>,
    #[serde(rename = "@MaxLength")]
    pub max_length: Option<MaxLength>,
    #[serde(rename = "@Precision")]
    pub precision: Option<u32>,
    #[serde(rename = "@Scale")]
    pub scale: Option<Scale>,
    #[serde(rename = "@SRID")]
    pub srid: Option<Srid>,
    #[serde(rename = "@Unicode")]
    pub unicode: Option<bool>,
    #[serde(rename = "Annotation", default)]
    pub annotations: Vec<Annotation>,
}

impl Parameter {
    #[must_use]
    pub const fn facets(&self) -> Facets {
        Facets {
            max_length: self.max_length,
            precision: self.precision,
            scale: self.scale,
            srid: self.srid,
            unicode: self.unicode,
        }
    }
}

/// Validated action or function.
#[derive(Debug)]
pub struct Operation {
    pub kind: OperationKind,
    pub name: SimpleIdentifier,
    pub is_bound: Option<bool>,
    /// Always `None` for actions.
    pub is_composable: Option<bool>,
    pub entity_set_path: Option<String>,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<ReturnType>,
    pub annotations: Vec<Annotation>,
}

#[allow(clippy::type_complexity)]
fn split_items(
    items: Vec<DeOperationItem>,
) -> (Vec<Parameter>, Vec<ReturnType>, Vec<Annotation>) {
    items.into_iter().fold(
        (Vec::new(), Vec::new(), Vec::new()),
        |(mut ps, mut rts, mut anns), v| {
            match v {
                DeOperationItem::Parameter(v) => ps.push(v),
                DeOperationItem::ReturnType(v) => rts.push(v),
                DeOperationItem::Annotation(v) => anns.push(v),
            }
            (ps, rts, anns)
        },
    )
}

fn single_return_type(
    name: &SimpleIdentifier,
    mut rts: Vec<ReturnType>,
) -> Result<Option<ReturnType>, ValidateError> {
    if rts.len() > 1 {
        return Err(ValidateError::Operation(
            name.clone(),
            Box::new(ValidateError::TooManyReturnTypes),
        ));
    }
    Ok(rts.pop())
}

impl DeAction {
    /// # Errors
    ///
    /// `ValidateError::Operation` if more than one return type is specified.
    pub fn validate(self) -> Result<Operation, ValidateError> {
        let (parameters, rts, annotations) = split_items(self.items);
        Ok(Operation {
            kind: OperationKind::Action,
            return_type: single_return_type(&self.name, rts)?,
            name: self.name,
            is_bound: self.is_bound,
            is_composable: None,
            entity_set_path: self.entity_set_path,
            parameters,
            annotations,
        })
    }
}

impl DeFunction {
    /// # Errors
    ///
    /// `ValidateError::Operation` if more than one return type is specified.
    pub fn validate(self) -> Result<Operation, ValidateError> {
        let (parameters, rts, annotations) = split_items(self.items);
        Ok(Operation {
            kind: OperationKind::Function,
            return_type: single_return_type(&self.name, rts)?,
            name: self.name,
            is_bound: self.is_bound,
            is_composable: self.is_composable,
            entity_set_path: self.entity_set_path,
            parameters,
            annotations,
        })
    }
}
