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

use crate::edmx::property::DeNavigationProperty;
use crate::edmx::property::NavigationProperty;
use crate::edmx::property::StructuralProperty;
use crate::edmx::Annotation;
use crate::edmx::LocalTypeName;
use crate::edmx::QualifiedName;
use crate::edmx::ValidateError;
use serde::Deserialize;

/// 9.1 Element edm:ComplexType
#[derive(Debug, Deserialize)]
pub struct DeComplexType {
    /// 9.1.1 Attribute `Name`
    #[serde(rename = "@Name")]
    pub name: LocalTypeName,
    /// 9.1.2 Attribute `BaseType`
    #[serde(rename = "@BaseType")]
    pub base_type: Option<QualifiedName>,
    /// 9.1.3 Attribute `Abstract`
    #[serde(rename = "@Abstract")]
    pub r#abstract: Option<bool>,
    /// 9.1.4 Attribute `OpenType`
    #[serde(rename = "@OpenType")]
    pub open_type: Option<bool>,
    /// Items of edm:ComplexType
    #[serde(rename = "$value", default)]
    pub items: Vec<DeComplexTypeItem>,
}

#[derive(Debug, Deserialize)]
pub enum DeComplexTypeItem {
    #[serde(rename = "Property")]
    StructuralProperty(StructuralProperty),
    NavigationProperty(DeNavigationProperty),
    Annotation(Annotation),
}

/// Validated edm:ComplexType
#[derive(Debug)]
pub struct ComplexType {
    pub name: LocalTypeName,
    pub base_type: Option<QualifiedName>,
    pub r#abstract: Option<bool>,
    pub open_type: Option<bool>,
    pub properties: Vec<StructuralProperty>,
    pub navigation_properties: Vec<NavigationProperty>,
    pub annotations: Vec<Annotation>,
}

impl DeComplexType {
    /// # Errors
    ///
    /// `ValidateError::ComplexType` if any navigation property is invalid.
    pub fn validate(self) -> Result<ComplexType, ValidateError> {
        let (properties, navigation_properties, annotations) = self.items.into_iter().fold(
            (Vec::new(), Vec::new(), Vec::new()),
            |(mut ps, mut nps, mut anns), v| {
                match v {
                    DeComplexTypeItem::StructuralProperty(p) => ps.push(p),
                    DeComplexTypeItem::NavigationProperty(p) => nps.push(p.validate()),
                    DeComplexTypeItem::Annotation(a) => anns.push(a),
                }
                (ps, nps, anns)
            },
        );
        let name = self.name;
        let navigation_properties = navigation_properties
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ValidateError::ComplexType(name.clone(), Box::new(e)))?;
        Ok(ComplexType {
            name,
            base_type: self.base_type,
            r#abstract: self.r#abstract,
            open_type: self.open_type,
            properties,
            navigation_properties,
            annotations,
        })
    }
}
