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
use crate::edmx::PropertyName;
use crate::edmx::QualifiedName;
use crate::edmx::ValidateError;
use serde::Deserialize;

/// 8.1 Element edm:EntityType
#[derive(Debug, Deserialize)]
pub struct DeEntityType {
    /// 8.1.1 Attribute Name
    #[serde(rename = "@Name")]
    pub name: LocalTypeName,
    /// 8.1.2 Attribute `BaseType`
    #[serde(rename = "@BaseType")]
    pub base_type: Option<QualifiedName>,
    /// 8.1.3 Attribute `Abstract`
    #[serde(rename = "@Abstract")]
    pub r#abstract: Option<bool>,
    /// 8.1.4 Attribute `OpenType`
    #[serde(rename = "@OpenType")]
    pub open_type: Option<bool>,
    /// 8.1.5 Attribute `HasStream`
    #[serde(rename = "@HasStream")]
    pub has_stream: Option<bool>,
    /// Items of edm:EntityType
    #[serde(rename = "$value", default)]
    pub items: Vec<DeEntityTypeItem>,
}

/// 8.2 Element edm:Key
#[derive(Debug, Deserialize)]
pub struct Key {
    /// Items of edm:Key
    #[serde(rename = "PropertyRef", default)]
    pub property_refs: Vec<PropertyRef>,
}

/// 8.3 Element edm:PropertyRef
#[derive(Debug, Deserialize)]
pub struct PropertyRef {
    /// 8.3.1 Attribute Name
    ///
    /// Path to a primitive property, possibly through complex
    /// properties.
    #[serde(rename = "@Name")]
    pub name: String,
    /// 8.3.2 Attribute Alias
    #[serde(rename = "@Alias")]
    pub alias: Option<PropertyName>,
}

/// Items of edm:EntityType
#[derive(Debug, Deserialize)]
pub enum DeEntityTypeItem {
    Key(Key),
    #[serde(rename = "Property")]
    StructuralProperty(StructuralProperty),
    NavigationProperty(DeNavigationProperty),
    Annotation(Annotation),
}

/// Validated edm:EntityType
#[derive(Debug)]
pub struct EntityType {
    pub name: LocalTypeName,
    pub base_type: Option<QualifiedName>,
    pub r#abstract: Option<bool>,
    pub open_type: Option<bool>,
    pub has_stream: Option<bool>,
    pub key: Option<Key>,
    pub properties: Vec<StructuralProperty>,
    pub navigation_properties: Vec<NavigationProperty>,
    pub annotations: Vec<Annotation>,
}

impl DeEntityType {
    /// # Errors
    ///
    /// - `ValidateError::EntityType` if error occured. Internal `ValidateError` contains details.
    pub fn validate(self) -> Result<EntityType, ValidateError> {
        let (keys, properties, navigation_properties, annotations) = self.items.into_iter().fold(
            (Vec::new(), Vec::new(), Vec::new(), Vec::new()),
            |(mut keys, mut ps, mut nps, mut anns), v| {
                match v {
                    DeEntityTypeItem::Key(k) => keys.push(k),
                    DeEntityTypeItem::StructuralProperty(p) => ps.push(p),
                    DeEntityTypeItem::NavigationProperty(p) => nps.push(p.validate()),
                    DeEntityTypeItem::Annotation(a) => anns.push(a),
                }
                (keys, ps, nps, anns)
            },
        );
        if keys.len() > 1 {
            return Err(ValidateError::EntityType(
                self.name,
                Box::new(ValidateError::TooManyKeys),
            ));
        }
        let name = self.name;
        let navigation_properties = navigation_properties
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ValidateError::EntityType(name.clone(), Box::new(e)))?;
        Ok(EntityType {
            name,
            base_type: self.base_type,
            r#abstract: self.r#abstract,
            open_type: self.open_type,
            has_stream: self.has_stream,
            key: keys.into_iter().next(),
            properties,
            navigation_properties,
            annotations,
        })
    }
}
