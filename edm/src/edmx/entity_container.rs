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

use crate::edmx::operation::OperationKind;
use crate::edmx::Annotation;
use crate::edmx::QualifiedName;
use crate::edmx::SimpleIdentifier;
use crate::edmx::ValidateError;
use serde::Deserialize;

/// 13.1 Element edm:EntityContainer
#[derive(Debug, Deserialize)]
pub struct DeEntityContainer {
    /// 13.1.1 Attribute `Name`
    #[serde(rename = "@Name")]
    pub name: SimpleIdentifier,
    /// 13.1.2 Attribute `Extends`
    #[serde(rename = "@Extends")]
    pub extends: Option<QualifiedName>,
    #[serde(rename = "$value", default)]
    pub items: Vec<DeEntityContainerItem>,
}

#[derive(Debug, Deserialize)]
pub enum DeEntityContainerItem {
    EntitySet(DeEntitySet),
    Singleton(DeSingleton),
    ActionImport(DeActionImport),
    FunctionImport(DeFunctionImport),
    Annotation(Annotation),
}

/// 13.2 Element edm:EntitySet
#[derive(Debug, Deserialize)]
pub struct DeEntitySet {
    /// 13.2.1 Attribute `Name`
    #[serde(rename = "@Name")]
    pub name: SimpleIdentifier,
    /// 13.2.2 Attribute `EntityType`
    #[serde(rename = "@EntityType")]
    pub entity_type: QualifiedName,
    /// 13.2.3 Attribute `IncludeInServiceDocument`
    #[serde(rename = "@IncludeInServiceDocument")]
    pub include_in_service_document: Option<bool>,
    #[serde(rename = "$value", default)]
    pub items: Vec<DeNavigationSourceItem>,
}

/// 13.3 Element edm:Singleton
#[derive(Debug, Deserialize)]
pub struct DeSingleton {
    /// 13.3.1 Attribute `Name`
    #[serde(rename = "@Name")]
    pub name: SimpleIdentifier,
    /// 13.3.2 Attribute `Type`
    #[serde(rename = "@Type")]
    pub stype: QualifiedName,
    #[serde(rename = "$value", default)]
    pub items: Vec<DeNavigationSourceItem>,
}

#[derive(Debug, Deserialize)]
pub enum DeNavigationSourceItem {
    NavigationPropertyBinding(NavigationPropertyBinding),
    Annotation(Annotation),
}

/// 13.4 Element edm:NavigationPropertyBinding
#[derive(Debug, Deserialize)]
pub struct NavigationPropertyBinding {
    /// 13.4.1 Attribute `Path`
    #[serde(rename = "@Path")]
    pub path: String,
    /// 13.4.2 Attribute `Target`
    #[serde(rename = "@Target")]
    pub target: String,
}

/// 13.5 Element edm:ActionImport
#[derive(Debug, Deserialize)]
pub struct DeActionImport {
    /// 13.5.1 Attribute `Name`
    #[serde(rename = "@Name")]
    pub name: SimpleIdentifier,
    /// 13.5.2 Attribute `Action`
    #[serde(rename = "@Action")]
    pub action: QualifiedName,
    /// 13.5.3 Attribute `EntitySet`
    #[serde(rename = "@EntitySet")]
    pub entity_set: Option<String>,
    #[serde(rename = "Annotation", default)]
    pub annotations: Vec<Annotation>,
}

/// 13.6 Element edm:FunctionImport
#[derive(Debug, Deserialize)]
pub struct DeFunctionImport {
    /// 13.6.1 Attribute `Name`
    #[serde(rename = "@Name")]
    pub name: SimpleIdentifier,
    /// 13.6.2 Attribute `Function`
    #[serde(rename = "@Function")]
    pub function: QualifiedName,
    /// 13.6.3 Attribute `EntitySet`
    #[serde(rename = "@EntitySet")]
    pub entity_set: Option<String>,
    /// 13.6.4 Attribute `IncludeInServiceDocument`
    #[serde(rename = "@IncludeInServiceDocument")]
    pub include_in_service_document: Option<bool>,
    #[serde(rename = "Annotation", default)]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationSourceKind {
    EntitySet,
    Singleton,
}

/// Validated entity set or singleton.
#[derive(Debug)]
pub struct NavigationSource {
    pub kind: NavigationSourceKind,
    pub name: SimpleIdentifier,
    pub entity_type: QualifiedName,
    pub include_in_service_document: Option<bool>,
    pub bindings: Vec<NavigationPropertyBinding>,
    pub annotations: Vec<Annotation>,
}

/// Validated action or function import.
#[derive(Debug)]
pub struct OperationImport {
    pub kind: OperationKind,
    pub name: SimpleIdentifier,
    pub operation: QualifiedName,
    pub entity_set: Option<String>,
    pub include_in_service_document: Option<bool>,
    pub annotations: Vec<Annotation>,
}

/// Validated edm:EntityContainer
#[derive(Debug)]
pub struct EntityContainer {
    pub name: SimpleIdentifier,
    pub extends: Option<QualifiedName>,
    pub navigation_sources: Vec<NavigationSource>,
    pub operation_imports: Vec<OperationImport>,
    pub annotations: Vec<Annotation>,
}

fn split_source_items(
    items: Vec<DeNavigationSourceItem>,
) -> (Vec<NavigationPropertyBinding>, Vec<Annotation>) {
    items
        .into_iter()
        .fold((Vec::new(), Vec::new()), |(mut bs, mut anns), v| {
            match v {
                DeNavigationSourceItem::NavigationPropertyBinding(v) => bs.push(v),
                DeNavigationSourceItem::Annotation(v) => anns.push(v),
            }
            (bs, anns)
        })
}

impl DeEntityContainer {
    /// # Errors
    ///
    /// Actually, doesn't return any errors. Keep it for consistency.
    pub fn validate(self) -> Result<EntityContainer, ValidateError> {
        let (navigation_sources, operation_imports, annotations) = self.items.into_iter().fold(
            (Vec::new(), Vec::new(), Vec::new()),
            |(mut nss, mut ois, mut anns), v| {
                match v {
                    DeEntityContainerItem::EntitySet(v) => {
                        let (bindings, annotations) = split_source_items(v.items);
                        nss.push(NavigationSource {
                            kind: NavigationSourceKind::EntitySet,
                            name: v.name,
                            entity_type: v.entity_type,
                            include_in_service_document: v.include_in_service_document,
                            bindings,
                            annotations,
                        });
                    }
                    DeEntityContainerItem::Singleton(v) => {
                        let (bindings, annotations) = split_source_items(v.items);
                        nss.push(NavigationSource {
                            kind: NavigationSourceKind::Singleton,
                            name: v.name,
                            entity_type: v.stype,
                            include_in_service_document: None,
                            bindings,
                            annotations,
                        });
                    }
                    DeEntityContainerItem::ActionImport(v) => ois.push(OperationImport {
                        kind: OperationKind::Action,
                        name: v.name,
                        operation: v.action,
                        entity_set: v.entity_set,
                        include_in_service_document: None,
                        annotations: v.annotations,
                    }),
                    DeEntityContainerItem::FunctionImport(v) => ois.push(OperationImport {
                        kind: OperationKind::Function,
                        name: v.name,
                        operation: v.function,
                        entity_set: v.entity_set,
                        include_in_service_document: v.include_in_service_document,
                        annotations: v.annotations,
                    }),
                    DeEntityContainerItem::Annotation(v) => anns.push(v),
                }
                (nss, ois, anns)
            },
        );
        Ok(EntityContainer {
            name: self.name,
            extends: self.extends,
            navigation_sources,
            operation_imports,
            annotations,
        })
    }
}
