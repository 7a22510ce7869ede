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

use crate::edmx::complex_type::ComplexType;
use crate::edmx::complex_type::DeComplexType;
use crate::edmx::entity_container::DeEntityContainer;
use crate::edmx::entity_container::EntityContainer;
use crate::edmx::entity_type::DeEntityType;
use crate::edmx::entity_type::EntityType;
use crate::edmx::enum_type::DeEnumType;
use crate::edmx::enum_type::EnumType;
use crate::edmx::operation::DeAction;
use crate::edmx::operation::DeFunction;
use crate::edmx::operation::Operation;
use crate::edmx::term::Term;
use crate::edmx::type_definition::TypeDefinition;
use crate::edmx::Annotation;
use crate::edmx::Namespace;
use crate::edmx::SimpleIdentifier;
use crate::edmx::ValidateError;
use serde::Deserialize;

/// 5.1 Element edm:Schema
#[derive(Debug, Deserialize)]
pub struct DeSchema {
    /// 5.1.1 Attribute `Namespace`
    #[serde(rename = "@Namespace")]
    pub namespace: Namespace,
    /// 5.1.2 Attribute `Alias`
    #[serde(rename = "@Alias")]
    pub alias: Option<SimpleIdentifier>,
    #[serde(rename = "$value", default)]
    pub items: Vec<DeSchemaItem>,
}

#[derive(Debug, Deserialize)]
pub enum DeSchemaItem {
    EntityType(DeEntityType),
    ComplexType(DeComplexType),
    EnumType(DeEnumType),
    TypeDefinition(TypeDefinition),
    EntityContainer(DeEntityContainer),
    Term(Term),
    Action(DeAction),
    Function(DeFunction),
    Annotations(Annotations),
    Annotation(Annotation),
}

/// 14.2 Element edm:Annotations
#[derive(Debug, Deserialize)]
pub struct Annotations {
    /// 14.2.1 Attribute `Target`
    #[serde(rename = "@Target")]
    pub target: String,
    /// 14.2.2 Attribute `Qualifier`
    ///
    /// Applied to every annotation in the group that doesn't have its
    /// own qualifier.
    #[serde(rename = "@Qualifier")]
    pub qualifier: Option<SimpleIdentifier>,
    #[serde(rename = "Annotation", default)]
    pub annotations: Vec<Annotation>,
}

/// Validated schema. All declarations are kept in document order.
#[derive(Debug)]
pub struct Schema {
    pub namespace: Namespace,
    pub alias: Option<SimpleIdentifier>,
    pub entity_types: Vec<EntityType>,
    pub complex_types: Vec<ComplexType>,
    pub enum_types: Vec<EnumType>,
    pub type_definitions: Vec<TypeDefinition>,
    pub terms: Vec<Term>,
    pub operations: Vec<Operation>,
    pub entity_containers: Vec<EntityContainer>,
    /// Out-of-line annotations.
    pub out_of_line: Vec<Annotations>,
    pub annotations: Vec<Annotation>,
}

impl DeSchema {
    /// # Errors
    ///
    /// Returns error if any of items failed to validate.
    pub fn validate(self) -> Result<Schema, ValidateError> {
        let namespace = self.namespace;
        let mut schema = Schema {
            namespace: namespace.clone(),
            alias: self.alias,
            entity_types: Vec::new(),
            complex_types: Vec::new(),
            enum_types: Vec::new(),
            type_definitions: Vec::new(),
            terms: Vec::new(),
            operations: Vec::new(),
            entity_containers: Vec::new(),
            out_of_line: Vec::new(),
            annotations: Vec::new(),
        };
        self.items
            .into_iter()
            .try_for_each(|v| {
                match v {
                    DeSchemaItem::EntityType(v) => schema.entity_types.push(v.validate()?),
                    DeSchemaItem::ComplexType(v) => schema.complex_types.push(v.validate()?),
                    DeSchemaItem::EnumType(v) => schema.enum_types.push(v.validate()?),
                    DeSchemaItem::TypeDefinition(v) => schema.type_definitions.push(v),
                    DeSchemaItem::EntityContainer(v) => {
                        schema.entity_containers.push(v.validate()?);
                    }
                    DeSchemaItem::Term(v) => schema.terms.push(v),
                    DeSchemaItem::Action(v) => schema.operations.push(v.validate()?),
                    DeSchemaItem::Function(v) => schema.operations.push(v.validate()?),
                    DeSchemaItem::Annotations(v) => schema.out_of_line.push(v),
                    DeSchemaItem::Annotation(v) => schema.annotations.push(v),
                }
                Ok::<_, ValidateError>(())
            })
            .map_err(|e| ValidateError::Schema(namespace, Box::new(e)))?;
        Ok(schema)
    }
}
