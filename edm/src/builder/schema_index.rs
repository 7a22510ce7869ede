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
use crate::edmx::entity_container::EntityContainer;
use crate::edmx::entity_type::EntityType;
use crate::edmx::enum_type::EnumType;
use crate::edmx::property::NavigationProperty;
use crate::edmx::property::StructuralProperty;
use crate::edmx::term::Term;
use crate::edmx::type_definition::TypeDefinition;
use crate::edmx::Annotation;
use crate::edmx::Edmx;
use crate::edmx::Namespace;
use crate::edmx::QualifiedName as EdmxQualifiedName;
use crate::edmx::Schema;
use crate::edmx::SimpleIdentifier;
use crate::model::ModelId;
use crate::model::QualifiedName;
use crate::model::StructuredKind;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::collections::HashSet;

/// Entity or complex type declaration.
#[derive(Clone, Copy, Debug)]
pub enum StructuredDecl<'a> {
    Entity(&'a EntityType),
    Complex(&'a ComplexType),
}

impl<'a> StructuredDecl<'a> {
    #[must_use]
    pub const fn kind(&self) -> StructuredKind {
        match self {
            Self::Entity(_) => StructuredKind::Entity,
            Self::Complex(_) => StructuredKind::Complex,
        }
    }

    #[must_use]
    pub const fn base_type(&self) -> Option<&'a EdmxQualifiedName> {
        match self {
            Self::Entity(v) => v.base_type.as_ref(),
            Self::Complex(v) => v.base_type.as_ref(),
        }
    }

    #[must_use]
    pub fn properties(&self) -> &'a [StructuralProperty] {
        match self {
            Self::Entity(v) => &v.properties,
            Self::Complex(v) => &v.properties,
        }
    }

    #[must_use]
    pub fn navigation_properties(&self) -> &'a [NavigationProperty] {
        match self {
            Self::Entity(v) => &v.navigation_properties,
            Self::Complex(v) => &v.navigation_properties,
        }
    }

    #[must_use]
    pub fn annotations(&self) -> &'a [Annotation] {
        match self {
            Self::Entity(v) => &v.annotations,
            Self::Complex(v) => &v.annotations,
        }
    }
}

/// Declaration with the document, model and schema where it is
/// located.
#[derive(Clone, Copy, Debug)]
pub struct Declared<'a, T> {
    pub doc: usize,
    pub model: ModelId,
    pub schema: &'a Schema,
    pub name: QualifiedName<'a>,
    pub item: T,
}

/// Index of declarations over all documents of a bundle.
///
/// If the same name is declared more than once, the first
/// declaration (in document-then-declaration order) wins.
pub struct SchemaIndex<'a> {
    /// Alias tables, one per document.
    aliases: Vec<HashMap<&'a SimpleIdentifier, &'a Namespace>>,
    structured: HashMap<QualifiedName<'a>, Declared<'a, StructuredDecl<'a>>>,
    structured_order: Vec<QualifiedName<'a>>,
    pub enum_types: Vec<Declared<'a, &'a EnumType>>,
    pub type_definitions: Vec<Declared<'a, &'a TypeDefinition>>,
    pub terms: Vec<Declared<'a, &'a Term>>,
    pub containers: Vec<Declared<'a, &'a EntityContainer>>,
}

const fn declared<'a, T>(
    doc: usize,
    model: ModelId,
    schema: &'a Schema,
    name: &'a SimpleIdentifier,
    item: T,
) -> Declared<'a, T> {
    Declared {
        doc,
        model,
        schema,
        name: QualifiedName::new(&schema.namespace, name),
        item,
    }
}

/// Keep only the first declaration of each name.
fn unique<'a, T>(decls: impl Iterator<Item = Declared<'a, T>>) -> Vec<Declared<'a, T>> {
    let mut seen = HashSet::new();
    decls.filter(|d| seen.insert(d.name)).collect()
}

impl<'a> SchemaIndex<'a> {
    /// Build an index from the provided documents. Documents without
    /// a model are skipped.
    #[must_use]
    pub fn build(edmx_docs: &'a [Edmx], models: &[Option<ModelId>]) -> Self {
        let schemas = || {
            edmx_docs
                .iter()
                .zip(models.iter().copied())
                .enumerate()
                .filter_map(|(doc, (edmx, model))| model.map(|model| (doc, model, edmx)))
                .flat_map(|(doc, model, edmx)| {
                    edmx.data_services
                        .schemas
                        .iter()
                        .map(move |schema| (doc, model, schema))
                })
        };
        let mut structured = HashMap::new();
        let mut structured_order = Vec::new();
        for (doc, model, schema) in schemas() {
            let entity_types = schema
                .entity_types
                .iter()
                .map(|v| declared(doc, model, schema, &v.name, StructuredDecl::Entity(v)));
            let complex_types = schema
                .complex_types
                .iter()
                .map(|v| declared(doc, model, schema, &v.name, StructuredDecl::Complex(v)));
            for decl in entity_types.chain(complex_types) {
                if let Entry::Vacant(e) = structured.entry(decl.name) {
                    structured_order.push(decl.name);
                    e.insert(decl);
                }
            }
        }
        Self {
            aliases: edmx_docs
                .iter()
                .map(|edmx| {
                    let schema_aliases = edmx
                        .data_services
                        .schemas
                        .iter()
                        .filter_map(|s| s.alias.as_ref().map(|alias| (alias, &s.namespace)));
                    let include_aliases = edmx
                        .references
                        .iter()
                        .flat_map(|r| r.includes.iter())
                        .filter_map(|i| i.alias.as_ref().map(|alias| (alias, &i.namespace)));
                    schema_aliases.chain(include_aliases).collect()
                })
                .collect(),
            structured,
            structured_order,
            enum_types: unique(schemas().flat_map(|(doc, model, schema)| {
                schema
                    .enum_types
                    .iter()
                    .map(move |v| declared(doc, model, schema, &v.name, v))
            })),
            type_definitions: unique(schemas().flat_map(|(doc, model, schema)| {
                schema
                    .type_definitions
                    .iter()
                    .map(move |v| declared(doc, model, schema, &v.name, v))
            })),
            terms: unique(schemas().flat_map(|(doc, model, schema)| {
                schema
                    .terms
                    .iter()
                    .map(move |v| declared(doc, model, schema, &v.name, v))
            })),
            containers: unique(schemas().flat_map(|(doc, model, schema)| {
                schema
                    .entity_containers
                    .iter()
                    .map(move |v| declared(doc, model, schema, &v.name, v))
            })),
        }
    }

    /// Alias table of the document.
    #[must_use]
    pub fn aliases(&self, doc: usize) -> HashMap<&'a SimpleIdentifier, &'a Namespace> {
        self.aliases.get(doc).cloned().unwrap_or_default()
    }

    /// Replace namespace alias of the document with the namespace.
    #[must_use]
    pub fn resolve_namespace(&self, doc: usize, ns: &'a Namespace) -> &'a Namespace {
        if ns.ids.len() == 1 {
            self.aliases
                .get(doc)
                .and_then(|aliases| aliases.get(&ns.ids[0]))
                .copied()
                .unwrap_or(ns)
        } else {
            ns
        }
    }

    /// Resolve a name written in the document: replace alias and
    /// qualify.
    #[must_use]
    pub fn resolve(&self, doc: usize, name: &'a EdmxQualifiedName) -> QualifiedName<'a> {
        QualifiedName::new(self.resolve_namespace(doc, &name.namespace), &name.name)
    }

    /// Resolve a qualified name given as text into its full name.
    #[must_use]
    pub fn resolve_str(&self, doc: usize, name: &str) -> Option<String> {
        let name: EdmxQualifiedName = name.parse().ok()?;
        let ns = if name.namespace.ids.len() == 1 {
            self.aliases
                .get(doc)
                .and_then(|aliases| aliases.get(&name.namespace.ids[0]))
                .map_or_else(|| name.namespace.to_string(), ToString::to_string)
        } else {
            name.namespace.to_string()
        };
        Some(format!("{ns}.{}", name.name))
    }

    /// Find entity or complex type declaration.
    #[must_use]
    pub fn find_structured(
        &self,
        name: QualifiedName<'a>,
    ) -> Option<Declared<'a, StructuredDecl<'a>>> {
        self.structured.get(&name).copied()
    }

    /// All entity and complex type declarations.
    pub fn structured(&self) -> impl Iterator<Item = Declared<'a, StructuredDecl<'a>>> + '_ {
        self.structured_order
            .iter()
            .filter_map(|name| self.structured.get(name).copied())
    }
}
