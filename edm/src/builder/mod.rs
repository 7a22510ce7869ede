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

//! EDM model builder.
//!
//! Builds a linked [`ModelGraph`] from a bundle of parsed documents.
//! The first document is the main document, all others are
//! referenced documents. Building runs in fixed phases; each phase
//! relies on everything built by the previous ones:
//!
//! 1. Model per document, aliases and the reference graph.
//! 2. Headers of entity/complex types (with base types), enums and
//!    type definitions.
//! 3. Term headers.
//! 4. Structural properties of all structured types.
//! 5. Keys, navigation properties with referential constraints and
//!    navigation partners.
//! 6. Term bodies (base terms and annotations of terms).
//! 7. Annotations of types, properties, enums, type definitions and
//!    schemas.
//! 8. Actions and functions.
//! 9. Entity containers: headers, then bindings.
//! 10. Out-of-line annotations.
//!
//! Any error aborts the whole build.

/// Build errors.
pub mod error;
/// Index of declarations over documents.
pub mod schema_index;
/// Type reference resolution.
pub mod type_ref;
/// Headers of schema types.
pub mod schema_types;
/// Structural and navigation properties.
pub mod properties;
/// Terms and vocabulary annotations.
pub mod terms;
/// Annotation values.
pub mod expression;
/// Actions and functions.
pub mod operations;
/// Entity containers.
pub mod container;

use crate::edmx::Edmx;
use crate::edmx::Schema;
use crate::model::ContainerId;
use crate::model::EntityContainer;
use crate::model::EnumType;
use crate::model::EnumTypeId;
use crate::model::Model;
use crate::model::ModelGraph;
use crate::model::ModelId;
use crate::model::NavigationSourceRef;
use crate::model::Operation;
use crate::model::OperationId;
use crate::model::StructuredType;
use crate::model::StructuredTypeId;
use crate::model::Term;
use crate::model::TermId;
use crate::model::TypeDefinition;
use crate::model::TypeDefinitionId;
use crate::model::QualifiedName;
use schema_index::SchemaIndex;
use std::collections::HashMap;
use std::collections::HashSet;
use tracing::debug;

/// Reexport `Error` to the level of the builder.
pub type Error<'a> = error::Error<'a>;
/// Reexport `ErrorKind` to the level of the builder.
pub type ErrorKind = error::ErrorKind;

/// Collection of EDMX documents that are built together into one
/// model graph.
#[derive(Default)]
pub struct SchemaBundle {
    /// Parsed and validated Edmx documents. The first one is the main
    /// document.
    pub edmx_docs: Vec<Edmx>,
}

impl SchemaBundle {
    /// Build the model graph, resolving all references between
    /// documents.
    ///
    /// # Errors
    ///
    /// Returns build error if any reference cannot be resolved, facets
    /// don't match types, or an annotation value cannot be parsed.
    pub fn build(&self) -> Result<ModelGraph<'_>, Error<'_>> {
        let mut ctx = Context::new(&self.edmx_docs)?;
        ctx.build_type_headers()?;
        ctx.build_term_headers()?;
        ctx.build_structural_properties()?;
        ctx.build_navigation_properties()?;
        ctx.build_term_bodies()?;
        ctx.build_type_annotations()?;
        ctx.build_operations()?;
        ctx.build_containers()?;
        ctx.build_out_of_line_annotations()?;
        debug!(
            models = ctx.graph.models.len(),
            structured_types = ctx.graph.structured_types.len(),
            annotations = ctx.graph.annotations.len(),
            "model graph is built"
        );
        Ok(ctx.graph)
    }
}

/// State of one build. Never reused across builds.
pub(crate) struct Context<'a> {
    docs: &'a [Edmx],
    /// Model of each document. `None` for empty documents.
    models: Vec<Option<ModelId>>,
    index: SchemaIndex<'a>,
    /// Structured types whose headers are being built. Used to detect
    /// cycles in base type chains.
    in_progress: HashSet<QualifiedName<'a>>,
    /// Navigation sources by canonical `Namespace.Container/Name`.
    navigation_sources: HashMap<String, NavigationSourceRef>,
    graph: ModelGraph<'a>,
}

/// Canonical name of an entity set or singleton across containers.
fn navigation_source_key(container: &str, name: &str) -> String {
    format!("{container}/{name}")
}

impl<'a> Context<'a> {
    /// Create one model per non-empty document and link models into
    /// the reference graph.
    fn new(docs: &'a [Edmx]) -> Result<Self, Error<'a>> {
        let mut next = 0;
        let doc_models = docs
            .iter()
            .map(|doc| {
                if doc.is_empty() {
                    None
                } else {
                    let id = ModelId::new(next);
                    next += 1;
                    Some(id)
                }
            })
            .collect::<Vec<_>>();
        if doc_models.first().copied().flatten().is_none() {
            return Err(Error::NoMainModel);
        }
        let index = SchemaIndex::build(docs, &doc_models);
        let mut graph = ModelGraph::default();
        for (doc, edmx) in docs.iter().enumerate() {
            if doc_models[doc].is_none() {
                debug!(doc, "empty document, no model is created");
                continue;
            }
            let mut model = Model::new(&edmx.version, &edmx.references);
            model.namespace_aliases = index.aliases(doc);
            model.namespaces = edmx
                .data_services
                .schemas
                .iter()
                .map(|s| &s.namespace)
                .collect();
            graph.models.push(model);
        }
        // Main model references every other model and carries the
        // core vocabulary reference.
        let referenced = doc_models.iter().skip(1).flatten().copied().collect();
        if let Some(main) = graph.models.first_mut() {
            main.referenced_models = referenced;
            main.references_core_vocabulary = true;
        }
        // Referenced models reference each other through includes.
        for (doc, edmx) in docs.iter().enumerate().skip(1) {
            let Some(model) = doc_models[doc] else {
                continue;
            };
            let included = edmx
                .references
                .iter()
                .flat_map(|r| r.includes.iter())
                .flat_map(|include| {
                    docs.iter()
                        .zip(doc_models.iter())
                        .enumerate()
                        .skip(1)
                        .filter(move |(other, _)| *other != doc)
                        .filter(move |(_, (other, _))| {
                            other
                                .data_services
                                .schemas
                                .iter()
                                .any(|s| s.namespace == include.namespace)
                        })
                        .filter_map(|(_, (_, id))| *id)
                })
                .collect::<Vec<_>>();
            let refs = &mut graph.models[*model.inner()].referenced_models;
            for id in included {
                if !refs.contains(&id) {
                    refs.push(id);
                }
            }
        }
        debug!(models = graph.models.len(), "model headers are built");
        Ok(Self {
            docs,
            models: doc_models,
            index,
            in_progress: HashSet::new(),
            navigation_sources: HashMap::new(),
            graph,
        })
    }

    /// Schemas of all documents that have a model.
    fn schemas(&self) -> Vec<(usize, ModelId, &'a Schema)> {
        self.docs
            .iter()
            .zip(self.models.iter())
            .enumerate()
            .filter_map(|(doc, (edmx, model))| model.map(|model| (doc, model, edmx)))
            .flat_map(|(doc, model, edmx)| {
                edmx.data_services
                    .schemas
                    .iter()
                    .map(move |schema| (doc, model, schema))
            })
            .collect()
    }

    /// Built entity or complex type by its full name.
    fn structured_id(&self, name: QualifiedName<'a>) -> Result<StructuredTypeId, Error<'a>> {
        self.graph
            .structured_types_by_name
            .get(&name.to_string())
            .copied()
            .ok_or(Error::TypeNotFound(name))
    }

    fn add_structured_type(&mut self, v: StructuredType<'a>) -> StructuredTypeId {
        let id = StructuredTypeId::new(self.graph.structured_types.len());
        self.graph
            .structured_types_by_name
            .insert(v.name.to_string(), id);
        self.graph.models[*v.model.inner()].structured_types.push(id);
        self.graph.structured_types.push(v);
        id
    }

    fn add_enum_type(&mut self, v: EnumType<'a>) -> EnumTypeId {
        let id = EnumTypeId::new(self.graph.enum_types.len());
        self.graph.enum_types_by_name.insert(v.name.to_string(), id);
        self.graph.models[*v.model.inner()].enum_types.push(id);
        self.graph.enum_types.push(v);
        id
    }

    fn add_type_definition(&mut self, v: TypeDefinition<'a>) -> TypeDefinitionId {
        let id = TypeDefinitionId::new(self.graph.type_definitions.len());
        self.graph
            .type_definitions_by_name
            .insert(v.name.to_string(), id);
        self.graph.models[*v.model.inner()].type_definitions.push(id);
        self.graph.type_definitions.push(v);
        id
    }

    fn add_term(&mut self, v: Term<'a>) -> TermId {
        let id = TermId::new(self.graph.terms.len());
        self.graph.terms_by_name.insert(v.name.to_string(), id);
        self.graph.models[*v.model.inner()].terms.push(id);
        self.graph.terms.push(v);
        id
    }

    fn add_operation(&mut self, v: Operation<'a>) -> OperationId {
        let id = OperationId::new(self.graph.operations.len());
        self.graph
            .operations_by_name
            .entry(v.name.to_string())
            .or_default()
            .push(id);
        self.graph.models[*v.model.inner()].operations.push(id);
        self.graph.operations.push(v);
        id
    }

    fn add_container(&mut self, v: EntityContainer<'a>) -> ContainerId {
        let id = ContainerId::new(self.graph.containers.len());
        let name = v.name.to_string();
        for (index, source) in v.navigation_sources.iter().enumerate() {
            self.navigation_sources.insert(
                navigation_source_key(&name, source.name.inner()),
                NavigationSourceRef {
                    container: id,
                    index,
                },
            );
        }
        self.graph.containers_by_name.insert(name, id);
        self.graph.models[*v.model.inner()].containers.push(id);
        self.graph.containers.push(v);
        id
    }
}
