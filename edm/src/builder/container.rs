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

use crate::builder::navigation_source_key;
use crate::builder::schema_index::Declared;
use crate::builder::Context;
use crate::builder::Error;
use crate::edmx::entity_container::EntityContainer as EdmxEntityContainer;
use crate::edmx::entity_container::NavigationPropertyBinding as EdmxBinding;
use crate::edmx::entity_container::NavigationSourceKind;
use crate::edmx::entity_container::OperationImport as EdmxOperationImport;
use crate::edmx::QualifiedName as EdmxQualifiedName;
use crate::model::AnnotationTarget;
use crate::model::ContainerId;
use crate::model::EntityContainer;
use crate::model::ModelId;
use crate::model::NavPropertyRef;
use crate::model::NavigationPropertyBinding;
use crate::model::NavigationSource;
use crate::model::NavigationSourceRef;
use crate::model::OperationImport;
use crate::model::OperationImportRef;
use crate::model::StructuredKind;
use crate::model::StructuredTypeId;
use tracing::debug;
use tracing::trace;

type ContainerDecl<'a> = Declared<'a, &'a EdmxEntityContainer>;

impl<'a> Context<'a> {
    /// Build entity containers. Headers (navigation sources and
    /// operation imports) of all containers are built first because
    /// bindings may target sources of any container.
    pub(super) fn build_containers(&mut self) -> Result<(), Error<'a>> {
        let decls = self.index.containers.clone();
        for decl in &decls {
            self.container_header(decl)
                .map_err(Box::new)
                .map_err(|e| Error::EntityContainer(decl.name, e))?;
        }
        for decl in &decls {
            self.container_extends(decl)
                .map_err(Box::new)
                .map_err(|e| Error::EntityContainer(decl.name, e))?;
        }
        for decl in &decls {
            self.container_body(decl)
                .map_err(Box::new)
                .map_err(|e| Error::EntityContainer(decl.name, e))?;
        }
        debug!(
            containers = self.graph.containers.len(),
            navigation_sources = self.navigation_sources.len(),
            "entity containers are built"
        );
        Ok(())
    }

    fn container_header(&mut self, decl: &ContainerDecl<'a>) -> Result<ContainerId, Error<'a>> {
        let container = decl.item;
        let navigation_sources = container
            .navigation_sources
            .iter()
            .map(|ns| {
                self.source_entity_type(decl.doc, decl.model, &ns.entity_type)
                    .map(|entity_type| NavigationSource {
                        name: &ns.name,
                        kind: ns.kind,
                        entity_type,
                        include_in_service_document: ns.kind == NavigationSourceKind::Singleton
                            || ns.include_in_service_document.unwrap_or(true),
                        bindings: Vec::new(),
                    })
                    .map_err(Box::new)
                    .map_err(|e| Error::NavigationSource(&ns.name, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let operation_imports = container
            .operation_imports
            .iter()
            .map(|oi| {
                self.operation_import(decl.doc, decl.model, oi)
                    .map_err(Box::new)
                    .map_err(|e| Error::OperationImport(&oi.name, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        trace!(name = %decl.name, "entity container header");
        let id = self.add_container(EntityContainer {
            name: decl.name,
            extends: None,
            navigation_sources,
            operation_imports,
            model: decl.model,
        });
        self.attach_inline(
            decl.doc,
            decl.model,
            AnnotationTarget::Container(id),
            &container.annotations,
        )?;
        for (index, ns) in container.navigation_sources.iter().enumerate() {
            self.attach_inline(
                decl.doc,
                decl.model,
                AnnotationTarget::NavigationSource(NavigationSourceRef {
                    container: id,
                    index,
                }),
                &ns.annotations,
            )
            .map_err(Box::new)
            .map_err(|e| Error::NavigationSource(&ns.name, e))?;
        }
        for (index, oi) in container.operation_imports.iter().enumerate() {
            self.attach_inline(
                decl.doc,
                decl.model,
                AnnotationTarget::OperationImport(OperationImportRef {
                    container: id,
                    index,
                }),
                &oi.annotations,
            )
            .map_err(Box::new)
            .map_err(|e| Error::OperationImport(&oi.name, e))?;
        }
        Ok(id)
    }

    /// Element type of an entity set or singleton.
    fn source_entity_type(
        &self,
        doc: usize,
        model: ModelId,
        name: &'a EdmxQualifiedName,
    ) -> Result<StructuredTypeId, Error<'a>> {
        let name = self.index.resolve(doc, name);
        let id = self
            .graph
            .find_structured_type_in(model, &name.to_string())
            .ok_or(Error::TypeNotFound(name))?;
        if self.graph.structured_type(id).kind == StructuredKind::Entity {
            Ok(id)
        } else {
            Err(Error::NotEntityType(name))
        }
    }

    /// Import of all unbound overloads of the action or function.
    /// Entity set is resolved later with bindings.
    fn operation_import(
        &self,
        doc: usize,
        model: ModelId,
        oi: &'a EdmxOperationImport,
    ) -> Result<OperationImport<'a>, Error<'a>> {
        let name = self.index.resolve(doc, &oi.operation);
        let operations = self
            .graph
            .find_operations_in(model, &name.to_string())
            .into_iter()
            .filter(|id| {
                let op = self.graph.operation(*id);
                op.kind == oi.kind && !*op.is_bound.inner()
            })
            .collect::<Vec<_>>();
        if operations.is_empty() {
            return Err(Error::OperationNotFound(name));
        }
        Ok(OperationImport {
            name: &oi.name,
            kind: oi.kind,
            operations,
            entity_set: None,
            include_in_service_document: oi.include_in_service_document.unwrap_or(false),
        })
    }

    fn container_id(&self, decl: &ContainerDecl<'a>) -> Result<ContainerId, Error<'a>> {
        self.graph
            .containers_by_name
            .get(&decl.name.to_string())
            .copied()
            .ok_or(Error::EntityContainerNotFound(decl.name))
    }

    fn container_extends(&mut self, decl: &ContainerDecl<'a>) -> Result<(), Error<'a>> {
        let Some(extends) = &decl.item.extends else {
            return Ok(());
        };
        let id = self.container_id(decl)?;
        let name = self.index.resolve(decl.doc, extends);
        let base = self
            .graph
            .find_entity_container_in(decl.model, &name.to_string())
            .filter(|base| *base != id)
            .ok_or(Error::EntityContainerNotFound(name))?;
        self.graph.containers[*id.inner()].extends = Some(base);
        Ok(())
    }

    /// Navigation property bindings and entity sets of imports.
    fn container_body(&mut self, decl: &ContainerDecl<'a>) -> Result<(), Error<'a>> {
        let id = self.container_id(decl)?;
        for (index, ns) in decl.item.navigation_sources.iter().enumerate() {
            let entity_type = self.graph.container(id).navigation_sources[index].entity_type;
            let bindings = ns
                .bindings
                .iter()
                .map(|binding| {
                    self.binding(decl.doc, decl.model, id, entity_type, binding)
                        .map_err(Box::new)
                        .map_err(|e| Error::Binding(&binding.path, e))
                })
                .collect::<Result<Vec<_>, _>>()
                .map_err(Box::new)
                .map_err(|e| Error::NavigationSource(&ns.name, e))?;
            trace!(source = %ns.name, bindings = bindings.len(), "navigation property bindings");
            self.graph.containers[*id.inner()].navigation_sources[index].bindings = bindings;
        }
        for (index, oi) in decl.item.operation_imports.iter().enumerate() {
            let Some(entity_set) = &oi.entity_set else {
                continue;
            };
            let target = self
                .navigation_source_target(decl.doc, id, entity_set)
                .map_err(Box::new)
                .map_err(|e| Error::OperationImport(&oi.name, e))?;
            self.graph.containers[*id.inner()].operation_imports[index].entity_set = Some(target);
        }
        Ok(())
    }

    fn binding(
        &self,
        doc: usize,
        model: ModelId,
        container: ContainerId,
        entity_type: StructuredTypeId,
        binding: &'a EdmxBinding,
    ) -> Result<NavigationPropertyBinding<'a>, Error<'a>> {
        let navigation_property =
            self.binding_navigation_property(doc, model, entity_type, &binding.path)?;
        let target = self.navigation_source_target(doc, container, &binding.target)?;
        Ok(NavigationPropertyBinding {
            navigation_property,
            path: &binding.path,
            target,
        })
    }

    /// Walk the binding path from the element type of the source.
    /// Segments before the last one are type casts, complex (or
    /// collection of complex) properties or containment navigation
    /// properties. The last segment is the bound navigation property.
    fn binding_navigation_property(
        &self,
        doc: usize,
        model: ModelId,
        entity_type: StructuredTypeId,
        path: &'a str,
    ) -> Result<NavPropertyRef, Error<'a>> {
        let mut current = entity_type;
        let mut segments = path.split('/').peekable();
        while let Some(segment) = segments.next() {
            if segment.contains('.') {
                current = self.type_cast(doc, model, segment, path)?;
                continue;
            }
            if segments.peek().is_none() {
                return self
                    .graph
                    .find_navigation_property(current, segment)
                    .ok_or(Error::NavigationPropertyNotFound(path));
            }
            current = if let Some(p) = self.graph.find_property(current, segment) {
                self.graph
                    .property(p)
                    .type_ref
                    .structured_type()
                    .ok_or(Error::PropertyNotFound(path))?
            } else {
                self.graph
                    .find_navigation_property(current, segment)
                    .map(|nav| self.graph.navigation_property(nav))
                    .filter(|nav| *nav.contains_target.inner())
                    .map(|nav| nav.target)
                    .ok_or(Error::PropertyNotFound(path))?
            };
        }
        Err(Error::NavigationPropertyNotFound(path))
    }

    /// Resolve binding target or entity set of an import. Qualified
    /// targets (`Namespace.Container/Source`) may point to any
    /// container, others are looked up in the container and in the
    /// containers it extends.
    fn navigation_source_target(
        &self,
        doc: usize,
        container: ContainerId,
        target: &'a str,
    ) -> Result<NavigationSourceRef, Error<'a>> {
        if let Some((container_name, name)) = target.split_once('/') {
            return self
                .index
                .resolve_str(doc, container_name)
                .and_then(|c| self.navigation_sources.get(&navigation_source_key(&c, name)))
                .copied()
                .ok_or(Error::NavigationSourceNotFound(target));
        }
        let mut visited = Vec::new();
        let mut next = Some(container);
        while let Some(id) = next {
            if visited.contains(&id) {
                break;
            }
            visited.push(id);
            let c = self.graph.container(id);
            if let Some(index) = c.navigation_source(target) {
                return Ok(NavigationSourceRef {
                    container: id,
                    index,
                });
            }
            next = c.extends;
        }
        Err(Error::NavigationSourceNotFound(target))
    }
}
