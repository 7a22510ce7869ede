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

use crate::builder::schema_index::Declared;
use crate::builder::schema_index::StructuredDecl;
use crate::builder::Context;
use crate::builder::Error;
use crate::edmx::entity_type::Key;
use crate::edmx::property::NavigationProperty as EdmxNavigationProperty;
use crate::model::ContainsTarget;
use crate::model::KeyProperty;
use crate::model::ModelId;
use crate::model::Multiplicity;
use crate::model::NavPropertyRef;
use crate::model::NavigationProperty;
use crate::model::ReferentialConstraint;
use crate::model::StructuralProperty;
use crate::model::StructuredKind;
use crate::model::StructuredTypeId;
use tracing::debug;
use tracing::trace;

impl<'a> Context<'a> {
    /// Sweep 1: structural properties of all structured types.
    pub(super) fn build_structural_properties(&mut self) -> Result<(), Error<'a>> {
        let decls = self.index.structured().collect::<Vec<_>>();
        for decl in decls {
            let id = self.structured_id(decl.name)?;
            let properties = decl
                .item
                .properties()
                .iter()
                .map(|p| {
                    self.resolve_type_ref(decl.doc, decl.model, &p.ptype, p.nullable, p.facets())
                        .map(|type_ref| StructuralProperty {
                            name: &p.name,
                            type_ref,
                            default_value: p.default_value.as_deref(),
                        })
                        .map_err(Box::new)
                        .map_err(|e| Error::Property(&p.name, e))
                })
                .collect::<Result<Vec<_>, _>>()
                .map_err(Box::new)
                .map_err(|e| Error::StructuredType(decl.name, e))?;
            trace!(name = %decl.name, properties = properties.len(), "structural properties");
            self.graph.structured_types[*id.inner()].properties = properties;
        }
        debug!("structural properties are built");
        Ok(())
    }

    /// Sweep 2: keys, navigation properties and then navigation
    /// partners of all structured types.
    pub(super) fn build_navigation_properties(&mut self) -> Result<(), Error<'a>> {
        let decls = self.index.structured().collect::<Vec<_>>();
        for decl in &decls {
            let id = self.structured_id(decl.name)?;
            let (declared_key, navigation_properties) = self
                .navigation_body(*decl, id)
                .map_err(Box::new)
                .map_err(|e| Error::StructuredType(decl.name, e))?;
            let structured_type = &mut self.graph.structured_types[*id.inner()];
            structured_type.declared_key = declared_key;
            structured_type.navigation_properties = navigation_properties;
        }
        for decl in &decls {
            self.resolve_partners(*decl)
                .map_err(Box::new)
                .map_err(|e| Error::StructuredType(decl.name, e))?;
        }
        debug!("keys and navigation properties are built");
        Ok(())
    }

    #[allow(clippy::type_complexity)]
    fn navigation_body(
        &self,
        decl: Declared<'a, StructuredDecl<'a>>,
        id: StructuredTypeId,
    ) -> Result<(Option<Vec<KeyProperty<'a>>>, Vec<NavigationProperty<'a>>), Error<'a>> {
        let declared_key = match decl.item {
            StructuredDecl::Entity(v) => v
                .key
                .as_ref()
                .map(|key| self.build_key(id, key))
                .transpose()?,
            StructuredDecl::Complex(_) => None,
        };
        let navigation_properties = decl
            .item
            .navigation_properties()
            .iter()
            .map(|p| {
                self.navigation_property(decl, id, p)
                    .map_err(Box::new)
                    .map_err(|e| Error::NavigationProperty(&p.name, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok((declared_key, navigation_properties))
    }

    fn build_key(
        &self,
        id: StructuredTypeId,
        key: &'a Key,
    ) -> Result<Vec<KeyProperty<'a>>, Error<'a>> {
        key.property_refs
            .iter()
            .map(|r| {
                self.graph
                    .find_property_path(id, &r.name)
                    .map(|property| KeyProperty {
                        path: &r.name,
                        property,
                        alias: r.alias.as_ref(),
                    })
                    .ok_or(Error::PropertyNotFound(&r.name))
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(Box::new)
            .map_err(Error::Key)
    }

    fn navigation_property(
        &self,
        decl: Declared<'a, StructuredDecl<'a>>,
        id: StructuredTypeId,
        p: &'a EdmxNavigationProperty,
    ) -> Result<NavigationProperty<'a>, Error<'a>> {
        let multiplicity = if p.ptype.is_collection() {
            Multiplicity::Many
        } else if p.nullable == Some(true) {
            Multiplicity::ZeroOrOne
        } else {
            Multiplicity::One
        };
        let target_name = self.index.resolve(decl.doc, p.ptype.qualified_type_name());
        let target = self
            .graph
            .find_structured_type_in(decl.model, &target_name.to_string())
            .ok_or(Error::TypeNotFound(target_name))?;
        if self.graph.structured_type(target).kind != StructuredKind::Entity {
            return Err(Error::NotEntityType(target_name));
        }
        let referential_constraints = p
            .referential_constraints
            .iter()
            .map(|rc| {
                let dependent = self
                    .graph
                    .find_property_path(id, &rc.property)
                    .ok_or(Error::PropertyNotFound(&rc.property))?;
                let principal = self
                    .graph
                    .find_property_path(target, &rc.referenced_property)
                    .ok_or(Error::PropertyNotFound(&rc.referenced_property))?;
                Ok(ReferentialConstraint {
                    dependent,
                    principal,
                })
            })
            .collect::<Result<Vec<_>, Error<'a>>>()?;
        Ok(NavigationProperty {
            name: &p.name,
            target,
            multiplicity,
            contains_target: ContainsTarget::new(p.contains_target.unwrap_or(false)),
            on_delete: p.on_delete,
            partner: None,
            referential_constraints,
        })
    }

    fn resolve_partners(&mut self, decl: Declared<'a, StructuredDecl<'a>>) -> Result<(), Error<'a>> {
        let id = self.structured_id(decl.name)?;
        for (index, p) in decl.item.navigation_properties().iter().enumerate() {
            let Some(partner) = &p.partner else {
                continue;
            };
            let target = self.graph.structured_type(id).navigation_properties[index].target;
            let partner = self
                .find_partner(decl.doc, decl.model, target, partner)
                .map_err(Box::new)
                .map_err(|e| Error::NavigationProperty(&p.name, e))?;
            self.graph.structured_types[*id.inner()].navigation_properties[index].partner =
                Some(partner);
        }
        Ok(())
    }

    /// Partner path is a navigation property name optionally prefixed
    /// by a type cast to a derived type of the target.
    fn find_partner(
        &self,
        doc: usize,
        model: ModelId,
        target: StructuredTypeId,
        path: &'a str,
    ) -> Result<NavPropertyRef, Error<'a>> {
        let (owner, name) = match path.rsplit_once('/') {
            Some((cast, name)) => (self.type_cast(doc, model, cast, path)?, name),
            None => (target, path),
        };
        self.graph
            .find_navigation_property(owner, name)
            .ok_or(Error::NavigationPropertyNotFound(path))
    }

    /// Resolve a type cast path segment (`Namespace.Type` or
    /// `Alias.Type`).
    pub(super) fn type_cast(
        &self,
        doc: usize,
        model: ModelId,
        segment: &str,
        path: &'a str,
    ) -> Result<StructuredTypeId, Error<'a>> {
        self.index
            .resolve_str(doc, segment)
            .and_then(|name| self.graph.find_structured_type_in(model, &name))
            .ok_or(Error::TypeCastNotFound(path))
    }
}
