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

//! Linked EDM model graph.
//!
//! The graph owns every element built from a bundle of documents in
//! arenas addressed by typed ids. Elements borrow names and literal
//! text from the parsed documents, so the graph lives as long as the
//! documents do.
//!
//! Each document produces one [`Model`]. Models form a reference
//! graph: the main model references all other models, and lookups
//! through a model fall through to the models it references.

/// Fully qualified names.
pub mod qualified_name;
/// Type references.
pub mod type_ref;
/// Typed annotation values.
pub mod expression;

use crate::edmx::entity_container::NavigationSourceKind;
use crate::edmx::operation::OperationKind;
use crate::edmx::property::OnDeleteAction;
use crate::edmx::reference::Reference;
use crate::edmx::Facets;
use crate::edmx::Namespace;
use crate::edmx::SimpleIdentifier;
use std::collections::HashMap;
use std::collections::HashSet;
use std::collections::VecDeque;
use std::iter::Skip;
use tagged_types::TaggedType;

pub use expression::Expression;
pub use qualified_name::QualifiedName;
pub use type_ref::PathKind;
pub use type_ref::PrimitiveKind;
pub use type_ref::TypeDef;
pub use type_ref::TypeRef;

/// Index of a model in the graph.
pub type ModelId = TaggedType<usize, ModelIdTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[transparent(Debug, Display)]
#[capability(inner_access)]
pub enum ModelIdTag {}

/// Index of an entity or complex type in the graph.
pub type StructuredTypeId = TaggedType<usize, StructuredTypeIdTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[transparent(Debug, Display)]
#[capability(inner_access)]
pub enum StructuredTypeIdTag {}

/// Index of an enum type in the graph.
pub type EnumTypeId = TaggedType<usize, EnumTypeIdTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[transparent(Debug, Display)]
#[capability(inner_access)]
pub enum EnumTypeIdTag {}

/// Index of a type definition in the graph.
pub type TypeDefinitionId = TaggedType<usize, TypeDefinitionIdTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[transparent(Debug, Display)]
#[capability(inner_access)]
pub enum TypeDefinitionIdTag {}

/// Index of a term in the graph.
pub type TermId = TaggedType<usize, TermIdTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[transparent(Debug, Display)]
#[capability(inner_access)]
pub enum TermIdTag {}

/// Index of an action or function in the graph.
pub type OperationId = TaggedType<usize, OperationIdTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[transparent(Debug, Display)]
#[capability(inner_access)]
pub enum OperationIdTag {}

/// Index of an entity container in the graph.
pub type ContainerId = TaggedType<usize, ContainerIdTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[transparent(Debug, Display)]
#[capability(inner_access)]
pub enum ContainerIdTag {}

/// Index of a vocabulary annotation in the graph.
pub type AnnotationId = TaggedType<usize, AnnotationIdTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[transparent(Debug, Display)]
#[capability(inner_access)]
pub enum AnnotationIdTag {}

/// Whether a value can be null.
pub type IsNullable = TaggedType<bool, IsNullableTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Copy, PartialEq, Eq)]
#[transparent(Debug)]
#[capability(inner_access)]
pub enum IsNullableTag {}

/// Whether a structured type is abstract.
pub type IsAbstract = TaggedType<bool, IsAbstractTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Copy, PartialEq, Eq)]
#[transparent(Debug)]
#[capability(inner_access)]
pub enum IsAbstractTag {}

/// Whether a structured type is open.
pub type IsOpen = TaggedType<bool, IsOpenTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Copy, PartialEq, Eq)]
#[transparent(Debug)]
#[capability(inner_access)]
pub enum IsOpenTag {}

/// Whether an entity type is a media entity.
pub type HasStream = TaggedType<bool, HasStreamTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Copy, PartialEq, Eq)]
#[transparent(Debug)]
#[capability(inner_access)]
pub enum HasStreamTag {}

/// Whether an enum type allows multiple members in one value.
pub type IsFlags = TaggedType<bool, IsFlagsTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Copy, PartialEq, Eq)]
#[transparent(Debug)]
#[capability(inner_access)]
pub enum IsFlagsTag {}

/// Whether an operation is bound.
pub type IsBound = TaggedType<bool, IsBoundTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Copy, PartialEq, Eq)]
#[transparent(Debug)]
#[capability(inner_access)]
pub enum IsBoundTag {}

/// Whether a function is composable.
pub type IsComposable = TaggedType<bool, IsComposableTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Copy, PartialEq, Eq)]
#[transparent(Debug)]
#[capability(inner_access)]
pub enum IsComposableTag {}

/// Whether a navigation property contains its targets.
pub type ContainsTarget = TaggedType<bool, ContainsTargetTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Copy, PartialEq, Eq)]
#[transparent(Debug)]
#[capability(inner_access)]
pub enum ContainsTargetTag {}

/// Structural property of a structured type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyRef {
    pub owner: StructuredTypeId,
    pub index: usize,
}

/// Navigation property of a structured type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NavPropertyRef {
    pub owner: StructuredTypeId,
    pub index: usize,
}

/// Entity set or singleton of an entity container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NavigationSourceRef {
    pub container: ContainerId,
    pub index: usize,
}

/// Action or function import of an entity container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationImportRef {
    pub container: ContainerId,
    pub index: usize,
}

/// Model built from one document.
#[derive(Debug)]
pub struct Model<'a> {
    /// Declared document version.
    pub version: &'a str,
    /// Cross-document reference metadata as declared.
    pub references: &'a [Reference],
    /// Alias to namespace mapping declared by the document (schema
    /// aliases and reference include aliases).
    pub namespace_aliases: HashMap<&'a SimpleIdentifier, &'a Namespace>,
    /// Models referenced by this model.
    pub referenced_models: Vec<ModelId>,
    /// The model implicitly references the core vocabulary. Only the
    /// main model carries this reference.
    pub references_core_vocabulary: bool,
    /// Namespaces of schemas declared in the document.
    pub namespaces: Vec<&'a Namespace>,
    pub structured_types: Vec<StructuredTypeId>,
    pub enum_types: Vec<EnumTypeId>,
    pub type_definitions: Vec<TypeDefinitionId>,
    pub terms: Vec<TermId>,
    pub operations: Vec<OperationId>,
    pub containers: Vec<ContainerId>,
    pub annotations: Vec<AnnotationId>,
}

impl<'a> Model<'a> {
    pub(crate) fn new(version: &'a str, references: &'a [Reference]) -> Self {
        Self {
            version,
            references,
            namespace_aliases: HashMap::new(),
            referenced_models: Vec::new(),
            references_core_vocabulary: false,
            namespaces: Vec::new(),
            structured_types: Vec::new(),
            enum_types: Vec::new(),
            type_definitions: Vec::new(),
            terms: Vec::new(),
            operations: Vec::new(),
            containers: Vec::new(),
            annotations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuredKind {
    Entity,
    Complex,
}

/// Key property of an entity type.
#[derive(Debug)]
pub struct KeyProperty<'a> {
    /// Path of the property as declared.
    pub path: &'a str,
    /// Resolved property. Owner is a complex type if the path goes
    /// through complex properties.
    pub property: PropertyRef,
    pub alias: Option<&'a SimpleIdentifier>,
}

#[derive(Debug)]
pub struct StructuralProperty<'a> {
    pub name: &'a SimpleIdentifier,
    pub type_ref: TypeRef,
    pub default_value: Option<&'a str>,
}

/// Cardinality of a navigation property target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    One,
    ZeroOrOne,
    Many,
}

/// Pair of properties of a referential constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferentialConstraint {
    /// Property of the type that declares the navigation property.
    pub dependent: PropertyRef,
    /// Property of the target type.
    pub principal: PropertyRef,
}

#[derive(Debug)]
pub struct NavigationProperty<'a> {
    pub name: &'a SimpleIdentifier,
    pub target: StructuredTypeId,
    pub multiplicity: Multiplicity,
    pub contains_target: ContainsTarget,
    pub on_delete: Option<OnDeleteAction>,
    pub partner: Option<NavPropertyRef>,
    pub referential_constraints: Vec<ReferentialConstraint>,
}

/// Entity or complex type.
#[derive(Debug)]
pub struct StructuredType<'a> {
    pub name: QualifiedName<'a>,
    pub kind: StructuredKind,
    pub base_type: Option<StructuredTypeId>,
    pub is_abstract: IsAbstract,
    pub is_open: IsOpen,
    /// Always false for complex types.
    pub has_stream: HasStream,
    /// Key declared by this type. Use [`ModelGraph::key`] to get the
    /// effective key.
    pub declared_key: Option<Vec<KeyProperty<'a>>>,
    pub properties: Vec<StructuralProperty<'a>>,
    pub navigation_properties: Vec<NavigationProperty<'a>>,
    pub model: ModelId,
}

#[derive(Debug)]
pub struct EnumMember<'a> {
    pub name: &'a SimpleIdentifier,
    pub value: i64,
}

#[derive(Debug)]
pub struct EnumType<'a> {
    pub name: QualifiedName<'a>,
    pub underlying_type: PrimitiveKind,
    pub is_flags: IsFlags,
    pub members: Vec<EnumMember<'a>>,
    pub model: ModelId,
}

impl EnumType<'_> {
    /// Index of a member by name.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<usize> {
        self.members.iter().position(|m| m.name.inner() == name)
    }
}

#[derive(Debug)]
pub struct TypeDefinition<'a> {
    pub name: QualifiedName<'a>,
    pub underlying_type: PrimitiveKind,
    pub facets: Facets,
    pub model: ModelId,
}

#[derive(Debug)]
pub struct Term<'a> {
    pub name: QualifiedName<'a>,
    pub type_ref: TypeRef,
    pub default_value: Option<&'a str>,
    /// Element kinds the term can be applied to. Empty means any.
    pub applies_to: Vec<&'a str>,
    pub base_term: Option<TermId>,
    pub model: ModelId,
}

#[derive(Debug)]
pub struct Parameter<'a> {
    pub name: &'a SimpleIdentifier,
    pub type_ref: TypeRef,
}

/// Action or function.
#[derive(Debug)]
pub struct Operation<'a> {
    pub name: QualifiedName<'a>,
    pub kind: OperationKind,
    pub is_bound: IsBound,
    pub is_composable: IsComposable,
    /// Segments of the entity set path. The first segment is the
    /// binding parameter.
    pub entity_set_path: Option<Vec<&'a str>>,
    pub return_type: Option<TypeRef>,
    pub parameters: Vec<Parameter<'a>>,
    pub model: ModelId,
}

/// Navigation property binding of a navigation source.
#[derive(Debug)]
pub struct NavigationPropertyBinding<'a> {
    pub navigation_property: NavPropertyRef,
    pub path: &'a str,
    pub target: NavigationSourceRef,
}

/// Entity set or singleton.
#[derive(Debug)]
pub struct NavigationSource<'a> {
    pub name: &'a SimpleIdentifier,
    pub kind: NavigationSourceKind,
    pub entity_type: StructuredTypeId,
    pub include_in_service_document: bool,
    pub bindings: Vec<NavigationPropertyBinding<'a>>,
}

/// Action or function import.
#[derive(Debug)]
pub struct OperationImport<'a> {
    pub name: &'a SimpleIdentifier,
    pub kind: OperationKind,
    /// All unbound overloads with the imported name.
    pub operations: Vec<OperationId>,
    pub entity_set: Option<NavigationSourceRef>,
    pub include_in_service_document: bool,
}

#[derive(Debug)]
pub struct EntityContainer<'a> {
    pub name: QualifiedName<'a>,
    pub extends: Option<ContainerId>,
    pub navigation_sources: Vec<NavigationSource<'a>>,
    pub operation_imports: Vec<OperationImport<'a>>,
    pub model: ModelId,
}

impl EntityContainer<'_> {
    /// Navigation source declared by this container.
    #[must_use]
    pub fn navigation_source(&self, name: &str) -> Option<usize> {
        self.navigation_sources
            .iter()
            .position(|v| v.name.inner() == name)
    }
}

/// Term of a vocabulary annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermRef<'a> {
    Resolved(TermId),
    /// Placeholder for a term that cannot be found. The annotation
    /// is kept so the document still round-trips.
    Unresolved(QualifiedName<'a>),
}

/// Element a vocabulary annotation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationTarget<'a> {
    StructuredType(StructuredTypeId),
    Property(PropertyRef),
    NavigationProperty(NavPropertyRef),
    EnumType(EnumTypeId),
    EnumMember(EnumTypeId, usize),
    TypeDefinition(TypeDefinitionId),
    Term(TermId),
    Operation(OperationId),
    Parameter(OperationId, usize),
    ReturnType(OperationId),
    Container(ContainerId),
    NavigationSource(NavigationSourceRef),
    OperationImport(OperationImportRef),
    Annotation(AnnotationId),
    Schema(&'a Namespace),
    /// Out-of-line target path that cannot be resolved.
    Unresolved(&'a str),
}

/// Where an annotation was written in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializationLocation {
    Inline,
    OutOfLine,
}

#[derive(Debug)]
pub struct VocabularyAnnotation<'a> {
    pub target: AnnotationTarget<'a>,
    pub term: TermRef<'a>,
    pub qualifier: Option<&'a SimpleIdentifier>,
    pub value: Expression<'a>,
    pub location: SerializationLocation,
    /// Model of the document where the annotation is written.
    pub model: ModelId,
}

/// Iterator over a structured type and its base types.
pub struct TypeChain<'g, 'a> {
    graph: &'g ModelGraph<'a>,
    next: Option<StructuredTypeId>,
}

impl Iterator for TypeChain<'_, '_> {
    type Item = StructuredTypeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.graph.structured_type(current).base_type;
        Some(current)
    }
}

/// Linked model graph.
#[derive(Debug, Default)]
pub struct ModelGraph<'a> {
    pub(crate) models: Vec<Model<'a>>,
    pub(crate) structured_types: Vec<StructuredType<'a>>,
    pub(crate) enum_types: Vec<EnumType<'a>>,
    pub(crate) type_definitions: Vec<TypeDefinition<'a>>,
    pub(crate) terms: Vec<Term<'a>>,
    pub(crate) operations: Vec<Operation<'a>>,
    pub(crate) containers: Vec<EntityContainer<'a>>,
    pub(crate) annotations: Vec<VocabularyAnnotation<'a>>,
    pub(crate) structured_types_by_name: HashMap<String, StructuredTypeId>,
    pub(crate) enum_types_by_name: HashMap<String, EnumTypeId>,
    pub(crate) type_definitions_by_name: HashMap<String, TypeDefinitionId>,
    pub(crate) terms_by_name: HashMap<String, TermId>,
    pub(crate) operations_by_name: HashMap<String, Vec<OperationId>>,
    pub(crate) containers_by_name: HashMap<String, ContainerId>,
}

impl<'a> ModelGraph<'a> {
    /// Main model: the model of the first document.
    #[must_use]
    pub fn main_model(&self) -> ModelId {
        ModelId::new(0)
    }

    #[must_use]
    pub fn model(&self, id: ModelId) -> &Model<'a> {
        &self.models[*id.inner()]
    }

    pub fn models(&self) -> impl Iterator<Item = (ModelId, &Model<'a>)> {
        self.models
            .iter()
            .enumerate()
            .map(|(i, m)| (ModelId::new(i), m))
    }

    #[must_use]
    pub fn structured_type(&self, id: StructuredTypeId) -> &StructuredType<'a> {
        &self.structured_types[*id.inner()]
    }

    #[must_use]
    pub fn enum_type(&self, id: EnumTypeId) -> &EnumType<'a> {
        &self.enum_types[*id.inner()]
    }

    #[must_use]
    pub fn type_definition(&self, id: TypeDefinitionId) -> &TypeDefinition<'a> {
        &self.type_definitions[*id.inner()]
    }

    #[must_use]
    pub fn term(&self, id: TermId) -> &Term<'a> {
        &self.terms[*id.inner()]
    }

    #[must_use]
    pub fn operation(&self, id: OperationId) -> &Operation<'a> {
        &self.operations[*id.inner()]
    }

    #[must_use]
    pub fn container(&self, id: ContainerId) -> &EntityContainer<'a> {
        &self.containers[*id.inner()]
    }

    #[must_use]
    pub fn annotation(&self, id: AnnotationId) -> &VocabularyAnnotation<'a> {
        &self.annotations[*id.inner()]
    }

    #[must_use]
    pub fn property(&self, r: PropertyRef) -> &StructuralProperty<'a> {
        &self.structured_type(r.owner).properties[r.index]
    }

    #[must_use]
    pub fn navigation_property(&self, r: NavPropertyRef) -> &NavigationProperty<'a> {
        &self.structured_type(r.owner).navigation_properties[r.index]
    }

    #[must_use]
    pub fn navigation_source(&self, r: NavigationSourceRef) -> &NavigationSource<'a> {
        &self.container(r.container).navigation_sources[r.index]
    }

    #[must_use]
    pub fn operation_import(&self, r: OperationImportRef) -> &OperationImport<'a> {
        &self.container(r.container).operation_imports[r.index]
    }

    /// All vocabulary annotations in the graph.
    pub fn annotations(&self) -> impl Iterator<Item = (AnnotationId, &VocabularyAnnotation<'a>)> {
        self.annotations
            .iter()
            .enumerate()
            .map(|(i, a)| (AnnotationId::new(i), a))
    }

    /// Vocabulary annotations applied to the target.
    pub fn annotations_for(
        &self,
        target: AnnotationTarget<'a>,
    ) -> impl Iterator<Item = &VocabularyAnnotation<'a>> + '_ {
        self.annotations
            .iter()
            .filter(move |a| a.target == target)
    }

    /// Models reachable from `model` through the reference graph,
    /// `model` itself first.
    #[must_use]
    pub fn reachable_models(&self, model: ModelId) -> Vec<ModelId> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([model]);
        let mut result = Vec::new();
        while let Some(id) = queue.pop_front() {
            if visited.insert(id) {
                result.push(id);
                queue.extend(self.model(id).referenced_models.iter().copied());
            }
        }
        result
    }

    fn visible_from(&self, model: ModelId, owner: ModelId) -> bool {
        model == owner || self.reachable_models(model).contains(&owner)
    }

    /// Find entity or complex type by full name visible from the model.
    #[must_use]
    pub fn find_structured_type_in(&self, model: ModelId, name: &str) -> Option<StructuredTypeId> {
        self.structured_types_by_name
            .get(name)
            .copied()
            .filter(|id| self.visible_from(model, self.structured_type(*id).model))
    }

    /// Find entity or complex type by full name.
    #[must_use]
    pub fn find_structured_type(&self, name: &str) -> Option<StructuredTypeId> {
        self.find_structured_type_in(self.main_model(), name)
    }

    #[must_use]
    pub fn find_entity_type(&self, name: &str) -> Option<StructuredTypeId> {
        self.find_structured_type(name)
            .filter(|id| self.structured_type(*id).kind == StructuredKind::Entity)
    }

    #[must_use]
    pub fn find_complex_type(&self, name: &str) -> Option<StructuredTypeId> {
        self.find_structured_type(name)
            .filter(|id| self.structured_type(*id).kind == StructuredKind::Complex)
    }

    #[must_use]
    pub fn find_enum_type_in(&self, model: ModelId, name: &str) -> Option<EnumTypeId> {
        self.enum_types_by_name
            .get(name)
            .copied()
            .filter(|id| self.visible_from(model, self.enum_type(*id).model))
    }

    #[must_use]
    pub fn find_enum_type(&self, name: &str) -> Option<EnumTypeId> {
        self.find_enum_type_in(self.main_model(), name)
    }

    #[must_use]
    pub fn find_type_definition_in(&self, model: ModelId, name: &str) -> Option<TypeDefinitionId> {
        self.type_definitions_by_name
            .get(name)
            .copied()
            .filter(|id| self.visible_from(model, self.type_definition(*id).model))
    }

    #[must_use]
    pub fn find_type_definition(&self, name: &str) -> Option<TypeDefinitionId> {
        self.find_type_definition_in(self.main_model(), name)
    }

    #[must_use]
    pub fn find_term_in(&self, model: ModelId, name: &str) -> Option<TermId> {
        self.terms_by_name
            .get(name)
            .copied()
            .filter(|id| self.visible_from(model, self.term(*id).model))
    }

    #[must_use]
    pub fn find_term(&self, name: &str) -> Option<TermId> {
        self.find_term_in(self.main_model(), name)
    }

    /// All overloads of an action or function visible from the model.
    #[must_use]
    pub fn find_operations_in(&self, model: ModelId, name: &str) -> Vec<OperationId> {
        self.operations_by_name
            .get(name)
            .map(|ids| {
                ids.iter()
                    .copied()
                    .filter(|id| self.visible_from(model, self.operation(*id).model))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn find_operations(&self, name: &str) -> Vec<OperationId> {
        self.find_operations_in(self.main_model(), name)
    }

    #[must_use]
    pub fn find_entity_container_in(&self, model: ModelId, name: &str) -> Option<ContainerId> {
        self.containers_by_name
            .get(name)
            .copied()
            .filter(|id| self.visible_from(model, self.container(*id).model))
    }

    #[must_use]
    pub fn find_entity_container(&self, name: &str) -> Option<ContainerId> {
        self.find_entity_container_in(self.main_model(), name)
    }

    /// The type and all its base types, nearest first.
    #[must_use]
    pub const fn type_chain(&self, id: StructuredTypeId) -> TypeChain<'_, 'a> {
        TypeChain {
            graph: self,
            next: Some(id),
        }
    }

    /// Base types of the type, nearest first.
    #[must_use]
    pub fn base_types(&self, id: StructuredTypeId) -> Skip<TypeChain<'_, 'a>> {
        self.type_chain(id).skip(1)
    }

    /// The type is `base` or is derived from it.
    #[must_use]
    pub fn is_derived_from(&self, id: StructuredTypeId, base: StructuredTypeId) -> bool {
        self.type_chain(id).any(|v| v == base)
    }

    /// Effective key: the key declared by the type or by its nearest
    /// ancestor that declares one.
    #[must_use]
    pub fn key(&self, id: StructuredTypeId) -> Option<&[KeyProperty<'a>]> {
        self.type_chain(id)
            .find_map(|v| self.structured_type(v).declared_key.as_deref())
    }

    /// Find structural property declared by the type or inherited.
    #[must_use]
    pub fn find_property(&self, id: StructuredTypeId, name: &str) -> Option<PropertyRef> {
        self.type_chain(id).find_map(|owner| {
            self.structured_type(owner)
                .properties
                .iter()
                .position(|p| p.name.inner() == name)
                .map(|index| PropertyRef { owner, index })
        })
    }

    /// Find structural property by a `/` separated path through
    /// complex properties.
    #[must_use]
    pub fn find_property_path(&self, id: StructuredTypeId, path: &str) -> Option<PropertyRef> {
        let mut segments = path.split('/');
        let first = self.find_property(id, segments.next()?)?;
        segments.try_fold(first, |current, segment| {
            let next = self.property(current).type_ref.structured_type()?;
            self.find_property(next, segment)
        })
    }

    /// Find navigation property declared by the type or inherited.
    #[must_use]
    pub fn find_navigation_property(
        &self,
        id: StructuredTypeId,
        name: &str,
    ) -> Option<NavPropertyRef> {
        self.type_chain(id).find_map(|owner| {
            self.structured_type(owner)
                .navigation_properties
                .iter()
                .position(|p| p.name.inner() == name)
                .map(|index| NavPropertyRef { owner, index })
        })
    }
}
