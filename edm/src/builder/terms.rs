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

use crate::builder::expression::NameResolution;
use crate::builder::schema_index::StructuredDecl;
use crate::builder::Context;
use crate::builder::Error;
use crate::edmx::annotation::ConstantKind;
use crate::edmx::enum_type::EnumType as EdmxEnumType;
use crate::edmx::Annotation;
use crate::edmx::Facets;
use crate::edmx::Namespace;
use crate::edmx::SimpleIdentifier;
use crate::model::expression::ConstantValue;
use crate::model::expression::ExpressionAnnotation;
use crate::model::AnnotationId;
use crate::model::AnnotationTarget;
use crate::model::EnumTypeId;
use crate::model::Expression;
use crate::model::IsNullable;
use crate::model::ModelId;
use crate::model::NavPropertyRef;
use crate::model::NavigationSourceRef;
use crate::model::OperationImportRef;
use crate::model::PrimitiveKind;
use crate::model::PropertyRef;
use crate::model::SerializationLocation;
use crate::model::StructuredTypeId;
use crate::model::Term;
use crate::model::TermId;
use crate::model::TermRef;
use crate::model::TypeDef;
use crate::model::TypeRef;
use crate::model::VocabularyAnnotation;
use tracing::debug;
use tracing::trace;
use tracing::warn;

impl<'a> Context<'a> {
    /// Phase A: terms with their types. Annotations and base terms
    /// are built later when all terms exist.
    pub(super) fn build_term_headers(&mut self) -> Result<(), Error<'a>> {
        for decl in self.index.terms.clone() {
            let term = decl.item;
            let type_ref = match &term.ttype {
                Some(ttype) => self.resolve_type_ref(
                    decl.doc,
                    decl.model,
                    ttype,
                    term.nullable,
                    term.facets(),
                ),
                None => string_type(term.nullable, term.facets())
                    .ok_or(Error::FacetNotSupported(decl.name)),
            }
            .map_err(Box::new)
            .map_err(|e| Error::Term(decl.name, e))?;
            trace!(name = %decl.name, "term");
            self.add_term(Term {
                name: decl.name,
                type_ref,
                default_value: term.default_value.as_deref(),
                applies_to: term
                    .applies_to
                    .as_deref()
                    .map(|v| v.split_whitespace().collect())
                    .unwrap_or_default(),
                base_term: None,
                model: decl.model,
            });
        }
        debug!(terms = self.graph.terms.len(), "term headers are built");
        Ok(())
    }

    /// Phase B: base terms and annotations of terms.
    pub(super) fn build_term_bodies(&mut self) -> Result<(), Error<'a>> {
        for decl in self.index.terms.clone() {
            let id = self
                .graph
                .find_term_in(decl.model, &decl.name.to_string())
                .ok_or(Error::TermNotFound(decl.name))?;
            let result = decl
                .item
                .base_term
                .as_ref()
                .map(|base| {
                    let name = self.index.resolve(decl.doc, base);
                    self.graph
                        .find_term_in(decl.model, &name.to_string())
                        .ok_or(Error::TermNotFound(name))
                })
                .transpose()
                .and_then(|base_term| {
                    self.graph.terms[*id.inner()].base_term = base_term;
                    self.attach_inline(
                        decl.doc,
                        decl.model,
                        AnnotationTarget::Term(id),
                        &decl.item.annotations,
                    )
                });
            result
                .map_err(Box::new)
                .map_err(|e| Error::Term(decl.name, e))?;
        }
        debug!("term bodies are built");
        Ok(())
    }

    /// Inline annotations of schemas, structured types with their
    /// properties, enum types with their members and type
    /// definitions.
    pub(super) fn build_type_annotations(&mut self) -> Result<(), Error<'a>> {
        for (doc, model, schema) in self.schemas() {
            self.attach_inline(
                doc,
                model,
                AnnotationTarget::Schema(&schema.namespace),
                &schema.annotations,
            )
            .map_err(Box::new)
            .map_err(|e| Error::Schema(&schema.namespace, e))?;
        }
        let structured = self.index.structured().collect::<Vec<_>>();
        for decl in structured {
            let owner = self.structured_id(decl.name)?;
            self.structured_type_annotations(decl.doc, decl.model, owner, decl.item)
                .map_err(Box::new)
                .map_err(|e| Error::StructuredType(decl.name, e))?;
        }
        for decl in self.index.enum_types.clone() {
            let id = self
                .graph
                .find_enum_type_in(decl.model, &decl.name.to_string())
                .ok_or(Error::TypeNotFound(decl.name))?;
            self.enum_type_annotations(decl.doc, decl.model, id, decl.item)
                .map_err(Box::new)
                .map_err(|e| Error::EnumType(decl.name, e))?;
        }
        for decl in self.index.type_definitions.clone() {
            let id = self
                .graph
                .find_type_definition_in(decl.model, &decl.name.to_string())
                .ok_or(Error::TypeNotFound(decl.name))?;
            self.attach_inline(
                decl.doc,
                decl.model,
                AnnotationTarget::TypeDefinition(id),
                &decl.item.annotations,
            )
            .map_err(Box::new)
            .map_err(|e| Error::TypeDefinition(decl.name, e))?;
        }
        debug!(
            annotations = self.graph.annotations.len(),
            "type annotations are built"
        );
        Ok(())
    }

    fn structured_type_annotations(
        &mut self,
        doc: usize,
        model: ModelId,
        owner: StructuredTypeId,
        decl: StructuredDecl<'a>,
    ) -> Result<(), Error<'a>> {
        self.attach_inline(
            doc,
            model,
            AnnotationTarget::StructuredType(owner),
            decl.annotations(),
        )?;
        for (index, p) in decl.properties().iter().enumerate() {
            let target = AnnotationTarget::Property(PropertyRef { owner, index });
            self.attach_inline(doc, model, target, &p.annotations)
                .map_err(Box::new)
                .map_err(|e| Error::Property(&p.name, e))?;
        }
        for (index, p) in decl.navigation_properties().iter().enumerate() {
            let target = AnnotationTarget::NavigationProperty(NavPropertyRef { owner, index });
            self.attach_inline(doc, model, target, &p.annotations)
                .map_err(Box::new)
                .map_err(|e| Error::NavigationProperty(&p.name, e))?;
        }
        Ok(())
    }

    fn enum_type_annotations(
        &mut self,
        doc: usize,
        model: ModelId,
        id: EnumTypeId,
        decl: &'a EdmxEnumType,
    ) -> Result<(), Error<'a>> {
        self.attach_inline(doc, model, AnnotationTarget::EnumType(id), &decl.annotations)?;
        for (index, member) in decl.members.iter().enumerate() {
            self.attach_inline(
                doc,
                model,
                AnnotationTarget::EnumMember(id, index),
                &member.annotations,
            )?;
        }
        Ok(())
    }

    /// Attach annotations written inline on the target element.
    pub(super) fn attach_inline(
        &mut self,
        doc: usize,
        model: ModelId,
        target: AnnotationTarget<'a>,
        annotations: &'a [Annotation],
    ) -> Result<(), Error<'a>> {
        self.attach_annotations(
            doc,
            model,
            target,
            annotations,
            SerializationLocation::Inline,
            None,
        )
    }

    /// Attach vocabulary annotations to the target. Annotations of
    /// annotations are attached to the annotation they are nested in.
    ///
    /// Unknown terms are not an error: the annotation is kept with an
    /// unresolved term reference.
    pub(super) fn attach_annotations(
        &mut self,
        doc: usize,
        model: ModelId,
        target: AnnotationTarget<'a>,
        annotations: &'a [Annotation],
        location: SerializationLocation,
        default_qualifier: Option<&'a SimpleIdentifier>,
    ) -> Result<(), Error<'a>> {
        for annotation in annotations {
            let (term, value) = self.annotation_term_and_value(doc, model, annotation)?;
            let id = AnnotationId::new(self.graph.annotations.len());
            self.graph.annotations.push(VocabularyAnnotation {
                target,
                term,
                qualifier: annotation.qualifier.as_ref().or(default_qualifier),
                value,
                location,
                model,
            });
            self.graph.models[*model.inner()].annotations.push(id);
            self.attach_annotations(
                doc,
                model,
                AnnotationTarget::Annotation(id),
                &annotation.annotations,
                location,
                None,
            )?;
        }
        Ok(())
    }

    /// Annotations nested in a record expression.
    pub(super) fn expression_annotations(
        &self,
        doc: usize,
        model: ModelId,
        annotations: &'a [Annotation],
    ) -> Result<Vec<ExpressionAnnotation<'a>>, Error<'a>> {
        annotations
            .iter()
            .map(|annotation| {
                self.annotation_term_and_value(doc, model, annotation)
                    .map(|(term, value)| ExpressionAnnotation {
                        term,
                        qualifier: annotation.qualifier.as_ref(),
                        value,
                    })
            })
            .collect()
    }

    fn annotation_term_and_value(
        &self,
        doc: usize,
        model: ModelId,
        annotation: &'a Annotation,
    ) -> Result<(TermRef<'a>, Expression<'a>), Error<'a>> {
        let name = self.index.resolve(doc, &annotation.term);
        let term = self.graph.find_term_in(model, &name.to_string());
        let value = self
            .annotation_value(doc, model, term, annotation)
            .map_err(Box::new)
            .map_err(|e| Error::Annotation(name, e))?;
        let term = term.map_or_else(
            || {
                warn!(term = %name, "annotation term is not found");
                TermRef::Unresolved(name)
            },
            TermRef::Resolved,
        );
        Ok((term, value))
    }

    /// Value of the annotation built against the type of the term.
    /// Without an explicit value the default value of the term
    /// applies; a boolean term without default means `true`.
    fn annotation_value(
        &self,
        doc: usize,
        model: ModelId,
        term: Option<TermId>,
        annotation: &'a Annotation,
    ) -> Result<Expression<'a>, Error<'a>> {
        let term = term.map(|id| self.graph.term(id));
        let expected = term.map(|t| &t.type_ref);
        if let Some(value) = &annotation.value {
            let names = if term.is_some() {
                NameResolution::Strict
            } else {
                NameResolution::Lenient
            };
            return self.build_expression(doc, model, value, expected, names);
        }
        let Some(term) = term else {
            return Ok(Expression::Null);
        };
        let primitive = self.primitive_kind(&term.type_ref);
        match term.default_value {
            Some(text) => {
                let kind = primitive.map_or(ConstantKind::String, constant_kind);
                self.build_constant(doc, model, kind, text, expected, NameResolution::Strict)
            }
            None if primitive == Some(PrimitiveKind::Boolean) => Ok(Expression::Constant {
                value: ConstantValue::Boolean(true),
                text: "true",
            }),
            None => Ok(Expression::Null),
        }
    }

    /// Phase of annotations written in `edm:Annotations` elements.
    pub(super) fn build_out_of_line_annotations(&mut self) -> Result<(), Error<'a>> {
        for (doc, model, schema) in self.schemas() {
            for group in &schema.out_of_line {
                let mut targets = self.out_of_line_targets(doc, model, &group.target);
                if targets.is_empty() {
                    warn!(target = %group.target, "annotation target is not found");
                    targets.push(AnnotationTarget::Unresolved(&group.target));
                }
                for target in targets {
                    self.attach_annotations(
                        doc,
                        model,
                        target,
                        &group.annotations,
                        SerializationLocation::OutOfLine,
                        group.qualifier.as_ref(),
                    )
                    .map_err(Box::new)
                    .map_err(|e| Error::OutOfLineAnnotations(&group.target, e))?;
                }
            }
        }
        debug!(
            annotations = self.graph.annotations.len(),
            "out-of-line annotations are built"
        );
        Ok(())
    }

    /// Elements addressed by the target path of an `edm:Annotations`
    /// element. Overload signature in parentheses is ignored, so the
    /// path may address all overloads of an operation.
    fn out_of_line_targets(
        &self,
        doc: usize,
        model: ModelId,
        path: &str,
    ) -> Vec<AnnotationTarget<'a>> {
        let path = strip_signature(path);
        let (head, member) = match path.split_once('/') {
            Some((head, member)) => (head, Some(member)),
            None => (path.as_str(), None),
        };
        if member.is_none() {
            if let Some(namespace) = self.schema_namespace(doc, head) {
                return vec![AnnotationTarget::Schema(namespace)];
            }
        }
        let Some(name) = self.index.resolve_str(doc, head) else {
            return Vec::new();
        };
        if let Some(owner) = self.graph.find_structured_type_in(model, &name) {
            return match member {
                None => vec![AnnotationTarget::StructuredType(owner)],
                Some(member) => self
                    .graph
                    .find_property(owner, member)
                    .map(AnnotationTarget::Property)
                    .or_else(|| {
                        self.graph
                            .find_navigation_property(owner, member)
                            .map(AnnotationTarget::NavigationProperty)
                    })
                    .into_iter()
                    .collect(),
            };
        }
        if let Some(id) = self.graph.find_enum_type_in(model, &name) {
            return match member {
                None => vec![AnnotationTarget::EnumType(id)],
                Some(member) => self
                    .graph
                    .enum_type(id)
                    .member(member)
                    .map(|index| AnnotationTarget::EnumMember(id, index))
                    .into_iter()
                    .collect(),
            };
        }
        if member.is_none() {
            if let Some(id) = self.graph.find_type_definition_in(model, &name) {
                return vec![AnnotationTarget::TypeDefinition(id)];
            }
            if let Some(id) = self.graph.find_term_in(model, &name) {
                return vec![AnnotationTarget::Term(id)];
            }
        }
        let operations = self.graph.find_operations_in(model, &name);
        if !operations.is_empty() {
            return operations
                .into_iter()
                .filter_map(|id| match member {
                    None => Some(AnnotationTarget::Operation(id)),
                    Some("$ReturnType") => self
                        .graph
                        .operation(id)
                        .return_type
                        .as_ref()
                        .map(|_| AnnotationTarget::ReturnType(id)),
                    Some(member) => self
                        .graph
                        .operation(id)
                        .parameters
                        .iter()
                        .position(|p| p.name.inner() == member)
                        .map(|index| AnnotationTarget::Parameter(id, index)),
                })
                .collect();
        }
        if let Some(container) = self.graph.find_entity_container_in(model, &name) {
            let Some(member) = member else {
                return vec![AnnotationTarget::Container(container)];
            };
            let c = self.graph.container(container);
            return c
                .navigation_source(member)
                .map(|index| {
                    AnnotationTarget::NavigationSource(NavigationSourceRef { container, index })
                })
                .or_else(|| {
                    c.operation_imports
                        .iter()
                        .position(|v| v.name.inner() == member)
                        .map(|index| {
                            AnnotationTarget::OperationImport(OperationImportRef {
                                container,
                                index,
                            })
                        })
                })
                .into_iter()
                .collect();
        }
        Vec::new()
    }

    /// Namespace of a schema by its name or by an alias of the
    /// document.
    fn schema_namespace(&self, doc: usize, name: &str) -> Option<&'a Namespace> {
        let aliased = self
            .index
            .aliases(doc)
            .into_iter()
            .find(|(alias, _)| alias.inner() == name)
            .map(|(_, namespace)| namespace.to_string());
        let name = aliased.as_deref().unwrap_or(name);
        self.graph
            .models
            .iter()
            .flat_map(|m| m.namespaces.iter().copied())
            .find(|namespace| namespace.to_string() == name)
    }
}

/// Remove overload signature `(...)` from an annotation target path.
fn strip_signature(path: &str) -> String {
    match path.split_once('(') {
        Some((head, rest)) => {
            let tail = rest.split_once(')').map_or("", |(_, tail)| tail);
            format!("{head}{tail}")
        }
        None => path.to_string(),
    }
}

/// `Edm.String` used as type of terms without explicit type.
fn string_type(nullable: Option<bool>, facets: Facets) -> Option<TypeRef> {
    PrimitiveKind::String.supports(&facets).then(|| {
        TypeRef::new(
            TypeDef::Primitive {
                kind: PrimitiveKind::String,
                facets,
            },
            IsNullable::new(nullable.unwrap_or(true)),
        )
    })
}

/// Kind of a literal of the primitive type.
const fn constant_kind(kind: PrimitiveKind) -> ConstantKind {
    match kind {
        PrimitiveKind::Binary => ConstantKind::Binary,
        PrimitiveKind::Boolean => ConstantKind::Bool,
        PrimitiveKind::Byte
        | PrimitiveKind::SByte
        | PrimitiveKind::Int16
        | PrimitiveKind::Int32
        | PrimitiveKind::Int64 => ConstantKind::Int,
        PrimitiveKind::Date => ConstantKind::Date,
        PrimitiveKind::DateTimeOffset => ConstantKind::DateTimeOffset,
        PrimitiveKind::Decimal => ConstantKind::Decimal,
        PrimitiveKind::Double | PrimitiveKind::Single => ConstantKind::Float,
        PrimitiveKind::Duration => ConstantKind::Duration,
        PrimitiveKind::Guid => ConstantKind::Guid,
        PrimitiveKind::TimeOfDay => ConstantKind::TimeOfDay,
        _ => ConstantKind::String,
    }
}

#[cfg(test)]
mod test {
    use crate::builder::test::doc;
    use crate::builder::ErrorKind;
    use crate::builder::SchemaBundle;
    use crate::model::expression::ConstantValue;
    use crate::model::AnnotationTarget;
    use crate::model::Expression;
    use crate::model::SerializationLocation;
    use crate::model::TermRef;

    const VOCABULARY: &str = r#"<Schema Namespace="Org.Example.Core.V1" Alias="Core">
        <TypeDefinition Name="Tag" UnderlyingType="Edm.Boolean"/>
        <Term Name="Description" Type="Edm.String">
          <Annotation Term="Core.Description" String="A brief description"/>
        </Term>
        <Term Name="Computed" Type="Core.Tag" DefaultValue="true" AppliesTo="Property Term"/>
        <Term Name="Immutable" Type="Core.Tag"/>
        <Term Name="Revision" Type="Edm.Int32" DefaultValue="1"/>
        <Term Name="LongDescription" BaseTerm="Core.Description"/>
      </Schema>"#;

    #[test]
    fn test_terms() {
        let bundle = SchemaBundle {
            edmx_docs: vec![doc(VOCABULARY)],
        };
        let graph = bundle.build().unwrap();
        let description = graph.find_term("Org.Example.Core.V1.Description").unwrap();
        let computed = graph.term(graph.find_term("Org.Example.Core.V1.Computed").unwrap());
        assert_eq!(computed.applies_to, vec!["Property", "Term"]);
        assert_eq!(computed.default_value, Some("true"));
        let long = graph.term(graph.find_term("Org.Example.Core.V1.LongDescription").unwrap());
        assert_eq!(long.base_term, Some(description));
        let on_term = graph
            .annotations_for(AnnotationTarget::Term(description))
            .collect::<Vec<_>>();
        assert_eq!(on_term.len(), 1);
        assert_eq!(on_term[0].term, TermRef::Resolved(description));
        assert_eq!(on_term[0].value.as_str(), Some("A brief description"));
    }

    #[test]
    fn test_annotation_without_value() {
        let bundle = SchemaBundle {
            edmx_docs: vec![doc(&format!(
                r#"{VOCABULARY}
                <Schema Namespace="Svc">
                  <EntityType Name="E">
                    <Property Name="Id" Type="Edm.Int32">
                      <Annotation Term="Org.Example.Core.V1.Computed"/>
                      <Annotation Term="Org.Example.Core.V1.Immutable"/>
                      <Annotation Term="Org.Example.Core.V1.Revision"/>
                      <Annotation Term="Org.Example.Core.V1.Description"/>
                    </Property>
                  </EntityType>
                </Schema>"#
            ))],
        };
        let graph = bundle.build().unwrap();
        let e = graph.find_entity_type("Svc.E").unwrap();
        let id = graph.find_property(e, "Id").unwrap();
        let values = graph
            .annotations_for(AnnotationTarget::Property(id))
            .map(|a| a.value.clone())
            .collect::<Vec<_>>();
        assert_eq!(
            values,
            vec![
                Expression::Constant {
                    value: ConstantValue::Boolean(true),
                    text: "true"
                },
                Expression::Constant {
                    value: ConstantValue::Boolean(true),
                    text: "true"
                },
                Expression::Constant {
                    value: ConstantValue::Integer(1),
                    text: "1"
                },
                Expression::Null,
            ]
        );
    }

    #[test]
    fn test_unresolved_term_is_kept() {
        let bundle = SchemaBundle {
            edmx_docs: vec![doc(r#"<Schema Namespace="Svc">
                  <EntityType Name="E">
                    <Annotation Term="Foo.Bar" String="x" Qualifier="Q"/>
                  </EntityType>
                </Schema>"#)],
        };
        let graph = bundle.build().unwrap();
        let e = graph.find_entity_type("Svc.E").unwrap();
        let annotations = graph
            .annotations_for(AnnotationTarget::StructuredType(e))
            .collect::<Vec<_>>();
        assert_eq!(annotations.len(), 1);
        assert!(
            matches!(annotations[0].term, TermRef::Unresolved(name) if name.to_string() == "Foo.Bar")
        );
        assert_eq!(annotations[0].value.as_str(), Some("x"));
        assert_eq!(
            annotations[0].qualifier.map(|q| q.inner().as_str()),
            Some("Q")
        );
        assert_eq!(annotations[0].location, SerializationLocation::Inline);
    }

    #[test]
    fn test_nested_annotations() {
        let bundle = SchemaBundle {
            edmx_docs: vec![doc(&format!(
                r#"{VOCABULARY}
                <Schema Namespace="Svc">
                  <Annotation Term="Core.Description" String="service">
                    <Annotation Term="Core.Revision" Int="2"/>
                  </Annotation>
                </Schema>"#
            ))],
        };
        // The alias is declared by the vocabulary schema of the same
        // document.
        let graph = bundle.build().unwrap();
        let namespace = graph.model(graph.main_model()).namespaces[1];
        let on_schema = graph
            .annotations()
            .filter(|(_, a)| a.target == AnnotationTarget::Schema(namespace))
            .collect::<Vec<_>>();
        assert_eq!(on_schema.len(), 1);
        let (id, _) = on_schema[0];
        let nested = graph
            .annotations_for(AnnotationTarget::Annotation(id))
            .collect::<Vec<_>>();
        assert_eq!(nested.len(), 1);
        assert_eq!(
            nested[0].value,
            Expression::Constant {
                value: ConstantValue::Integer(2),
                text: "2"
            }
        );
    }

    #[test]
    fn test_out_of_line_annotations() {
        let bundle = SchemaBundle {
            edmx_docs: vec![doc(&format!(
                r#"{VOCABULARY}
                <Schema Namespace="Svc" Alias="S">
                  <EntityType Name="E"><Property Name="Id" Type="Edm.Int32"/></EntityType>
                  <EnumType Name="Color"><Member Name="Red"/></EnumType>
                  <Function Name="F"><Parameter Name="a" Type="Edm.Int32"/><ReturnType Type="Edm.Int32"/></Function>
                  <Function Name="F"><ReturnType Type="Edm.String"/></Function>
                  <EntityContainer Name="C"><EntitySet Name="Es" EntityType="S.E"/></EntityContainer>
                  <Annotations Target="S.E/Id" Qualifier="Q">
                    <Annotation Term="Core.Description" String="id"/>
                  </Annotations>
                  <Annotations Target="Svc.Color/Red">
                    <Annotation Term="Core.Description" String="red"/>
                  </Annotations>
                  <Annotations Target="S.F(Edm.Int32)/$ReturnType">
                    <Annotation Term="Core.Description" String="result"/>
                  </Annotations>
                  <Annotations Target="S.C/Es">
                    <Annotation Term="Core.Description" String="set"/>
                  </Annotations>
                  <Annotations Target="S">
                    <Annotation Term="Core.Description" String="schema"/>
                  </Annotations>
                  <Annotations Target="S.Missing/Thing">
                    <Annotation Term="Core.Description" String="lost"/>
                  </Annotations>
                </Schema>"#
            ))],
        };
        let graph = bundle.build().unwrap();
        let out_of_line = graph
            .annotations()
            .map(|(_, a)| a)
            .filter(|a| a.location == SerializationLocation::OutOfLine)
            .collect::<Vec<_>>();
        let texts = out_of_line
            .iter()
            .filter_map(|a| a.value.as_str())
            .collect::<Vec<_>>();
        // Both overloads of `F` have a return type.
        assert_eq!(
            texts,
            vec!["id", "red", "result", "result", "set", "schema", "lost"]
        );
        assert!(matches!(out_of_line[0].target, AnnotationTarget::Property(_)));
        assert_eq!(out_of_line[0].qualifier.map(|q| q.inner().as_str()), Some("Q"));
        assert!(matches!(out_of_line[1].target, AnnotationTarget::EnumMember(_, 0)));
        assert!(matches!(out_of_line[2].target, AnnotationTarget::ReturnType(_)));
        assert!(matches!(out_of_line[4].target, AnnotationTarget::NavigationSource(_)));
        assert!(matches!(out_of_line[5].target, AnnotationTarget::Schema(_)));
        assert_eq!(
            out_of_line[6].target,
            AnnotationTarget::Unresolved("S.Missing/Thing")
        );
    }

    #[test]
    fn test_malformed_default_value() {
        let bundle = SchemaBundle {
            edmx_docs: vec![doc(r#"<Schema Namespace="V">
                  <Term Name="Count" Type="Edm.Int32" DefaultValue="many"/>
                  <Annotation Term="V.Count"/>
                </Schema>"#)],
        };
        assert_eq!(
            bundle.build().unwrap_err().kind(),
            ErrorKind::MalformedExpression
        );
    }
}
