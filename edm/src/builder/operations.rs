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

use crate::builder::Context;
use crate::builder::Error;
use crate::edmx::operation::Operation as EdmxOperation;
use crate::edmx::operation::OperationKind;
use crate::model::AnnotationTarget;
use crate::model::IsBound;
use crate::model::IsComposable;
use crate::model::ModelId;
use crate::model::Operation;
use crate::model::OperationId;
use crate::model::Parameter;
use crate::model::QualifiedName;
use tracing::debug;
use tracing::trace;

impl<'a> Context<'a> {
    /// Build actions and functions with their parameters and return
    /// types. Every overload becomes a separate operation.
    pub(super) fn build_operations(&mut self) -> Result<(), Error<'a>> {
        for (doc, model, schema) in self.schemas() {
            for op in &schema.operations {
                let name = QualifiedName::new(&schema.namespace, &op.name);
                self.build_operation(doc, model, name, op)
                    .map_err(Box::new)
                    .map_err(|e| Error::Operation(name, e))?;
            }
        }
        debug!(
            operations = self.graph.operations.len(),
            "operations are built"
        );
        Ok(())
    }

    fn build_operation(
        &mut self,
        doc: usize,
        model: ModelId,
        name: QualifiedName<'a>,
        op: &'a EdmxOperation,
    ) -> Result<OperationId, Error<'a>> {
        let return_type = op
            .return_type
            .as_ref()
            .map(|rt| {
                self.resolve_type_ref(doc, model, &rt.rtype, rt.nullable, rt.facets())
                    .map_err(Box::new)
                    .map_err(Error::ReturnType)
            })
            .transpose()?;
        let parameters = op
            .parameters
            .iter()
            .map(|p| {
                self.resolve_type_ref(doc, model, &p.ptype, p.nullable, p.facets())
                    .map(|type_ref| Parameter {
                        name: &p.name,
                        type_ref,
                    })
                    .map_err(Box::new)
                    .map_err(|e| Error::Parameter(&p.name, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let is_bound = op.is_bound.unwrap_or(false);
        let entity_set_path = op
            .entity_set_path
            .as_deref()
            .map(|path| {
                let segments = path.split('/').collect::<Vec<_>>();
                let binding = parameters.first().filter(|_| is_bound);
                match (segments.first(), binding) {
                    (Some(first), Some(p)) if p.name.inner() == *first => Ok(segments),
                    _ => Err(Error::InvalidEntitySetPath(path)),
                }
            })
            .transpose()?;
        trace!(%name, kind = ?op.kind, "operation");
        let id = self.add_operation(Operation {
            name,
            kind: op.kind,
            is_bound: IsBound::new(is_bound),
            is_composable: IsComposable::new(
                op.kind == OperationKind::Function && op.is_composable.unwrap_or(false),
            ),
            entity_set_path,
            return_type,
            parameters,
            model,
        });
        self.attach_inline(doc, model, AnnotationTarget::Operation(id), &op.annotations)?;
        if let Some(rt) = &op.return_type {
            self.attach_inline(doc, model, AnnotationTarget::ReturnType(id), &rt.annotations)?;
        }
        for (index, p) in op.parameters.iter().enumerate() {
            self.attach_inline(
                doc,
                model,
                AnnotationTarget::Parameter(id, index),
                &p.annotations,
            )
            .map_err(Box::new)
            .map_err(|e| Error::Parameter(&p.name, e))?;
        }
        Ok(id)
    }
}

#[cfg(test)]
mod test {
    use crate::builder::test::doc;
    use crate::builder::Error;
    use crate::builder::ErrorKind;
    use crate::builder::SchemaBundle;
    use crate::edmx::operation::OperationKind;
    use crate::model::AnnotationTarget;
    use crate::model::PrimitiveKind;
    use crate::model::TypeDef;

    const SCHEMA: &str = r#"<Schema Namespace="Org.Shop" Alias="Shop">
        <EntityType Name="Order">
          <Key><PropertyRef Name="Id"/></Key>
          <Property Name="Id" Type="Edm.Int32" Nullable="false"/>
          <NavigationProperty Name="Lines" Type="Collection(Shop.Line)"/>
        </EntityType>
        <EntityType Name="Line">
          <Key><PropertyRef Name="No"/></Key>
          <Property Name="No" Type="Edm.Int32" Nullable="false"/>
        </EntityType>
        <Action Name="Cancel" IsBound="true">
          <Parameter Name="order" Type="Shop.Order"/>
          <Parameter Name="reason" Type="Edm.String" MaxLength="100"/>
        </Action>
        <Function Name="Total" IsBound="true" IsComposable="true">
          <Parameter Name="order" Type="Shop.Order"/>
          <ReturnType Type="Edm.Decimal" Nullable="false" Precision="10" Scale="2"/>
        </Function>
        <Function Name="Total">
          <Parameter Name="orders" Type="Collection(Shop.Order)"/>
          <ReturnType Type="Edm.Decimal"/>
        </Function>
        <Function Name="OpenLines" IsBound="true" EntitySetPath="order/Lines">
          <Parameter Name="order" Type="Shop.Order"/>
          <ReturnType Type="Collection(Shop.Line)"/>
        </Function>
      </Schema>"#;

    #[test]
    fn test_operations() {
        let bundle = SchemaBundle {
            edmx_docs: vec![doc(SCHEMA)],
        };
        let graph = bundle.build().unwrap();
        let order = graph.find_entity_type("Org.Shop.Order").unwrap();
        let cancel = graph.find_operations("Org.Shop.Cancel");
        assert_eq!(cancel.len(), 1);
        let cancel = graph.operation(cancel[0]);
        assert_eq!(cancel.kind, OperationKind::Action);
        assert!(*cancel.is_bound.inner());
        assert!(cancel.return_type.is_none());
        assert_eq!(cancel.parameters.len(), 2);
        assert_eq!(cancel.parameters[0].type_ref.definition, TypeDef::Entity(order));
        assert_eq!(
            cancel.parameters[1]
                .type_ref
                .facets()
                .and_then(|f| f.max_length)
                .map(|v| v.to_string()),
            Some("100".to_string())
        );

        let total = graph.find_operations("Org.Shop.Total");
        assert_eq!(total.len(), 2);
        let bound = graph.operation(total[0]);
        assert!(*bound.is_bound.inner());
        assert!(*bound.is_composable.inner());
        let rt = bound.return_type.as_ref().unwrap();
        assert!(!*rt.nullable.inner());
        assert!(matches!(
            rt.definition,
            TypeDef::Primitive {
                kind: PrimitiveKind::Decimal,
                ..
            }
        ));
        let unbound = graph.operation(total[1]);
        assert!(!*unbound.is_bound.inner());
        assert!(unbound.parameters[0].type_ref.is_collection());

        let open_lines = graph.find_operations("Org.Shop.OpenLines");
        assert_eq!(
            graph.operation(open_lines[0]).entity_set_path,
            Some(vec!["order", "Lines"])
        );
    }

    #[test]
    fn test_invalid_entity_set_path() {
        let bundle = SchemaBundle {
            edmx_docs: vec![doc(r#"<Schema Namespace="S">
                  <EntityType Name="E"><Key><PropertyRef Name="Id"/></Key><Property Name="Id" Type="Edm.Int32" Nullable="false"/></EntityType>
                  <Function Name="F" IsBound="true" EntitySetPath="other/Items">
                    <Parameter Name="it" Type="S.E"/>
                    <ReturnType Type="S.E"/>
                  </Function>
                </Schema>"#)],
        };
        let err = bundle.build().unwrap_err();
        assert!(matches!(err, Error::Operation(_, _)));
        assert_eq!(err.kind(), ErrorKind::UnresolvedReference);
    }

    #[test]
    fn test_unknown_parameter_type() {
        let bundle = SchemaBundle {
            edmx_docs: vec![doc(r#"<Schema Namespace="S">
                  <Action Name="A"><Parameter Name="p" Type="S.Nope"/></Action>
                </Schema>"#)],
        };
        let err = bundle.build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnresolvedReference);
        assert!(err.to_string().contains("while building parameter: p"));
    }

    #[test]
    fn test_operation_annotations() {
        let bundle = SchemaBundle {
            edmx_docs: vec![doc(r#"<Schema Namespace="S">
                  <Term Name="Note" Type="Edm.String"/>
                  <Function Name="F">
                    <Parameter Name="a" Type="Edm.Int32"><Annotation Term="S.Note" String="param"/></Parameter>
                    <ReturnType Type="Edm.Int32"><Annotation Term="S.Note" String="result"/></ReturnType>
                    <Annotation Term="S.Note" String="function"/>
                  </Function>
                </Schema>"#)],
        };
        let graph = bundle.build().unwrap();
        let f = graph.find_operations("S.F")[0];
        let text = |target| {
            graph
                .annotations_for(target)
                .filter_map(|a| a.value.as_str())
                .collect::<Vec<_>>()
        };
        assert_eq!(text(AnnotationTarget::Operation(f)), vec!["function"]);
        assert_eq!(text(AnnotationTarget::ReturnType(f)), vec!["result"]);
        assert_eq!(text(AnnotationTarget::Parameter(f, 0)), vec!["param"]);
    }
}
