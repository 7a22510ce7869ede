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

//! Schemas of one CSDL document. Every schema becomes a namespace of
//! the model built for the document.

use crate::edmx::schema::DeSchema;
use crate::edmx::Schema;
use crate::edmx::ValidateError;
use serde::Deserialize;

/// 3.2 Element edmx:DataServices
#[derive(Debug, Deserialize)]
pub struct DeDataServices {
    #[serde(rename = "Schema", default)]
    pub schemas: Vec<DeSchema>,
}

/// Schemas in document order. The builder indexes declarations in
/// this order, so for duplicate names the first schema wins.
#[derive(Debug)]
pub struct DataServices {
    pub schemas: Vec<Schema>,
}

impl DataServices {
    /// No schema is declared. Such a document produces no model.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl DeDataServices {
    /// # Errors
    ///
    /// Validation error of the first invalid schema.
    pub fn validate(self) -> Result<DataServices, ValidateError> {
        self.schemas
            .into_iter()
            .map(DeSchema::validate)
            .collect::<Result<Vec<_>, _>>()
            .map(|schemas| DataServices { schemas })
    }
}

#[cfg(test)]
mod test {
    use crate::edmx::Edmx;
    use crate::edmx::ValidateError;

    #[test]
    fn test_schemas_in_document_order() {
        let edmx = Edmx::parse(
            r#"<edmx:Edmx Version="4.0"><edmx:DataServices>
                 <Schema Namespace="First"/>
                 <Schema Namespace="Second"/>
               </edmx:DataServices></edmx:Edmx>"#,
        )
        .unwrap();
        let namespaces = edmx
            .data_services
            .schemas
            .iter()
            .map(|s| s.namespace.to_string())
            .collect::<Vec<_>>();
        assert_eq!(namespaces, ["First", "Second"]);
        assert!(!edmx.data_services.is_empty());
    }

    #[test]
    fn test_no_schemas() {
        let edmx = Edmx::parse(
            r#"<edmx:Edmx Version="4.0"><edmx:DataServices></edmx:DataServices></edmx:Edmx>"#,
        )
        .unwrap();
        assert!(edmx.data_services.is_empty());
        assert!(edmx.is_empty());
    }

    #[test]
    fn test_invalid_schema_fails_document() {
        let err = Edmx::parse(
            r#"<edmx:Edmx Version="4.0"><edmx:DataServices>
                 <Schema Namespace="Good"/>
                 <Schema Namespace="Bad">
                   <EntityType Name="E">
                     <Key><PropertyRef Name="A"/></Key>
                     <Key><PropertyRef Name="B"/></Key>
                   </EntityType>
                 </Schema>
               </edmx:DataServices></edmx:Edmx>"#,
        )
        .unwrap_err();
        assert!(matches!(err, ValidateError::Schema(_, _)), "{err:?}");
    }
}
