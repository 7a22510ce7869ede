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

use crate::edmx::attribute_values::MaxLength;
use crate::edmx::attribute_values::Scale;
use crate::edmx::attribute_values::Srid;
use crate::edmx::Annotation;
use crate::edmx::Facets;
use crate::edmx::QualifiedName;
use crate::edmx::SimpleIdentifier;
use crate::edmx::TypeName;
use serde::Deserialize;

/// 14.1 Element edm:Term
#[derive(Debug, Deserialize)]
pub struct Term {
    /// 14.1.1 Attribute `Name`
    #[serde(rename = "@Name")]
    pub name: SimpleIdentifier,
    /// 14.1.2 Attribute `Type`
    #[serde(rename = "@Type")]
    pub ttype: Option<TypeName>,
    /// 14.1.3 Attribute `BaseTerm`
    #[serde(rename = "@BaseTerm")]
    pub base_term: Option<QualifiedName>,
    /// 14.1.4 Attribute `DefaultValue`
    #[serde(rename = "@DefaultValue")]
    pub default_value: Option<String>,
    /// 14.1.5 Attribute `AppliesTo`
    #[serde(rename = "@AppliesTo")]
    pub applies_to: Option<String>,
    #[serde(rename = "@Nullable")]
    pub nullable: Option<bool>,
    #[serde(rename = "@MaxLength")]
    pub max_length: Option<MaxLength>,
    #[serde(rename = "@Precision")]
    pub precision: Option<u32>,
    #[serde(rename = "@Scale")]
    pub scale: Option<Scale>,
    #[serde(rename = "@SRID")]
    pub srid: Option<Srid>,
    #[serde(rename = "@Unicode")]
    pub unicode: Option<bool>,
    #[serde(rename = "Annotation", default)]
    pub annotations: Vec<Annotation>,
}

impl Term {
    #[must_use]
    pub const fn facets(&self) -> Facets {
        Facets {
            max_length: self.max_length,
            precision: self.precision,
            scale: self.scale,
            srid: self.srid,
            unicode: self.unicode,
        }
    }
}
