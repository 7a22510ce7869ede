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

//! OData EDM model builder.
//!
//! Turns parsed CSDL (EDMX) schema documents into a linked,
//! validated [`model::ModelGraph`]:
//!
//! ```
//! use odata_edm::builder::SchemaBundle;
//! use odata_edm::edmx::Edmx;
//!
//! let doc = Edmx::parse(
//!     r#"<edmx:Edmx Version="4.0"><edmx:DataServices>
//!          <Schema Namespace="Demo">
//!            <EntityType Name="Item">
//!              <Key><PropertyRef Name="Id"/></Key>
//!              <Property Name="Id" Type="Edm.Int32" Nullable="false"/>
//!            </EntityType>
//!          </Schema>
//!        </edmx:DataServices></edmx:Edmx>"#,
//! )
//! .unwrap();
//! let bundle = SchemaBundle { edmx_docs: vec![doc] };
//! let graph = bundle.build().unwrap();
//! assert!(graph.find_entity_type("Demo.Item").is_some());
//! ```

/// EDMX documents.
pub mod edmx;
/// Linked model graph.
pub mod model;
/// Model builder.
pub mod builder;
/// Build manifest.
pub mod config;
/// Command line commands.
pub mod commands;

use crate::builder::Error as BuildError;
use crate::config::Error as ManifestError;
use crate::edmx::ValidateError;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::io::Error as IoError;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    AtLeastOneCsdlFileNeeded,
    Io(PathBuf, IoError),
    Edmx(PathBuf, ValidateError),
    Manifest(PathBuf, ManifestError),
    Build(Vec<String>),
}

impl Error {
    /// Build errors borrow the documents. Keep rendered lines only.
    #[allow(clippy::needless_pass_by_value)]
    #[must_use]
    pub fn build_error(e: BuildError<'_>) -> Self {
        Self::Build(
            format!("{e}")
                .split('\n')
                .map(ToString::to_string)
                .collect(),
        )
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::AtLeastOneCsdlFileNeeded => "at least one CSDL file is needed".fmt(f),
            Self::Io(fname, error) => {
                write!(f, "input/output error: file: {}: {error}", fname.display())
            }
            Self::Edmx(fname, error) => {
                write!(
                    f,
                    "EDMX format validation error: file: {}: {error}",
                    fname.display()
                )
            }
            Self::Manifest(fname, error) => {
                write!(f, "manifest error: file: {}: {error}", fname.display())
            }
            Self::Build(lines) => {
                write!(f, "model build error:")?;
                lines
                    .iter()
                    .enumerate()
                    .try_for_each(|(no, line)| write!(f, "\n #{no}: {line}"))
            }
        }
    }
}

impl StdError for Error {}
