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

//! Build manifest of the command line tool.
//!
//! ```toml
//! main = "service.xml"
//! references = ["vocabularies/Core.xml"]
//! ```
//!
//! Relative paths are relative to the directory of the manifest.

use serde::Deserialize;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::fs::File;
use std::io::Error as IoError;
use std::io::Read as _;
use std::path::Path;
use std::path::PathBuf;
use toml::de::Error as TomlError;

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct BuildManifest {
    /// Main CSDL document.
    pub main: PathBuf,
    /// Referenced CSDL documents.
    #[serde(default)]
    pub references: Vec<PathBuf>,
}

impl BuildManifest {
    /// Read build manifest from toml file.
    ///
    /// # Errors
    ///
    /// - `Error::Io` if failed to read file
    /// - `Error::Toml` if failed to parse content as TOML / invalid manifest.
    pub fn read(fname: &Path) -> Result<Self, Error> {
        let mut file = File::open(fname).map_err(Error::Io)?;
        let mut content = String::new();
        file.read_to_string(&mut content).map_err(Error::Io)?;
        toml::from_str(&content).map_err(Error::Toml)
    }

    /// All documents of the manifest, main document first.
    #[must_use]
    pub fn documents(&self, base: &Path) -> Vec<PathBuf> {
        std::iter::once(&self.main)
            .chain(self.references.iter())
            .map(|f| base.join(f))
            .collect()
    }
}

#[derive(Debug)]
pub enum Error {
    Io(IoError),
    Toml(TomlError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Io(err) => write!(f, "input/output error: {err}"),
            Self::Toml(err) => write!(f, "manifest file format error: {err}"),
        }
    }
}

impl StdError for Error {}
