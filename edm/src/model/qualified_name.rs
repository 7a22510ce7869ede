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

use crate::edmx::Namespace;
use crate::edmx::QualifiedName as EdmxQualifiedName;
use crate::edmx::SimpleIdentifier;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Fully qualified name of a schema element. Namespace is always a
/// real namespace, never an alias.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct QualifiedName<'a> {
    /// Namespace where name is located.
    pub namespace: &'a Namespace,
    /// Name.
    pub name: &'a SimpleIdentifier,
}

impl<'a> QualifiedName<'a> {
    /// Create new qualified name.
    #[must_use]
    pub const fn new(namespace: &'a Namespace, name: &'a SimpleIdentifier) -> Self {
        Self { namespace, name }
    }

    /// Name is in the `Edm` namespace.
    #[must_use]
    pub fn is_edm(&self) -> bool {
        self.namespace.is_edm()
    }
}

impl<'a> From<&'a EdmxQualifiedName> for QualifiedName<'a> {
    fn from(v: &'a EdmxQualifiedName) -> Self {
        Self {
            namespace: &v.namespace,
            name: &v.name,
        }
    }
}

impl Display for QualifiedName<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}
