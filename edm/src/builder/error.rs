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

use crate::edmx::annotation::ConstantKind;
use crate::edmx::Namespace;
use crate::edmx::SimpleIdentifier;
use crate::model::QualifiedName;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Class of a build error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A name cannot be found after alias resolution.
    UnresolvedReference,
    /// Facets that the type doesn't support, or an enum member value
    /// that doesn't fit the underlying type.
    FacetMismatch,
    /// A literal cannot be parsed as the type it must have.
    MalformedExpression,
}

/// Model build errors.
#[derive(Debug)]
pub enum Error<'a> {
    /// Main document doesn't declare anything.
    NoMainModel,
    /// Type was not found.
    TypeNotFound(QualifiedName<'a>),
    /// Type is not an entity type.
    NotEntityType(QualifiedName<'a>),
    /// Base type is of a different kind (entity vs complex).
    BaseTypeKindMismatch(QualifiedName<'a>),
    /// Base type chain is cyclic.
    BaseTypeCycle(QualifiedName<'a>),
    /// Underlying type of an enum or a type definition is unknown.
    UnderlyingTypeNotFound(QualifiedName<'a>),
    /// Underlying type of an enum is not an integer type.
    InvalidEnumUnderlyingType(QualifiedName<'a>),
    /// Enum member value is not an integer or doesn't fit the
    /// underlying type.
    InvalidEnumMemberValue(&'a SimpleIdentifier, &'a str),
    /// Facets specified for a type that doesn't support them.
    FacetNotSupported(QualifiedName<'a>),
    /// Property was not found.
    PropertyNotFound(&'a str),
    /// Navigation property was not found.
    NavigationPropertyNotFound(&'a str),
    /// Term was not found.
    TermNotFound(QualifiedName<'a>),
    /// Action or function was not found.
    OperationNotFound(QualifiedName<'a>),
    /// Entity container was not found.
    EntityContainerNotFound(QualifiedName<'a>),
    /// Type cast segment of a path names no entity or complex type.
    TypeCastNotFound(&'a str),
    /// Entity set or singleton was not found.
    NavigationSourceNotFound(&'a str),
    /// First segment of entity set path is not the binding parameter.
    InvalidEntitySetPath(&'a str),
    /// Literal cannot be parsed.
    MalformedLiteral(ConstantKind, &'a str),
    /// Enum member referenced by a literal doesn't exist.
    EnumMemberNotFound(&'a str),
    /// Error while building a schema.
    Schema(&'a Namespace, Box<Error<'a>>),
    /// Error while building an entity or complex type.
    StructuredType(QualifiedName<'a>, Box<Error<'a>>),
    /// Error while building an enum type.
    EnumType(QualifiedName<'a>, Box<Error<'a>>),
    /// Error while building a type definition.
    TypeDefinition(QualifiedName<'a>, Box<Error<'a>>),
    /// Error while building a term.
    Term(QualifiedName<'a>, Box<Error<'a>>),
    /// Error while building a key.
    Key(Box<Error<'a>>),
    /// Error while building a structural property.
    Property(&'a SimpleIdentifier, Box<Error<'a>>),
    /// Error while building a navigation property.
    NavigationProperty(&'a SimpleIdentifier, Box<Error<'a>>),
    /// Error while building an annotation.
    Annotation(QualifiedName<'a>, Box<Error<'a>>),
    /// Error while building an action or function.
    Operation(QualifiedName<'a>, Box<Error<'a>>),
    /// Error while building an operation parameter.
    Parameter(&'a SimpleIdentifier, Box<Error<'a>>),
    /// Error while building an operation return type.
    ReturnType(Box<Error<'a>>),
    /// Error while building an entity container.
    EntityContainer(QualifiedName<'a>, Box<Error<'a>>),
    /// Error while building an entity set or singleton.
    NavigationSource(&'a SimpleIdentifier, Box<Error<'a>>),
    /// Error while building an action or function import.
    OperationImport(&'a SimpleIdentifier, Box<Error<'a>>),
    /// Error while building a navigation property binding.
    Binding(&'a str, Box<Error<'a>>),
    /// Error while building out-of-line annotations.
    OutOfLineAnnotations(&'a str, Box<Error<'a>>),
}

impl Error<'_> {
    /// Class of the innermost error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoMainModel
            | Self::TypeNotFound(_)
            | Self::NotEntityType(_)
            | Self::BaseTypeKindMismatch(_)
            | Self::BaseTypeCycle(_)
            | Self::UnderlyingTypeNotFound(_)
            | Self::PropertyNotFound(_)
            | Self::NavigationPropertyNotFound(_)
            | Self::TermNotFound(_)
            | Self::OperationNotFound(_)
            | Self::EntityContainerNotFound(_)
            | Self::TypeCastNotFound(_)
            | Self::NavigationSourceNotFound(_)
            | Self::InvalidEntitySetPath(_) => ErrorKind::UnresolvedReference,
            Self::InvalidEnumUnderlyingType(_)
            | Self::InvalidEnumMemberValue(_, _)
            | Self::FacetNotSupported(_) => ErrorKind::FacetMismatch,
            Self::MalformedLiteral(_, _) | Self::EnumMemberNotFound(_) => {
                ErrorKind::MalformedExpression
            }
            Self::Key(err) | Self::ReturnType(err) => err.kind(),
            Self::Schema(_, err)
            | Self::StructuredType(_, err)
            | Self::EnumType(_, err)
            | Self::TypeDefinition(_, err)
            | Self::Term(_, err)
            | Self::Annotation(_, err)
            | Self::Operation(_, err)
            | Self::EntityContainer(_, err) => err.kind(),
            Self::Property(_, err)
            | Self::NavigationProperty(_, err)
            | Self::Parameter(_, err)
            | Self::NavigationSource(_, err)
            | Self::OperationImport(_, err) => err.kind(),
            Self::Binding(_, err) | Self::OutOfLineAnnotations(_, err) => err.kind(),
        }
    }
}

impl Display for Error<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::NoMainModel => write!(f, "main document doesn't declare any schema"),
            Self::TypeNotFound(v) => write!(f, "type not found: {v}"),
            Self::NotEntityType(v) => write!(f, "not an entity type: {v}"),
            Self::BaseTypeKindMismatch(v) => {
                write!(f, "base type is of different kind: {v}")
            }
            Self::BaseTypeCycle(v) => write!(f, "cyclic base type chain: {v}"),
            Self::UnderlyingTypeNotFound(v) => write!(f, "underlying type not found: {v}"),
            Self::InvalidEnumUnderlyingType(v) => {
                write!(f, "enum underlying type is not an integer type: {v}")
            }
            Self::InvalidEnumMemberValue(name, v) => {
                write!(f, "invalid value of enum member {name}: {v}")
            }
            Self::FacetNotSupported(v) => write!(f, "facets are not supported by type: {v}"),
            Self::PropertyNotFound(v) => write!(f, "property not found: {v}"),
            Self::NavigationPropertyNotFound(v) => {
                write!(f, "navigation property not found: {v}")
            }
            Self::TermNotFound(v) => write!(f, "term not found: {v}"),
            Self::OperationNotFound(v) => write!(f, "action or function not found: {v}"),
            Self::EntityContainerNotFound(v) => write!(f, "entity container not found: {v}"),
            Self::TypeCastNotFound(v) => write!(f, "type cast not found in path: {v}"),
            Self::NavigationSourceNotFound(v) => {
                write!(f, "entity set or singleton not found: {v}")
            }
            Self::InvalidEntitySetPath(v) => {
                write!(f, "entity set path doesn't start with binding parameter: {v}")
            }
            Self::MalformedLiteral(kind, v) => write!(f, "malformed {kind:?} literal: {v}"),
            Self::EnumMemberNotFound(v) => write!(f, "enum member not found: {v}"),
            Self::Schema(name, err) => write!(f, "while building schema: {name}\n{err}"),
            Self::StructuredType(name, err) => {
                write!(f, "while building structured type: {name}\n{err}")
            }
            Self::EnumType(name, err) => write!(f, "while building enum type: {name}\n{err}"),
            Self::TypeDefinition(name, err) => {
                write!(f, "while building type definition: {name}\n{err}")
            }
            Self::Term(name, err) => write!(f, "while building term: {name}\n{err}"),
            Self::Key(err) => write!(f, "while building key\n{err}"),
            Self::Property(name, err) => write!(f, "while building property: {name}\n{err}"),
            Self::NavigationProperty(name, err) => {
                write!(f, "while building navigation property: {name}\n{err}")
            }
            Self::Annotation(term, err) => {
                write!(f, "while building annotation: {term}\n{err}")
            }
            Self::Operation(name, err) => write!(f, "while building operation: {name}\n{err}"),
            Self::Parameter(name, err) => write!(f, "while building parameter: {name}\n{err}"),
            Self::ReturnType(err) => write!(f, "while building return type\n{err}"),
            Self::EntityContainer(name, err) => {
                write!(f, "while building entity container: {name}\n{err}")
            }
            Self::NavigationSource(name, err) => {
                write!(f, "while building entity set or singleton: {name}\n{err}")
            }
            Self::OperationImport(name, err) => {
                write!(f, "while building operation import: {name}\n{err}")
            }
            Self::Binding(path, err) => {
                write!(f, "while building navigation property binding: {path}\n{err}")
            }
            Self::OutOfLineAnnotations(target, err) => {
                write!(f, "while building annotations of: {target}\n{err}")
            }
        }
    }
}
