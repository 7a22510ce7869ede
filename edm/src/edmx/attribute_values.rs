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

//! Types defined in 17 Attribute Values

use serde::de::Error as DeError;
use serde::de::Visitor;
use serde::Deserialize;
use serde::Deserializer;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::marker::PhantomData;
use std::str::FromStr;

#[derive(Debug)]
pub enum Error {
    InvalidSimpleIdentifier(String),
    InvalidQualifiedIdentifier(String),
    InvalidTypeName(String),
    InvalidFacetValue(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::InvalidSimpleIdentifier(id) => write!(f, "invalid simple identifier {id}"),
            Self::InvalidQualifiedIdentifier(id) => write!(f, "invalid qualified identifier {id}"),
            Self::InvalidTypeName(v) => write!(f, "invalid type name {v}"),
            Self::InvalidFacetValue(v) => write!(f, "invalid facet value {v}"),
        }
    }
}

/// Deserialize any attribute value that has a `FromStr`
/// implementation.
pub(crate) fn deserialize_from_str<'de, D, T>(de: D, expecting: &'static str) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    struct StrVisitor<T> {
        expecting: &'static str,
        target: PhantomData<T>,
    }
    impl<T> Visitor<'_> for StrVisitor<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        type Value = T;

        fn expecting(&self, formatter: &mut Formatter) -> FmtResult {
            formatter.write_str(self.expecting)
        }
        fn visit_str<E: DeError>(self, value: &str) -> Result<Self::Value, E> {
            value.parse().map_err(DeError::custom)
        }
    }

    de.deserialize_string(StrVisitor {
        expecting,
        target: PhantomData,
    })
}

/// 17.1 `Namespace`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Namespace {
    pub ids: Vec<SimpleIdentifier>,
}

impl Namespace {
    #[must_use]
    pub fn is_edm(&self) -> bool {
        self.ids.len() == 1 && self.ids[0].inner() == "Edm"
    }
}

impl FromStr for Namespace {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self {
            ids: s
                .split('.')
                .map(SimpleIdentifier::from_str)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut iter = self.ids.iter();
        if let Some(v) = iter.next() {
            v.fmt(f)?;
        }
        for v in iter {
            ".".fmt(f)?;
            v.fmt(f)?;
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for Namespace {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        deserialize_from_str(de, "Namespace string")
    }
}

/// 17.2 `SimpleIdentifier`
#[derive(Clone, Debug, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct SimpleIdentifier(String);

impl SimpleIdentifier {
    #[must_use]
    pub const fn inner(&self) -> &String {
        &self.0
    }
}

impl Display for SimpleIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.0.fmt(f)
    }
}

impl AsRef<str> for SimpleIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for SimpleIdentifier {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();

        // Normative: starts with a letter or underscore, followed by
        // at most 127 letters, underscores or digits.
        //
        // Implementation: we don't check max length.
        chars
            .next()
            .and_then(|first| {
                if first.is_alphabetic() || first == '_' {
                    Some(())
                } else {
                    None
                }
            })
            .ok_or_else(|| Error::InvalidSimpleIdentifier(s.into()))?;

        if chars.any(|c| !c.is_alphanumeric() && c != '_') {
            Err(Error::InvalidSimpleIdentifier(s.into()))
        } else {
            Ok(Self(s.into()))
        }
    }
}

impl<'de> Deserialize<'de> for SimpleIdentifier {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        deserialize_from_str(de, "SimpleIdentifier string")
    }
}

/// 17.3 `QualifiedName`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub namespace: Namespace,
    pub name: SimpleIdentifier,
}

impl FromStr for QualifiedName {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut ids = s
            .split('.')
            .map(SimpleIdentifier::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| Error::InvalidQualifiedIdentifier(s.into()))?;
        let name = ids
            .pop()
            .ok_or_else(|| Error::InvalidQualifiedIdentifier(s.into()))?;
        if ids.is_empty() {
            return Err(Error::InvalidQualifiedIdentifier(s.into()));
        }
        Ok(Self {
            namespace: Namespace { ids },
            name,
        })
    }
}

impl Display for QualifiedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

impl<'de> Deserialize<'de> for QualifiedName {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        deserialize_from_str(de, "QualifiedName string")
    }
}

/// 17.4 `TypeName`
///
/// Either a qualified name of a single type, a collection of some
/// type, or a reference to an entity type.
#[derive(Debug, PartialEq, Eq)]
pub enum TypeName {
    One(QualifiedName),
    CollectionOf(Box<TypeName>),
    RefOf(Box<TypeName>),
}

impl TypeName {
    /// Innermost qualified name, wrappers stripped.
    #[must_use]
    pub fn qualified_type_name(&self) -> &QualifiedName {
        match self {
            Self::One(v) => v,
            Self::CollectionOf(v) | Self::RefOf(v) => v.qualified_type_name(),
        }
    }

    /// Returns true if type is a collection.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::CollectionOf(_))
    }
}

impl FromStr for TypeName {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const COLLECTION_PREFIX: &str = "Collection(";
        const REF_PREFIX: &str = "Ref(";
        const SUFFIX: &str = ")";
        let wrapped = |prefix: &str| {
            if s.starts_with(prefix) && s.ends_with(SUFFIX) {
                Some(&s[prefix.len()..s.len() - SUFFIX.len()])
            } else {
                None
            }
        };
        if let Some(inner) = wrapped(COLLECTION_PREFIX) {
            Ok(Self::CollectionOf(Box::new(inner.parse()?)))
        } else if let Some(inner) = wrapped(REF_PREFIX) {
            Ok(Self::RefOf(Box::new(inner.parse()?)))
        } else {
            Ok(Self::One(
                s.parse().map_err(|_| Error::InvalidTypeName(s.into()))?,
            ))
        }
    }
}

impl Display for TypeName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::One(v) => v.fmt(f),
            Self::CollectionOf(v) => write!(f, "Collection({v})"),
            Self::RefOf(v) => write!(f, "Ref({v})"),
        }
    }
}

impl<'de> Deserialize<'de> for TypeName {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        deserialize_from_str(de, "property type string")
    }
}

/// 6.2.2 Attribute `MaxLength`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxLength {
    /// Special value `max`: unbounded length.
    Max,
    Value(u32),
}

impl FromStr for MaxLength {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "max" {
            Ok(Self::Max)
        } else {
            s.parse()
                .map(Self::Value)
                .map_err(|_| Error::InvalidFacetValue(s.into()))
        }
    }
}

impl Display for MaxLength {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Max => "max".fmt(f),
            Self::Value(v) => v.fmt(f),
        }
    }
}

impl<'de> Deserialize<'de> for MaxLength {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        deserialize_from_str(de, "MaxLength value")
    }
}

/// 6.2.4 Attribute `Scale`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Variable,
    Floating,
    Value(u32),
}

impl FromStr for Scale {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "variable" => Ok(Self::Variable),
            "floating" => Ok(Self::Floating),
            _ => s
                .parse()
                .map(Self::Value)
                .map_err(|_| Error::InvalidFacetValue(s.into())),
        }
    }
}

impl Display for Scale {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Variable => "variable".fmt(f),
            Self::Floating => "floating".fmt(f),
            Self::Value(v) => v.fmt(f),
        }
    }
}

impl<'de> Deserialize<'de> for Scale {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        deserialize_from_str(de, "Scale value")
    }
}

/// 6.2.6 Attribute `SRID`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Srid {
    Variable,
    Value(u32),
}

impl FromStr for Srid {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "variable" {
            Ok(Self::Variable)
        } else {
            s.parse()
                .map(Self::Value)
                .map_err(|_| Error::InvalidFacetValue(s.into()))
        }
    }
}

impl Display for Srid {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Variable => "variable".fmt(f),
            Self::Value(v) => v.fmt(f),
        }
    }
}

impl<'de> Deserialize<'de> for Srid {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        deserialize_from_str(de, "SRID value")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::from_str as json_from_str;

    #[test]
    fn test_namespace_valid() {
        let valid_cases = vec!["Namespace", "My.Namespace", "My.Complex.Namespace", "Edm"];

        for case in valid_cases {
            let ns = Namespace::from_str(case);
            assert!(ns.is_ok(), "Failed to parse valid Namespace: {}", case);

            let ns = ns.unwrap();
            let expected_count = case.chars().filter(|c| *c == '.').count() + 1;
            assert_eq!(ns.ids.len(), expected_count);
        }
    }

    #[test]
    fn test_namespace_invalid() {
        let invalid_cases = vec![
            "Invalid.123Name", // Invalid SimpleIdentifier
            "Namespace.",      // Trailing dot
            ".Namespace",      // Leading dot
            "Namespace..Name", // Double dot
            "",                // Empty string
        ];

        for case in invalid_cases {
            assert!(
                Namespace::from_str(case).is_err(),
                "Should reject invalid Namespace: {}",
                case
            );
        }
    }

    #[test]
    fn test_namespace_is_edm() {
        assert!(Namespace::from_str("Edm").unwrap().is_edm());
        assert!(!Namespace::from_str("Edm.Something").unwrap().is_edm());
    }

    #[test]
    fn test_simple_identifier_invalid() {
        let invalid_cases = vec![
            "123Name",
            "Name-with-hyphens",
            "Name.with.dots",
            "Name with spaces",
            "",
            "$Name",
        ];

        for case in invalid_cases {
            assert!(
                SimpleIdentifier::from_str(case).is_err(),
                "Should reject invalid SimpleIdentifier: {}",
                case
            );
        }
    }

    #[test]
    fn test_qualified_name() {
        let qn = QualifiedName::from_str("My.Namespace.Name").unwrap();
        assert_eq!(qn.name.inner(), "Name");
        assert_eq!(qn.namespace.to_string(), "My.Namespace");
        assert_eq!(qn.to_string(), "My.Namespace.Name");

        // Qualified name always has a namespace.
        assert!(QualifiedName::from_str("Name").is_err());
        assert!(QualifiedName::from_str("Namespace..Name").is_err());

        let qn: QualifiedName = json_from_str(r#""Core.Description""#).unwrap();
        assert_eq!(qn.namespace.ids.len(), 1);
    }

    #[test]
    fn test_type_name() {
        assert!(matches!(
            TypeName::from_str("Edm.String").unwrap(),
            TypeName::One(_)
        ));
        let collection = TypeName::from_str("Collection(My.Namespace.Type)").unwrap();
        assert!(collection.is_collection());
        assert_eq!(
            collection.qualified_type_name().to_string(),
            "My.Namespace.Type"
        );
        assert_eq!(collection.to_string(), "Collection(My.Namespace.Type)");

        let reference = TypeName::from_str("Collection(Ref(NS.Person))").unwrap();
        match reference {
            TypeName::CollectionOf(inner) => assert!(matches!(*inner, TypeName::RefOf(_))),
            other => panic!("unexpected {other:?}"),
        }

        for case in [
            "Collection()",
            "Collection(Edm/Invalid)",
            "Collection(Edm.String",
            "Collection Edm.String",
        ] {
            assert!(TypeName::from_str(case).is_err(), "accepted {case}");
        }
    }

    #[test]
    fn test_facet_values() {
        assert_eq!(MaxLength::from_str("max").unwrap(), MaxLength::Max);
        assert_eq!(MaxLength::from_str("20").unwrap(), MaxLength::Value(20));
        assert!(MaxLength::from_str("unbounded").is_err());

        assert_eq!(Scale::from_str("variable").unwrap(), Scale::Variable);
        assert_eq!(Scale::from_str("floating").unwrap(), Scale::Floating);
        assert_eq!(Scale::from_str("2").unwrap(), Scale::Value(2));

        assert_eq!(Srid::from_str("4326").unwrap(), Srid::Value(4326));
        let srid: Srid = json_from_str(r#""variable""#).unwrap();
        assert_eq!(srid, Srid::Variable);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::InvalidSimpleIdentifier("123invalid".to_string()).to_string(),
            "invalid simple identifier 123invalid"
        );
        assert_eq!(
            Error::InvalidFacetValue("x".to_string()).to_string(),
            "invalid facet value x"
        );
    }
}
