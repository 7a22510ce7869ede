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
use crate::builder::ErrorKind;
use crate::edmx::annotation::ConstantKind;
use crate::edmx::annotation::PathExpressionKind;
use crate::edmx::annotation::Record;
use crate::edmx::Expression as EdmxExpression;
use crate::model::expression::ConstantValue;
use crate::model::expression::RecordProperty;
use crate::model::EnumType;
use crate::model::EnumTypeId;
use crate::model::Expression;
use crate::model::ModelId;
use crate::model::PathKind;
use crate::model::PrimitiveKind;
use crate::model::TypeDef;
use crate::model::TypeRef;
use base64::alphabet;
use base64::engine::general_purpose::GeneralPurpose;
use base64::engine::general_purpose::GeneralPurposeConfig;
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use rust_decimal::Decimal;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::Date;
use time::Duration;
use time::OffsetDateTime;
use time::Time;
use uuid::Uuid;

/// `Edm.Binary` literals are base64url, padding is optional.
const BINARY: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// How names of types and enum members inside of an annotation value
/// are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum NameResolution {
    /// Unknown name is an error.
    Strict,
    /// Unknown name is kept as written. Used for values of unresolved
    /// terms.
    Lenient,
}

impl<'a> Context<'a> {
    /// Build annotation value. `expected` is the type declared by the
    /// term (or by the record property) and decides how ambiguous
    /// string literals are read.
    pub(super) fn build_expression(
        &self,
        doc: usize,
        model: ModelId,
        expr: &'a EdmxExpression,
        expected: Option<&TypeRef>,
        names: NameResolution,
    ) -> Result<Expression<'a>, Error<'a>> {
        match expr {
            EdmxExpression::Constant(kind, text) => {
                self.build_constant(doc, model, *kind, text, expected, names)
            }
            EdmxExpression::Path(kind, text) => Ok(Expression::Path {
                kind: *kind,
                segments: text.split('/').collect(),
            }),
            EdmxExpression::Collection(items) => {
                let element = expected.map(TypeRef::element_type);
                items
                    .iter()
                    .map(|v| self.build_expression(doc, model, v, element, names))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Expression::Collection)
            }
            EdmxExpression::Record(record) => {
                self.build_record(doc, model, record, expected, names)
            }
            EdmxExpression::Cast(cast) => {
                let ctype = self
                    .resolve_type_ref(doc, model, &cast.ctype, None, cast.facets)
                    .map(Some)
                    .or_else(|e| match (names, e.kind()) {
                        (NameResolution::Lenient, ErrorKind::UnresolvedReference) => Ok(None),
                        _ => Err(e),
                    })?;
                let value =
                    self.build_expression(doc, model, &cast.value, ctype.as_ref(), names)?;
                Ok(Expression::Cast {
                    ctype,
                    type_name: &cast.ctype,
                    value: Box::new(value),
                })
            }
            EdmxExpression::Null => Ok(Expression::Null),
        }
    }

    fn build_record(
        &self,
        doc: usize,
        model: ModelId,
        record: &'a Record,
        expected: Option<&TypeRef>,
        names: NameResolution,
    ) -> Result<Expression<'a>, Error<'a>> {
        let rtype = match &record.rtype {
            Some(name) => {
                let name = self.index.resolve(doc, name);
                let found = self
                    .graph
                    .find_structured_type_in(model, &name.to_string());
                if found.is_none() && names == NameResolution::Strict {
                    return Err(Error::TypeNotFound(name));
                }
                found
            }
            None => expected.and_then(TypeRef::structured_type),
        };
        let properties = record
            .property_values
            .iter()
            .map(|pv| {
                let property = rtype.and_then(|t| self.graph.find_property(t, pv.property.inner()));
                let expected = property.map(|p| &self.graph.property(p).type_ref);
                self.build_expression(doc, model, &pv.value, expected, names)
                    .and_then(|value| {
                        Ok(RecordProperty {
                            name: &pv.property,
                            property,
                            value,
                            annotations: self.expression_annotations(doc, model, &pv.annotations)?,
                        })
                    })
                    .map_err(Box::new)
                    .map_err(|e| Error::Property(&pv.property, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Expression::Record {
            rtype,
            type_name: record.rtype.as_ref(),
            properties,
            annotations: self.expression_annotations(doc, model, &record.annotations)?,
        })
    }

    /// Constant literal. Strings are reinterpreted as enum members or
    /// paths if the expected type requires that.
    pub(super) fn build_constant(
        &self,
        doc: usize,
        model: ModelId,
        kind: ConstantKind,
        text: &'a str,
        expected: Option<&TypeRef>,
        names: NameResolution,
    ) -> Result<Expression<'a>, Error<'a>> {
        match (kind, expected.map(|t| &t.element_type().definition)) {
            (ConstantKind::String | ConstantKind::EnumMember, Some(TypeDef::Enum(id))) => {
                self.enum_members(*id, text)
            }
            (ConstantKind::EnumMember, _) => match self.enum_of_member(doc, model, text) {
                Ok(id) => self.enum_members(id, text),
                Err(_) if names == NameResolution::Lenient => {
                    Ok(Expression::UnresolvedEnumMember(text))
                }
                Err(e) => Err(e),
            },
            (ConstantKind::String, Some(TypeDef::Path(path))) => Ok(Expression::Path {
                kind: path_expression_kind(*path),
                segments: text.split('/').collect(),
            }),
            _ => parse_constant(kind, text).map(|value| Expression::Constant { value, text }),
        }
    }

    /// Primitive kind of the (element) type, looking through type
    /// definitions.
    pub(super) fn primitive_kind(&self, t: &TypeRef) -> Option<PrimitiveKind> {
        match &t.element_type().definition {
            TypeDef::Primitive { kind, .. } => Some(*kind),
            TypeDef::TypeDefinition { id, .. } => {
                Some(self.graph.type_definition(*id).underlying_type)
            }
            _ => None,
        }
    }

    /// Enum type of a member written as `Namespace.Enum/Member`.
    fn enum_of_member(
        &self,
        doc: usize,
        model: ModelId,
        text: &'a str,
    ) -> Result<EnumTypeId, Error<'a>> {
        text.split_whitespace()
            .next()
            .and_then(|member| member.split_once('/'))
            .and_then(|(enum_type, _)| self.index.resolve_str(doc, enum_type))
            .and_then(|name| self.graph.find_enum_type_in(model, &name))
            .ok_or(Error::EnumMemberNotFound(text))
    }

    /// Members encoded by the literal: member names separated by
    /// spaces or commas (optionally qualified by the enum type), or
    /// an integer value. For flags the value may combine members.
    fn enum_members(&self, id: EnumTypeId, text: &'a str) -> Result<Expression<'a>, Error<'a>> {
        let enum_type = self.graph.enum_type(id);
        let members = match text.trim().parse::<i64>() {
            Ok(value) => members_of_value(enum_type, value),
            Err(_) => text
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|v| !v.is_empty())
                .map(|v| enum_type.member(v.rsplit_once('/').map_or(v, |(_, member)| member)))
                .collect::<Option<Vec<_>>>()
                .filter(|members| {
                    !members.is_empty() && (members.len() == 1 || *enum_type.is_flags.inner())
                }),
        }
        .ok_or(Error::EnumMemberNotFound(text))?;
        Ok(Expression::EnumMembers {
            enum_type: id,
            members,
        })
    }
}

/// Members whose values make up the value. Exact member match wins;
/// flags are decomposed into bits.
fn members_of_value(enum_type: &EnumType<'_>, value: i64) -> Option<Vec<usize>> {
    if let Some(index) = enum_type.members.iter().position(|m| m.value == value) {
        return Some(vec![index]);
    }
    if !*enum_type.is_flags.inner() {
        return None;
    }
    let members = enum_type
        .members
        .iter()
        .enumerate()
        .filter(|(_, m)| m.value != 0 && m.value & value == m.value)
        .map(|(index, _)| index)
        .collect::<Vec<_>>();
    let covered = members
        .iter()
        .fold(0, |acc, index| acc | enum_type.members[*index].value);
    (covered == value).then_some(members)
}

const fn path_expression_kind(kind: PathKind) -> PathExpressionKind {
    match kind {
        PathKind::AnnotationPath => PathExpressionKind::AnnotationPath,
        PathKind::PropertyPath => PathExpressionKind::PropertyPath,
        PathKind::NavigationPropertyPath => PathExpressionKind::NavigationPropertyPath,
        PathKind::AnyPropertyPath | PathKind::ModelElementPath => PathExpressionKind::Path,
    }
}

/// Parse literal of a constant expression.
///
/// # Errors
///
/// `Error::MalformedLiteral` if the text is not a valid literal of
/// the kind.
pub fn parse_constant(kind: ConstantKind, text: &str) -> Result<ConstantValue<'_>, Error<'_>> {
    let value = match kind {
        ConstantKind::String | ConstantKind::EnumMember => Some(ConstantValue::String(text)),
        ConstantKind::Binary => BINARY.decode(text).ok().map(ConstantValue::Binary),
        ConstantKind::Bool => match text {
            "true" => Some(ConstantValue::Boolean(true)),
            "false" => Some(ConstantValue::Boolean(false)),
            _ => None,
        },
        ConstantKind::Date => Date::parse(text, format_description!("[year]-[month]-[day]"))
            .ok()
            .map(ConstantValue::Date),
        ConstantKind::DateTimeOffset => {
            parse_date_time_offset(text).map(ConstantValue::DateTimeOffset)
        }
        ConstantKind::Decimal => text
            .parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(text))
            .ok()
            .map(ConstantValue::Decimal),
        ConstantKind::Duration => parse_duration(text).map(ConstantValue::Duration),
        ConstantKind::Float => match text {
            "INF" => Some(f64::INFINITY),
            "-INF" => Some(f64::NEG_INFINITY),
            "NaN" => Some(f64::NAN),
            _ => text.parse().ok(),
        }
        .map(ConstantValue::Float),
        ConstantKind::Guid => Uuid::parse_str(text).ok().map(ConstantValue::Guid),
        ConstantKind::Int => text.parse().ok().map(ConstantValue::Integer),
        ConstantKind::TimeOfDay => parse_time_of_day(text).map(ConstantValue::TimeOfDay),
    };
    value.ok_or(Error::MalformedLiteral(kind, text))
}

/// RFC 3339 timestamp. Seconds may be omitted: `2000-01-01T16:00Z`.
fn parse_date_time_offset(text: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(text, &Rfc3339).ok().or_else(|| {
        let (date, time) = text.split_once('T')?;
        let (hour_minute, offset) =
            time.split_at(time.find(|c: char| matches!(c, 'Z' | 'z' | '+' | '-'))?);
        if hour_minute.matches(':').count() != 1 {
            return None;
        }
        OffsetDateTime::parse(&format!("{date}T{hour_minute}:00{offset}"), &Rfc3339).ok()
    })
}

/// `hh:mm[:ss[.fffffffff]]`
fn parse_time_of_day(text: &str) -> Option<Time> {
    Time::parse(
        text,
        format_description!("[hour]:[minute]:[second].[subsecond]"),
    )
    .or_else(|_| Time::parse(text, format_description!("[hour]:[minute]:[second]")))
    .or_else(|_| Time::parse(text, format_description!("[hour]:[minute]")))
    .ok()
}

/// ISO 8601 day-time duration: `[-]P[nD][T[nH][nM][n[.n]S]]`.
fn parse_duration(text: &str) -> Option<Duration> {
    let (negative, rest) = text
        .strip_prefix('-')
        .map_or((false, text), |rest| (true, rest));
    let rest = rest.strip_prefix('P')?;
    if rest.is_empty() {
        return None;
    }
    let (days, time) = match rest.split_once('T') {
        Some((days, time)) if !time.is_empty() => (days, Some(time)),
        Some(_) => return None,
        None => (rest, None),
    };
    let mut total = Duration::ZERO;
    if !days.is_empty() {
        let days = days.strip_suffix('D')?.parse::<i64>().ok()?;
        total = total.checked_add(Duration::seconds(days.checked_mul(86_400)?))?;
    }
    if let Some(mut time) = time {
        for (designator, seconds) in [('H', 3_600), ('M', 60)] {
            if let Some((value, tail)) = time.split_once(designator) {
                let value = value.parse::<i64>().ok()?;
                total = total.checked_add(Duration::seconds(value.checked_mul(seconds)?))?;
                time = tail;
            }
        }
        if !time.is_empty() {
            let seconds = time.strip_suffix('S')?;
            let (whole, fraction) = seconds.split_once('.').unwrap_or((seconds, ""));
            if !fraction.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            total = total.checked_add(Duration::seconds(whole.parse().ok()?))?;
            // Sub-nanosecond digits are dropped.
            let digits = &fraction[..fraction.len().min(9)];
            if !digits.is_empty() {
                let scale = 10_i64.pow(9 - u32::try_from(digits.len()).ok()?);
                let nanos = digits.parse::<i64>().ok()?.checked_mul(scale)?;
                total = total.checked_add(Duration::nanoseconds(nanos))?;
            }
        }
    }
    if negative {
        total.checked_neg()
    } else {
        Some(total)
    }
}

#[cfg(test)]
mod test {
    use super::parse_constant;
    use super::parse_duration;
    use crate::builder::test::doc;
    use crate::builder::ErrorKind;
    use crate::builder::SchemaBundle;
    use crate::edmx::annotation::ConstantKind;
    use crate::edmx::annotation::PathExpressionKind;
    use crate::model::expression::ConstantValue;
    use crate::model::AnnotationTarget;
    use crate::model::Expression;
    use crate::model::ModelGraph;
    use time::Duration;

    #[test]
    fn test_parse_constants() {
        assert_eq!(
            parse_constant(ConstantKind::Int, "-42").unwrap(),
            ConstantValue::Integer(-42)
        );
        assert_eq!(
            parse_constant(ConstantKind::Binary, "T0RhdGE").unwrap(),
            ConstantValue::Binary(b"OData".to_vec())
        );
        assert!(matches!(
            parse_constant(ConstantKind::Float, "-INF").unwrap(),
            ConstantValue::Float(v) if v == f64::NEG_INFINITY
        ));
        assert!(matches!(
            parse_constant(ConstantKind::Decimal, "1.5e3").unwrap(),
            ConstantValue::Decimal(v) if v == rust_decimal::Decimal::new(1500, 0)
        ));
        assert!(matches!(
            parse_constant(ConstantKind::TimeOfDay, "21:45:00.5").unwrap(),
            ConstantValue::TimeOfDay(v) if v.hour() == 21 && v.millisecond() == 500
        ));
        assert!(matches!(
            parse_constant(ConstantKind::Date, "2000-01-01").unwrap(),
            ConstantValue::Date(v) if v.year() == 2000
        ));
        assert!(matches!(
            parse_constant(ConstantKind::DateTimeOffset, "2000-01-01T16:00:00.000-09:00").unwrap(),
            ConstantValue::DateTimeOffset(v) if v.offset().whole_hours() == -9
        ));
        assert!(matches!(
            parse_constant(ConstantKind::DateTimeOffset, "2000-01-01T16:00Z").unwrap(),
            ConstantValue::DateTimeOffset(v) if v.hour() == 16 && v.minute() == 0 && v.second() == 0
        ));
        assert!(matches!(
            parse_constant(ConstantKind::DateTimeOffset, "2000-01-01T16:30+05:30").unwrap(),
            ConstantValue::DateTimeOffset(v) if v.minute() == 30 && v.offset().minutes_past_hour() == 30
        ));
        assert!(parse_constant(ConstantKind::DateTimeOffset, "2000-01-01T16Z").is_err());
        assert!(parse_constant(ConstantKind::DateTimeOffset, "2000-01-01T16:00").is_err());
        assert!(matches!(
            parse_constant(ConstantKind::Guid, "21EC2020-3AEA-1069-A2DD-08002B30309D").unwrap(),
            ConstantValue::Guid(_)
        ));
        let err = parse_constant(ConstantKind::Bool, "yes").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedExpression);
        assert!(parse_constant(ConstantKind::Int, "1.5").is_err());
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(
            parse_duration("P1DT2H3M4.5S"),
            Some(
                Duration::days(1)
                    + Duration::hours(2)
                    + Duration::minutes(3)
                    + Duration::milliseconds(4_500)
            )
        );
        assert_eq!(parse_duration("-PT30M"), Some(Duration::minutes(-30)));
        assert_eq!(parse_duration("P7D"), Some(Duration::days(7)));
        assert_eq!(parse_duration("P"), None);
        assert_eq!(parse_duration("PT"), None);
        assert_eq!(parse_duration("P1Y"), None);
        assert_eq!(parse_duration("P99999999999999999D"), None);
    }

    const SCHEMA: &str = r#"<Schema Namespace="V" Alias="Voc">
        <EnumType Name="Color" IsFlags="true">
          <Member Name="Red" Value="1"/>
          <Member Name="Green" Value="2"/>
          <Member Name="Blue" Value="4"/>
        </EnumType>
        <EnumType Name="Level">
          <Member Name="Low"/>
          <Member Name="High"/>
        </EnumType>
        <ComplexType Name="Info">
          <Property Name="Level" Type="Voc.Level"/>
          <Property Name="Count" Type="Edm.Int64"/>
        </ComplexType>
        <Term Name="Colors" Type="Voc.Color"/>
        <Term Name="Levels" Type="Collection(Voc.Level)"/>
        <Term Name="Text" Type="Edm.String"/>
        <Term Name="Sort" Type="Edm.PropertyPath"/>
        <Term Name="Info" Type="Voc.Info"/>
        <Term Name="Any" Type="Edm.Untyped"/>
      </Schema>"#;

    fn values<'a>(graph: &'a ModelGraph<'a>) -> Vec<&'a Expression<'a>> {
        let namespace = graph.model(graph.main_model()).namespaces[1];
        graph
            .annotations_for(AnnotationTarget::Schema(namespace))
            .map(|a| &a.value)
            .collect()
    }

    fn annotated(annotations: &str) -> SchemaBundle {
        SchemaBundle {
            edmx_docs: vec![doc(&format!(
                r#"{SCHEMA}<Schema Namespace="S">{annotations}</Schema>"#
            ))],
        }
    }

    #[test]
    fn test_term_directed_strings() {
        let bundle = annotated(
            r#"<Annotation Term="Voc.Colors" String="5"/>
               <Annotation Term="Voc.Colors" String="Red Green"/>
               <Annotation Term="Voc.Colors" EnumMember="V.Color/Blue"/>
               <Annotation Term="Voc.Text" String="5"/>
               <Annotation Term="Voc.Sort" String="Address/City"/>"#,
        );
        let graph = bundle.build().unwrap();
        let color = graph.find_enum_type("V.Color").unwrap();
        let values = values(&graph);
        assert_eq!(
            *values[0],
            Expression::EnumMembers {
                enum_type: color,
                members: vec![0, 2]
            }
        );
        assert_eq!(
            *values[1],
            Expression::EnumMembers {
                enum_type: color,
                members: vec![0, 1]
            }
        );
        assert_eq!(
            *values[2],
            Expression::EnumMembers {
                enum_type: color,
                members: vec![2]
            }
        );
        assert_eq!(values[3].as_str(), Some("5"));
        assert_eq!(
            *values[4],
            Expression::Path {
                kind: PathExpressionKind::PropertyPath,
                segments: vec!["Address", "City"]
            }
        );
    }

    #[test]
    fn test_enum_literal_errors() {
        let bundle = annotated(r#"<Annotation Term="Voc.Colors" String="8"/>"#);
        assert_eq!(
            bundle.build().unwrap_err().kind(),
            ErrorKind::MalformedExpression
        );
        let bundle = annotated(r#"<Annotation Term="Voc.Colors" String="Purple"/>"#);
        assert_eq!(
            bundle.build().unwrap_err().kind(),
            ErrorKind::MalformedExpression
        );
    }

    #[test]
    fn test_collection_and_record() {
        let bundle = annotated(
            r#"<Annotation Term="Voc.Levels">
                 <Collection><String>High</String><EnumMember>V.Level/Low</EnumMember></Collection>
               </Annotation>
               <Annotation Term="Voc.Info">
                 <Record>
                   <PropertyValue Property="Level" String="High"/>
                   <PropertyValue Property="Count" Int="7"/>
                   <PropertyValue Property="Extra" Bool="true"/>
                 </Record>
               </Annotation>
               <Annotation Term="Voc.Any">
                 <Cast Type="Edm.Int32"><String>12</String></Cast>
               </Annotation>"#,
        );
        let graph = bundle.build().unwrap();
        let level = graph.find_enum_type("V.Level").unwrap();
        let info = graph.find_complex_type("V.Info").unwrap();
        let values = values(&graph);
        assert_eq!(
            *values[0],
            Expression::Collection(vec![
                Expression::EnumMembers {
                    enum_type: level,
                    members: vec![1]
                },
                Expression::EnumMembers {
                    enum_type: level,
                    members: vec![0]
                },
            ])
        );
        let Expression::Record {
            rtype, properties, ..
        } = values[1]
        else {
            panic!("record expected: {:?}", values[1]);
        };
        assert_eq!(*rtype, Some(info));
        assert_eq!(properties.len(), 3);
        assert_eq!(
            properties[0].value,
            Expression::EnumMembers {
                enum_type: level,
                members: vec![1]
            }
        );
        assert_eq!(
            properties[1].value,
            Expression::Constant {
                value: ConstantValue::Integer(7),
                text: "7"
            }
        );
        assert!(properties[2].property.is_none());
        assert!(matches!(values[2], Expression::Cast { .. }));
    }

    #[test]
    fn test_values_of_unresolved_terms() {
        let bundle = annotated(
            r#"<Annotation Term="Cap.Kind" EnumMember="Cap.Kinds/A"/>
               <Annotation Term="Cap.Info">
                 <Record Type="Cap.InfoType">
                   <PropertyValue Property="Kind" EnumMember="Cap.Kinds/A Cap.Kinds/B"/>
                   <PropertyValue Property="Level" EnumMember="Voc.Level/High"/>
                 </Record>
               </Annotation>
               <Annotation Term="Cap.Size">
                 <Cast Type="Cap.SizeType"><Int>3</Int></Cast>
               </Annotation>"#,
        );
        let graph = bundle.build().unwrap();
        let level = graph.find_enum_type("V.Level").unwrap();
        let values = values(&graph);
        assert_eq!(*values[0], Expression::UnresolvedEnumMember("Cap.Kinds/A"));
        let Expression::Record {
            rtype,
            type_name,
            properties,
            ..
        } = values[1]
        else {
            panic!("record expected: {:?}", values[1]);
        };
        assert!(rtype.is_none());
        assert_eq!(type_name.map(ToString::to_string).as_deref(), Some("Cap.InfoType"));
        assert_eq!(
            properties[0].value,
            Expression::UnresolvedEnumMember("Cap.Kinds/A Cap.Kinds/B")
        );
        assert_eq!(
            properties[1].value,
            Expression::EnumMembers {
                enum_type: level,
                members: vec![1]
            }
        );
        let Expression::Cast {
            ctype,
            type_name,
            value,
        } = values[2]
        else {
            panic!("cast expected: {:?}", values[2]);
        };
        assert!(ctype.is_none());
        assert_eq!(type_name.to_string(), "Cap.SizeType");
        assert_eq!(
            **value,
            Expression::Constant {
                value: ConstantValue::Integer(3),
                text: "3"
            }
        );
    }

    #[test]
    fn test_values_of_known_terms_are_strict() {
        let bundle = annotated(
            r#"<Annotation Term="Voc.Info"><Record Type="Voc.Missing"/></Annotation>"#,
        );
        assert_eq!(
            bundle.build().unwrap_err().kind(),
            ErrorKind::UnresolvedReference
        );
        let bundle = annotated(r#"<Annotation Term="Voc.Any" EnumMember="Cap.Kinds/A"/>"#);
        assert_eq!(
            bundle.build().unwrap_err().kind(),
            ErrorKind::MalformedExpression
        );
        let bundle = annotated(
            r#"<Annotation Term="Voc.Any"><Cast Type="Cap.SizeType"><Int>3</Int></Cast></Annotation>"#,
        );
        assert_eq!(
            bundle.build().unwrap_err().kind(),
            ErrorKind::UnresolvedReference
        );
    }
}
