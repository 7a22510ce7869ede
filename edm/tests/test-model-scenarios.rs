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

use odata_edm::builder::ErrorKind;
use odata_edm::builder::SchemaBundle;
use odata_edm::edmx::attribute_values::Scale;
use odata_edm::edmx::Edmx;
use odata_edm::model::AnnotationTarget;
use odata_edm::model::Expression;
use odata_edm::model::Multiplicity;
use odata_edm::model::TermRef;

fn edmx(references: &str, schemas: &str) -> Edmx {
    Edmx::parse(&format!(
        r#"<edmx:Edmx Version="4.0">{references}<edmx:DataServices>{schemas}</edmx:DataServices></edmx:Edmx>"#
    ))
    .unwrap()
}

fn bundle(schemas: &str) -> SchemaBundle {
    SchemaBundle {
        edmx_docs: vec![edmx("", schemas)],
    }
}

const HR: &str = r#"<Schema Namespace="Org.Hr" Alias="Hr">
    <EntityType Name="Employee" BaseType="Hr.Person">
      <Property Name="Salary" Type="Edm.Decimal" Precision="10" Scale="2"/>
    </EntityType>
    <EntityType Name="Manager" BaseType="Hr.Employee">
      <Key><PropertyRef Name="Badge"/></Key>
      <Property Name="Badge" Type="Edm.String" Nullable="false"/>
    </EntityType>
    <EntityType Name="Person">
      <Key><PropertyRef Name="ID"/></Key>
      <Property Name="ID" Type="Edm.Int32" Nullable="false"/>
    </EntityType>
  </Schema>"#;

#[test]
fn test_person_employee() {
    let bundle = bundle(HR);
    let graph = bundle.build().unwrap();
    let person = graph.find_entity_type("Org.Hr.Person").unwrap();
    let employee = graph.find_entity_type("Org.Hr.Employee").unwrap();
    assert_eq!(graph.structured_type(employee).base_type, Some(person));
    assert!(graph.structured_type(employee).declared_key.is_none());

    let key = graph.key(employee).unwrap();
    assert_eq!(key.len(), 1);
    assert_eq!(key[0].path, "ID");
    assert_eq!(key[0].property.owner, person);

    let salary = graph.find_property(employee, "Salary").unwrap();
    let facets = graph.property(salary).type_ref.facets().unwrap();
    assert_eq!(facets.precision, Some(10));
    assert_eq!(facets.scale, Some(Scale::Value(2)));
    assert!(graph.find_property(employee, "ID").is_some());
}

#[test]
fn test_key_override() {
    let bundle = bundle(HR);
    let graph = bundle.build().unwrap();
    let manager = graph.find_entity_type("Org.Hr.Manager").unwrap();
    let key = graph.key(manager).unwrap();
    assert_eq!(key.len(), 1);
    assert_eq!(key[0].path, "Badge");
    assert_eq!(key[0].property.owner, manager);
    let employee = graph.find_entity_type("Org.Hr.Employee").unwrap();
    assert!(graph.is_derived_from(manager, employee));
    assert_eq!(graph.base_types(manager).count(), 2);
}

const SHOP: &str = r#"<Schema Namespace="Org.Shop" Alias="Shop">
    <EntityType Name="Customer">
      <Key><PropertyRef Name="Id"/><PropertyRef Name="Region"/></Key>
      <Property Name="Id" Type="Edm.Int32" Nullable="false"/>
      <Property Name="Region" Type="Edm.String" Nullable="false"/>
      <NavigationProperty Name="Orders" Type="Collection(Shop.Order)" Partner="Customer"/>
      <NavigationProperty Name="Favorite" Type="Shop.Order" Nullable="true"/>
    </EntityType>
    <EntityType Name="Order">
      <Key><PropertyRef Name="No"/></Key>
      <Property Name="No" Type="Edm.Int32" Nullable="false"/>
      <Property Name="CustomerId" Type="Edm.Int32"/>
      <Property Name="CustomerRegion" Type="Edm.String"/>
      <NavigationProperty Name="Customer" Type="Shop.Customer" Nullable="false" Partner="Orders">
        <ReferentialConstraint Property="CustomerId" ReferencedProperty="Id"/>
        <ReferentialConstraint Property="CustomerRegion" ReferencedProperty="Region"/>
      </NavigationProperty>
      <NavigationProperty Name="Seller" Type="Shop.Customer"/>
    </EntityType>
  </Schema>"#;

#[test]
fn test_multiplicity() {
    let bundle = bundle(SHOP);
    let graph = bundle.build().unwrap();
    let customer = graph.find_entity_type("Org.Shop.Customer").unwrap();
    let order = graph.find_entity_type("Org.Shop.Order").unwrap();
    let multiplicity = |owner, name| {
        let nav = graph.find_navigation_property(owner, name).unwrap();
        graph.navigation_property(nav).multiplicity
    };
    assert_eq!(multiplicity(customer, "Orders"), Multiplicity::Many);
    assert_eq!(multiplicity(customer, "Favorite"), Multiplicity::ZeroOrOne);
    assert_eq!(multiplicity(order, "Customer"), Multiplicity::One);
    assert_eq!(multiplicity(order, "Seller"), Multiplicity::One);
}

#[test]
fn test_referential_constraints() {
    let bundle = bundle(SHOP);
    let graph = bundle.build().unwrap();
    let customer = graph.find_entity_type("Org.Shop.Customer").unwrap();
    let order = graph.find_entity_type("Org.Shop.Order").unwrap();
    let nav = graph.find_navigation_property(order, "Customer").unwrap();
    let nav = graph.navigation_property(nav);
    assert_eq!(nav.target, customer);
    let pairs = nav
        .referential_constraints
        .iter()
        .map(|c| {
            assert_eq!(c.dependent.owner, order);
            assert_eq!(c.principal.owner, customer);
            (
                graph.property(c.dependent).name.inner().as_str(),
                graph.property(c.principal).name.inner().as_str(),
            )
        })
        .collect::<Vec<_>>();
    assert_eq!(
        pairs,
        vec![("CustomerId", "Id"), ("CustomerRegion", "Region")]
    );
    let partner = nav.partner.unwrap();
    assert_eq!(partner.owner, customer);
    assert_eq!(graph.navigation_property(partner).name.inner(), "Orders");
}

#[test]
fn test_flags_from_referenced_vocabulary() {
    let main = edmx(
        r#"<edmx:Reference Uri="voc.xml"><edmx:Include Namespace="Org.Voc" Alias="Voc"/></edmx:Reference>"#,
        r#"<Schema Namespace="Org.App">
             <ComplexType Name="Pixel">
               <Annotation Term="Voc.Colors" String="5"/>
               <Annotation Term="Voc.Label" String="5"/>
             </ComplexType>
           </Schema>"#,
    );
    let vocabulary = edmx(
        "",
        r#"<Schema Namespace="Org.Voc">
             <EnumType Name="Color" IsFlags="true">
               <Member Name="Red" Value="1"/>
               <Member Name="Green" Value="2"/>
               <Member Name="Blue" Value="4"/>
             </EnumType>
             <Term Name="Colors" Type="Org.Voc.Color"/>
             <Term Name="Label" Type="Edm.String"/>
           </Schema>"#,
    );
    let bundle = SchemaBundle {
        edmx_docs: vec![main, vocabulary],
    };
    let graph = bundle.build().unwrap();
    let pixel = graph.find_complex_type("Org.App.Pixel").unwrap();
    let color = graph.find_enum_type("Org.Voc.Color").unwrap();
    let values = graph
        .annotations_for(AnnotationTarget::StructuredType(pixel))
        .map(|a| &a.value)
        .collect::<Vec<_>>();
    assert_eq!(
        *values[0],
        Expression::EnumMembers {
            enum_type: color,
            members: vec![0, 2]
        }
    );
    let names = match values[0] {
        Expression::EnumMembers { members, .. } => members
            .iter()
            .map(|m| graph.enum_type(color).members[*m].name.inner().as_str())
            .collect::<Vec<_>>(),
        _ => Vec::new(),
    };
    assert_eq!(names, vec!["Red", "Blue"]);
    assert_eq!(values[1].as_str(), Some("5"));
}

const CRM: &str = r#"<Schema Namespace="Org.Crm" Alias="Crm">
    <EntityType Name="Contact">
      <Key><PropertyRef Name="Id"/></Key>
      <Property Name="Id" Type="Edm.Int32" Nullable="false"/>
      <NavigationProperty Name="ResidentContact" Type="Crm.Contact"/>
    </EntityType>
    <ComplexType Name="Address">
      <Property Name="Street" Type="Edm.String"/>
      <NavigationProperty Name="ResidentContact" Type="Crm.Contact"/>
    </ComplexType>
    <EntityType Name="Customer">
      <Key><PropertyRef Name="Id"/></Key>
      <Property Name="Id" Type="Edm.Int32" Nullable="false"/>
      <Property Name="HomeAddress" Type="Crm.Address"/>
      <Property Name="OtherAddresses" Type="Collection(Crm.Address)"/>
      <NavigationProperty Name="ResidentContact" Type="Crm.Contact"/>
    </EntityType>
    <EntityContainer Name="Service">
      <EntitySet Name="Customers" EntityType="Crm.Customer">
        <NavigationPropertyBinding Path="HomeAddress/ResidentContact" Target="Contacts"/>
        <NavigationPropertyBinding Path="OtherAddresses/ResidentContact" Target="Org.Crm.Service/Contacts"/>
      </EntitySet>
      <EntitySet Name="Contacts" EntityType="Crm.Contact"/>
    </EntityContainer>
  </Schema>"#;

#[test]
fn test_binding_through_complex_property() {
    let bundle = bundle(CRM);
    let graph = bundle.build().unwrap();
    let address = graph.find_complex_type("Org.Crm.Address").unwrap();
    let service = graph.find_entity_container("Org.Crm.Service").unwrap();
    let container = graph.container(service);
    let customers = &container.navigation_sources[0];
    let binding = &customers.bindings[0];
    assert_eq!(binding.navigation_property.owner, address);
    let target = graph.navigation_source(binding.target);
    assert_eq!(target.name.inner(), "Contacts");
}

#[test]
fn test_binding_through_collection_of_complex() {
    let bundle = bundle(CRM);
    let graph = bundle.build().unwrap();
    let address = graph.find_complex_type("Org.Crm.Address").unwrap();
    let service = graph.find_entity_container("Org.Crm.Service").unwrap();
    let container = graph.container(service);
    let binding = &container.navigation_sources[0].bindings[1];
    assert_eq!(binding.path, "OtherAddresses/ResidentContact");
    assert_eq!(binding.navigation_property.owner, address);
    assert_eq!(binding.target, container.navigation_sources[0].bindings[0].target);
}

#[test]
fn test_unresolved_term_is_preserved() {
    let bundle = bundle(
        r#"<Schema Namespace="Org.App">
             <EntityType Name="Thing">
               <Key><PropertyRef Name="Id"/></Key>
               <Property Name="Id" Type="Edm.Int32" Nullable="false">
                 <Annotation Term="Foo.Bar" String="x"/>
               </Property>
               <Annotation Term="Capabilities.SearchRestrictions">
                 <Record Type="Capabilities.SearchRestrictionsType">
                   <PropertyValue Property="UnsupportedExpressions"
                     EnumMember="Capabilities.SearchExpressions/AND Capabilities.SearchExpressions/OR"/>
                 </Record>
               </Annotation>
             </EntityType>
           </Schema>"#,
    );
    let graph = bundle.build().unwrap();
    let thing = graph.find_entity_type("Org.App.Thing").unwrap();
    let id = graph.find_property(thing, "Id").unwrap();
    let annotations = graph
        .annotations_for(AnnotationTarget::Property(id))
        .collect::<Vec<_>>();
    assert_eq!(annotations.len(), 1);
    let TermRef::Unresolved(term) = annotations[0].term else {
        panic!("unresolved term expected");
    };
    assert_eq!(term.to_string(), "Foo.Bar");
    assert_eq!(annotations[0].value.as_str(), Some("x"));

    let restrictions = graph
        .annotations_for(AnnotationTarget::StructuredType(thing))
        .collect::<Vec<_>>();
    assert_eq!(restrictions.len(), 1);
    let Expression::Record {
        rtype, properties, ..
    } = &restrictions[0].value
    else {
        panic!("record expected: {:?}", restrictions[0].value);
    };
    assert!(rtype.is_none());
    assert_eq!(
        properties[0].value,
        Expression::UnresolvedEnumMember(
            "Capabilities.SearchExpressions/AND Capabilities.SearchExpressions/OR"
        )
    );
}

#[test]
fn test_failed_build_returns_no_model() {
    let bundle = bundle(
        r#"<Schema Namespace="Org.App">
             <EntityType Name="A" BaseType="Org.App.B"/>
             <EntityType Name="B" BaseType="Org.App.A"/>
           </Schema>"#,
    );
    let err = bundle.build().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnresolvedReference);
    assert!(err.to_string().contains("cyclic base type chain"));
}
