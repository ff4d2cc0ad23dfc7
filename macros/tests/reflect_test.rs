#![allow(dead_code)]
//! Tests for `#[derive(Reflect)]`

use deepcopier_core::bridge::Bridge;
use deepcopier_core::error::CoercionError;
use deepcopier_core::reflect::Reflect;
use deepcopier_core::types::{Scalar, Ty};
use deepcopier_core::values::Value;
use deepcopier_core::{Context, NullString};
use deepcopier_macros::{Reflect, methods};
use pretty_assertions::assert_eq;

// ============================================================================
// Fixtures
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct Address {
    city: String,
    zip: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct Customer {
    #[deepcopier("field:Name; context")]
    name: String,
    #[deepcopier(embed)]
    address: Address,
    #[deepcopier("skip")]
    r#type: Option<i64>,
    #[deepcopier(embed, "force")]
    billing: Address,
    email: NullString,
    scores: Vec<f64>,
}

fn customer() -> Customer {
    Customer {
        name: "Chuck".to_string(),
        address: Address {
            city: "Ryan".to_string(),
            zip: 73565,
        },
        r#type: Some(1),
        billing: Address::default(),
        email: NullString::null(),
        scores: vec![9.5],
    }
}

// ============================================================================
// Descriptor table
// ============================================================================

#[test]
fn test_type_name() {
    assert_eq!(customer().type_name(), "Customer");
}

#[test]
fn test_descriptors_in_declaration_order() {
    let names: Vec<_> = customer().fields().iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["name", "address", "type", "billing", "email", "scores"]);
}

#[test]
fn test_descriptor_types() {
    let fields = customer().fields();
    assert_eq!(fields[0].ty, Ty::Scalar(Scalar::Str));
    assert_eq!(fields[1].ty, Ty::record::<Address>("Address"));
    assert_eq!(fields[2].ty, Ty::optional(Ty::Scalar(Scalar::I64)));
    assert_eq!(fields[4].ty, Ty::Nullable(Scalar::Str));
    assert_eq!(fields[5].ty, Ty::seq(Ty::Scalar(Scalar::F64)));
}

#[test]
fn test_descriptor_tags() {
    let fields = customer().fields();

    assert_eq!(fields[0].tag.field(), Some("Name"));
    assert!(fields[0].tag.has_context());
    assert!(!fields[0].embedded);

    assert!(fields[1].embedded);
    assert!(fields[1].tag.is_empty());

    assert!(fields[2].tag.is_skip());

    assert!(fields[3].embedded);
    assert!(fields[3].tag.is_force());
}

// ============================================================================
// Accessors
// ============================================================================

#[test]
fn test_field_getter() {
    let customer = customer();
    assert_eq!(customer.field("name").and_then(|v| String::from_value(v)), Some("Chuck".to_string()));
    assert_eq!(customer.field("type").and_then(|v| Option::<i64>::from_value(v)), Some(Some(1)));
    assert!(customer.field("missing").is_none());
}

#[test]
fn test_field_setter() {
    let mut customer = customer();
    customer.set_field("name", Value::from("Carlos")).unwrap();
    customer.set_field("scores", vec![1.0f64, 2.0].into_value()).unwrap();
    assert_eq!(customer.name, "Carlos");
    assert_eq!(customer.scores, vec![1.0, 2.0]);
}

#[test]
fn test_setter_rejects_wrong_shape() {
    let mut customer = customer();
    assert_eq!(
        customer.set_field("name", Value::I32(1)),
        Err(CoercionError::Rejected {
            field: "name".to_string(),
            found: Ty::Scalar(Scalar::I32),
        })
    );
    assert_eq!(customer.name, "Chuck");
}

#[test]
fn test_setter_unknown_field() {
    let mut customer = customer();
    assert_eq!(
        customer.set_field("nope", Value::I32(1)),
        Err(CoercionError::UnknownField {
            field: "nope".to_string(),
        })
    );
}

#[test]
fn test_embedded_access() {
    let mut customer = customer();
    let address = customer.embedded("address").unwrap();
    assert_eq!(address.type_name(), "Address");
    assert_eq!(address.field("zip").and_then(|v| u32::from_value(v)), Some(73565));

    customer
        .embedded_mut("billing")
        .unwrap()
        .set_field("city", Value::from("Dallas"))
        .unwrap();
    assert_eq!(customer.billing.city, "Dallas");

    assert!(customer.embedded("name").is_none());
}

// ============================================================================
// Records as values
// ============================================================================

#[test]
fn test_record_bridge() {
    assert_eq!(Address::ty(), Ty::record::<Address>("Address"));

    let value = customer().address.into_value();
    assert_eq!(value.ty(), Address::ty());
    assert_eq!(
        Address::from_value(value),
        Some(Address {
            city: "Ryan".to_string(),
            zip: 73565,
        })
    );
    assert_eq!(Address::from_value(Value::from("Ryan")), None);
}

#[test]
fn test_nested_record_field() {
    let customer = customer();
    let value = customer.field("address").unwrap();
    assert_eq!(Address::from_value(value), Some(customer.address.clone()));
}

// ============================================================================
// Method hooks
// ============================================================================

#[test]
fn test_no_methods_by_default() {
    let customer = customer();
    assert!(customer.methods().is_empty());
    assert!(customer.call_method("name", &Context::new()).is_none());
}

#[derive(Debug, Clone, Default, Reflect)]
#[deepcopier(methods)]
struct Account {
    balance: i64,
}

#[methods]
impl Account {
    pub fn overdrawn(&self) -> bool {
        self.balance < 0
    }
}

#[test]
fn test_methods_flag_links_method_table() {
    let account = Account { balance: -5 };
    let names: Vec<_> = Reflect::methods(&account).iter().map(|m| m.name).collect();
    assert_eq!(names, vec!["overdrawn"]);

    let value = Reflect::call_method(&account, "overdrawn", &Context::new())
        .unwrap()
        .unwrap();
    assert_eq!(value.as_bool(), Some(true));
}
