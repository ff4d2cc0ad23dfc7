#![allow(dead_code)]
//! Tests for the `#[methods]` attribute

use std::fmt;

use deepcopier_core::bridge::Bridge;
use deepcopier_core::error::MethodError;
use deepcopier_core::reflect::{MethodDescriptor, Methods};
use deepcopier_core::types::{Scalar, Ty};
use deepcopier_core::{Context, Value};
use deepcopier_macros::methods;
use pretty_assertions::assert_eq;

#[derive(Debug)]
struct Overflow(u64);

impl fmt::Display for Overflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} does not fit", self.0)
    }
}

struct Invoice {
    lines: Vec<u64>,
    currency: String,
}

#[methods]
impl Invoice {
    pub fn total(&self) -> u64 {
        self.lines.iter().sum()
    }

    pub fn label(&self, context: &Context) -> String {
        match context.get_as::<String>("prefix") {
            Some(prefix) => format!("{}-{}", prefix, self.currency),
            None => self.currency.clone(),
        }
    }

    pub fn small_total(&self) -> Result<u8, Overflow> {
        let total = self.total();
        u8::try_from(total).map_err(|_| Overflow(total))
    }

    pub fn line_count(&self) -> Option<usize> {
        Some(self.lines.len())
    }

    pub fn r#type(&self) -> String {
        "invoice".to_string()
    }

    // Left out: borrowed result
    pub fn currency(&self) -> &str {
        &self.currency
    }

    // Left out: not public
    fn internal(&self) -> u64 {
        0
    }

    // Left out: extra argument
    pub fn line(&self, index: usize) -> u64 {
        self.lines[index]
    }

    // Left out: no receiver
    pub fn empty() -> Self {
        Invoice {
            lines: Vec::new(),
            currency: String::new(),
        }
    }

    #[deepcopier(skip)]
    pub fn audit_trail(&self) -> String {
        String::new()
    }
}

fn invoice() -> Invoice {
    Invoice {
        lines: vec![100, 50],
        currency: "USD".to_string(),
    }
}

#[test]
fn test_method_descriptors() {
    assert_eq!(
        Invoice::method_descriptors(),
        vec![
            MethodDescriptor::new("total", false, Ty::Scalar(Scalar::U64)),
            MethodDescriptor::new("label", true, Ty::Scalar(Scalar::Str)),
            MethodDescriptor::new("small_total", false, Ty::Scalar(Scalar::U8)),
            MethodDescriptor::new("line_count", false, Ty::optional(Ty::Scalar(Scalar::Usize))),
            MethodDescriptor::new("type", false, Ty::Scalar(Scalar::Str)),
        ]
    );
}

#[test]
fn test_call_plain_method() {
    let value = invoice().call_method("total", &Context::new()).unwrap().unwrap();
    assert_eq!(u64::from_value(value), Some(150));
}

#[test]
fn test_call_context_method() {
    let invoice = invoice();

    let value = invoice.call_method("label", &Context::new()).unwrap().unwrap();
    assert_eq!(value.as_str(), Some("USD"));

    let context = Context::new().with("prefix", "EU");
    let value = invoice.call_method("label", &context).unwrap().unwrap();
    assert_eq!(value.as_str(), Some("EU-USD"));
}

#[test]
fn test_call_fallible_method() {
    let value = invoice().call_method("small_total", &Context::new()).unwrap().unwrap();
    assert_eq!(u8::from_value(value), Some(150));

    let big = Invoice {
        lines: vec![200, 200],
        currency: "USD".to_string(),
    };
    assert_eq!(
        big.call_method("small_total", &Context::new()).unwrap().unwrap_err(),
        MethodError::new("small_total", "400 does not fit")
    );
}

#[test]
fn test_call_optional_result() {
    let value = invoice().call_method("line_count", &Context::new()).unwrap().unwrap();
    assert!(matches!(value, Value::Optional(Some(_))));
}

#[test]
fn test_raw_identifier_is_unescaped() {
    let value = invoice().call_method("type", &Context::new()).unwrap().unwrap();
    assert_eq!(value.as_str(), Some("invoice"));
}

#[test]
fn test_unregistered_methods_are_not_callable() {
    let invoice = invoice();
    for name in ["currency", "internal", "line", "empty", "audit_trail", "missing"] {
        assert!(
            invoice.call_method(name, &Context::new()).is_none(),
            "{} should not be callable",
            name
        );
    }
    // The skipped method itself is still an ordinary method.
    assert_eq!(invoice.audit_trail(), "");
}
