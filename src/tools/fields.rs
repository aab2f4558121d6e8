// ABOUTME: Field projection tables that flatten upstream records into tool output objects
// ABOUTME: Each field carries the default used when the upstream record omits it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Record Projection
//!
//! Upstream list endpoints return loosely typed records whose optional keys
//! vary by account type. Every tool maps each record through a static table
//! of [`FieldSpec`] entries so the output always carries the same keys.
//!
//! A key that is present upstream is copied as-is, including an explicit
//! `null`. Float fields are the exception: they are always coerced to a
//! number, accepting numeric strings and falling back to `0.0`.

use serde_json::{Map, Value};

/// Value used when a field is absent from the upstream record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldDefault {
    /// `null`
    Null,
    /// A fixed string
    Text(&'static str),
    /// Coerced float, `0.0` when absent or unparseable
    Float,
    /// `false`
    False,
    /// `[]`
    EmptyList,
    /// A fixed integer
    Int(i64),
}

/// One output field and its default
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Key in both the upstream record and the output object
    pub name: &'static str,
    /// Default applied when the key is absent
    pub default: FieldDefault,
}

/// Shorthand for table construction
#[must_use]
pub const fn field(name: &'static str, default: FieldDefault) -> FieldSpec {
    FieldSpec { name, default }
}

impl FieldDefault {
    fn value(self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Text(text) => Value::String(text.to_owned()),
            Self::Float => Value::from(0.0),
            Self::False => Value::Bool(false),
            Self::EmptyList => Value::Array(Vec::new()),
            Self::Int(n) => Value::from(n),
        }
    }
}

/// Coerce a number or numeric string to `f64`
#[must_use]
pub fn as_float(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Project one upstream record through a field table
#[must_use]
pub fn project(record: &Value, fields: &[FieldSpec]) -> Value {
    let mut out = Map::with_capacity(fields.len());
    for spec in fields {
        let source = record.get(spec.name);
        let value = match (spec.default, source) {
            (FieldDefault::Float, source) => Value::from(as_float(source)),
            (_, Some(value)) => value.clone(),
            (default, None) => default.value(),
        };
        out.insert(spec.name.to_owned(), value);
    }
    Value::Object(out)
}

/// Project every record under `data.list` of an upstream envelope
#[must_use]
pub fn project_list(envelope: &Value, fields: &[FieldSpec]) -> Vec<Value> {
    data_list(envelope)
        .iter()
        .map(|record| project(record, fields))
        .collect()
}

/// Records under `data.list`, empty when absent
#[must_use]
pub fn data_list(envelope: &Value) -> &[Value] {
    envelope
        .get("data")
        .and_then(|data| data.get("list"))
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const TABLE: &[FieldSpec] = &[
        field("id", FieldDefault::Null),
        field("name", FieldDefault::Text("Unknown")),
        field("budget", FieldDefault::Float),
        field("enabled", FieldDefault::False),
        field("ids", FieldDefault::EmptyList),
        field("pixel", FieldDefault::Int(0)),
    ];

    #[test]
    fn test_absent_fields_take_defaults() {
        let out = project(&json!({}), TABLE);
        assert_eq!(
            out,
            json!({
                "id": null,
                "name": "Unknown",
                "budget": 0.0,
                "enabled": false,
                "ids": [],
                "pixel": 0
            })
        );
    }

    #[test]
    fn test_present_fields_are_copied() {
        let out = project(
            &json!({"id": "7", "name": null, "budget": "12.5", "ids": ["a"], "extra": 1}),
            TABLE,
        );
        assert_eq!(out["id"], "7");
        assert_eq!(out["name"], Value::Null);
        assert_eq!(out["budget"], 12.5);
        assert_eq!(out["ids"], json!(["a"]));
        assert!(out.get("extra").is_none());
    }

    #[test]
    fn test_float_coercion() {
        assert!((as_float(Some(&json!(3))) - 3.0).abs() < f64::EPSILON);
        assert!((as_float(Some(&json!("bad")))).abs() < f64::EPSILON);
        assert!((as_float(Some(&Value::Null))).abs() < f64::EPSILON);
    }

    #[test]
    fn test_data_list_missing() {
        assert!(data_list(&json!({"code": 0})).is_empty());
        assert_eq!(project_list(&json!({"data": {"list": [{}]}}), TABLE).len(), 1);
    }
}
