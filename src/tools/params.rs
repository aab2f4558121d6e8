// ABOUTME: Argument parsing and query building helpers shared by the tools
// ABOUTME: Covers typed argument decoding, pagination range checks and id filter merging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::constants::tools::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use crate::errors::{AppError, AppResult, ToolError};
use crate::providers::QueryParams;

/// Decode a tool's arguments object, treating `null` as `{}`
///
/// # Errors
///
/// Returns `InvalidInput` when the arguments do not match the tool's shape
pub fn parse_args<T: DeserializeOwned>(tool: &str, args: Value) -> AppResult<T> {
    let args = if args.is_null() {
        Value::Object(Map::new())
    } else {
        args
    };
    serde_json::from_value(args)
        .map_err(|e| AppError::invalid_input(format!("Invalid arguments for {tool}: {e}")))
}

/// Serde default for `page`
#[must_use]
pub fn default_page() -> i64 {
    i64::from(DEFAULT_PAGE)
}

/// Serde default for `page_size`
#[must_use]
pub fn default_page_size() -> i64 {
    i64::from(DEFAULT_PAGE_SIZE)
}

/// Reject an empty or whitespace-only required string
///
/// # Errors
///
/// Returns a missing parameter error
pub fn require_non_empty(tool: &str, name: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(ToolError::missing_parameter(tool, name).into());
    }
    Ok(())
}

/// Check `page >= 1` and `1 <= page_size <= max_page_size`
///
/// # Errors
///
/// Returns an invalid parameter error naming the offending argument
pub fn validate_pagination(tool: &str, page: i64, page_size: i64, max_page_size: u32) -> AppResult<()> {
    if page < 1 {
        return Err(ToolError::invalid_parameter(tool, "page", "must be >= 1").into());
    }
    if page_size < 1 || page_size > i64::from(max_page_size) {
        return Err(ToolError::invalid_parameter(
            tool,
            "page_size",
            format!("must be between 1 and {max_page_size}"),
        )
        .into());
    }
    Ok(())
}

/// Merge a single id into the `key` list of a filtering object.
///
/// With non-empty filters the id is appended to an existing list, or
/// replaces a non-list value. Without filters the id alone forms the filter.
/// Returns `None` when there is nothing to filter on.
#[must_use]
pub fn merge_id_filter(filters: Option<Map<String, Value>>, key: &str, id: Option<&str>) -> Option<Value> {
    let id = id.filter(|id| !id.is_empty());
    match filters.filter(|filters| !filters.is_empty()) {
        Some(mut filters) => {
            if let Some(id) = id {
                let entry = filters
                    .entry(key.to_owned())
                    .or_insert_with(|| Value::Array(Vec::new()));
                match entry {
                    Value::Array(ids) => ids.push(Value::from(id)),
                    other => *other = Value::Array(vec![Value::from(id)]),
                }
            }
            Some(Value::Object(filters))
        }
        None => id.map(|id| {
            let mut filters = Map::new();
            filters.insert(key.to_owned(), Value::Array(vec![Value::from(id)]));
            Value::Object(filters)
        }),
    }
}

/// Append a parameter
pub fn push(params: &mut QueryParams, name: &str, value: impl ToString) {
    params.push((name.to_owned(), value.to_string()));
}
