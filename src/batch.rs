// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Non-interactive consumers: full dumps and lookups by component id

use log::info;
use serde_json::{Map, Value};

use crate::error::{Result, SectorError};
use crate::source::{fetch_or_absent, CategorySource};

/// Placeholder written over sensitive values.
pub const MASK: &str = "***MASKED***";

/// Fields hidden by [`mask_sensitive`].
pub const SENSITIVE_KEYS: [&str; 4] = ["SerialNo", "Id", "DeviceId", "SerialString"];

/// Live payload of every named category; failed fetches are skipped.
pub fn fetch_all<S: CategorySource + ?Sized>(source: &mut S, names: &[String]) -> Result<Map<String, Value>> {
    let mut all = Map::new();
    for name in names {
        if let Some(data) = fetch_or_absent(source, name)? {
            all.insert(name.clone(), data);
        }
    }
    Ok(all)
}

/// Objects below `data` whose `Id` equals `id`, ignoring ASCII case.
///
/// A matching object is not searched further.
pub fn find_items_by_id<'a>(data: &'a Value, id: &str) -> Vec<&'a Value> {
    let mut found = Vec::new();
    collect_by_id(data, id, &mut found);
    found
}

fn collect_by_id<'a>(node: &'a Value, id: &str, found: &mut Vec<&'a Value>) {
    match node {
        Value::Object(fields) => {
            let matches = fields.get("Id").is_some_and(|value| id_text(value).eq_ignore_ascii_case(id));
            if matches {
                found.push(node);
            } else {
                fields.values().for_each(|value| collect_by_id(value, id, found));
            }
        }
        Value::Array(items) => items.iter().for_each(|item| collect_by_id(item, id, found)),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

fn id_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Copy of `value` with every sensitive field replaced by [`MASK`].
pub fn mask_sensitive(value: &Value) -> Value {
    match value {
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(key, field)| {
                    let masked = if SENSITIVE_KEYS.contains(&key.as_str()) {
                        Value::String(MASK.to_string())
                    } else {
                        mask_sensitive(field)
                    };
                    (key.clone(), masked)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(mask_sensitive).collect()),
        other => other.clone(),
    }
}

/// One object found by [`lookup_ids`].
#[derive(Debug, Clone, PartialEq)]
pub struct IdMatch {
    pub category: String,
    pub item: Value,
}

/// Result of a lookup by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdLookup {
    /// Matches in request order, then category order.
    pub found: Vec<IdMatch>,
    /// Requested ids that matched nothing.
    pub missing: Vec<String>,
}

/// Fetch every category once and search each for the requested ids.
///
/// Blank ids are rejected before anything is fetched.
pub fn lookup_ids<S: CategorySource + ?Sized>(source: &mut S, names: &[String], ids: &[String]) -> Result<IdLookup> {
    if ids.is_empty() || ids.iter().any(|id| id.trim().is_empty()) {
        return Err(SectorError::InvalidInput(format!("blank id in {:?}", ids)));
    }
    let all = fetch_all(source, names)?;
    let mut lookup = IdLookup::default();
    for id in ids {
        let before = lookup.found.len();
        for (category, data) in &all {
            lookup.found.extend(find_items_by_id(data, id).into_iter().map(|item| IdMatch {
                category: category.clone(),
                item: item.clone(),
            }));
        }
        if lookup.found.len() == before {
            info!("ID '{}' not found", id);
            lookup.missing.push(id.clone());
        }
    }
    Ok(lookup)
}
