// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Shape extraction: redacted structural skeletons of API payloads
//!
//! A skeleton keeps the navigable backbone of a response (`Components`,
//! `Places` and `Sections` chains) plus the identifying fields used to label
//! it, and blanks everything else to `null`. Volatile leaf values such as
//! temperatures, statuses, timestamps and serials never reach the cache, so
//! the skeleton stays small and stable across rebuilds.
//!
//! Once inside a `Components` block every non-identifying field is terminal,
//! even when it is itself an object or a list.

use serde_json::{Map, Value};

/// Fields kept verbatim at every level; also the label sources for list items.
pub const IDENTIFYING_KEYS: [&str; 4] = ["Name", "Label", "Id", "Key"];

/// Fields recursed into outside of a `Components` block.
pub const BACKBONE_KEYS: [&str; 3] = ["Components", "Places", "Sections"];

/// Field whose descendants are treated as opaque component payloads.
const COMPONENTS: &str = "Components";

/// Whether `key` is one of the identifying fields.
pub fn is_identifying(key: &str) -> bool {
    IDENTIFYING_KEYS.contains(&key)
}

/// Whether `key` is part of the navigable backbone.
pub fn is_backbone(key: &str) -> bool {
    BACKBONE_KEYS.contains(&key)
}

/// Skeleton of a whole category payload.
pub fn skeleton(value: &Value) -> Value {
    extract(value, &[])
}

/// Extract the skeleton of `value` found below the fields named in `ancestors`.
///
/// List membership does not add an ancestor segment; only object fields do.
pub fn extract(value: &Value, ancestors: &[&str]) -> Value {
    match value {
        Value::Object(fields) => {
            let opaque = ancestors.contains(&COMPONENTS);
            let mut shape = Map::with_capacity(fields.len());
            for (key, field) in fields {
                let redacted = if is_identifying(key) {
                    field.clone()
                } else if !opaque && is_backbone(key) {
                    let mut lineage = ancestors.to_vec();
                    lineage.push(key.as_str());
                    extract(field, &lineage)
                } else {
                    Value::Null
                };
                shape.insert(key.clone(), redacted);
            }
            Value::Object(shape)
        }
        Value::Array(items) => Value::Array(items.iter().map(|item| extract(item, ancestors)).collect()),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Value::Null,
    }
}
