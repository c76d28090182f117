// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Path resolution against live data
//!
//! The cache only ever holds redacted skeletons. Every concrete value shown
//! to the user comes from a fresh fetch of the path's root category, walked
//! with the same keys that were used to walk the skeleton. A path built from
//! an older shape may no longer fit; that is reported as "absent", never as
//! an error.

use log::{debug, warn};
use serde_json::Value;

use crate::error::Result;
use crate::path::{PathStep, TreePath};
use crate::source::{fetch_or_absent, CategorySource};

/// Look up one step below `node`.
///
/// Objects are indexed by field name, lists by a decimal index. Scalars and
/// null have no children.
pub fn follow<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    match node {
        Value::Object(fields) => fields.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|index| items.get(index)),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
    }
}

/// Walk `steps` down from `data`, stopping at the first miss.
pub fn replay<'a>(data: &'a Value, steps: &[PathStep]) -> Option<&'a Value> {
    steps.iter().try_fold(data, |node, step| follow(node, &step.key))
}

/// Fetch the live payload of the path's category and return the value at the
/// path's location.
///
/// `Ok(None)` covers both an unavailable category and a path that no longer
/// matches the live tree. Only an empty path or a fatal session error fail.
pub fn resolve<S: CategorySource + ?Sized>(path: &TreePath, source: &mut S) -> Result<Option<Value>> {
    let category = path.category()?;
    debug!("Resolving {}", path);
    let Some(data) = fetch_or_absent(source, category)? else {
        return Ok(None);
    };
    let found = replay(&data, path.descent()).cloned();
    if found.is_none() {
        warn!("No data at {}", path);
    }
    Ok(found)
}
