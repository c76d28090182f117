// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Tree walker deciding what to show at each level
//!
//! Given a node (skeleton or live data) and the path that led to it, the
//! navigator decides whether to hop down automatically, ask the user to pick
//! a child, stop and resolve live values, or report an empty list.
//!
//! # Rules
//!
//! 1. An object holding `Places`, `Components` or `Sections` (in that
//!    priority) is entered through that field without a menu.
//! 2. An object with no object/list values is a leaf record: resolve it.
//! 3. Any other object offers its fields as a menu.
//! 4. An empty list is empty.
//! 5. A one-element list is entered without a menu.
//! 6. A longer list offers its elements as a menu.
//! 7. Scalars and null resolve.
//!
//! Front ends always add "fetch this level" and "back" to a menu; those are
//! not part of the outcome.

use chrono::NaiveDateTime;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::path::{PathStep, TreePath};
use crate::shape::IDENTIFYING_KEYS;

/// Fields entered automatically, highest priority first.
pub const AUTO_DESCEND_KEYS: [&str; 3] = ["Places", "Components", "Sections"];

/// Label used for objects with no identifying field.
pub const FALLBACK_LABEL: &str = "Item";

const TIME_KEY: &str = "Time";
const TIME_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const TIME_LABEL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Optional presentation rules layered over the canonical walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayPolicy {
    /// List entries newest first by `Time`, labelled by their timestamp.
    pub chronological: bool,
}

/// What a menu is choosing between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    /// Object fields.
    Fields,
    /// List elements.
    Items,
}

/// One selectable child.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuChoice<'a> {
    pub label: String,
    /// Step appended to the current path when chosen.
    pub step: PathStep,
    /// The child node the step leads to.
    pub node: &'a Value,
}

/// Result of one navigation decision.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationOutcome<'a> {
    /// Hop into `node` without asking.
    Descend { node: &'a Value, path: TreePath },
    /// The user has to pick.
    Menu {
        kind: MenuKind,
        choices: Vec<MenuChoice<'a>>,
    },
    /// Fetch live data at this path.
    Resolve(TreePath),
    /// Nothing to show.
    Empty,
}

/// Position reached after all automatic hops.
#[derive(Debug, Clone, PartialEq)]
pub struct Settled<'a> {
    pub node: &'a Value,
    pub path: TreePath,
    /// Never [`NavigationOutcome::Descend`].
    pub outcome: NavigationOutcome<'a>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Navigator {
    policy: DisplayPolicy,
}

impl Navigator {
    pub fn new(policy: DisplayPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DisplayPolicy {
        self.policy
    }

    /// Decide the next move at `node`, reached through `path`.
    pub fn navigate<'a>(&self, node: &'a Value, path: &TreePath) -> NavigationOutcome<'a> {
        match node {
            Value::Object(fields) => {
                if let Some((key, child)) = AUTO_DESCEND_KEYS
                    .iter()
                    .find_map(|key| fields.get(*key).map(|child| (*key, child)))
                {
                    return NavigationOutcome::Descend {
                        node: child,
                        path: path.child(PathStep::field(key)),
                    };
                }
                if fields.values().all(|value| !value.is_object() && !value.is_array()) {
                    return NavigationOutcome::Resolve(path.clone());
                }
                let choices = fields
                    .iter()
                    .map(|(key, child)| MenuChoice {
                        label: key.clone(),
                        step: PathStep::field(key.as_str()),
                        node: child,
                    })
                    .collect();
                NavigationOutcome::Menu {
                    kind: MenuKind::Fields,
                    choices,
                }
            }
            Value::Array(items) => match items.as_slice() {
                [] => NavigationOutcome::Empty,
                [only] => NavigationOutcome::Descend {
                    node: only,
                    path: path.child(PathStep::index(0, self.identifier(only))),
                },
                _ => {
                    let mut choices: Vec<MenuChoice<'a>> = items
                        .iter()
                        .enumerate()
                        .map(|(index, item)| {
                            let label = self.identifier(item);
                            MenuChoice {
                                step: PathStep::index(index, label.clone()),
                                label,
                                node: item,
                            }
                        })
                        .collect();
                    if self.policy.chronological {
                        // Stable: entries with equal timestamps keep API order.
                        choices.sort_by(|a, b| time_key(b.node).cmp(time_key(a.node)));
                    }
                    NavigationOutcome::Menu {
                        kind: MenuKind::Items,
                        choices,
                    }
                }
            },
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                NavigationOutcome::Resolve(path.clone())
            }
        }
    }

    /// Apply automatic hops until a decision point is reached.
    pub fn settle<'a>(&self, node: &'a Value, path: TreePath) -> Settled<'a> {
        let mut node = node;
        let mut path = path;
        loop {
            match self.navigate(node, &path) {
                NavigationOutcome::Descend { node: child, path: next } => {
                    debug!("Auto-descending to {}", next);
                    node = child;
                    path = next;
                }
                outcome => return Settled { node, path, outcome },
            }
        }
    }

    /// Human label for a list element under the active policy.
    pub fn identifier(&self, element: &Value) -> String {
        if self.policy.chronological {
            if let Some(label) = time_label(element) {
                return label;
            }
        }
        identifier(element)
    }
}

/// Canonical label for a list element.
///
/// Objects use the first truthy identifying field (`Name`, `Label`, `Id`,
/// `Key`), falling back to `"Item"`; anything else uses its string form.
pub fn identifier(element: &Value) -> String {
    match element {
        Value::Object(fields) => IDENTIFYING_KEYS
            .iter()
            .filter_map(|key| fields.get(*key))
            .find(|value| is_truthy(value))
            .map(scalar_label)
            .unwrap_or_else(|| FALLBACK_LABEL.to_string()),
        other => scalar_label(other),
    }
}

/// Empty strings, zero, false, null and empty containers are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn scalar_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn time_key(element: &Value) -> &str {
    element.get(TIME_KEY).and_then(Value::as_str).unwrap_or("")
}

fn time_label(element: &Value) -> Option<String> {
    let time = element.get(TIME_KEY).filter(|value| is_truthy(value))?;
    let Some(raw) = time.as_str() else {
        return Some(scalar_label(time));
    };
    Some(
        NaiveDateTime::parse_from_str(raw, TIME_INPUT_FORMAT)
            .map(|stamp| stamp.format(TIME_LABEL_FORMAT).to_string())
            .unwrap_or_else(|_| raw.to_string()),
    )
}
