// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Navigation paths from a category root to a tree location

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SectorError};

/// Separator used when rendering a path for humans.
pub const DISPLAY_SEPARATOR: &str = " > ";

/// One hop in a navigation path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    /// Object field name, or a list index rendered as a decimal string.
    pub key: String,
    /// Human-facing label for the hop.
    pub display: String,
}

impl PathStep {
    pub fn new(key: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display: display.into(),
        }
    }

    /// Step whose label is the key itself.
    pub fn field(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            display: key.clone(),
            key,
        }
    }

    /// Step into list element `index`.
    pub fn index(index: usize, display: impl Into<String>) -> Self {
        Self::new(index.to_string(), display)
    }
}

/// Ordered steps; the first step's key names the category.
///
/// Paths are built incrementally and never mutated in place: [`TreePath::child`]
/// returns an extended copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreePath {
    steps: Vec<PathStep>,
}

impl TreePath {
    /// Path positioned at the root of `category`.
    pub fn root(category: impl Into<String>) -> Self {
        Self {
            steps: vec![PathStep::field(category)],
        }
    }

    pub fn from_steps(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }

    /// This path extended by `step`.
    pub fn child(&self, step: PathStep) -> Self {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend(self.steps.iter().cloned());
        steps.push(step);
        Self { steps }
    }

    /// Root category name.
    pub fn category(&self) -> Result<&str> {
        self.steps
            .first()
            .map(|step| step.key.as_str())
            .ok_or(SectorError::EmptyPath)
    }

    /// Steps below the category root.
    pub fn descent(&self) -> &[PathStep] {
        self.steps.get(1..).unwrap_or(&[])
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Labels joined with `" > "`.
    pub fn display(&self) -> String {
        self.steps
            .iter()
            .map(|step| step.display.as_str())
            .collect::<Vec<_>>()
            .join(DISPLAY_SEPARATOR)
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_labels() {
        let path = TreePath::root("Temperatures")
            .child(PathStep::field("Sections"))
            .child(PathStep::index(0, "Kitchen"));
        assert_eq!(path.display(), "Temperatures > Sections > Kitchen");
        assert_eq!(path.to_string(), path.display());
    }

    #[test]
    fn test_child_leaves_parent_untouched() {
        let parent = TreePath::root("Logs");
        let child = parent.child(PathStep::index(3, "2024-05-01 10:00:00"));
        assert_eq!(parent.len(), 1);
        assert_eq!(child.len(), 2);
        assert_eq!(child.steps()[1].key, "3");
    }

    #[test]
    fn test_category_and_descent() {
        let path = TreePath::root("Lock Status").child(PathStep::index(1, "Back door"));
        assert_eq!(path.category().unwrap(), "Lock Status");
        assert_eq!(path.descent(), &[PathStep::new("1", "Back door")]);
    }

    #[test]
    fn test_empty_path_has_no_category() {
        let path = TreePath::default();
        assert!(path.is_empty());
        assert!(matches!(path.category(), Err(SectorError::EmptyPath)));
        assert!(path.descent().is_empty());
        assert_eq!(path.display(), "");
    }
}
