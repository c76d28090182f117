// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Error types for Sector Console

use std::io;
use thiserror::Error;

/// Result type alias for Sector Console operations
pub type Result<T> = std::result::Result<T, SectorError>;

/// Main error type for Sector Console
#[derive(Error, Debug)]
pub enum SectorError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport-level failure (connect, timeout, body decode)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Login rejected or session could not be re-established
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A category endpoint answered with a non-success status
    #[error("Failed to retrieve data from {category}: status {status}")]
    CategoryFetch { category: String, status: u16 },

    /// Category name not present in the endpoint table
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Lock/unlock/arm/disarm command rejected
    #[error("Action failed: {0}")]
    Action(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed user-supplied value, such as a blank id
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A navigation path without a root category step
    #[error("Navigation path is empty")]
    EmptyPath,
}

impl SectorError {
    /// Errors that end the session instead of returning to the menu.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SectorError::Authentication(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_category_fetch() {
        let err = SectorError::CategoryFetch {
            category: "Lock Status".to_string(),
            status: 503,
        };
        assert_eq!(
            err.to_string(),
            "Failed to retrieve data from Lock Status: status 503"
        );
    }

    #[test]
    fn test_display_authentication() {
        let err = SectorError::Authentication("status 401".to_string());
        assert_eq!(err.to_string(), "Authentication failed: status 401");
    }

    #[test]
    fn test_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file missing");
        let err: SectorError = io_err.into();
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn test_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ invalid json }}}").unwrap_err();
        let err: SectorError = json_err.into();
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn test_only_authentication_is_fatal() {
        assert!(SectorError::Authentication("expired".into()).is_fatal());
        assert!(!SectorError::EmptyPath.is_fatal());
        assert!(!SectorError::UnknownCategory("Garage".into()).is_fatal());
        assert!(!SectorError::CategoryFetch {
            category: "Logs".into(),
            status: 500
        }
        .is_fatal());
    }
}
