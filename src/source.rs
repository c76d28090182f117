// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Collaborator seams between the navigation core and the transport
//!
//! The core only needs two capabilities: fetch the live payload of a named
//! category, and send panel commands. [`crate::api::SectorClient`] is the
//! production implementation; tests substitute an in-memory backend.

use log::error;
use serde_json::Value;

use crate::error::Result;

/// Named data categories backed by one endpoint each.
pub trait CategorySource {
    /// Every category name this source can serve, in menu order.
    fn categories(&self) -> Vec<String>;

    /// Fetch the live payload of `name`.
    fn fetch_category(&mut self, name: &str) -> Result<Value>;
}

/// Side-effecting panel commands.
pub trait PanelActions {
    fn lock(&mut self, lock_serial: &str) -> Result<()>;
    fn unlock(&mut self, lock_serial: &str, panel_code: &str) -> Result<()>;
    fn arm(&mut self) -> Result<()>;
    fn disarm(&mut self, panel_code: &str) -> Result<()>;
}

/// Fetch `name`, turning recoverable failures into `None`.
///
/// Fatal errors (a session that cannot be re-established) still propagate.
pub fn fetch_or_absent<S: CategorySource + ?Sized>(source: &mut S, name: &str) -> Result<Option<Value>> {
    match source.fetch_category(name) {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            error!("{}", e);
            Ok(None)
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory backend shared by the unit tests.

    use super::*;
    use crate::error::SectorError;
    use serde_json::Map;
    use std::collections::{HashMap, HashSet, VecDeque};

    #[derive(Default)]
    pub struct FakeBackend {
        pub data: Map<String, Value>,
        /// Payloads served once each, ahead of `data`.
        pub queued: HashMap<String, VecDeque<Value>>,
        pub failing: HashSet<String>,
        pub session_lost: bool,
        pub fetches: HashMap<String, usize>,
        pub actions: Vec<String>,
        pub reject_actions: bool,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, name: &str, data: Value) -> Self {
            self.data.insert(name.to_string(), data);
            self
        }

        pub fn failing(mut self, name: &str) -> Self {
            self.failing.insert(name.to_string());
            self
        }

        pub fn fetch_count(&self, name: &str) -> usize {
            self.fetches.get(name).copied().unwrap_or(0)
        }
    }

    impl CategorySource for FakeBackend {
        fn categories(&self) -> Vec<String> {
            let mut names: Vec<String> = self.data.keys().cloned().collect();
            for name in &self.failing {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
            names
        }

        fn fetch_category(&mut self, name: &str) -> Result<Value> {
            *self.fetches.entry(name.to_string()).or_insert(0) += 1;
            if self.session_lost {
                return Err(SectorError::Authentication("session expired".into()));
            }
            if self.failing.contains(name) {
                return Err(SectorError::CategoryFetch {
                    category: name.to_string(),
                    status: 500,
                });
            }
            if let Some(next) = self.queued.get_mut(name).and_then(VecDeque::pop_front) {
                return Ok(next);
            }
            self.data
                .get(name)
                .cloned()
                .ok_or_else(|| SectorError::UnknownCategory(name.to_string()))
        }
    }

    impl PanelActions for FakeBackend {
        fn lock(&mut self, lock_serial: &str) -> Result<()> {
            self.record(format!("lock {}", lock_serial))
        }

        fn unlock(&mut self, lock_serial: &str, panel_code: &str) -> Result<()> {
            self.record(format!("unlock {} {}", lock_serial, panel_code))
        }

        fn arm(&mut self) -> Result<()> {
            self.record("arm".to_string())
        }

        fn disarm(&mut self, panel_code: &str) -> Result<()> {
            self.record(format!("disarm {}", panel_code))
        }
    }

    impl FakeBackend {
        fn record(&mut self, action: String) -> Result<()> {
            if self.reject_actions {
                return Err(SectorError::Action(format!("{}: status 403", action)));
            }
            self.actions.push(action);
            Ok(())
        }
    }
}
