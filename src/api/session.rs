// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Bearer-token session state

use std::fmt;

/// Token issued by a successful login.
///
/// Empty until [`Session::establish`], emptied again by [`Session::clear`]
/// on logout or before re-authenticating.
#[derive(Clone, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn establish(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear(&mut self) {
        self.token = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
