// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Blocking HTTP transport for the Sector Alarm cloud API
//!
//! One request at a time, each bounded by the configured timeout. Network
//! and HTTP failures surface as [`SectorError`] values; the navigation core
//! turns the recoverable ones into "absent".
//!
//! A request answered with 401 triggers exactly one re-login and retry.

pub mod endpoints;
pub mod session;

pub use endpoints::{Action, Category, EndpointRequest, Method};
pub use session::Session;

use log::{debug, error, info, warn};
use reqwest::blocking::{Client, Response};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;

use crate::config::Config;
use crate::error::{Result, SectorError};
use crate::source::{CategorySource, PanelActions};

const API_VERSION_HEADER: &str = "API-Version";
const TOKEN_FIELD: &str = "AuthorizationToken";

/// Authenticated client bound to one panel.
pub struct SectorClient {
    http: Client,
    api_url: String,
    api_version: String,
    email: String,
    password: String,
    panel_id: String,
    session: Session,
}

impl SectorClient {
    /// Build the HTTP client. No request is sent until [`SectorClient::login`].
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_version: config.api_version.clone(),
            email: config.email.clone(),
            password: config.password.clone(),
            panel_id: config.panel_id.clone(),
            session: Session::new(),
        })
    }

    pub fn panel_id(&self) -> &str {
        &self.panel_id
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Authenticate and store the issued token.
    pub fn login(&mut self) -> Result<()> {
        self.session.clear();
        let request = endpoints::login_request(&self.api_url, &self.email, &self.password);
        let response = self
            .send(&request)
            .map_err(|e| SectorError::Authentication(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            error!("Login failed with status code {}.", status.as_u16());
            return Err(SectorError::Authentication(format!(
                "status {}: {}",
                status.as_u16(),
                text.trim()
            )));
        }

        let body: Value = response
            .json()
            .map_err(|e| SectorError::Authentication(format!("unreadable login response: {}", e)))?;
        let token = body
            .get(TOKEN_FIELD)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| SectorError::Authentication(format!("login response has no {}", TOKEN_FIELD)))?;
        self.session.establish(token);
        info!("Login successful.");
        Ok(())
    }

    pub fn logout(&mut self) {
        self.session.clear();
    }

    /// Fetch one category's live payload.
    pub fn fetch(&mut self, category: Category) -> Result<Value> {
        let request = category.request(&self.api_url, &self.panel_id);
        let response = self.execute(&request)?;
        let status = response.status();
        if !status.is_success() {
            return Err(SectorError::CategoryFetch {
                category: category.name().to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.json()?)
    }

    fn perform(&mut self, action: Action, request: EndpointRequest) -> Result<()> {
        let response = self.execute(&request)?;
        let status = response.status();
        if status.is_success() {
            info!("Panel {} accepted", action);
            return Ok(());
        }
        let text = response.text().unwrap_or_default();
        error!("Panel {} failed with status code {}", action, status.as_u16());
        Err(SectorError::Action(format!(
            "{} failed with status {}: {}",
            action,
            status.as_u16(),
            text.trim()
        )))
    }

    /// Send with the current session, re-authenticating once on 401.
    fn execute(&mut self, request: &EndpointRequest) -> Result<Response> {
        let response = self.send(request)?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        warn!("Session rejected by {}, logging in again", request.url);
        self.login()?;
        let retry = self.send(request)?;
        if retry.status() == StatusCode::UNAUTHORIZED {
            self.session.clear();
            return Err(SectorError::Authentication(
                "request rejected after re-login".to_string(),
            ));
        }
        Ok(retry)
    }

    fn send(&self, request: &EndpointRequest) -> Result<Response> {
        debug!("{} {}", request.method, request.url);
        let mut builder = match request.method {
            Method::Get => self.http.get(&request.url),
            Method::Post => self.http.post(&request.url),
        }
        .header(CONTENT_TYPE, "application/json")
        .header(API_VERSION_HEADER, self.api_version.as_str());

        if let Some(token) = self.session.token() {
            builder = builder.header(AUTHORIZATION, token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        Ok(builder.send()?)
    }
}

impl CategorySource for SectorClient {
    fn categories(&self) -> Vec<String> {
        Category::ALL.iter().map(|category| category.name().to_string()).collect()
    }

    fn fetch_category(&mut self, name: &str) -> Result<Value> {
        let category = Category::from_name(name).ok_or_else(|| SectorError::UnknownCategory(name.to_string()))?;
        self.fetch(category)
    }
}

impl PanelActions for SectorClient {
    fn lock(&mut self, lock_serial: &str) -> Result<()> {
        let request = endpoints::lock_request(&self.api_url, &self.panel_id, lock_serial);
        self.perform(Action::Lock, request)
    }

    fn unlock(&mut self, lock_serial: &str, panel_code: &str) -> Result<()> {
        let request = endpoints::unlock_request(&self.api_url, &self.panel_id, lock_serial, panel_code);
        self.perform(Action::Unlock, request)
    }

    fn arm(&mut self) -> Result<()> {
        let request = endpoints::arm_request(&self.api_url, &self.panel_id);
        self.perform(Action::Arm, request)
    }

    fn disarm(&mut self, panel_code: &str) -> Result<()> {
        let request = endpoints::disarm_request(&self.api_url, &self.panel_id, panel_code);
        self.perform(Action::Disarm, request)
    }
}
