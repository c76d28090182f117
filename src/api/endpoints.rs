// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Endpoint table of the Sector Alarm cloud API
//!
//! Data categories and panel commands are kept in separate tables so that
//! walking every category (a cache build, a full dump) can never send a
//! command.

use serde_json::{json, Value};
use std::fmt;

/// HTTP method of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// A fully bound request: method, absolute URL and optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
}

impl EndpointRequest {
    fn get(url: String) -> Self {
        Self {
            method: Method::Get,
            url,
            body: None,
        }
    }

    fn post(url: String, body: Value) -> Self {
        Self {
            method: Method::Post,
            url,
            body: Some(body),
        }
    }
}

/// Readable data categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Humidity,
    DoorsAndWindows,
    LeakageDetectors,
    SmokeDetectors,
    Cameras,
    Persons,
    Temperatures,
    PanelStatus,
    SmartplugStatus,
    LockStatus,
    Logs,
}

impl Category {
    /// Every category, in menu order.
    pub const ALL: [Category; 11] = [
        Category::Humidity,
        Category::DoorsAndWindows,
        Category::LeakageDetectors,
        Category::SmokeDetectors,
        Category::Cameras,
        Category::Persons,
        Category::Temperatures,
        Category::PanelStatus,
        Category::SmartplugStatus,
        Category::LockStatus,
        Category::Logs,
    ];

    /// Display name, also the cache key.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Humidity => "Humidity",
            Category::DoorsAndWindows => "Doors and Windows",
            Category::LeakageDetectors => "Leakage Detectors",
            Category::SmokeDetectors => "Smoke Detectors",
            Category::Cameras => "Cameras",
            Category::Persons => "Persons",
            Category::Temperatures => "Temperatures",
            Category::PanelStatus => "Panel Status",
            Category::SmartplugStatus => "Smartplug Status",
            Category::LockStatus => "Lock Status",
            Category::Logs => "Logs",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.name() == name)
    }

    pub fn method(&self) -> Method {
        match self {
            Category::DoorsAndWindows
            | Category::LeakageDetectors
            | Category::SmokeDetectors
            | Category::Temperatures => Method::Post,
            _ => Method::Get,
        }
    }

    /// Bind this category to an API base URL and panel.
    pub fn request(&self, api_url: &str, panel_id: &str) -> EndpointRequest {
        let base = api_url.trim_end_matches('/');
        let url = match self {
            Category::Humidity => format!("{}/api/housecheck/panels/{}/humidity", base, panel_id),
            Category::DoorsAndWindows => format!("{}/api/v2/housecheck/doorsandwindows", base),
            Category::LeakageDetectors => format!("{}/api/v2/housecheck/leakagedetectors", base),
            Category::SmokeDetectors => format!("{}/api/v2/housecheck/smokedetectors", base),
            Category::Cameras => format!("{}/api/v2/housecheck/cameras/{}", base, panel_id),
            Category::Persons => format!("{}/api/persons/panels/{}", base, panel_id),
            Category::Temperatures => format!("{}/api/v2/housecheck/temperatures", base),
            Category::PanelStatus => format!("{}/api/panel/GetPanelStatus?panelId={}", base, panel_id),
            Category::SmartplugStatus => format!("{}/api/panel/GetSmartplugStatus?panelId={}", base, panel_id),
            Category::LockStatus => format!("{}/api/panel/GetLockStatus?panelId={}", base, panel_id),
            Category::Logs => format!("{}/api/panel/GetLogs?panelId={}", base, panel_id),
        };
        match self.method() {
            Method::Get => EndpointRequest::get(url),
            Method::Post => EndpointRequest::post(url, json!({ "panelId": panel_id })),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Panel commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Lock,
    Unlock,
    Arm,
    Disarm,
}

impl Action {
    fn path(&self) -> &'static str {
        match self {
            Action::Lock => "/api/Panel/Lock",
            Action::Unlock => "/api/Panel/Unlock",
            Action::Arm => "/api/Panel/Arm",
            Action::Disarm => "/api/Panel/Disarm",
        }
    }

    fn url(&self, api_url: &str) -> String {
        format!("{}{}", api_url.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Lock => write!(f, "lock"),
            Action::Unlock => write!(f, "unlock"),
            Action::Arm => write!(f, "arm"),
            Action::Disarm => write!(f, "disarm"),
        }
    }
}

pub fn login_request(api_url: &str, email: &str, password: &str) -> EndpointRequest {
    EndpointRequest::post(
        format!("{}/api/Login/Login", api_url.trim_end_matches('/')),
        json!({ "UserId": email, "Password": password }),
    )
}

/// Locking needs no panel code.
pub fn lock_request(api_url: &str, panel_id: &str, lock_serial: &str) -> EndpointRequest {
    EndpointRequest::post(
        Action::Lock.url(api_url),
        json!({
            "LockSerial": lock_serial,
            "PanelCode": "",
            "PanelId": panel_id,
            "Platform": "web",
        }),
    )
}

pub fn unlock_request(api_url: &str, panel_id: &str, lock_serial: &str, panel_code: &str) -> EndpointRequest {
    EndpointRequest::post(
        Action::Unlock.url(api_url),
        json!({
            "LockSerial": lock_serial,
            "PanelCode": panel_code,
            "PanelId": panel_id,
            "Platform": "web",
        }),
    )
}

pub fn arm_request(api_url: &str, panel_id: &str) -> EndpointRequest {
    EndpointRequest::post(Action::Arm.url(api_url), json!({ "PanelId": panel_id }))
}

pub fn disarm_request(api_url: &str, panel_id: &str, panel_code: &str) -> EndpointRequest {
    EndpointRequest::post(
        Action::Disarm.url(api_url),
        json!({ "PanelCode": panel_code, "PanelId": panel_id }),
    )
}
