// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! # Sector Console
//!
//! Client for the Sector Alarm cloud API that lets a user browse their
//! installation as a tree without knowing the response schemas up front.
//!
//! Each data category's response is reduced to a *skeleton* ([`shape`]),
//! keeping only the structure and the fields that tell siblings apart. The
//! skeletons are persisted by the [`cache`] so the menus can be built without
//! touching the network. Walking a skeleton produces a [`path::TreePath`];
//! when the walk reaches a leaf the [`resolver`] fetches the category again
//! and replays the path over live data.
//!
//! ```no_run
//! use sectorlib::{Config, Navigator, SectorClient, ShapeCache, TreePath};
//! use sectorlib::navigator::NavigationOutcome;
//! use sectorlib::resolver::resolve;
//!
//! # fn main() -> sectorlib::Result<()> {
//! let config = Config::load(std::path::Path::new("config.toml"))?;
//! config.validate()?;
//! let mut client = SectorClient::new(&config)?;
//! client.login()?;
//!
//! let cache = ShapeCache::load(&config.cache_path, &mut client)?;
//! if let Some(shape) = cache.get("Temperatures") {
//!     let settled = Navigator::new(config.display).settle(shape, TreePath::root("Temperatures"));
//!     if let NavigationOutcome::Resolve(path) = settled.outcome {
//!         println!("{:?}", resolve(&path, &mut client)?);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod batch;
pub mod cache;
pub mod config;
pub mod console;
pub mod error;
pub mod navigator;
pub mod path;
pub mod resolver;
pub mod shape;
pub mod source;

pub use api::SectorClient;
pub use cache::{CacheStatistics, ShapeCache};
pub use config::Config;
pub use console::{Console, ConsoleSettings};
pub use error::{Result, SectorError};
pub use navigator::{DisplayPolicy, NavigationOutcome, Navigator};
pub use path::{PathStep, TreePath};
pub use source::{CategorySource, PanelActions};
