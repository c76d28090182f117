// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Shape cache: category name to skeleton, persisted as one JSON snapshot
//!
//! The snapshot is written to a sibling staging file and renamed into place,
//! so readers never see a half-written cache. A rebuild assembles the whole
//! new mapping before it replaces the old one.

use log::{error, info, warn};
use serde::Serialize;
use serde_json::{Map, Value};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, SectorError};
use crate::shape::skeleton;
use crate::source::CategorySource;

/// Default snapshot location, relative to the working directory.
pub const DEFAULT_CACHE_FILE: &str = "cache.json";

/// Category name to skeleton, in endpoint order.
pub type Skeletons = Map<String, Value>;

/// Size of a cache, counted over every nesting level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStatistics {
    /// Top-level category count.
    pub categories: usize,
    /// Sum of key counts of every object.
    pub sections: usize,
    /// Sum of lengths of every list.
    pub items: usize,
}

impl CacheStatistics {
    pub fn of(entries: &Skeletons) -> Self {
        let mut stats = Self {
            categories: entries.len(),
            ..Self::default()
        };
        for shape in entries.values() {
            stats.visit(shape);
        }
        stats
    }

    fn visit(&mut self, node: &Value) {
        match node {
            Value::Object(fields) => {
                self.sections += fields.len();
                fields.values().for_each(|value| self.visit(value));
            }
            Value::Array(items) => {
                self.items += items.len();
                items.iter().for_each(|item| self.visit(item));
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
        }
    }
}

/// Skeletons gathered by one build pass.
#[derive(Debug, Clone, Default)]
pub struct BuildOutcome {
    pub entries: Skeletons,
    /// Categories omitted because their fetch failed.
    pub failed: Vec<String>,
}

/// Fetch every category of `source` and extract its skeleton.
///
/// A category whose fetch fails is logged and left out. A fatal session
/// error aborts the whole build.
pub fn build<S: CategorySource + ?Sized>(source: &mut S) -> Result<BuildOutcome> {
    let mut outcome = BuildOutcome::default();
    for name in source.categories() {
        match source.fetch_category(&name) {
            Ok(data) => {
                outcome.entries.insert(name, skeleton(&data));
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                error!("{}", e);
                outcome.failed.push(name);
            }
        }
    }
    Ok(outcome)
}

/// Skeleton snapshot bound to a file.
#[derive(Debug, Clone)]
pub struct ShapeCache {
    path: PathBuf,
    entries: Skeletons,
}

impl ShapeCache {
    /// Empty cache bound to `path`; nothing is read or written.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            entries: Skeletons::new(),
        }
    }

    pub fn with_entries<P: AsRef<Path>>(path: P, entries: Skeletons) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            entries,
        }
    }

    /// Load the snapshot at `path`, building and saving one if there is none.
    ///
    /// An unreadable snapshot is treated like a missing one.
    pub fn load<P: AsRef<Path>, S: CategorySource + ?Sized>(path: P, source: &mut S) -> Result<Self> {
        let mut cache = Self::new(path);
        if cache.path.exists() {
            match read_snapshot(&cache.path) {
                Ok(entries) => {
                    info!("Cache loaded from {}", cache.path.display());
                    cache.entries = entries;
                    return Ok(cache);
                }
                Err(e) => warn!("Discarding cache {}: {}", cache.path.display(), e),
            }
        } else {
            info!("Cache file not found. Building cache...");
        }
        cache.rebuild(source)?;
        Ok(cache)
    }

    /// Rebuild from `source`, persist, then replace the in-memory mapping.
    ///
    /// Returns the categories that could not be fetched.
    pub fn rebuild<S: CategorySource + ?Sized>(&mut self, source: &mut S) -> Result<Vec<String>> {
        info!("Rebuilding cache...");
        let outcome = build(source)?;
        write_snapshot(&self.path, &outcome.entries)?;
        self.entries = outcome.entries;
        Ok(outcome.failed)
    }

    pub fn save(&self) -> Result<()> {
        write_snapshot(&self.path, &self.entries)
    }

    pub fn statistics(&self) -> CacheStatistics {
        CacheStatistics::of(&self.entries)
    }

    pub fn get(&self, category: &str) -> Option<&Value> {
        self.entries.get(category)
    }

    pub fn categories(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn entries(&self) -> &Skeletons {
        &self.entries
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read a snapshot file; its root must be a JSON object.
pub fn read_snapshot(path: &Path) -> Result<Skeletons> {
    let reader = BufReader::new(File::open(path)?);
    match serde_json::from_reader(reader)? {
        Value::Object(entries) => Ok(entries),
        _ => Err(SectorError::Configuration(format!(
            "Cache snapshot {} is not a JSON object",
            path.display()
        ))),
    }
}

/// Write `entries` to `path` through a staging file and a rename.
pub fn write_snapshot(path: &Path, entries: &Skeletons) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let staging = staging_path(path);
    {
        let mut writer = BufWriter::new(File::create(&staging)?);
        serde_json::to_writer_pretty(&mut writer, entries)?;
        writer.flush()?;
    }
    fs::rename(&staging, path)?;
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from(DEFAULT_CACHE_FILE));
    name.push(".tmp");
    path.with_file_name(name)
}
