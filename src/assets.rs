//! Shape-set loading.
//!
//! The "flat fun" set is compiled into the binary; a different set can be
//! loaded from disk. Either way a missing or malformed description is fatal
//! to the caller.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::core::ShapeCatalog;

/// Built-in shape set: nine flat polycubes, from the single cube up to the
/// four-cube pieces.
pub const FLAT_FUN: &str = include_str!("../assets/flat_fun.txt");

/// Parse the built-in shape set
pub fn builtin_catalog() -> Result<ShapeCatalog> {
    ShapeCatalog::parse(FLAT_FUN).context("built-in shape set is malformed")
}

/// Read and parse a shape-set description from `path`
pub fn load_catalog(path: &Path) -> Result<ShapeCatalog> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read shape set {}", path.display()))?;
    let catalog = ShapeCatalog::parse(&text)
        .with_context(|| format!("failed to parse shape set {}", path.display()))?;
    info!(path = %path.display(), shapes = catalog.len(), "loaded shape set");
    Ok(catalog)
}

/// The shape set at `path`, or the built-in one when no path is given
pub fn catalog_from(path: Option<&Path>) -> Result<ShapeCatalog> {
    match path {
        Some(path) => load_catalog(path),
        None => builtin_catalog(),
    }
}
