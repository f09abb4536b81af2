use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CatalogResult, safe_join};

/// When the catalog of a [`CatalogDir`] is (re)built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogRefresh {
    /// Scan the directory once, when the server starts.
    #[default]
    #[serde(alias = "startup")]
    Once,
    /// Scan the directory again for every request that needs the catalog.
    #[serde(alias = "always")]
    PerRequest,
}

impl FromStr for CatalogRefresh {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "once" | "startup" => Ok(Self::Once),
            "per_request" | "always" => Ok(Self::PerRequest),
            _ => Err(format!(
                "Invalid catalog refresh mode '{s}'. Valid options: once or per-request"
            )),
        }
    }
}

impl fmt::Display for CatalogRefresh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Once => f.write_str("once"),
            Self::PerRequest => f.write_str("per-request"),
        }
    }
}

/// A directory of GeoJSON files together with its catalog.
#[derive(Debug, Clone)]
pub struct CatalogDir {
    path: PathBuf,
    refresh: CatalogRefresh,
    snapshot: Catalog,
}

impl CatalogDir {
    /// Creates the directory source, scanning it right away for [`CatalogRefresh::Once`].
    #[must_use]
    pub fn new(path: PathBuf, refresh: CatalogRefresh) -> Self {
        let snapshot = match refresh {
            CatalogRefresh::Once => {
                let catalog = Catalog::scan(&path);
                info!(
                    "Found {} GeoJSON files in {}",
                    catalog.len(),
                    path.display()
                );
                catalog
            }
            CatalogRefresh::PerRequest => {
                info!(
                    "GeoJSON files in {} will be listed on every request",
                    path.display()
                );
                Catalog::default()
            }
        };
        Self {
            path,
            refresh,
            snapshot,
        }
    }

    /// The current catalog, according to the refresh mode.
    #[must_use]
    pub fn catalog(&self) -> Cow<'_, Catalog> {
        match self.refresh {
            CatalogRefresh::Once => Cow::Borrowed(&self.snapshot),
            CatalogRefresh::PerRequest => Cow::Owned(Catalog::scan(&self.path)),
        }
    }

    /// Path of a file inside the directory, see [`safe_join`].
    pub fn file_path(&self, file: &str) -> CatalogResult<PathBuf> {
        safe_join(&self.path, file)
    }

    /// The scanned directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The refresh mode.
    #[must_use]
    pub fn refresh(&self) -> CatalogRefresh {
        self.refresh
    }
}
