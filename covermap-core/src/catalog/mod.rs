//! Discovery of GeoJSON files in a directory.
//!
//! Every `.geojson` file (extension compared case-insensitively) directly inside
//! the directory becomes a [`CatalogEntry`]. The entry id is derived from the file
//! name with [`sanitize`], so that it can be used as a map source and layer id.
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use covermap_core::catalog::Catalog;
//!
//! let catalog = Catalog::scan(Path::new("data/geojson"));
//! for entry in &catalog {
//!     println!("{} -> {}", entry.id, entry.file);
//! }
//! ```

use std::fs;
use std::path::{Component, Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

mod dir;
pub use dir::{CatalogDir, CatalogRefresh};

mod error;
pub use error::{CatalogError, CatalogResult};

/// Extension of the files picked up by the catalog, compared case-insensitively.
pub const GEOJSON_EXTENSION: &str = "geojson";

/// Derive a catalog id from a file name.
///
/// The extension is stripped, and spaces, hyphens and any dots left in the stem
/// are replaced with underscores. The result never contains a dot, so applying
/// the function again returns it unchanged.
///
/// ```
/// use covermap_core::catalog::sanitize;
///
/// assert_eq!(sanitize("My File-1.geojson"), "My_File_1");
/// assert_eq!(sanitize(&sanitize("My File-1.geojson")), "My_File_1");
/// ```
#[must_use]
pub fn sanitize(name: &str) -> String {
    strip_extension(name).replace([' ', '-', '.'], "_")
}

/// A file name without its last extension. Leading dots do not start an extension.
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(pos) if name[..pos].chars().any(|c| c != '.') => &name[..pos],
        _ => name,
    }
}

/// Returns `true` if the file name ends with `.geojson`, ignoring case.
///
/// A name that is only the extension, such as `.geojson`, matches too.
#[must_use]
pub fn is_geojson_file_name(name: &str) -> bool {
    let Some(start) = name.len().checked_sub(GEOJSON_EXTENSION.len() + 1) else {
        return false;
    };
    name.get(start..).is_some_and(|suffix| {
        suffix.starts_with('.') && suffix[1..].eq_ignore_ascii_case(GEOJSON_EXTENSION)
    })
}

/// Resolve a requested file name relative to `dir`.
///
/// Only plain relative paths are accepted. Absolute paths, `..`, a leading `.`
/// and prefix components are rejected, so the result always stays inside `dir`.
pub fn safe_join(dir: &Path, file: &str) -> CatalogResult<PathBuf> {
    let requested = Path::new(file);
    let mut components = requested.components().peekable();
    if components.peek().is_none() || !components.all(|c| matches!(c, Component::Normal(_))) {
        return Err(CatalogError::InvalidFileName(file.to_string()));
    }
    Ok(dir.join(requested))
}

/// A single GeoJSON file exposed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Sanitized identifier, see [`sanitize`].
    pub id: String,
    /// File name inside the catalog directory.
    pub file: String,
}

/// Ordered list of GeoJSON files with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(Vec<CatalogEntry>);

impl Catalog {
    /// Lists the GeoJSON files in `dir`.
    ///
    /// A missing or unreadable directory is logged and produces an empty catalog.
    #[must_use]
    pub fn scan(dir: &Path) -> Self {
        match Self::try_scan(dir) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!("{e}. No GeoJSON files will be served.");
                Self::default()
            }
        }
    }

    /// Lists the GeoJSON files in `dir`, reporting errors of the directory itself.
    ///
    /// Entries that cannot be read are logged and skipped.
    ///
    /// Files are added in file name order, which makes ids and the manifest
    /// order independent of the filesystem listing order.
    /// Sub-directories are not searched, hidden files are included, symlinks are followed.
    pub fn try_scan(dir: &Path) -> CatalogResult<Self> {
        let metadata =
            fs::metadata(dir).map_err(|e| CatalogError::DirectoryRead(e, dir.to_path_buf()))?;
        if !metadata.is_dir() {
            return Err(CatalogError::NotADirectory(dir.to_path_buf()));
        }

        let mut names = Vec::new();
        let it = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true);
        for entry in it {
            // dangling symlinks and other unreadable entries are skipped
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("{}", CatalogError::DirectoryWalking(e, dir.to_path_buf()));
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                warn!(
                    "Ignoring file with a non UTF-8 name {}",
                    entry.path().display()
                );
                continue;
            };
            if is_geojson_file_name(name) {
                names.push(name.to_string());
            }
        }
        names.sort_unstable();

        let mut catalog = Self::default();
        for name in names {
            catalog.insert(name);
        }
        Ok(catalog)
    }

    /// Adds a file by name. The first file for a given id is kept.
    ///
    /// Returns `false` if another file already uses the same id.
    pub fn insert(&mut self, file: String) -> bool {
        let id = sanitize(&file);
        if let Some(existing) = self.get(&id) {
            warn!(
                "Ignoring GeoJSON file {file} because its id {id} is already used by {existing}",
                existing = existing.file
            );
            return false;
        }
        debug!("Discovered GeoJSON source {id} from {file}");
        self.0.push(CatalogEntry { id, file });
        true
    }

    /// Looks up an entry by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.0.iter().find(|entry| entry.id == id)
    }

    /// Iterates over the entries in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.0.iter()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no GeoJSON files were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Catalog> for Vec<CatalogEntry> {
    fn from(catalog: Catalog) -> Self {
        catalog.0
    }
}

#[cfg(test)]
mod tests {
    use std::fs::{File, create_dir};

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    fn dir_with(files: &[&str]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for file in files {
            File::create(dir.path().join(file)).unwrap();
        }
        dir
    }

    fn ids(catalog: &Catalog) -> Vec<&str> {
        catalog.iter().map(|e| e.id.as_str()).collect()
    }

    #[rstest]
    #[case::spaces_and_hyphens("My File-1.geojson", "My_File_1")]
    #[case::already_clean("Land_Cover_2020", "Land_Cover_2020")]
    #[case::upper_extension("WATER.GEOJSON", "WATER")]
    #[case::inner_dots("parks.v2.geojson", "parks_v2")]
    #[case::hidden(".hidden", "_hidden")]
    #[case::trailing_dot("trees.", "trees")]
    fn sanitize_names(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(sanitize(name), expected);
        assert_eq!(sanitize(expected), expected);
        assert_eq!(sanitize(&sanitize(name)), sanitize(name));
    }

    #[rstest]
    #[case("a.geojson", true)]
    #[case("a.GEOJSON", true)]
    #[case("a.GeoJson", true)]
    #[case("a.json", false)]
    #[case("a.geojson.bak", false)]
    #[case("geojson", false)]
    #[case(".geojson", true)]
    #[case(".GEOJSON", true)]
    #[case("geojson.", false)]
    #[case("é.geojson", true)]
    #[case("ééééé", false)]
    #[case("notes.txt", false)]
    fn geojson_extension(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_geojson_file_name(name), expected);
    }

    #[test]
    fn scan_filters_by_extension() {
        let dir = dir_with(&[
            "c.GeoJson",
            "a.geojson",
            "B.GEOJSON",
            "d.json",
            "e.geojson.bak",
            "notes.txt",
        ]);
        create_dir(dir.path().join("folder.geojson")).unwrap();

        let catalog = Catalog::try_scan(dir.path()).unwrap();
        assert_eq!(ids(&catalog), vec!["B", "a", "c"]);
        assert_eq!(catalog.get("B").unwrap().file, "B.GEOJSON");
        assert!(catalog.get("folder").is_none());
    }

    #[test]
    fn scan_includes_extension_only_names() {
        let dir = dir_with(&[".geojson", ".GEOJSON", ".hidden"]);
        let catalog = Catalog::scan(dir.path());
        assert_eq!(catalog.len(), 2, "{catalog:?}");
        let files: Vec<_> = catalog.iter().map(|e| e.file.as_str()).collect();
        assert_eq!(files, vec![".GEOJSON", ".geojson"]);
    }

    #[cfg(unix)]
    #[test]
    fn scan_skips_broken_entries() {
        let dir = dir_with(&["a.geojson"]);
        std::os::unix::fs::symlink("/nonexistent/target", dir.path().join("stale.txt")).unwrap();
        std::os::unix::fs::symlink("/nonexistent/target", dir.path().join("stale.geojson")).unwrap();

        let catalog = Catalog::try_scan(dir.path()).unwrap();
        assert_eq!(ids(&catalog), vec!["a"]);
        assert_eq!(Catalog::scan(dir.path()).len(), 1);
    }

    #[test]
    fn scan_end_to_end_directory() {
        let dir = dir_with(&["Land Cover-2020.geojson", "notes.txt"]);
        let catalog = Catalog::scan(dir.path());
        insta::assert_json_snapshot!(catalog, @r#"
        [
          {
            "id": "Land_Cover_2020",
            "file": "Land Cover-2020.geojson"
          }
        ]
        "#);
    }

    #[test]
    fn colliding_ids_keep_first_file_name() {
        let dir = dir_with(&["My-File.geojson", "My File.geojson", "My_File.geojson"]);
        let catalog = Catalog::scan(dir.path());
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("My_File").unwrap().file, "My File.geojson");
    }

    #[test]
    fn insert_reports_duplicates() {
        let mut catalog = Catalog::default();
        assert!(catalog.insert("a-b.geojson".to_string()));
        assert!(!catalog.insert("a b.geojson".to_string()));
        assert!(catalog.insert("c.geojson".to_string()));
        assert_eq!(ids(&catalog), vec!["a_b", "c"]);
    }

    #[test]
    fn missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");

        assert!(matches!(
            Catalog::try_scan(&missing),
            Err(CatalogError::DirectoryRead(..))
        ));
        assert!(Catalog::scan(&missing).is_empty());
    }

    #[test]
    fn file_instead_of_directory_is_empty() {
        let dir = dir_with(&["a.geojson"]);
        let file = dir.path().join("a.geojson");

        assert!(matches!(
            Catalog::try_scan(&file),
            Err(CatalogError::NotADirectory(_))
        ));
        assert!(Catalog::scan(&file).is_empty());
    }

    #[test]
    fn empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::scan(dir.path());
        assert!(catalog.is_empty());
        assert_eq!(serde_json::to_string(&catalog).unwrap(), "[]");
    }

    #[rstest]
    #[case("a.geojson")]
    #[case("Land Cover-2020.geojson")]
    #[case("nested/a.geojson")]
    fn safe_join_accepts_relative(#[case] file: &str) {
        let dir = Path::new("/srv/geojson");
        assert_eq!(safe_join(dir, file).unwrap(), dir.join(file));
    }

    #[rstest]
    #[case("")]
    #[case("../secret.geojson")]
    #[case("nested/../../secret.geojson")]
    #[case("/etc/passwd")]
    #[case("./a.geojson")]
    fn safe_join_rejects_escapes(#[case] file: &str) {
        let dir = Path::new("/srv/geojson");
        assert!(matches!(
            safe_join(dir, file),
            Err(CatalogError::InvalidFileName(_))
        ));
    }
}
