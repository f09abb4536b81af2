//! Error types for GeoJSON catalog operations.

use std::path::PathBuf;

/// A convenience [`Result`] for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while listing or resolving GeoJSON files.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    /// The directory does not exist or cannot be accessed.
    #[error("Unable to read GeoJSON directory {1}: {0}")]
    DirectoryRead(#[source] std::io::Error, PathBuf),

    /// The configured path exists but is not a directory.
    #[error("GeoJSON path {0} is not a directory")]
    NotADirectory(PathBuf),

    /// Listing the directory failed part way through.
    #[error("Walk directory error {1}: {0}")]
    DirectoryWalking(#[source] walkdir::Error, PathBuf),

    /// A requested file name would escape the directory, or is empty.
    #[error("Invalid file name {0:?}")]
    InvalidFileName(String),
}
