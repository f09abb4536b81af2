/// A convenience [`Result`] for layer planning.
pub type LayerResult<T> = Result<T, LayerError>;

/// Errors that can occur while planning the layers of a GeoJSON source.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum LayerError {
    /// The source is not valid JSON.
    #[error("GeoJSON source {1} is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error, String),

    /// The source has no `features` array.
    #[error("GeoJSON source {0} has no features array")]
    MissingFeatures(String),
}
