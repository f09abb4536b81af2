use std::io;

use crate::config::file::ConfigFileError;

/// A convenience [`Result`] for the covermap crate.
pub type CovermapResult<T> = Result<T, CovermapError>;

#[derive(thiserror::Error, Debug)]
pub enum CovermapError {
    #[error("Unable to bind to {1}: {0}")]
    BindingError(#[source] io::Error, String),

    #[error(transparent)]
    ConfigFileError(#[from] ConfigFileError),

    #[cfg(feature = "lambda")]
    #[error("AWS lambda runtime failed: {0}")]
    LambdaError(#[source] lambda_web::LambdaError),

    #[error(transparent)]
    IoError(#[from] io::Error),
}
