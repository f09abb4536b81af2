mod extras;
pub use extras::*;

mod main;
pub use main::*;

pub mod cors;
pub mod map;
pub mod srv;

mod error;
pub use error::{ConfigFileError, ConfigFileResult};
