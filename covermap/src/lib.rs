#![cfg_attr(doc, doc = include_str!("../README.md"))]
#![forbid(unsafe_code)]

pub mod config;
pub mod logging;
pub mod srv;

mod utils;
pub use utils::{CovermapError, CovermapResult};
