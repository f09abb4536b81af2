#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

/// GeoJSON file discovery.
pub mod catalog;

/// Configuration helpers shared with the server.
pub mod config;

/// Per-class layer partitioning and color assignment.
pub mod layers;
