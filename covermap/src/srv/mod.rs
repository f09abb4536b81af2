mod data;
mod layers;
mod manifest;
mod page;

mod server;
pub use layers::{LayerPlan, SkippedFile, plan_catalog};
pub use manifest::Manifest;
pub use server::{new_server, router};
