use actix_web::web::Data;
use actix_web::{HttpResponse, Responder, route};
use covermap_core::catalog::CatalogDir;
use covermap_core::layers::{LayerPlanner, PlannedLayer};
use serde::Serialize;
use tracing::warn;

/// Body of `GET /layers.json`: the fill layers the map page creates for the current catalog.
#[derive(Debug, Default, Serialize)]
pub struct LayerPlan {
    pub layers: Vec<PlannedLayer>,
    pub skipped: Vec<SkippedFile>,
}

/// A catalog file that could not be turned into layers.
#[derive(Debug, Serialize)]
pub struct SkippedFile {
    pub file: String,
    pub error: String,
}

/// Plan the layers of every catalog file, in catalog order, with one shared palette.
///
/// Files that cannot be read or parsed are skipped and the remaining files are still planned.
pub async fn plan_catalog(geojson: &CatalogDir) -> LayerPlan {
    let catalog = geojson.catalog();
    let mut planner = LayerPlanner::default();
    let mut plan = LayerPlan::default();

    for entry in catalog.iter() {
        let content = match geojson.file_path(&entry.file) {
            Ok(path) => tokio::fs::read(&path)
                .await
                .map_err(|e| format!("{}: {e}", path.display())),
            Err(e) => Err(e.to_string()),
        };
        match content.and_then(|data| {
            planner
                .plan_bytes(&entry.id, &data)
                .map_err(|e| e.to_string())
        }) {
            Ok(layers) => plan.layers.extend(layers),
            Err(error) => {
                warn!("Skipping GeoJSON file {}: {error}", entry.file);
                plan.skipped.push(SkippedFile {
                    file: entry.file.clone(),
                    error,
                });
            }
        }
    }

    plan
}

#[route("/layers.json", method = "GET", method = "HEAD")]
pub async fn get_layers(geojson: Data<CatalogDir>) -> impl Responder {
    HttpResponse::Ok().json(plan_catalog(&geojson).await)
}
