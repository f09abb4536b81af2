use actix_web::http::header::ContentType;
use actix_web::web::{Data, Path};
use actix_web::{HttpResponse, route};
use covermap_core::catalog::CatalogDir;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

#[derive(Deserialize, Debug)]
struct DataRequest {
    filename: String,
}

/// Raw contents of a file in the GeoJSON directory, passed through without validation.
///
/// Every failure, including a rejected path, is reported as 404 with a JSON `error` message.
#[route("/data/{filename:.*}", method = "GET", method = "HEAD")]
pub async fn get_data(path: Path<DataRequest>, geojson: Data<CatalogDir>) -> HttpResponse {
    let file_path = match geojson.file_path(&path.filename) {
        Ok(file_path) => file_path,
        Err(e) => return not_found(&e),
    };
    match tokio::fs::read(&file_path).await {
        Ok(content) => HttpResponse::Ok()
            .content_type(ContentType::json())
            .body(content),
        Err(e) => not_found(&format!("{}: {e}", file_path.display())),
    }
}

fn not_found(e: &dyn std::fmt::Display) -> HttpResponse {
    let message = e.to_string();
    debug!("Data request failed: {message}");
    HttpResponse::NotFound().json(json!({ "error": message }))
}
