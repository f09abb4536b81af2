use std::borrow::Cow;

use actix_web::web::Data;
use actix_web::{HttpResponse, Responder, route};
use covermap_core::catalog::{Catalog, CatalogDir};
use serde::Serialize;

/// Body of `GET /manifest.json`.
#[derive(Debug, Serialize)]
pub struct Manifest<'a> {
    pub geojsons: Cow<'a, Catalog>,
}

#[route("/manifest.json", method = "GET", method = "HEAD")]
#[allow(clippy::unused_async)]
pub async fn get_manifest(geojson: Data<CatalogDir>) -> impl Responder {
    HttpResponse::Ok().json(Manifest {
        geojsons: geojson.catalog(),
    })
}
