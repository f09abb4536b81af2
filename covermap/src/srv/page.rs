use std::sync::LazyLock;

use actix_web::http::header::ContentType;
use actix_web::web::Data;
use actix_web::{HttpResponse, Responder, route};
use covermap_core::layers::{CLASS_COLORS, FALLBACK_PALETTE};
use serde_json::{Map, Value};

use crate::config::file::map::MapConfig;

const INDEX_TEMPLATE: &str = include_str!("../../assets/index.html");
const MAP_SCRIPT_TEMPLATE: &str = include_str!("../../assets/map.js");

/// The client script, with the class colors and the fallback palette filled in.
static MAP_SCRIPT: LazyLock<String> = LazyLock::new(render_map_script);

#[route("/", method = "GET", method = "HEAD")]
#[allow(clippy::unused_async)]
pub async fn get_index(map: Data<MapConfig>) -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(render_index(&map))
}

#[route("/map.js", method = "GET", method = "HEAD")]
#[allow(clippy::unused_async)]
pub async fn get_map_script() -> impl Responder {
    HttpResponse::Ok()
        .content_type("application/javascript")
        .body(MAP_SCRIPT.as_str())
}

fn render_index(map: &MapConfig) -> String {
    let [lng, lat] = map.center();
    INDEX_TEMPLATE
        .replace("{{title}}", &escape_html(map.title()))
        .replace("{{center_lng}}", &lng.to_string())
        .replace("{{center_lat}}", &lat.to_string())
        .replace("{{zoom}}", &map.zoom().to_string())
}

fn render_map_script() -> String {
    let colors: Map<String, Value> = CLASS_COLORS
        .iter()
        .map(|(class, color)| ((*class).to_string(), Value::from(*color)))
        .collect();
    MAP_SCRIPT_TEMPLATE
        .replace("__CLASS_COLORS__", &Value::Object(colors).to_string())
        .replace("__FALLBACK_PALETTE__", &Value::from(FALLBACK_PALETTE).to_string())
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use actix_web::App;
    use actix_web::http::header::CONTENT_TYPE;
    use actix_web::test::{TestRequest, call_service, init_service, read_body};

    use super::*;

    #[test]
    fn index_defaults() {
        let html = render_index(&MapConfig::default());
        assert!(html.contains("<title>NAMP Assets Demo</title>"), "{html}");
        assert!(html.contains(r#"data-center-lng="-113.9817""#), "{html}");
        assert!(html.contains(r#"data-center-lat="50.7256""#), "{html}");
        assert!(html.contains(r#"data-zoom="13""#), "{html}");
        assert!(!html.contains("{{"), "unreplaced placeholder in {html}");
    }

    #[test]
    fn index_escapes_title() {
        let map = MapConfig {
            title: Some("Bow & <Elbow>".to_string()),
            zoom: Some(9.5),
            ..Default::default()
        };
        let html = render_index(&map);
        assert!(html.contains("<title>Bow &amp; &lt;Elbow&gt;</title>"), "{html}");
        assert!(html.contains(r#"data-zoom="9.5""#), "{html}");
    }

    #[test]
    fn script_shares_colors() {
        let script = render_map_script();
        assert!(script.contains(r##""WATER":"#0077be""##));
        assert!(script.contains(r##""PARKS_AND_OPEN_SPACES":"lightgreen""##));
        assert!(script.contains(r##"["#e41a1c","#377eb8","#4daf4a","#984ea3","#ff7f00","#ffff33","#a65628","#f781bf"]"##));
        assert!(!script.contains("__CLASS_COLORS__"));
        assert!(!script.contains("__FALLBACK_PALETTE__"));
    }

    #[test]
    fn script_colors_only_own_classes() {
        let script = render_map_script();
        assert!(
            script.contains("Object.hasOwn(CLASS_COLORS, cls) ? CLASS_COLORS[cls] : nextFallback()"),
            "{script}"
        );
        assert!(!script.contains("CLASS_COLORS[cls] ||"), "{script}");
    }

    #[actix_rt::test]
    async fn content_types() {
        let app = init_service(
            App::new()
                .app_data(Data::new(MapConfig::default()))
                .service(get_index)
                .service(get_map_script),
        )
        .await;

        let resp = call_service(&app, TestRequest::get().uri("/").to_request()).await;
        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get(CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
        let body = read_body(resp).await;
        assert!(std::str::from_utf8(&body).unwrap().contains("/map.js"));

        let resp = call_service(&app, TestRequest::get().uri("/map.js").to_request()).await;
        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get(CONTENT_TYPE).unwrap(),
            "application/javascript"
        );
    }
}
