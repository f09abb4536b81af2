#![allow(clippy::missing_panics_doc)]
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use covermap::config::file::{Config, parse_config};
use covermap_core::config::env::FauxEnv;
use serde_json::{Value, json};
use tempfile::TempDir;

/// Parse and finalize a config, with `${DATA_DIR}` pointing at `data_dir`.
#[must_use]
pub fn mock_cfg(yaml: &str, data_dir: &Path) -> Config {
    let env = FauxEnv(
        vec![("DATA_DIR", data_dir.as_os_str().to_owned())]
            .into_iter()
            .collect(),
    );
    let mut cfg = parse_config(yaml, &env, Path::new("test.yaml")).unwrap();
    let res = cfg.finalize().unwrap();
    assert!(res.is_empty(), "unrecognized config: {res:?}");
    cfg
}

/// A feature collection with one polygon feature per class, `None` meaning no `secondaryClass`.
#[must_use]
pub fn feature_collection(classes: &[Option<&str>]) -> Value {
    let features: Vec<Value> = classes
        .iter()
        .enumerate()
        .map(|(idx, class)| {
            let mut properties = json!({ "fid": idx });
            if let Some(class) = class {
                properties["secondaryClass"] = json!(class);
            }
            json!({
                "type": "Feature",
                "properties": properties,
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-113.98, 50.72], [-113.97, 50.72], [-113.97, 50.73], [-113.98, 50.72]]]
                }
            })
        })
        .collect();
    json!({ "type": "FeatureCollection", "features": features })
}

pub fn write_file(dir: &Path, name: &str, content: impl AsRef<[u8]>) {
    fs::write(dir.join(name), content).unwrap();
}

/// Directory with a land-cover file (3 of 10 features are `WATER`), an unclassified
/// file with an upper-case extension, and a file that is not GeoJSON.
#[must_use]
pub fn land_cover_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let mut classes = vec![Some("WATER"); 3];
    classes.extend([None; 7]);
    write_file(
        dir.path(),
        "Land Cover-2020.geojson",
        feature_collection(&classes).to_string(),
    );
    write_file(
        dir.path(),
        "trees.GeoJSON",
        feature_collection(&[None, None]).to_string(),
    );
    write_file(dir.path(), "readme.md", "# not a layer");
    dir
}
