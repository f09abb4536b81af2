//! Splitting GeoJSON sources into colored fill layers.
//!
//! A feature collection where at least one feature has a non-empty
//! `secondaryClass` property is split into one layer per distinct class, in the
//! order the classes are first seen. Features without a class are not part of
//! any of these layers. A collection without classes becomes a single layer.
//!
//! Known classes have a fixed color (see [`CLASS_COLORS`]). Other classes, and
//! whole unclassified sources, take the next color of [`FALLBACK_PALETTE`].

use std::collections::HashMap;
use std::iter::repeat_n;

use itertools::Itertools as _;
use serde::Serialize;
use serde_json::Value;

mod error;
pub use error::{LayerError, LayerResult};

mod palette;
pub use palette::{CLASS_COLORS, ColorAssigner, FALLBACK_PALETTE, class_color};

/// Feature property holding the land-cover class.
pub const CLASS_PROPERTY: &str = "secondaryClass";

/// A fill layer to be added to the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedLayer {
    /// Layer id, unique within a map.
    pub id: String,
    /// Catalog id of the GeoJSON source the layer draws from.
    pub source: String,
    /// Class value the layer is filtered on, `None` for a whole-source layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Fill color, a CSS color.
    pub color: &'static str,
    /// Number of features drawn by the layer.
    pub features: usize,
}

/// Layer id of a class layer: `<source>_<class>` with non-word characters of the class replaced by `_`.
///
/// Replacement happens per UTF-16 code unit, the way the page script's `/\W/g` does,
/// so a character outside the Basic Multilingual Plane becomes `__`.
#[must_use]
pub fn class_layer_id(source: &str, class: &str) -> String {
    let class: String = class
        .chars()
        .flat_map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                repeat_n(c, 1)
            } else {
                repeat_n('_', c.len_utf16())
            }
        })
        .collect();
    format!("{source}_{class}")
}

/// Class of a feature, if it has a non-empty string `secondaryClass` property.
#[must_use]
pub fn feature_class(feature: &Value) -> Option<&str> {
    feature
        .get("properties")?
        .get(CLASS_PROPERTY)?
        .as_str()
        .filter(|class| !class.is_empty())
}

/// Plans the layers of several sources in a row, sharing one palette between them.
#[derive(Debug, Clone, Default)]
pub struct LayerPlanner {
    colors: ColorAssigner,
}

impl LayerPlanner {
    /// Parses a GeoJSON document and plans its layers, see [`Self::plan`].
    pub fn plan_bytes(&mut self, source: &str, data: &[u8]) -> LayerResult<Vec<PlannedLayer>> {
        let collection: Value = serde_json::from_slice(data)
            .map_err(|e| LayerError::InvalidJson(e, source.to_string()))?;
        self.plan(source, &collection)
    }

    /// Plans the layers of one feature collection.
    ///
    /// The palette only advances when the collection is usable, so a failing
    /// source does not shift the colors of the following ones.
    pub fn plan(&mut self, source: &str, collection: &Value) -> LayerResult<Vec<PlannedLayer>> {
        let features = collection
            .get("features")
            .and_then(Value::as_array)
            .ok_or_else(|| LayerError::MissingFeatures(source.to_string()))?;

        let classes: Vec<&str> = features.iter().filter_map(feature_class).collect();
        if classes.is_empty() {
            return Ok(vec![PlannedLayer {
                id: source.to_string(),
                source: source.to_string(),
                class: None,
                color: self.colors.next_fallback(),
                features: features.len(),
            }]);
        }

        let counts: HashMap<&str, usize> = classes.iter().copied().counts();
        Ok(classes
            .iter()
            .copied()
            .unique()
            .map(|class| PlannedLayer {
                id: class_layer_id(source, class),
                source: source.to_string(),
                class: Some(class.to_string()),
                color: self.colors.for_class(class),
                features: counts.get(class).copied().unwrap_or_default(),
            })
            .collect())
    }
}
