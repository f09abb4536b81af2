use actix_http::Method;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::file::{
    ConfigExtras, ConfigFileError, ConfigFileResult, UnrecognizedKeys, UnrecognizedValues,
};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum CorsConfig {
    Properties(CorsProperties),
    SimpleFlag(bool),
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self::SimpleFlag(true)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct CorsProperties {
    #[serde(default)]
    pub origin: Vec<String>,
    pub max_age: Option<usize>,

    #[serde(flatten, skip_serializing)]
    pub unrecognized: UnrecognizedValues,
}

impl Default for CorsProperties {
    fn default() -> Self {
        Self {
            origin: vec!["*".to_string()],
            max_age: None,
            unrecognized: UnrecognizedValues::default(),
        }
    }
}

impl CorsProperties {
    pub fn validate(&self) -> ConfigFileResult<()> {
        if self.origin.is_empty() {
            Err(ConfigFileError::CorsNoOriginsConfigured)
        } else {
            Ok(())
        }
    }
}

impl ConfigExtras for CorsProperties {
    fn finalize(&mut self) -> ConfigFileResult<()> {
        self.validate()
    }

    fn get_unrecognized_keys(&self) -> UnrecognizedKeys {
        self.unrecognized.keys().cloned().collect()
    }
}

impl CorsConfig {
    pub fn log_current_configuration(&self) {
        match &self {
            Self::SimpleFlag(false) => info!("CORS is disabled"),
            Self::SimpleFlag(true) => info!(
                "CORS enabled with defaults: {:?}",
                CorsProperties::default()
            ),
            Self::Properties(props) => {
                info!("CORS enabled with custom properties: {props:?}");
            }
        }
    }

    /// Checks that explicitly configured CORS properties allow at least one origin
    pub fn validate(&self) -> ConfigFileResult<()> {
        match self {
            Self::SimpleFlag(_) => Ok(()),
            Self::Properties(properties) => properties.validate(),
        }
    }

    #[must_use]
    pub fn make_cors_middleware(&self) -> Option<actix_cors::Cors> {
        match self {
            Self::SimpleFlag(false) => None,
            Self::SimpleFlag(true) => Some(Self::create_cors(&CorsProperties::default())),
            Self::Properties(properties) => Some(Self::create_cors(properties)),
        }
    }

    fn create_cors(properties: &CorsProperties) -> actix_cors::Cors {
        let mut cors = actix_cors::Cors::default();

        // echoes the request `Origin` header in `Access-Control-Allow-Origin`
        if properties.origin.iter().any(|o| o == "*") {
            cors = cors.allow_any_origin();
        } else {
            for origin in &properties.origin {
                cors = cors.allowed_origin(origin);
            }
        }

        // the map only ever reads
        cors = cors.allowed_methods([Method::GET, Method::HEAD]);
        cors.max_age(properties.max_age)
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn default_is_enabled() {
        let config = CorsConfig::default();
        assert_eq!(config, CorsConfig::SimpleFlag(true));
        assert!(config.make_cors_middleware().is_some());
    }

    #[test]
    fn disabled() {
        assert!(
            CorsConfig::SimpleFlag(false)
                .make_cors_middleware()
                .is_none()
        );
    }

    #[test]
    fn properties_default_values() {
        let props = CorsProperties::default();
        assert_eq!(props.origin, vec!["*"]);
        assert_eq!(props.max_age, None);
        assert!(props.validate().is_ok());
    }

    #[test]
    fn parse_properties() {
        let config: CorsConfig = serde_yaml::from_str(indoc! {"
            origin:
              - https://example.org
            max_age: 3600
        "})
        .unwrap();
        let CorsConfig::Properties(props) = &config else {
            panic!("expected properties, got {config:?}");
        };
        assert_eq!(props.origin, vec!["https://example.org"]);
        assert_eq!(props.max_age, Some(3600));
        assert!(config.validate().is_ok());
        assert!(config.make_cors_middleware().is_some());
    }

    #[test]
    fn empty_origin_is_invalid() {
        let config = CorsConfig::Properties(CorsProperties {
            origin: vec![],
            ..Default::default()
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigFileError::CorsNoOriginsConfigured)
        ));
    }
}
