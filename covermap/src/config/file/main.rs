use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::Write as _;
use std::path::{Path, PathBuf};

use covermap_core::catalog::{CatalogDir, CatalogRefresh};
use serde::{Deserialize, Serialize};
use subst::VariableMap;
use tracing::{info, warn};

use crate::config::file::map::MapConfig;
use crate::config::file::srv::SrvConfig;
use crate::config::file::{
    ConfigExtras, ConfigFileError, ConfigFileResult, UnrecognizedKeys, UnrecognizedValues,
    copy_unrecognized_keys_from_config,
};

/// Directory served when neither the command line, the config file nor the environment name one.
pub const DATA_DIR_DEFAULT: &str = "data/geojson";

/// Everything the HTTP handlers need, resolved from a [`Config`].
#[derive(Debug, Clone)]
pub struct ServerState {
    pub geojson: CatalogDir,
    pub map: MapConfig,
}

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub srv: SrvConfig,

    /// Directory containing the `.geojson` files to serve
    pub data_dir: Option<PathBuf>,

    /// Whether the directory is listed once at startup, or on every request
    pub catalog_refresh: Option<CatalogRefresh>,

    /// Initial view of the map page
    pub map: Option<MapConfig>,

    #[serde(flatten, skip_serializing)]
    pub unrecognized: UnrecognizedValues,
}

impl Config {
    /// Apply defaults, validate, and warn about unrecognized keys
    pub fn finalize(&mut self) -> ConfigFileResult<UnrecognizedKeys> {
        self.srv.finalize()?;
        let mut res = self.srv.get_unrecognized_keys();
        copy_unrecognized_keys_from_config(&mut res, "", &self.unrecognized);

        if let Some(map) = &mut self.map {
            map.finalize()?;
            res.extend(map.get_unrecognized_keys_with_prefix("map."));
        }

        self.data_dir
            .get_or_insert_with(|| PathBuf::from(DATA_DIR_DEFAULT));

        for key in &res {
            warn!(
                "Ignoring unrecognized configuration key '{key}'. Please check your configuration file for typos."
            );
        }

        Ok(res)
    }

    #[must_use]
    pub fn resolve(&self) -> ServerState {
        let data_dir = self
            .data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DATA_DIR_DEFAULT));
        let refresh = self.catalog_refresh.unwrap_or_default();
        ServerState {
            geojson: CatalogDir::new(data_dir, refresh),
            map: self.map.clone().unwrap_or_default(),
        }
    }

    pub fn save_to_file(&self, file_name: &Path) -> ConfigFileResult<()> {
        let yaml = serde_yaml::to_string(&self).map_err(ConfigFileError::ConfigSerializeError)?;
        if file_name.as_os_str() == OsStr::new("-") {
            info!("Current system configuration:");
            println!("\n\n{yaml}\n");
            Ok(())
        } else {
            info!(
                "Saving config to {}, use --config to load it",
                file_name.display()
            );
            File::create(file_name)
                .and_then(|mut file| file.write_all(yaml.as_bytes()))
                .map_err(|e| ConfigFileError::ConfigWriteError(e, file_name.to_path_buf()))
        }
    }
}

/// Read config from a file, substituting `${VAR}` references from `env`
pub fn read_config<'a, M>(file_name: &Path, env: &'a M) -> ConfigFileResult<Config>
where
    M: VariableMap<'a>,
    M::Value: AsRef<str>,
{
    let contents = fs::read_to_string(file_name)
        .map_err(|e| ConfigFileError::ConfigLoadError(e, file_name.into()))?;
    parse_config(&contents, env, file_name)
}

pub fn parse_config<'a, M>(contents: &str, env: &'a M, file_name: &Path) -> ConfigFileResult<Config>
where
    M: VariableMap<'a>,
    M::Value: AsRef<str>,
{
    subst::yaml::from_str(contents, env)
        .map_err(|e| ConfigFileError::ConfigParseError(e, file_name.into()))
}
