use serde::{Deserialize, Serialize};

use crate::config::file::cors::CorsConfig;
use crate::config::file::{ConfigExtras, ConfigFileResult, UnrecognizedKeys};

pub const KEEP_ALIVE_DEFAULT: u64 = 75;
pub const LISTEN_ADDRESSES_DEFAULT: &str = "0.0.0.0:8001";

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct SrvConfig {
    pub keep_alive: Option<u64>,
    pub listen_addresses: Option<String>,
    pub worker_processes: Option<usize>,
    pub cors: Option<CorsConfig>,
}

impl ConfigExtras for SrvConfig {
    fn finalize(&mut self) -> ConfigFileResult<()> {
        if let Some(cors) = &self.cors {
            cors.validate()?;
        }
        Ok(())
    }

    fn get_unrecognized_keys(&self) -> UnrecognizedKeys {
        match &self.cors {
            Some(CorsConfig::Properties(cors)) => cors.get_unrecognized_keys_with_prefix("cors."),
            _ => UnrecognizedKeys::new(),
        }
    }
}
