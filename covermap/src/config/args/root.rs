use std::path::PathBuf;

use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use covermap_core::config::env::Env;
use tracing::info;

use crate::config::args::srv::SrvArgs;
use crate::config::file::Config;

/// Environment variable naming the GeoJSON directory, used when neither the
/// command line nor the config file set one.
pub const DATA_DIR_ENV: &str = "COVERMAP_DATA_DIR";

/// Color scheme for the help text
const HELP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Blue.on_default().bold())
    .usage(AnsiColor::Blue.on_default().bold())
    .literal(AnsiColor::White.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug, PartialEq, Default)]
#[command(
    about,
    version,
    after_help = "Use RUST_LOG environment variable to control logging level, e.g. RUST_LOG='debug' or RUST_LOG='covermap=debug'.\n\
    Use COVERMAP_FORMAT to choose the log format: json, full, compact, bare or pretty.",
    styles = HELP_STYLES
)]
pub struct Args {
    #[command(flatten)]
    pub meta: MetaArgs,
    #[command(flatten)]
    pub srv: SrvArgs,
}

// None of these params will be transferred to the config
#[derive(Parser, Debug, Clone, PartialEq, Default)]
#[command(about, version)]
pub struct MetaArgs {
    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Save resulting config to a file or use "-" to print to stdout.
    #[arg(long)]
    pub save_config: Option<PathBuf>,
    /// Directory with the `.geojson` files to serve. [DEFAULT: data/geojson]
    pub data_dir: Option<PathBuf>,
}

impl Args {
    pub fn merge_into_config<'a>(self, config: &mut Config, env: &impl Env<'a>) {
        if let Some(data_dir) = self.meta.data_dir {
            config.data_dir = Some(data_dir);
        } else if config.data_dir.is_none()
            && let Some(data_dir) = env.get_env_str(DATA_DIR_ENV)
        {
            info!("Using GeoJSON directory {data_dir} from {DATA_DIR_ENV}");
            config.data_dir = Some(PathBuf::from(data_dir));
        }

        if self.srv.catalog_refresh.is_some() {
            config.catalog_refresh = self.srv.catalog_refresh;
        }

        self.srv.merge_into_config(&mut config.srv);
    }
}
