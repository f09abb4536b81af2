//! Logging initialization using `tracing` and `tracing-subscriber`.
//!
//! Logging is configured once at startup:
//! - [`EnvFilter`]: log level filtering, read from `RUST_LOG`
//! - [`LogFormat`]: output format, read from `COVERMAP_FORMAT` (json, full, compact, bare, pretty)

use std::str::FromStr;

use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

/// Log output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Emit human-readable, single-line logs.
    /// See [format::Full](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/fmt/format/struct.Full.html#example-output)
    Full,

    /// A variant of the full-format, optimized for short line lengths (default).
    /// See [format::Compact](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/fmt/format/struct.Compact.html#example-output)
    Compact,

    /// A very bare format without timestamps, targets or ANSI colors.
    Bare,

    /// Excessively pretty, multi-line logs for local development/debugging.
    /// See [format::Pretty](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/fmt/format/struct.Pretty.html#example-output)
    Pretty,

    /// Output newline-delimited (structured) JSON logs.
    /// See [format::Json](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/fmt/format/struct.Json.html#example-output)
    Json,
}

impl LogFormat {
    /// Install the global subscriber for this format.
    ///
    /// `SubscriberInitExt::init()` is avoided because it would install its own
    /// `LogTracer` and conflict with [`init_log_bridge`].
    pub fn init(self, env_filter: EnvFilter) {
        let dispatch = match self {
            LogFormat::Full => tracing_subscriber::fmt()
                .with_span_events(FmtSpan::NONE)
                .with_env_filter(env_filter)
                .finish()
                .into(),
            LogFormat::Compact => tracing_subscriber::fmt()
                .compact()
                .with_span_events(FmtSpan::NONE)
                .with_env_filter(env_filter)
                .finish()
                .into(),
            LogFormat::Pretty => tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(env_filter)
                .finish()
                .into(),
            LogFormat::Bare => tracing_subscriber::fmt()
                .compact()
                .with_span_events(FmtSpan::NONE)
                .without_time()
                .with_target(false)
                .with_ansi(false)
                .with_env_filter(env_filter)
                .finish()
                .into(),
            LogFormat::Json => tracing_subscriber::fmt()
                .json()
                .with_span_events(FmtSpan::NONE)
                .with_env_filter(env_filter)
                .finish()
                .into(),
        };
        if let Err(e) = tracing::dispatcher::set_global_default(dispatch) {
            eprintln!("Warning: unable to set the global tracing subscriber: {e}");
        }
    }
}

impl Default for LogFormat {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Compact
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "compact" => Ok(Self::Compact),
            "pretty" | "verbose" => Ok(Self::Pretty),
            "bare" => Ok(Self::Bare),
            "json" | "jsonl" => Ok(Self::Json),
            _ => Err(format!(
                "Invalid log format '{s}'. Valid options: json, full, compact, bare or pretty"
            )),
        }
    }
}

/// Forward `log` records (emitted by `covermap-core` and `actix-web`) into `tracing`.
fn init_log_bridge(env_filter: &EnvFilter) {
    let mut log_builder = tracing_log::LogTracer::builder()
        .with_interest_cache(tracing_log::InterestCacheConfig::default());
    if let Some(Some(max_level)) = env_filter.max_level_hint().map(LevelFilter::into_level) {
        let max_level = match max_level {
            Level::DEBUG => log::LevelFilter::Debug,
            Level::INFO => log::LevelFilter::Info,
            Level::WARN => log::LevelFilter::Warn,
            Level::ERROR => log::LevelFilter::Error,
            Level::TRACE => log::LevelFilter::Trace,
        };
        log_builder = log_builder.with_max_level(max_level);
    }
    if let Err(e) = log_builder.init() {
        eprintln!("Warning: unable to forward log records to tracing: {e}");
    }
}

/// Initialize the global tracing subscriber for the given filter and format.
///
/// An invalid filter falls back to `debug`, an invalid format to [`LogFormat::default`].
pub fn init_tracing(filter: &str, format: Option<String>) {
    let env_filter = EnvFilter::from_str(filter).unwrap_or_else(|_| {
        eprintln!("Warning: Invalid filter string '{filter}' passed, using 'debug' instead");
        EnvFilter::new("debug")
    });

    let log_format = format
        .and_then(|s| {
            s.parse::<LogFormat>()
                .map_err(|e| {
                    eprintln!("Warning: {e}");
                    eprintln!(
                        "Falling back to default format ({:?})",
                        LogFormat::default()
                    );
                })
                .ok()
        })
        .unwrap_or_default();

    init_log_bridge(&env_filter);
    log_format.init(env_filter);
}

/// Build the filter directives from `RUST_LOG`.
///
/// Without `RUST_LOG`, both crates log at `info`. When `RUST_LOG` sets a level for
/// `covermap=` but not for `covermap_core=`, the core crate gets the same level.
#[must_use]
pub fn ensure_covermap_core_log_level_matches(env_filter: Option<String>) -> String {
    const PREFIX: &str = "covermap=";
    let Some(rust_log) = env_filter else {
        return format!("{PREFIX}info,covermap_core=info");
    };
    if rust_log.contains("covermap_core=") {
        return rust_log;
    }
    match rust_log.split(',').find_map(|s| s.strip_prefix(PREFIX)) {
        Some(level) => format!("{rust_log},covermap_core={level}"),
        None => rust_log,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("json", LogFormat::Json)]
    #[case("JSONL", LogFormat::Json)]
    #[case("full", LogFormat::Full)]
    #[case("Compact", LogFormat::Compact)]
    #[case("bare", LogFormat::Bare)]
    #[case("verbose", LogFormat::Pretty)]
    fn parse_log_format(#[case] value: &str, #[case] expected: LogFormat) {
        assert_eq!(value.parse::<LogFormat>(), Ok(expected));
    }

    #[test]
    fn invalid_log_format() {
        let err = "fancy".parse::<LogFormat>().unwrap_err();
        assert!(err.contains("fancy"), "{err}");
    }

    #[rstest]
    #[case(None, "covermap=info,covermap_core=info")]
    #[case(Some("covermap=debug"), "covermap=debug,covermap_core=debug")]
    #[case(
        Some("actix_web=warn,covermap=trace"),
        "actix_web=warn,covermap=trace,covermap_core=trace"
    )]
    #[case(Some("covermap=debug,covermap_core=warn"), "covermap=debug,covermap_core=warn")]
    #[case(Some("warn"), "warn")]
    fn core_level_mirrors_server(#[case] rust_log: Option<&str>, #[case] expected: &str) {
        assert_eq!(
            ensure_covermap_core_log_level_matches(rust_log.map(str::to_string)),
            expected
        );
    }
}
