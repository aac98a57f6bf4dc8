use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

const APP_TARGET: &str = "fxdash";
const HTTP_TARGETS: [&str; 2] = ["reqwest", "hyper_util"];

/// Per-target levels for a `-v` count. One `-v` enables fxdash debug events,
/// a second also lets through the HTTP client's own events.
fn targets_for(verbosity: u8) -> Targets {
    let app_level = if verbosity >= 1 {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    };
    let http_level = if verbosity >= 2 {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    };

    HTTP_TARGETS
        .iter()
        .fold(Targets::new().with_target(APP_TARGET, app_level), |targets, target| {
            targets.with_target(*target, http_level)
        })
}

/// Installs the global subscriber. Events go to stderr so rendered tables on
/// stdout stay clean. `RUST_LOG` narrows further when set.
pub fn init_logging(verbosity: u8) {
    let default_directive = if verbosity == 0 { "off" } else { "debug" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(targets_for(verbosity))
        .with(env_filter)
        .init();
}
