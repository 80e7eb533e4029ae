use std::env;

use tracing::info;

pub mod action;
pub mod body;
pub mod config;
pub mod jiraevent;
pub mod markup;
pub mod mentions;
pub mod permalink;
pub mod safetext;
pub mod transformer;
pub mod visibility;

pub use transformer::{CommentTransformer, NormalizedComment, PayloadError};

pub fn setup_log() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let log_json = env::var("RUST_LOG_JSON").map_or(false, |s| s == "1");

    if log_json {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr);
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .init();
    }

    info!("Logging configured");
}
