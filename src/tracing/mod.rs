use std::{collections::BTreeMap, process};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing_loki::{url::Url, BackgroundTask};
use tracing_subscriber::{
    fmt,
    layer::{Layer, SubscriberExt},
    prelude::*,
    registry, EnvFilter,
};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Hostname Error: {0}")]
    HostnameError(#[from] std::io::Error),

    #[error("Loki Error: {0}")]
    LokiError(#[from] tracing_loki::Error),

    #[error("Url Error: {0}")]
    UrlError(#[from] tracing_loki::url::ParseError),

    #[error("Subscriber Error: {0}")]
    SubscriberError(#[from] tracing_subscriber::util::TryInitError),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, derive_new::new)]
pub struct LokiOptions {
    #[new(into)]
    pub url: String,
    #[new(into)]
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[new(into)]
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

/// Logging configuration. Levels always come from `RUST_LOG`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, derive_new::new)]
pub struct LoggingOptions {
    #[serde(default)]
    pub loki: Option<LokiOptions>,
}

#[derive(derive_new::new)]
pub struct Logging {
    pub loki_task: Option<BackgroundTask>,
}

impl Logging {
    /// Ships buffered events to Loki. Must be called inside a tokio runtime.
    pub fn spawn(self) -> Option<JoinHandle<()>> {
        self.loki_task.map(tokio::spawn)
    }
}

pub fn configure(options: LoggingOptions) -> Result<Logging, LoggingError> {
    let log_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::rfc_3339())
        .with_filter(EnvFilter::from_default_env());
    let mut loki_task = None;

    let loki_layer = if let Some(loki) = options.loki {
        let mut builder = tracing_loki::builder()
            .label("host", hostname::get()?.to_string_lossy())?
            .extra_field("pid", format!("{}", process::id()))?;

        for (k, v) in loki.labels {
            builder = builder.label(k, v)?;
        }

        for (k, v) in loki.fields {
            builder = builder.extra_field(k, v)?;
        }

        let (layer, task) = builder.build_url(Url::parse(&loki.url)?)?;

        loki_task = Some(task);

        Some(layer.with_filter(EnvFilter::from_default_env()))
    } else {
        None
    };

    registry().with(log_layer).with(loki_layer).try_init()?;

    Ok(Logging::new(loki_task))
}
