use anyhow::Context;
use tracing::{subscriber::set_global_default, Subscriber};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, EnvFilter, Registry};

/// Installs a bunyan-formatted JSON subscriber writing to `sink`.
///
/// `RUST_LOG` overrides `env_filter` when set.
pub fn init<Sink>(name: &str, env_filter: &str, sink: Sink) -> anyhow::Result<()>
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    LogTracer::init().context("Failed to redirect log records to tracing")?;
    let subscriber = get_subscriber(name, env_filter, sink);
    set_global_default(subscriber).context("Failed to set the global tracing subscriber")
}

pub fn get_subscriber<Sink>(
    name: &str,
    env_filter: &str,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer = BunyanFormattingLayer::new(name.into(), sink);
    Registry::default()
        .with(filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}
