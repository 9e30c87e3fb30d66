use color_eyre::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Console logging on stderr so stdout stays machine-readable.
///
/// `RUST_LOG` wins; otherwise `info`, or `debug` with `--verbose`.
pub fn init(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::Layer::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(())
}
