use std::sync::OnceLock;

use color_eyre::Result;
use tracing::error;

static INIT: OnceLock<()> = OnceLock::new();

/// Install the eyre report hook and a panic hook that logs before exiting.
pub fn init() -> Result<()> {
    // idempotent: a second call is a no-op
    if INIT.get().is_some() {
        return Ok(());
    }

    // try_into_hooks avoids a panic if a theme is already installed
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .capture_span_trace_by_default(false)
        .display_location_section(cfg!(debug_assertions))
        .display_env_section(false)
        .try_into_hooks()?;
    eyre_hook.install()?;

    std::panic::set_hook(Box::new(move |panic_info| {
        let report = panic_hook.panic_report(panic_info);
        error!("panic: {report}");
        eprintln!("{report}");
        std::process::exit(1);
    }));

    let _ = INIT.set(());
    Ok(())
}
