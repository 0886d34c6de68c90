use tracing::error;
use tracing_subscriber::EnvFilter;

#[cfg(debug_assertions)]
const DEFAULT_FILTER: &str = "debug,hyper=warn,reqwest=warn";
#[cfg(not(debug_assertions))]
const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn";

/// Install the console subscriber. `RUST_LOG` overrides the default filter.
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

/// Tell the user the process is about to stop, and why.
pub fn report_fatal(err: &dyn std::error::Error) {
    error!("");
    error!("*** lbp-presence has run into an error and will now exit. ***");
    error!("This is most likely *not your fault*. Try restarting and check your configuration.");
    error!("If this keeps happening, please open an issue and include the error below.");
    error!("");
    error!("{err}");
    error!("");
}
