use crate::cli::{actions::Action, commands, dispatch, globals::GlobalArgs};
use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

/// Start the CLI
pub fn start() -> Result<(Action, GlobalArgs)> {
    let matches = commands::new().get_matches();

    let verbosity_level = match matches.get_one::<u8>("verbosity").map_or(0, |&v| v) {
        0 => tracing::Level::ERROR,
        1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        3 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let fmt_layer = if matches.get_flag("log-json") {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_file(true)
            .with_line_number(true)
            .with_target(false)
            .boxed()
    };

    // RUST_LOG=
    let env_filter = EnvFilter::builder()
        .with_default_directive(verbosity_level.into())
        .from_env_lossy();

    let subscriber = Registry::default().with(fmt_layer).with(env_filter);

    tracing::subscriber::set_global_default(subscriber)?;

    let globals = dispatch::globals(&matches)?;
    let action = dispatch::handler(&matches)?;

    Ok((action, globals))
}
