use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_tree::time::Uptime;
use tracing_tree::HierarchicalLayer;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Show startup, shutdown, and error messages.
    #[default]
    Default,
    /// Suppress all output.
    Quiet,
    /// Show all messages, including debug messages.
    Verbose,
}

/// Configure `tracing` based on the given [`Level`], taking the `RUST_LOG` environment
/// variable into account.
pub fn setup_logging(level: Level) {
    match level {
        Level::Default | Level::Quiet => {
            let directive = if level == Level::Quiet {
                LevelFilter::OFF
            } else {
                LevelFilter::INFO
            };

            // Show lifecycle messages, but allow `RUST_LOG` to override.
            let filter = EnvFilter::builder()
                .with_default_directive(directive.into())
                .from_env_lossy();

            // Regardless of the tracing level, show messages without any adornment.
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .without_time()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        Level::Verbose => {
            // Show `DEBUG` messages from this crate, but allow `RUST_LOG` to override.
            let filter = EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new("vercheck=debug"))
                .unwrap();

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    HierarchicalLayer::default()
                        .with_targets(true)
                        .with_timer(Uptime::default())
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
}
