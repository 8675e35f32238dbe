//! Diagnostics on stderr for `langton-evolve`.
//!
//! `RUST_LOG` wins when set. Otherwise `-v` shows the run start/finish
//! events, `-vv` adds state loads, saves and mirror repairs, and `-vvv`
//! traces every step of the ant and every mirror file touched. Without
//! `-v` only warnings are printed.
//!
//! ```bash
//! langton-evolve -vv run --steps 1000
//! RUST_LOG=langton_engine::mirror=trace langton-evolve sync-mirror
//! ```
//!
//! The ant's own history lives in `ant-log.md`; nothing here is persisted.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset, by number of `-v` flags.
fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "warn,langton_engine=info,langton_evolve=info",
        2 => "warn,langton_engine=debug,langton_evolve=debug",
        _ => "warn,langton_engine=trace,langton_evolve=trace",
    }
}

pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
