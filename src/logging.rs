//! Console logging setup shared by the binaries

use env_logger::{Builder, Env, Target};

/// Route `log` records to stdout as plain lines
///
/// The default level is `info`, or `debug` with `verbose`. `RUST_LOG`
/// overrides both. Calling this more than once is harmless.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    let _ = Builder::from_env(Env::default().default_filter_or(default_level))
        .target(Target::Stdout)
        .format_timestamp(None)
        .format_target(false)
        .format_level(false)
        .try_init();
}
