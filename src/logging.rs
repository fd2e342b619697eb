use env_logger::{Builder, Env};
use log::LevelFilter;

/// Environment variable that turns on debug logging.
pub const VERBOSE_ENV: &str = "TILE_PLATFORMER_VERBOSE";

/// Whether a [`VERBOSE_ENV`] value asks for debug output. Unset, empty,
/// `0` and `false` do not.
pub fn verbose_requested(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") | Some("0") => false,
        Some(v) => !v.eq_ignore_ascii_case("false"),
    }
}

/// Initializes the global logger.
///
/// The game owns the terminal while it runs, so by default only warnings
/// reach stderr. `verbose` lowers that to debug; `RUST_LOG` overrides both.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);

    // `try_init` only fails if a logger was already set, which tests do.
    let _ = builder.try_init();
}
