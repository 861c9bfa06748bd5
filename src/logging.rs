//! Logger setup for the browser host.
//!
//! On wasm32 records go to the browser console through `console_log`, and
//! panics are reported there by `console_error_panic_hook`. Elsewhere only
//! the level filter is set, so native test runs stay quiet unless a logger
//! was installed by the test harness.

#[cfg(test)]
#[path = "logging_test.rs"]
mod logging_test;

/// Install the console logger and panic hook, filtering below `level`.
///
/// Safe to call more than once; later calls only adjust the level.
pub fn init(level: log::Level) {
    log::set_max_level(level.to_level_filter());

    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(level).is_err() {
            log::debug!("console logger already installed");
        }
    }
}

/// Parse a level name from host configuration, defaulting to `Info`.
#[must_use]
pub fn level_from_name(name: &str) -> log::Level {
    name.parse().unwrap_or(log::Level::Info)
}
