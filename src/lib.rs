/*!
Session core of the AsisTech attendance front end.

The presentation layer talks to this crate over line-delimited JSON (see
[`ipc`]); everything behind it is typed controller state, a session memory
store, and a virtual-time scheduler standing in for network latency.
*/

pub mod app;
pub mod config;
pub mod error;
pub mod feedback;
pub mod ipc;
pub mod memory;
pub mod model;
pub mod sched;
pub mod service;
pub mod session;
pub mod synth;
pub mod validate;
pub mod views;

/// Log filter for the sidecar, read from `LOG_LEVEL`; `warn` when unset or
/// unrecognised.
pub fn log_level_from_env() -> simplelog::LevelFilter {
    use simplelog::LevelFilter;

    let mut level_string = match std::env::var("LOG_LEVEL") {
        Err(_) => {
            return LevelFilter::Warn;
        }
        Ok(s) => s,
    };

    level_string.make_ascii_lowercase();
    match level_string.as_str() {
        "max" => LevelFilter::max(),
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Warn,
    }
}
