use std::io::{self, BufRead, Write};

use anyhow::Context;
use simplelog::{ColorChoice, TermLogger, TerminalMode};

use asistechd::app::App;
use asistechd::config::Cfg;
use asistechd::ipc;
use asistechd::service::SimulatedService;
use asistechd::session::Clock;

fn init_logging() -> anyhow::Result<()> {
    // stdout carries responses; logs go to stderr.
    let log_cfg = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("asistechd")
        .build();
    TermLogger::init(
        asistechd::log_level_from_env(),
        log_cfg,
        TerminalMode::Stderr,
        ColorChoice::Never,
    )
    .context("Unable to start logging")
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cfg = Cfg::from_env()?;
    log::info!("Configuration:\n{:#?}", &cfg);

    let app = App::new(
        SimulatedService::from_cfg(&cfg),
        cfg.effective_delays(),
        Clock::System,
    );
    let mut state = ipc::AppState::new(app);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(_) => break,
        };
        state.pump();
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("bad request line: {}", e);
                let resp = serde_json::json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": e.to_string() }
                });
                let _ = writeln!(stdout, "{}", resp);
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        state.pump();
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }
    log::info!("stdin closed; exiting");
    Ok(())
}
