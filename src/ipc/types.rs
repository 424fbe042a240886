use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::app::App;
use crate::service::SimulatedService;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub app: App<SimulatedService>,
    pub started: Instant,
}

impl AppState {
    pub fn new(app: App<SimulatedService>) -> Self {
        Self {
            app,
            started: Instant::now(),
        }
    }

    /// Wall-clock milliseconds since start; the scheduler's time base.
    pub fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Fires whatever the wall clock says is due.
    pub fn pump(&mut self) -> usize {
        let now = self.now_ms();
        self.app.advance_to(now)
    }

    /// Waits out every pending delay, firing in order, until nothing is
    /// queued.
    pub fn settle(&mut self) -> usize {
        let mut fired = 0;
        while let Some(due) = self.app.session.sched.next_due() {
            let now = self.now_ms();
            if due > now {
                std::thread::sleep(Duration::from_millis(due - now));
            }
            fired += self.app.advance_to(due.max(self.now_ms()));
        }
        fired
    }
}
