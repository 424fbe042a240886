use crate::config::Delays;
use crate::feedback::Feedback;
use crate::memory::MemoryStore;
use crate::model::{CheckInRecord, ExportFormat, Period, RegistrationRecord, ReportDimension, Screen};
use crate::sched::Scheduler;
use chrono::{Local, NaiveDateTime};

/// Work parked in the scheduler until its simulated delay elapses.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    SubmitRegistration(RegistrationRecord),
    SaveRoster { program: String },
    QueryDependent { dependent: String, period: Period },
    DependentReport { dependent: String },
    GenerateReport(Option<ReportDimension>),
    ExportReport(ExportFormat),
    LoadProfile,
    SaveCheckIn(CheckInRecord),
}

#[derive(Debug, Clone, Copy)]
pub enum Clock {
    System,
    Fixed(NaiveDateTime),
}

impl Clock {
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Self::System => Local::now().naive_local(),
            Self::Fixed(t) => *t,
        }
    }
}

/// Everything a view controller may touch besides its own form state.
pub struct Session {
    pub memory: MemoryStore,
    pub feedback: Feedback,
    pub sched: Scheduler<Operation>,
    pub delays: Delays,
    pub screen: Screen,
    pub clock: Clock,
}

impl Session {
    pub fn new(delays: Delays, clock: Clock) -> Self {
        Self {
            memory: MemoryStore::new(),
            feedback: Feedback::new(),
            sched: Scheduler::new(),
            delays,
            screen: Screen::RoleSelection,
            clock,
        }
    }

    pub fn schedule(&mut self, delay_ms: u64, op: Operation) {
        let due = self.sched.schedule(delay_ms, op);
        log::debug!("scheduled operation due at {}ms", due);
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn timestamp(&self) -> String {
        self.now().format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
    }
}
