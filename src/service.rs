//! The backend collaborator. Calls are made when a scheduled operation
//! fires, never at scheduling time.

use crate::config::Cfg;
use crate::model::{
    AttendanceSummary, CheckInRecord, ExportFormat, Period, RegistrationRecord, ReportDimension,
    RosterRow,
};
use crate::synth;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("simulated transport failure during {0}")]
    Simulated(&'static str),
}

pub trait AttendanceService {
    fn submit_registration(&mut self, record: &RegistrationRecord) -> Result<(), TransportError>;

    fn save_roster(&mut self, program: &str, rows: &[RosterRow]) -> Result<(), TransportError>;

    fn record_check_in(&mut self, record: &CheckInRecord) -> Result<(), TransportError>;

    fn dependent_attendance(
        &mut self,
        dependent: &str,
        period: Period,
        today: NaiveDate,
    ) -> Result<AttendanceSummary, TransportError>;

    fn dependent_report(&mut self, dependent: &str) -> Result<(), TransportError>;

    fn generate_report(&mut self, dimension: Option<ReportDimension>) -> Result<(), TransportError>;

    fn export_report(&mut self, format: ExportFormat) -> Result<(), TransportError>;
}

/// Random outcomes at the configured success rates; data from `synth`.
pub struct SimulatedService {
    rng: StdRng,
    registration_success_rate: f64,
    checkin_success_rate: f64,
}

impl SimulatedService {
    pub fn new(rng: StdRng, registration_success_rate: f64, checkin_success_rate: f64) -> Self {
        Self {
            rng,
            registration_success_rate,
            checkin_success_rate,
        }
    }

    pub fn from_cfg(cfg: &Cfg) -> Self {
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(
            rng,
            cfg.registration_success_rate,
            cfg.checkin_success_rate,
        )
    }

    fn roll(&mut self, rate: f64, what: &'static str) -> Result<(), TransportError> {
        if self.rng.gen_bool(rate) {
            Ok(())
        } else {
            log::warn!("simulated failure: {}", what);
            Err(TransportError::Simulated(what))
        }
    }
}

impl AttendanceService for SimulatedService {
    fn submit_registration(&mut self, record: &RegistrationRecord) -> Result<(), TransportError> {
        log::info!("registering {} as {}", record.id, record.role.as_str());
        self.roll(self.registration_success_rate, "registration")
    }

    fn save_roster(&mut self, program: &str, rows: &[RosterRow]) -> Result<(), TransportError> {
        log::info!("saving {} roster rows for {}", rows.len(), program);
        Ok(())
    }

    fn record_check_in(&mut self, record: &CheckInRecord) -> Result<(), TransportError> {
        log::info!(
            "check-in {} / {} at {} {}",
            record.student.institutional_id,
            record.subject,
            record.date,
            record.time
        );
        self.roll(self.checkin_success_rate, "check-in")
    }

    fn dependent_attendance(
        &mut self,
        dependent: &str,
        period: Period,
        today: NaiveDate,
    ) -> Result<AttendanceSummary, TransportError> {
        log::debug!("attendance for {} over {:?}", dependent, period);
        Ok(synth::dependent_summary(&mut self.rng, period, today))
    }

    fn dependent_report(&mut self, dependent: &str) -> Result<(), TransportError> {
        log::info!("report requested for {}", dependent);
        Ok(())
    }

    fn generate_report(&mut self, dimension: Option<ReportDimension>) -> Result<(), TransportError> {
        log::info!(
            "report by {}",
            dimension.map(ReportDimension::as_str).unwrap_or("none")
        );
        Ok(())
    }

    fn export_report(&mut self, format: ExportFormat) -> Result<(), TransportError> {
        log::info!("export to {}", format.label());
        Ok(())
    }
}

/// Test double: outcomes are taken from a script (success once it runs
/// out) and every call is recorded by name.
pub struct ScriptedService {
    outcomes: VecDeque<bool>,
    rng: StdRng,
    pub calls: Vec<&'static str>,
}

impl ScriptedService {
    pub fn succeeding() -> Self {
        Self::with_outcomes(std::iter::empty::<bool>())
    }

    pub fn with_outcomes(outcomes: impl IntoIterator<Item = bool>) -> Self {
        Self {
            outcomes: outcomes.into_iter().collect(),
            rng: StdRng::seed_from_u64(0),
            calls: Vec::new(),
        }
    }

    fn next(&mut self, what: &'static str) -> Result<(), TransportError> {
        self.calls.push(what);
        if self.outcomes.pop_front().unwrap_or(true) {
            Ok(())
        } else {
            Err(TransportError::Simulated(what))
        }
    }
}

impl AttendanceService for ScriptedService {
    fn submit_registration(&mut self, _record: &RegistrationRecord) -> Result<(), TransportError> {
        self.next("registration")
    }

    fn save_roster(&mut self, _program: &str, _rows: &[RosterRow]) -> Result<(), TransportError> {
        self.next("roster")
    }

    fn record_check_in(&mut self, _record: &CheckInRecord) -> Result<(), TransportError> {
        self.next("check-in")
    }

    fn dependent_attendance(
        &mut self,
        _dependent: &str,
        period: Period,
        today: NaiveDate,
    ) -> Result<AttendanceSummary, TransportError> {
        self.next("attendance")?;
        Ok(synth::dependent_summary(&mut self.rng, period, today))
    }

    fn dependent_report(&mut self, _dependent: &str) -> Result<(), TransportError> {
        self.next("dependent-report")
    }

    fn generate_report(&mut self, _dimension: Option<ReportDimension>) -> Result<(), TransportError> {
        self.next("report")
    }

    fn export_report(&mut self, _format: ExportFormat) -> Result<(), TransportError> {
        self.next("export")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_rates_at_the_extremes_are_deterministic() {
        let mut always = SimulatedService::new(StdRng::seed_from_u64(1), 1.0, 1.0);
        let mut never = SimulatedService::new(StdRng::seed_from_u64(1), 0.0, 0.0);
        let rec = RegistrationRecord {
            id: "r".into(),
            role: crate::model::Role::Student,
            name: "n".into(),
            email: "a@b.com".into(),
            password_digest: "d".into(),
            institutional_id: "1234567890".into(),
            timestamp: "t".into(),
        };
        for _ in 0..20 {
            assert!(always.submit_registration(&rec).is_ok());
            assert_eq!(
                never.submit_registration(&rec),
                Err(TransportError::Simulated("registration"))
            );
        }
    }

    #[test]
    fn scripted_falls_back_to_success() {
        let mut s = ScriptedService::with_outcomes([false]);
        assert!(s.export_report(ExportFormat::Document).is_err());
        assert!(s.export_report(ExportFormat::Document).is_ok());
        assert_eq!(s.calls, vec!["export", "export"]);
    }
}
