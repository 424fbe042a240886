use crate::error::ActionError;
use crate::model::{AttendanceSummary, Period};
use crate::service::TransportError;
use crate::session::{Operation, Session};
use crate::synth::{self, Dependent};
use serde::Serialize;

pub const SELECT_DEPENDENT_MESSAGE: &str = "Por favor selecciona un estudiante";
pub const SELECT_DEPENDENT_REPORT_MESSAGE: &str =
    "Por favor selecciona un estudiante para generar el reporte";
pub const QUERYING_MESSAGE: &str = "Consultando asistencia...";
pub const QUERY_FAILED_MESSAGE: &str =
    "Error al consultar la asistencia. Por favor intenta nuevamente.";
pub const REPORTING_MESSAGE: &str = "Generando reporte PDF...";
pub const REPORT_DONE_MESSAGE: &str =
    "Reporte generado exitosamente. Se descargará automáticamente.";
pub const REPORT_FAILED_MESSAGE: &str = "Error al generar el reporte. Por favor intenta nuevamente.";

#[derive(Debug)]
pub struct ParentView {
    dependent: Option<String>,
    period: Period,
    summary: Option<AttendanceSummary>,
}

impl Default for ParentView {
    fn default() -> Self {
        Self {
            dependent: None,
            period: Period::Week,
            summary: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentSnapshot {
    pub dependents: &'static [Dependent],
    pub dependent: Option<String>,
    pub period: Period,
    pub sections_visible: bool,
    pub summary: Option<AttendanceSummary>,
}

impl ParentView {
    /// A preselected dependent is queried straight away.
    pub fn open(&mut self, s: &mut Session, dependent: Option<&str>) -> Result<(), ActionError> {
        self.summary = None;
        self.select_dependent(dependent.unwrap_or(""))?;
        if self.dependent.is_some() {
            self.query(s)?;
        }
        Ok(())
    }

    /// An empty id clears the selection.
    pub fn select_dependent(&mut self, id: &str) -> Result<(), ActionError> {
        let id = id.trim();
        if id.is_empty() {
            self.dependent = None;
            return Ok(());
        }
        let d = synth::dependent(id).ok_or_else(|| ActionError::UnknownOption {
            what: "dependent",
            value: id.to_string(),
        })?;
        self.dependent = Some(d.id.to_string());
        Ok(())
    }

    pub fn select_period(&mut self, name: &str) -> Period {
        self.period = Period::parse_or_week(name);
        self.period
    }

    fn require_dependent(&self, s: &mut Session, message: &'static str) -> Result<String, ActionError> {
        match &self.dependent {
            Some(d) => Ok(d.clone()),
            None => {
                s.feedback.show_modal(message, None);
                Err(ActionError::MissingSelection(message))
            }
        }
    }

    pub fn query(&mut self, s: &mut Session) -> Result<(), ActionError> {
        let dependent = self.require_dependent(s, SELECT_DEPENDENT_MESSAGE)?;
        s.feedback.show_loading(QUERYING_MESSAGE);
        let delay = s.delays.parent_query;
        s.schedule(
            delay,
            Operation::QueryDependent {
                dependent,
                period: self.period,
            },
        );
        Ok(())
    }

    pub fn complete_query(&mut self, s: &mut Session, outcome: Result<AttendanceSummary, TransportError>) {
        s.feedback.hide_loading();
        match outcome {
            Ok(summary) => {
                log::debug!(
                    "dependent summary: {}/{}/{} ({}%)",
                    summary.present,
                    summary.absent,
                    summary.late,
                    summary.percentage
                );
                self.summary = Some(summary);
            }
            Err(e) => {
                log::warn!("attendance query failed: {}", e);
                s.feedback.show_modal(QUERY_FAILED_MESSAGE, None);
            }
        }
    }

    pub fn report(&mut self, s: &mut Session) -> Result<(), ActionError> {
        let dependent = self.require_dependent(s, SELECT_DEPENDENT_REPORT_MESSAGE)?;
        s.feedback.show_loading(REPORTING_MESSAGE);
        let delay = s.delays.parent_report;
        s.schedule(delay, Operation::DependentReport { dependent });
        Ok(())
    }

    pub fn complete_report(&mut self, s: &mut Session, outcome: Result<(), TransportError>) {
        s.feedback.hide_loading();
        match outcome {
            Ok(()) => s.feedback.show_modal(REPORT_DONE_MESSAGE, None),
            Err(e) => {
                log::warn!("dependent report failed: {}", e);
                s.feedback.show_modal(REPORT_FAILED_MESSAGE, None);
            }
        }
    }

    pub fn snapshot(&self) -> ParentSnapshot {
        ParentSnapshot {
            dependents: &synth::DEPENDENTS,
            dependent: self.dependent.clone(),
            period: self.period,
            sections_visible: self.summary.is_some(),
            summary: self.summary.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Delays;
    use crate::service::{AttendanceService, ScriptedService};
    use crate::session::Clock;

    #[test]
    fn query_without_dependent_shows_modal_and_schedules_nothing() {
        let mut s = Session::new(Delays::default(), Clock::System);
        let mut p = ParentView::default();
        assert_eq!(p.query(&mut s).unwrap_err().code(), "missing_selection");
        assert_eq!(s.feedback.modal().unwrap().message, SELECT_DEPENDENT_MESSAGE);
        assert_eq!(p.report(&mut s).unwrap_err().code(), "missing_selection");
        assert_eq!(
            s.feedback.modal().unwrap().message,
            SELECT_DEPENDENT_REPORT_MESSAGE
        );
        assert_eq!(s.sched.pending(), 0);
    }

    #[test]
    fn open_with_preselected_dependent_queries_with_current_period() {
        let mut s = Session::new(Delays::default(), Clock::System);
        let mut p = ParentView::default();
        p.select_period("mes");
        p.open(&mut s, Some("maria")).unwrap();
        assert_eq!(s.sched.pending(), 1);
        assert_eq!(s.sched.next_due(), Some(1500));
        let op = s.sched.fire_next().unwrap();
        assert_eq!(
            op,
            Operation::QueryDependent {
                dependent: "maria".into(),
                period: Period::Month
            }
        );
    }

    #[test]
    fn report_shows_progress_then_download_notice() {
        let mut s = Session::new(Delays::default(), Clock::System);
        let mut p = ParentView::default();
        p.select_dependent("jose").unwrap();
        p.report(&mut s).unwrap();
        assert_eq!(s.feedback.loading(), Some(REPORTING_MESSAGE));
        assert_eq!(s.sched.next_due(), Some(2000));

        let mut service = ScriptedService::succeeding();
        let Some(Operation::DependentReport { dependent }) = s.sched.fire_next() else {
            panic!("expected a report operation");
        };
        assert_eq!(dependent, "jose");
        let outcome = service.dependent_report(&dependent);
        p.complete_report(&mut s, outcome);
        assert_eq!(s.feedback.loading(), None);
        assert_eq!(s.feedback.modal().unwrap().message, REPORT_DONE_MESSAGE);
        assert_eq!(service.calls, vec!["dependent-report"]);
    }

    #[test]
    fn failed_report_shows_retry_notice() {
        let mut s = Session::new(Delays::zero(), Clock::System);
        let mut p = ParentView::default();
        p.select_dependent("maria").unwrap();
        p.report(&mut s).unwrap();
        let mut service = ScriptedService::with_outcomes([false]);
        let outcome = service.dependent_report("maria");
        p.complete_report(&mut s, outcome);
        assert_eq!(s.feedback.loading(), None);
        assert_eq!(s.feedback.modal().unwrap().message, REPORT_FAILED_MESSAGE);
        assert!(!p.snapshot().sections_visible);
    }

    #[test]
    fn unknown_dependent_is_refused() {
        let mut p = ParentView::default();
        assert_eq!(p.select_dependent("nobody").unwrap_err().code(), "bad_params");
        assert_eq!(p.select_period("whenever"), Period::Week);
    }
}
