use crate::config::Delays;
use crate::feedback::Intent;
use crate::model::Screen;
use crate::service::AttendanceService;
use crate::session::{Clock, Operation, Session};
use crate::views::admin::AdminView;
use crate::views::parent::ParentView;
use crate::views::registration::Registration;
use crate::views::roles::RoleSelection;
use crate::views::student::StudentView;
use crate::views::teacher::TeacherEditor;

/// One session with its controllers. Completions coming out of the
/// scheduler are handed back to the controller that queued them.
pub struct App<S> {
    pub session: Session,
    pub service: S,
    pub roles: RoleSelection,
    pub registration: Registration,
    pub teacher: TeacherEditor,
    pub parent: ParentView,
    pub admin: AdminView,
    pub student: StudentView,
}

impl<S: AttendanceService> App<S> {
    pub fn new(service: S, delays: Delays, clock: Clock) -> Self {
        Self {
            session: Session::new(delays, clock),
            service,
            roles: RoleSelection::default(),
            registration: Registration::default(),
            teacher: TeacherEditor::default(),
            parent: ParentView::default(),
            admin: AdminView::default(),
            student: StudentView::default(),
        }
    }

    /// Fires everything due by `now_ms`, one at a time, and returns how many
    /// operations completed.
    pub fn advance_to(&mut self, now_ms: u64) -> usize {
        let mut fired = 0;
        while matches!(self.session.sched.next_due(), Some(due) if due <= now_ms) {
            let Some(op) = self.session.sched.fire_next() else {
                break;
            };
            self.dispatch(op);
            fired += 1;
        }
        self.session.sched.advance_to(now_ms);
        fired
    }

    /// Runs the queue dry regardless of time.
    pub fn settle(&mut self) -> usize {
        let mut fired = 0;
        while let Some(op) = self.session.sched.fire_next() {
            self.dispatch(op);
            fired += 1;
        }
        fired
    }

    fn dispatch(&mut self, op: Operation) {
        let s = &mut self.session;
        match op {
            Operation::SubmitRegistration(record) => {
                let outcome = self.service.submit_registration(&record);
                self.registration.complete(s, record, outcome);
            }
            Operation::SaveRoster { program } => {
                let rows = self.teacher.rows_for_save(&program);
                let outcome = self.service.save_roster(&program, &rows);
                self.teacher.complete_save(s, &program, outcome);
            }
            Operation::QueryDependent { dependent, period } => {
                let today = s.now().date();
                let outcome = self.service.dependent_attendance(&dependent, period, today);
                self.parent.complete_query(s, outcome);
            }
            Operation::DependentReport { dependent } => {
                let outcome = self.service.dependent_report(&dependent);
                self.parent.complete_report(s, outcome);
            }
            Operation::GenerateReport(dimension) => {
                let outcome = self.service.generate_report(dimension);
                self.admin.complete_generate(s, dimension, outcome);
            }
            Operation::ExportReport(format) => {
                let outcome = self.service.export_report(format);
                self.admin.complete_export(s, format, outcome);
            }
            Operation::LoadProfile => self.student.complete_profile(s),
            Operation::SaveCheckIn(record) => {
                let outcome = self.service.record_check_in(&record);
                self.student.complete_save(s, record, outcome);
            }
        }
    }

    pub fn show(&mut self, screen: Screen) {
        if self.session.screen != screen {
            log::debug!("screen {:?} -> {:?}", self.session.screen, screen);
        }
        self.session.screen = screen;
        self.session.feedback.note_navigation(screen);
    }

    /// Dismisses the modal and follows its intent, if any.
    pub fn close_modal(&mut self) -> Option<Screen> {
        match self.session.feedback.close_modal()? {
            Intent::Navigate(screen) => {
                self.show(screen);
                if screen == Screen::Registration {
                    self.registration.open(&self.session);
                }
                Some(screen)
            }
            Intent::ResetCheckIn => {
                self.student.reset(&self.session);
                None
            }
        }
    }
}
