//! Student self check-in: profile load, then a small two-field form.

use crate::error::{ActionError, FieldError};
use crate::feedback::Intent;
use crate::memory::{KEY_ATTENDANCE_LOG, KEY_USER_DATA};
use crate::model::{CheckInRecord, RegistrationRecord, StudentProfile};
use crate::service::TransportError;
use crate::session::{Operation, Session};
use crate::synth;
use serde::Serialize;

pub const LOADING_MESSAGE: &str = "Cargando datos del estudiante...";
pub const INCOMPLETE_MESSAGE: &str = "Por favor completa todos los campos requeridos";
pub const SAVING_MESSAGE: &str = "Guardando registro de asistencia...";
pub const SAVED_MESSAGE: &str = "¡Registro de asistencia guardado exitosamente!";
pub const SAVE_FAILED_MESSAGE: &str = "Error al guardar el registro. Por favor intenta nuevamente.";
const REQUIRED_MESSAGE: &str = "Campo requerido";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentField {
    Instructor,
    Subject,
    Date,
    Time,
}

impl StudentField {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "instructor" | "docente" => Some(Self::Instructor),
            "subject" | "materia" => Some(Self::Subject),
            "date" | "fecha" => Some(Self::Date),
            "time" | "hora" => Some(Self::Time),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct StudentView {
    profile: Option<StudentProfile>,
    date: String,
    time: String,
    instructor: String,
    subject: String,
    saving: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSnapshot {
    pub profile: Option<StudentProfile>,
    pub loaded: bool,
    pub date: String,
    pub time: String,
    pub instructor: String,
    pub subject: String,
    pub can_save: bool,
    pub saving: bool,
}

/// Profile from the stored registration if it carries a name, otherwise the
/// sample student.
pub fn profile_from_memory(s: &Session) -> StudentProfile {
    match s.memory.get::<RegistrationRecord>(KEY_USER_DATA) {
        Some(rec) if !rec.name.trim().is_empty() => StudentProfile {
            name: rec.name,
            program: rec.role.program_label().to_string(),
            institutional_id: if rec.institutional_id.is_empty() {
                synth::DEFAULT_INSTITUTIONAL_ID.to_string()
            } else {
                rec.institutional_id
            },
        },
        _ => synth::default_profile(),
    }
}

impl StudentView {
    pub fn open(&mut self, s: &mut Session) {
        self.profile = None;
        self.refresh_clock(s);
        s.feedback.show_loading(LOADING_MESSAGE);
        let delay = s.delays.student_profile;
        s.schedule(delay, Operation::LoadProfile);
    }

    fn refresh_clock(&mut self, s: &Session) {
        let now = s.now();
        self.date = now.format("%Y-%m-%d").to_string();
        self.time = now.format("%H:%M").to_string();
    }

    pub fn complete_profile(&mut self, s: &mut Session) {
        let profile = profile_from_memory(s);
        log::debug!("student profile loaded: {}", profile.institutional_id);
        self.profile = Some(profile);
        s.feedback.hide_loading();
    }

    pub fn input(&mut self, field: StudentField, text: &str) {
        let slot = match field {
            StudentField::Instructor => &mut self.instructor,
            StudentField::Subject => &mut self.subject,
            StudentField::Date => &mut self.date,
            StudentField::Time => &mut self.time,
        };
        *slot = text.to_string();
    }

    pub fn can_save(&self) -> bool {
        !self.instructor.trim().is_empty()
            && !self.subject.trim().is_empty()
            && self.profile.is_some()
    }

    fn missing(&self) -> Vec<FieldError> {
        let mut out = Vec::new();
        for (name, value) in [("instructor", &self.instructor), ("subject", &self.subject)] {
            if value.trim().is_empty() {
                out.push(FieldError {
                    field: name.to_string(),
                    message: REQUIRED_MESSAGE.to_string(),
                });
            }
        }
        if self.profile.is_none() {
            out.push(FieldError {
                field: "profile".to_string(),
                message: "Datos del estudiante aún no cargados".to_string(),
            });
        }
        out
    }

    pub fn save(&mut self, s: &mut Session) -> Result<(), ActionError> {
        if self.saving {
            return Err(ActionError::Busy("check-in"));
        }
        let (true, Some(profile)) = (self.can_save(), self.profile.clone()) else {
            s.feedback.show_modal(INCOMPLETE_MESSAGE, None);
            return Err(ActionError::Validation(self.missing()));
        };
        let record = CheckInRecord {
            student: profile,
            date: self.date.clone(),
            time: self.time.clone(),
            instructor: self.instructor.trim().to_string(),
            subject: self.subject.trim().to_string(),
            timestamp: s.timestamp(),
        };
        s.feedback.show_loading(SAVING_MESSAGE);
        let delay = s.delays.student_save;
        s.schedule(delay, Operation::SaveCheckIn(record));
        self.saving = true;
        Ok(())
    }

    pub fn complete_save(
        &mut self,
        s: &mut Session,
        record: CheckInRecord,
        outcome: Result<(), TransportError>,
    ) {
        self.saving = false;
        s.feedback.hide_loading();
        if let Err(e) = outcome {
            log::warn!("check-in failed: {}", e);
            s.feedback.show_modal(SAVE_FAILED_MESSAGE, None);
            return;
        }
        match s.memory.push(KEY_ATTENDANCE_LOG, &record) {
            Ok(n) => log::info!("check-in stored ({} in session)", n),
            Err(e) => {
                log::error!("unable to store check-in: {}", e);
                s.feedback.show_modal(SAVE_FAILED_MESSAGE, None);
                return;
            }
        }
        s.feedback
            .show_modal(SAVED_MESSAGE, Some(Intent::ResetCheckIn));
    }

    /// Runs when the saved notice is dismissed.
    pub fn reset(&mut self, s: &Session) {
        self.instructor.clear();
        self.subject.clear();
        self.refresh_clock(s);
    }

    pub fn snapshot(&self) -> StudentSnapshot {
        StudentSnapshot {
            profile: self.profile.clone(),
            loaded: self.profile.is_some(),
            date: self.date.clone(),
            time: self.time.clone(),
            instructor: self.instructor.clone(),
            subject: self.subject.clone(),
            can_save: self.can_save(),
            saving: self.saving,
        }
    }
}
