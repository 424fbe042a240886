//! Registration form and its submit workflow.
//!
//! `SelectingRole → FillingForm → Submitting → {Succeeded, Failed}`. Nothing
//! reaches the memory store until the service accepts the record, so a
//! failed attempt leaves the session as it was and may simply be retried.

use crate::error::{ActionError, FieldError};
use crate::feedback::Intent;
use crate::memory::{KEY_SELECTED_ROLE, KEY_USER_DATA};
use crate::model::{RegistrationRecord, Role, Screen};
use crate::service::TransportError;
use crate::session::{Operation, Session};
use crate::validate::{validate_field, FieldKind, Verdict};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use uuid::Uuid;

pub const FIX_ERRORS_MESSAGE: &str = "Por favor corrige los errores en el formulario";
pub const SUBMITTING_MESSAGE: &str = "Registrando usuario...";
pub const SUCCESS_MESSAGE: &str = "¡Registro completado exitosamente!";
pub const FAILURE_MESSAGE: &str = "Error al registrar. Por favor intenta nuevamente.";
pub const NO_ROLE_MESSAGE: &str = "Por favor selecciona un rol antes de registrarte";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    Password,
    InstitutionalId,
}

impl Field {
    pub const REQUIRED: [Field; 4] = [
        Field::Name,
        Field::Email,
        Field::Password,
        Field::InstitutionalId,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "name" | "nombre" => Some(Self::Name),
            "email" => Some(Self::Email),
            "password" => Some(Self::Password),
            "institutionalId" | "matricula" => Some(Self::InstitutionalId),
            _ => None,
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Self::Name => FieldKind::Text,
            Self::Email => FieldKind::Email,
            Self::Password => FieldKind::Password,
            Self::InstitutionalId => FieldKind::InstitutionalId,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::InstitutionalId => "institutionalId",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RegistrationState {
    SelectingRole,
    FillingForm,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug)]
pub struct Registration {
    role: Option<Role>,
    state: RegistrationState,
    values: BTreeMap<Field, String>,
    errors: BTreeMap<Field, String>,
}

impl Default for Registration {
    fn default() -> Self {
        Self {
            role: None,
            state: RegistrationState::SelectingRole,
            values: BTreeMap::new(),
            errors: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationView {
    pub role: Option<Role>,
    pub role_info: Option<String>,
    pub state: RegistrationState,
    pub values: BTreeMap<Field, String>,
    pub errors: BTreeMap<Field, String>,
}

pub fn password_digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

impl Registration {
    pub fn state(&self) -> RegistrationState {
        self.state
    }

    /// Picks up the role chosen on the previous screen.
    pub fn open(&mut self, s: &Session) {
        self.role = s.memory.get::<Role>(KEY_SELECTED_ROLE);
        if self.state == RegistrationState::Submitting {
            return;
        }
        self.state = match self.role {
            Some(_) => RegistrationState::FillingForm,
            None => RegistrationState::SelectingRole,
        };
    }

    fn value(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn input(&mut self, field: Field, text: &str) -> Result<(), ActionError> {
        if self.state == RegistrationState::Submitting {
            return Err(ActionError::Busy("registration"));
        }
        self.values.insert(field, text.to_string());
        self.errors.remove(&field);
        if self.state == RegistrationState::Failed {
            self.state = RegistrationState::FillingForm;
        }
        Ok(())
    }

    /// Checks one field and records or clears its message.
    pub fn blur(&mut self, field: Field) -> Verdict {
        let verdict = validate_field(field.kind(), self.value(field));
        if verdict.valid {
            self.errors.remove(&field);
        } else {
            self.errors.insert(field, verdict.message.clone());
        }
        verdict
    }

    pub fn submit(&mut self, s: &mut Session) -> Result<(), ActionError> {
        if self.state == RegistrationState::Submitting {
            return Err(ActionError::Busy("registration"));
        }
        if self.role.is_none() {
            self.role = s.memory.get::<Role>(KEY_SELECTED_ROLE);
        }
        let Some(role) = self.role else {
            s.feedback.show_modal(
                NO_ROLE_MESSAGE,
                Some(Intent::Navigate(Screen::RoleSelection)),
            );
            return Err(ActionError::MissingSelection(NO_ROLE_MESSAGE));
        };

        let failures: Vec<FieldError> = Field::REQUIRED
            .iter()
            .filter_map(|&f| {
                let v = self.blur(f);
                (!v.valid).then(|| FieldError {
                    field: f.as_str().to_string(),
                    message: v.message,
                })
            })
            .collect();
        if !failures.is_empty() {
            self.state = RegistrationState::FillingForm;
            s.feedback.show_modal(FIX_ERRORS_MESSAGE, None);
            log::debug!("registration rejected: {} invalid field(s)", failures.len());
            return Err(ActionError::Validation(failures));
        }

        let id = Uuid::new_v4().to_string();
        let record = RegistrationRecord {
            password_digest: password_digest(&id, self.value(Field::Password)),
            id,
            role,
            name: self.value(Field::Name).trim().to_string(),
            email: self.value(Field::Email).trim().to_string(),
            institutional_id: self.value(Field::InstitutionalId).trim().to_string(),
            timestamp: s.timestamp(),
        };
        self.state = RegistrationState::Submitting;
        s.feedback.show_loading(SUBMITTING_MESSAGE);
        let delay = s.delays.registration;
        s.schedule(delay, Operation::SubmitRegistration(record));
        log::info!("registration submitted for role {}", role.as_str());
        Ok(())
    }

    pub fn complete(
        &mut self,
        s: &mut Session,
        record: RegistrationRecord,
        outcome: Result<(), TransportError>,
    ) {
        s.feedback.hide_loading();
        match outcome {
            Ok(()) => {
                if let Err(e) = s.memory.save(KEY_USER_DATA, &record) {
                    log::error!("unable to store registration: {}", e);
                    self.state = RegistrationState::Failed;
                    s.feedback.show_modal(FAILURE_MESSAGE, None);
                    return;
                }
                self.state = RegistrationState::Succeeded;
                s.feedback.show_modal(
                    SUCCESS_MESSAGE,
                    Some(Intent::Navigate(record.role.dashboard())),
                );
                log::info!("registration {} stored", record.id);
            }
            Err(e) => {
                log::warn!("registration failed: {}", e);
                self.state = RegistrationState::Failed;
                s.feedback.show_modal(FAILURE_MESSAGE, None);
            }
        }
    }

    pub fn snapshot(&self) -> RegistrationView {
        // The password never leaves the controller.
        let mut values = self.values.clone();
        if let Some(p) = values.get_mut(&Field::Password) {
            *p = "*".repeat(p.chars().count());
        }
        RegistrationView {
            role: self.role,
            role_info: self
                .role
                .map(|r| format!("Registro como: {}", r.display_name())),
            state: self.state,
            values,
            errors: self.errors.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Delays;
    use crate::session::Clock;

    fn session_with_role(role: Option<Role>) -> Session {
        let mut s = Session::new(Delays::default(), Clock::System);
        if let Some(r) = role {
            s.memory.save(KEY_SELECTED_ROLE, &r).unwrap();
        }
        s
    }

    fn fill(r: &mut Registration, email: &str, password: &str, id: &str) {
        r.input(Field::Name, "Ana López").unwrap();
        r.input(Field::Email, email).unwrap();
        r.input(Field::Password, password).unwrap();
        r.input(Field::InstitutionalId, id).unwrap();
    }

    #[test]
    fn open_without_role_stays_selecting() {
        let s = session_with_role(None);
        let mut r = Registration::default();
        r.open(&s);
        assert_eq!(r.state(), RegistrationState::SelectingRole);
    }

    #[test]
    fn two_bad_fields_no_transition_no_call() {
        let mut s = session_with_role(Some(Role::Student));
        let mut r = Registration::default();
        r.open(&s);
        fill(&mut r, "bad", "short", "1234567890");

        let err = r.submit(&mut s).unwrap_err();
        let fields: Vec<_> = err
            .field_errors()
            .unwrap()
            .iter()
            .map(|f| f.field.as_str())
            .collect();
        assert_eq!(fields, vec!["email", "password"]);
        assert_eq!(r.state(), RegistrationState::FillingForm);
        assert_eq!(s.sched.pending(), 0);
        assert_eq!(s.feedback.modal().unwrap().message, FIX_ERRORS_MESSAGE);
        assert_eq!(r.snapshot().errors.len(), 2);
    }

    #[test]
    fn any_invalid_combination_never_schedules() {
        let emails = ["a@b.com", "bad"];
        let passwords = ["longpass1", "short"];
        let ids = ["1234567890", "12"];
        for e in emails {
            for p in passwords {
                for i in ids {
                    let all_valid = e == "a@b.com" && p == "longpass1" && i == "1234567890";
                    let mut s = session_with_role(Some(Role::Teacher));
                    let mut r = Registration::default();
                    r.open(&s);
                    fill(&mut r, e, p, i);
                    assert_eq!(r.submit(&mut s).is_ok(), all_valid);
                    assert_eq!(s.sched.pending(), usize::from(all_valid));
                }
            }
        }
    }

    #[test]
    fn valid_form_schedules_exactly_one_call() {
        let mut s = session_with_role(Some(Role::Parent));
        let mut r = Registration::default();
        r.open(&s);
        fill(&mut r, "a@b.com", "longpass1", "1234567890");
        r.submit(&mut s).unwrap();
        assert_eq!(r.state(), RegistrationState::Submitting);
        assert_eq!(s.sched.pending(), 1);
        assert_eq!(s.sched.next_due(), Some(2000));
        assert_eq!(s.feedback.loading(), Some(SUBMITTING_MESSAGE));

        assert_eq!(r.submit(&mut s).unwrap_err().code(), "busy");
        assert_eq!(s.sched.pending(), 1);
    }

    #[test]
    fn submit_without_role_is_a_missing_selection() {
        let mut s = session_with_role(None);
        let mut r = Registration::default();
        r.open(&s);
        fill(&mut r, "a@b.com", "longpass1", "1234567890");
        assert_eq!(r.submit(&mut s).unwrap_err().code(), "missing_selection");
        assert_eq!(s.sched.pending(), 0);
    }

    #[test]
    fn blur_sets_and_input_clears_messages() {
        let mut r = Registration::default();
        r.input(Field::InstitutionalId, "123").unwrap();
        assert!(!r.blur(Field::InstitutionalId).valid);
        assert!(r.snapshot().errors.contains_key(&Field::InstitutionalId));
        r.input(Field::InstitutionalId, "1234").unwrap();
        assert!(r.snapshot().errors.is_empty());
    }

    #[test]
    fn snapshot_masks_password() {
        let mut r = Registration::default();
        r.input(Field::Password, "longpass1").unwrap();
        assert_eq!(r.snapshot().values[&Field::Password], "*********");
    }

    #[test]
    fn digest_is_salted() {
        assert_ne!(password_digest("a", "pw"), password_digest("b", "pw"));
        assert_eq!(password_digest("a", "pw").len(), 64);
    }
}
