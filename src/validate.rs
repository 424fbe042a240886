//! Field validation for registration inputs.
//!
//! Every check trims the input first and is free of side effects, so the
//! renderer may call it on every blur without coordinating with the form.

use serde::Serialize;

pub const EMAIL_MESSAGE: &str = "Por favor ingresa un correo electrónico válido";
pub const PASSWORD_MESSAGE: &str = "La contraseña debe tener al menos 8 caracteres";
pub const INSTITUTIONAL_ID_MESSAGE: &str = "La matrícula debe tener 10 dígitos";

pub const PASSWORD_MIN_CHARS: usize = 8;
pub const INSTITUTIONAL_ID_DIGITS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Email,
    Password,
    InstitutionalId,
    Text,
}

impl FieldKind {
    /// Anything that is not one of the checked kinds validates as text.
    pub fn parse(s: &str) -> Self {
        match s {
            "email" => Self::Email,
            "password" => Self::Password,
            "institutionalId" | "matricula" => Self::InstitutionalId,
            _ => Self::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub valid: bool,
    pub message: String,
}

impl Verdict {
    fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    fn fail(message: &str) -> Self {
        Self {
            valid: false,
            message: message.to_string(),
        }
    }
}

pub fn validate_field(kind: FieldKind, text: &str) -> Verdict {
    let value = text.trim();
    match kind {
        FieldKind::Email if !is_email(value) => Verdict::fail(EMAIL_MESSAGE),
        FieldKind::Password if value.chars().count() < PASSWORD_MIN_CHARS => {
            Verdict::fail(PASSWORD_MESSAGE)
        }
        FieldKind::InstitutionalId if !is_institutional_id(value) => {
            Verdict::fail(INSTITUTIONAL_ID_MESSAGE)
        }
        _ => Verdict::ok(),
    }
}

/// `local@domain.tld`: exactly one `@`, no whitespace anywhere, and a dot in
/// the domain with text on both sides of it.
fn is_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Backtracking `[^@]+\.[^@]+` matches if any dot has text on both sides.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn is_institutional_id(s: &str) -> bool {
    s.len() == INSTITUTIONAL_ID_DIGITS && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(kind: FieldKind, s: &str) -> bool {
        validate_field(kind, s).valid
    }

    #[test]
    fn email_shape() {
        assert!(ok(FieldKind::Email, "a@b.com"));
        assert!(ok(FieldKind::Email, "first.last@mail.school.mx"));
        assert!(ok(FieldKind::Email, "  a@b.co  "));
        assert!(ok(FieldKind::Email, "a@b..c"));
        assert!(!ok(FieldKind::Email, "bad"));
        assert!(!ok(FieldKind::Email, "a @b.com"));
        assert!(!ok(FieldKind::Email, "a@ b.com"));
        assert!(!ok(FieldKind::Email, "a@b@c.com"));
        assert!(!ok(FieldKind::Email, "@b.com"));
        assert!(!ok(FieldKind::Email, "a@.com"));
        assert!(!ok(FieldKind::Email, "a@com."));
        assert!(!ok(FieldKind::Email, "a@com"));
    }

    #[test]
    fn email_failure_carries_message() {
        let v = validate_field(FieldKind::Email, "bad");
        assert_eq!(v.message, EMAIL_MESSAGE);
        assert_eq!(validate_field(FieldKind::Email, "a@b.com").message, "");
    }

    #[test]
    fn password_length_counts_chars_after_trim() {
        assert!(ok(FieldKind::Password, "longpass"));
        assert!(ok(FieldKind::Password, "contraseña"));
        assert!(!ok(FieldKind::Password, "short"));
        assert!(!ok(FieldKind::Password, "  1234567  "));
        assert!(!ok(FieldKind::Password, "ñññññññ"));
    }

    #[test]
    fn institutional_id_is_ten_ascii_digits() {
        assert!(ok(FieldKind::InstitutionalId, "1234567890"));
        assert!(!ok(FieldKind::InstitutionalId, "123456789"));
        assert!(!ok(FieldKind::InstitutionalId, "12345678901"));
        assert!(!ok(FieldKind::InstitutionalId, "12345abcde"));
        assert!(!ok(FieldKind::InstitutionalId, "１２３４５６７８９０"));
    }

    #[test]
    fn unknown_kinds_always_pass() {
        assert_eq!(FieldKind::parse("nombre"), FieldKind::Text);
        assert!(ok(FieldKind::parse("whatever"), ""));
    }

    #[test]
    fn repeated_calls_agree() {
        let a = validate_field(FieldKind::Password, "short");
        let b = validate_field(FieldKind::Password, "short");
        assert_eq!(a, b);
    }
}
