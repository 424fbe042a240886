use crate::error::ActionError;
use crate::feedback::Intent;
use crate::memory::KEY_SELECTED_ROLE;
use crate::model::{Role, Screen};
use crate::session::Session;
use serde::Serialize;

pub const NAVIGATING_MESSAGE: &str = "Navegando a registro...";

#[derive(Debug, Default)]
pub struct RoleSelection {
    selected: Option<Role>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSelectionView {
    pub selected: Option<Role>,
    pub next_enabled: bool,
}

impl RoleSelection {
    pub fn select(&mut self, role: Role) {
        self.selected = Some(role);
    }

    /// Stores the role and queues navigation to registration once the user
    /// dismisses the notice.
    pub fn next(&mut self, s: &mut Session) -> Result<Role, ActionError> {
        let role = self
            .selected
            .ok_or(ActionError::MissingSelection("Selecciona un rol para continuar"))?;
        s.memory.save(KEY_SELECTED_ROLE, &role)?;
        log::info!("role selected: {}", role.as_str());
        s.feedback
            .show_modal(NAVIGATING_MESSAGE, Some(Intent::Navigate(Screen::Registration)));
        Ok(role)
    }

    pub fn snapshot(&self) -> RoleSelectionView {
        RoleSelectionView {
            selected: self.selected,
            next_enabled: self.selected.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Delays;
    use crate::session::Clock;

    #[test]
    fn next_requires_a_role() {
        let mut s = Session::new(Delays::zero(), Clock::System);
        let mut r = RoleSelection::default();
        assert!(!r.snapshot().next_enabled);
        assert_eq!(r.next(&mut s).unwrap_err().code(), "missing_selection");
        assert!(s.memory.is_empty());

        r.select(Role::Parent);
        r.select(Role::Teacher);
        assert_eq!(r.next(&mut s).unwrap(), Role::Teacher);
        assert_eq!(s.memory.get::<Role>(KEY_SELECTED_ROLE), Some(Role::Teacher));
        assert_eq!(
            s.feedback.close_modal(),
            Some(Intent::Navigate(Screen::Registration))
        );
    }
}
