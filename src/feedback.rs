use crate::model::Screen;
use serde::Serialize;
use std::collections::VecDeque;

/// Oldest notices are dropped past this many undrained entries.
pub const NOTICE_CAPACITY: usize = 256;

/// Follow-up carried by a modal and released when the user closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "screen", rename_all = "camelCase")]
pub enum Intent {
    Navigate(Screen),
    /// Clear the check-in form and re-read the clock.
    ResetCheckIn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Modal {
    pub message: String,
    #[serde(rename = "onClose")]
    pub on_close: Option<Intent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Notice {
    LoadingShown { message: String },
    LoadingHidden,
    ModalShown { message: String },
    ModalClosed,
    Navigated { screen: Screen },
}

/// Modal and loading overlay state plus the notice log the renderer drains.
#[derive(Debug, Default)]
pub struct Feedback {
    loading: Option<String>,
    modal: Option<Modal>,
    notices: VecDeque<Notice>,
}

impl Feedback {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, notice: Notice) {
        if self.notices.len() == NOTICE_CAPACITY {
            self.notices.pop_front();
        }
        self.notices.push_back(notice);
    }

    pub fn show_loading(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.loading = Some(message.clone());
        self.record(Notice::LoadingShown { message });
    }

    pub fn hide_loading(&mut self) {
        if self.loading.take().is_some() {
            self.record(Notice::LoadingHidden);
        }
    }

    /// Replaces any open modal, dropping its pending intent.
    pub fn show_modal(&mut self, message: impl Into<String>, on_close: Option<Intent>) {
        let message = message.into();
        log::debug!("modal: {}", message);
        self.modal = Some(Modal {
            message: message.clone(),
            on_close,
        });
        self.record(Notice::ModalShown { message });
    }

    pub fn close_modal(&mut self) -> Option<Intent> {
        let modal = self.modal.take()?;
        self.record(Notice::ModalClosed);
        modal.on_close
    }

    pub fn note_navigation(&mut self, screen: Screen) {
        self.record(Notice::Navigated { screen });
    }

    pub fn loading(&self) -> Option<&str> {
        self.loading.as_deref()
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn drain(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_modal_replaces_intent() {
        let mut f = Feedback::new();
        f.show_modal("first", Some(Intent::Navigate(Screen::Registration)));
        f.show_modal("second", None);
        assert_eq!(f.modal().map(|m| m.message.as_str()), Some("second"));
        assert_eq!(f.close_modal(), None);
        assert!(f.modal().is_none());
    }

    #[test]
    fn drain_empties_log() {
        let mut f = Feedback::new();
        f.show_loading("Cargando...");
        f.hide_loading();
        f.hide_loading();
        assert_eq!(
            f.drain(),
            vec![
                Notice::LoadingShown {
                    message: "Cargando...".into()
                },
                Notice::LoadingHidden
            ]
        );
        assert!(f.drain().is_empty());
    }

    #[test]
    fn undrained_log_keeps_only_the_newest() {
        let mut f = Feedback::new();
        for i in 0..NOTICE_CAPACITY + 10 {
            f.show_modal(format!("m{}", i), None);
        }
        let log = f.drain();
        assert_eq!(log.len(), NOTICE_CAPACITY);
        assert_eq!(log[0], Notice::ModalShown { message: "m10".into() });
        assert_eq!(
            log.last(),
            Some(&Notice::ModalShown {
                message: format!("m{}", NOTICE_CAPACITY + 9)
            })
        );
    }

    #[test]
    fn reset_intent_serializes_without_screen() {
        assert_eq!(
            serde_json::to_value(Intent::ResetCheckIn).unwrap(),
            serde_json::json!({ "kind": "resetCheckIn" })
        );
    }
}
