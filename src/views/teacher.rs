//! Per-program roster tables with a whole-table edit mode.

use crate::error::ActionError;
use crate::model::{Mark, RosterRow};
use crate::service::TransportError;
use crate::session::{Operation, Session};
use crate::synth;
use serde::Serialize;
use std::collections::BTreeMap;

pub const SAVING_MESSAGE: &str = "Guardando cambios...";
pub const SAVED_MESSAGE: &str = "Cambios guardados exitosamente";
pub const SAVE_FAILED_MESSAGE: &str = "Error al guardar los cambios. Por favor intenta nuevamente.";
pub const NOT_IMPLEMENTED_MESSAGE: &str = "Función no implementada aún";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EditorMode {
    Display,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Present,
    Absent,
    Late,
}

impl Column {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "present" | "asistencia" => Some(Self::Present),
            "absent" | "ausencia" => Some(Self::Absent),
            "late" | "retardo" => Some(Self::Late),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Present => 0,
            Self::Absent => 1,
            Self::Late => 2,
        }
    }
}

#[derive(Debug, Clone)]
struct Table {
    rows: Vec<RosterRow>,
    /// Selector values while editing, one triple per row.
    selectors: Option<Vec<[Mark; 3]>>,
}

impl Table {
    fn mode(&self) -> EditorMode {
        if self.selectors.is_some() {
            EditorMode::Edit
        } else {
            EditorMode::Display
        }
    }

    fn enter_edit(&mut self) {
        self.selectors = Some(
            self.rows
                .iter()
                .map(|r| [r.present, r.absent, r.late])
                .collect(),
        );
    }

    /// Copies every selector back into its literal.
    fn leave_edit(&mut self) {
        let Some(sel) = self.selectors.take() else {
            return;
        };
        for (row, [p, a, l]) in self.rows.iter_mut().zip(sel) {
            row.present = p;
            row.absent = a;
            row.late = l;
        }
    }

    fn current_rows(&self) -> Vec<RosterRow> {
        let mut rows = self.rows.clone();
        if let Some(sel) = &self.selectors {
            for (row, [p, a, l]) in rows.iter_mut().zip(sel.iter().copied()) {
                row.present = p;
                row.absent = a;
                row.late = l;
            }
        }
        rows
    }
}

#[derive(Debug, Default)]
pub struct TeacherEditor {
    tables: BTreeMap<String, Table>,
    visible: Option<String>,
    saving: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherView {
    pub programs: Vec<String>,
    pub visible: Option<String>,
    pub mode: EditorMode,
    pub saving: bool,
    pub rows: Vec<RosterRow>,
}

impl TeacherEditor {
    /// Reloads every program's sample roster and shows the first one.
    pub fn open(&mut self) {
        self.tables = synth::PROGRAMS
            .iter()
            .filter_map(|p| {
                synth::roster(p).map(|rows| {
                    (
                        p.to_string(),
                        Table {
                            rows,
                            selectors: None,
                        },
                    )
                })
            })
            .collect();
        self.visible = synth::PROGRAMS.first().map(|p| p.to_string());
        self.saving = false;
    }

    fn visible_table(&mut self) -> Result<(&str, &mut Table), ActionError> {
        let program = self
            .visible
            .as_deref()
            .ok_or(ActionError::MissingSelection("Selecciona una carrera"))?;
        let table = self
            .tables
            .get_mut(program)
            .ok_or_else(|| ActionError::InvalidState(format!("no roster for {}", program)))?;
        Ok((program, table))
    }

    pub fn mode(&self) -> EditorMode {
        self.visible
            .as_ref()
            .and_then(|p| self.tables.get(p))
            .map(Table::mode)
            .unwrap_or(EditorMode::Display)
    }

    pub fn select_program(&mut self, program: &str) -> Result<(), ActionError> {
        if !self.tables.contains_key(program) {
            return Err(ActionError::UnknownOption {
                what: "program",
                value: program.to_string(),
            });
        }
        if self.mode() == EditorMode::Edit && self.visible.as_deref() != Some(program) {
            return Err(ActionError::InvalidState(
                "finish editing before switching program".into(),
            ));
        }
        self.visible = Some(program.to_string());
        Ok(())
    }

    /// Display → Edit, or Edit → Display reading every selector back.
    pub fn toggle_edit(&mut self) -> Result<EditorMode, ActionError> {
        let (program, table) = self.visible_table()?;
        match table.mode() {
            EditorMode::Display => table.enter_edit(),
            EditorMode::Edit => table.leave_edit(),
        }
        let mode = table.mode();
        log::debug!("{} roster now {:?}", program, mode);
        Ok(mode)
    }

    pub fn set_cell(&mut self, row: usize, column: Column, mark: Mark) -> Result<(), ActionError> {
        let (_, table) = self.visible_table()?;
        let Some(sel) = table.selectors.as_mut() else {
            return Err(ActionError::InvalidState("roster is not in edit mode".into()));
        };
        let cells = sel
            .get_mut(row)
            .ok_or_else(|| ActionError::InvalidState(format!("row {} out of range", row)))?;
        cells[column.index()] = mark;
        Ok(())
    }

    pub fn save(&mut self, s: &mut Session) -> Result<(), ActionError> {
        if self.saving {
            return Err(ActionError::Busy("save"));
        }
        let (program, _) = self.visible_table()?;
        let program = program.to_string();
        s.feedback.show_loading(SAVING_MESSAGE);
        let delay = s.delays.teacher_save;
        s.schedule(delay, Operation::SaveRoster { program });
        self.saving = true;
        Ok(())
    }

    /// What the persistence call receives: selector values when editing.
    pub fn rows_for_save(&self, program: &str) -> Vec<RosterRow> {
        self.tables
            .get(program)
            .map(Table::current_rows)
            .unwrap_or_default()
    }

    pub fn complete_save(&mut self, s: &mut Session, program: &str, outcome: Result<(), TransportError>) {
        self.saving = false;
        s.feedback.hide_loading();
        match outcome {
            Ok(()) => {
                s.feedback.show_modal(SAVED_MESSAGE, None);
                if let Some(t) = self.tables.get_mut(program) {
                    t.leave_edit();
                }
            }
            Err(e) => {
                log::warn!("roster save for {} failed: {}", program, e);
                s.feedback.show_modal(SAVE_FAILED_MESSAGE, None);
            }
        }
    }

    pub fn directivo(&self, s: &mut Session) {
        s.feedback.show_modal(NOT_IMPLEMENTED_MESSAGE, None);
    }

    pub fn snapshot(&self) -> TeacherView {
        let rows = self
            .visible
            .as_ref()
            .and_then(|p| self.tables.get(p))
            .map(Table::current_rows)
            .unwrap_or_default();
        TeacherView {
            programs: self.tables.keys().cloned().collect(),
            visible: self.visible.clone(),
            mode: self.mode(),
            saving: self.saving,
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Delays;
    use crate::session::Clock;

    fn editor() -> TeacherEditor {
        let mut t = TeacherEditor::default();
        t.open();
        t
    }

    #[test]
    fn opens_on_first_program() {
        let t = editor();
        let v = t.snapshot();
        assert_eq!(v.visible.as_deref(), Some("tidsm"));
        assert_eq!(v.programs.len(), 4);
        assert_eq!(v.mode, EditorMode::Display);
    }

    #[test]
    fn edit_then_cancel_without_changes_is_a_no_op() {
        let mut t = editor();
        for p in synth::PROGRAMS {
            t.select_program(p).unwrap();
            let before = t.snapshot().rows;
            assert_eq!(t.toggle_edit().unwrap(), EditorMode::Edit);
            assert_eq!(t.toggle_edit().unwrap(), EditorMode::Display);
            assert_eq!(t.snapshot().rows, before);
        }
    }

    #[test]
    fn leaving_edit_reads_selectors_back() {
        let mut t = editor();
        t.select_program("web").unwrap();
        assert!(t.set_cell(0, Column::Present, Mark::Checked).is_err());
        t.toggle_edit().unwrap();
        t.set_cell(0, Column::Present, Mark::Checked).unwrap();
        t.set_cell(0, Column::Late, Mark::Blank).unwrap();
        assert!(t.set_cell(99, Column::Late, Mark::Blank).is_err());
        t.toggle_edit().unwrap();
        let row = &t.snapshot().rows[0];
        assert_eq!((row.present, row.absent, row.late), (Mark::Checked, Mark::Blank, Mark::Blank));
    }

    #[test]
    fn switching_program_mid_edit_is_refused() {
        let mut t = editor();
        t.toggle_edit().unwrap();
        assert_eq!(t.select_program("web").unwrap_err().code(), "invalid_state");
        assert_eq!(t.select_program("quimica").unwrap_err().code(), "bad_params");
        t.select_program("tidsm").unwrap();
    }

    #[test]
    fn save_completion_returns_to_display() {
        let mut s = Session::new(Delays::zero(), Clock::System);
        let mut t = editor();
        t.toggle_edit().unwrap();
        t.set_cell(0, Column::Absent, Mark::Checked).unwrap();
        t.save(&mut s).unwrap();
        assert_eq!(t.save(&mut s).unwrap_err().code(), "busy");
        assert_eq!(t.mode(), EditorMode::Edit);
        assert_eq!(t.rows_for_save("tidsm")[0].absent, Mark::Checked);

        t.complete_save(&mut s, "tidsm", Ok(()));
        assert_eq!(t.mode(), EditorMode::Display);
        assert_eq!(t.snapshot().rows[0].absent, Mark::Checked);
        assert_eq!(s.feedback.modal().unwrap().message, SAVED_MESSAGE);
    }

    #[test]
    fn failed_save_keeps_editing() {
        let mut s = Session::new(Delays::zero(), Clock::System);
        let mut t = editor();
        t.toggle_edit().unwrap();
        t.save(&mut s).unwrap();
        t.complete_save(&mut s, "tidsm", Err(TransportError::Simulated("roster")));
        assert_eq!(t.mode(), EditorMode::Edit);
        assert!(!t.snapshot().saving);
    }
}
