use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_parsed, get_required_str, get_required_usize};
use crate::ipc::types::{AppState, Request};
use crate::model::{Mark, Screen};
use crate::views::teacher::Column;

fn view(state: &AppState) -> Result<serde_json::Value, HandlerErr> {
    Ok(serde_json::to_value(state.app.teacher.snapshot())?)
}

fn handle_select_program(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let program = get_required_str(&req.params, "program")?;
    state.app.teacher.select_program(program.trim())?;
    view(state)
}

fn handle_set_cell(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let row = get_required_usize(&req.params, "row")?;
    let column = get_parsed(&req.params, "column", Column::parse)?;
    let mark = get_parsed(&req.params, "mark", Mark::parse)?;
    state.app.teacher.set_cell(row, column, mark)?;
    view(state)
}

fn handle_save(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    let app = &mut state.app;
    app.teacher.save(&mut app.session)?;
    view(state)
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let id = &req.id;
    match req.method.as_str() {
        "teacher.open" => {
            state.app.show(Screen::TeacherDashboard);
            state.app.teacher.open();
            Some(respond(id, view(state)))
        }
        "teacher.selectProgram" => Some(respond(id, handle_select_program(state, req))),
        "teacher.toggleEdit" => Some(respond(
            id,
            state
                .app
                .teacher
                .toggle_edit()
                .map_err(HandlerErr::from)
                .and_then(|_| view(state)),
        )),
        "teacher.setCell" => Some(respond(id, handle_set_cell(state, req))),
        "teacher.save" => Some(respond(id, handle_save(state))),
        "teacher.directivo" => {
            let app = &mut state.app;
            app.teacher.directivo(&mut app.session);
            Some(respond(id, view(state)))
        }
        _ => None,
    }
}
