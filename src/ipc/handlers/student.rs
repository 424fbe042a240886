use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_optional_str, get_parsed};
use crate::ipc::types::{AppState, Request};
use crate::model::Screen;
use crate::views::student::StudentField;

fn view(state: &AppState) -> Result<serde_json::Value, HandlerErr> {
    Ok(serde_json::to_value(state.app.student.snapshot())?)
}

fn handle_open(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    state.app.show(Screen::StudentDashboard);
    let app = &mut state.app;
    app.student.open(&mut app.session);
    view(state)
}

fn handle_input(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let field = get_parsed(&req.params, "field", StudentField::parse)?;
    let text = get_optional_str(&req.params, "text").unwrap_or_default();
    state.app.student.input(field, &text);
    view(state)
}

fn handle_save(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    let app = &mut state.app;
    app.student.save(&mut app.session)?;
    view(state)
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let id = &req.id;
    match req.method.as_str() {
        "student.open" => Some(respond(id, handle_open(state))),
        "student.input" => Some(respond(id, handle_input(state, req))),
        "student.save" => Some(respond(id, handle_save(state))),
        "student.state" => Some(respond(id, view(state))),
        _ => None,
    }
}
