use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_optional_str, get_parsed};
use crate::ipc::types::{AppState, Request};
use crate::model::Screen;
use crate::views::registration::Field;
use serde_json::json;

fn view(state: &AppState) -> Result<serde_json::Value, HandlerErr> {
    Ok(serde_json::to_value(state.app.registration.snapshot())?)
}

fn handle_open(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    state.app.show(Screen::Registration);
    let app = &mut state.app;
    app.registration.open(&app.session);
    view(state)
}

fn handle_input(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let field = get_parsed(&req.params, "field", Field::parse)?;
    let text = get_optional_str(&req.params, "text").unwrap_or_default();
    state.app.registration.input(field, &text)?;
    view(state)
}

fn handle_blur(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let field = get_parsed(&req.params, "field", Field::parse)?;
    let verdict = state.app.registration.blur(field);
    Ok(json!({
        "field": field,
        "valid": verdict.valid,
        "message": verdict.message,
    }))
}

fn handle_submit(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    let app = &mut state.app;
    app.registration.submit(&mut app.session)?;
    Ok(json!({
        "state": app.registration.state(),
        "pending": app.session.sched.pending(),
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let id = &req.id;
    match req.method.as_str() {
        "registration.open" => Some(respond(id, handle_open(state))),
        "registration.input" => Some(respond(id, handle_input(state, req))),
        "registration.blur" => Some(respond(id, handle_blur(state, req))),
        "registration.submit" => Some(respond(id, handle_submit(state))),
        "registration.state" => Some(respond(id, view(state))),
        _ => None,
    }
}
