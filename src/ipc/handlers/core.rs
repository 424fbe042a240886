use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_optional_str, get_parsed, get_required_str};
use crate::ipc::types::{AppState, Request};
use crate::model::Screen;
use crate::validate::{validate_field, FieldKind};
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    respond(
        &req.id,
        Ok(json!({
            "version": env!("CARGO_PKG_VERSION"),
            "screen": state.app.session.screen,
            "pending": state.app.session.sched.pending(),
        })),
    )
}

fn parse_screen(s: &str) -> Option<Screen> {
    serde_json::from_value(json!(s)).ok()
}

fn session_snapshot(state: &AppState) -> Result<serde_json::Value, HandlerErr> {
    let app = &state.app;
    let feedback = &app.session.feedback;
    Ok(json!({
        "screen": app.session.screen,
        "loading": feedback.loading(),
        "modal": feedback.modal(),
        "pending": app.session.sched.pending(),
        "memoryKeys": app.session.memory.keys(),
        "roles": app.roles.snapshot(),
        "registration": app.registration.snapshot(),
    }))
}

fn handle_session_screen(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    if get_optional_str(&req.params, "screen").is_some() {
        let screen = get_parsed(&req.params, "screen", parse_screen)?;
        state.app.show(screen);
    }
    Ok(json!({ "screen": state.app.session.screen }))
}

fn handle_validate_field(req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let kind = FieldKind::parse(&get_required_str(&req.params, "kind")?);
    let text = get_optional_str(&req.params, "text").unwrap_or_default();
    Ok(serde_json::to_value(validate_field(kind, &text))?)
}

fn handle_memory_get(state: &AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let key = get_required_str(&req.params, "key")?;
    Ok(json!({
        "key": key,
        "value": state.app.session.memory.get_raw(&key),
    }))
}

fn handle_modal_close(state: &mut AppState) -> serde_json::Value {
    let navigated = state.app.close_modal();
    json!({
        "navigated": navigated,
        "screen": state.app.session.screen,
    })
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let id = &req.id;
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "session.snapshot" => Some(respond(id, session_snapshot(state))),
        "session.screen" => Some(respond(id, handle_session_screen(state, req))),
        "validate.field" => Some(respond(id, handle_validate_field(req))),
        "memory.get" => Some(respond(id, handle_memory_get(state, req))),
        "memory.keys" => Some(respond(
            id,
            Ok(json!({ "keys": state.app.session.memory.keys() })),
        )),
        "modal.close" => Some(respond(id, Ok(handle_modal_close(state)))),
        _ => None,
    }
}
