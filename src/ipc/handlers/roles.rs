use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::get_parsed;
use crate::ipc::types::{AppState, Request};
use crate::model::{Role, Screen};
use serde_json::json;

fn handle_select(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let role = get_parsed(&req.params, "role", Role::parse)?;
    state.app.roles.select(role);
    Ok(serde_json::to_value(state.app.roles.snapshot())?)
}

fn handle_next(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    let app = &mut state.app;
    let role = app.roles.next(&mut app.session)?;
    Ok(json!({
        "role": role,
        "displayName": role.display_name(),
        "modal": app.session.feedback.modal(),
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let id = &req.id;
    match req.method.as_str() {
        "roles.open" => {
            state.app.show(Screen::RoleSelection);
            Some(respond(
                id,
                serde_json::to_value(state.app.roles.snapshot()).map_err(HandlerErr::from),
            ))
        }
        "roles.select" => Some(respond(id, handle_select(state, req))),
        "roles.next" => Some(respond(id, handle_next(state))),
        _ => None,
    }
}
