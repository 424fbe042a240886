use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_optional_str, get_required_str};
use crate::ipc::types::{AppState, Request};
use crate::model::Screen;

fn view(state: &AppState) -> Result<serde_json::Value, HandlerErr> {
    Ok(serde_json::to_value(state.app.parent.snapshot())?)
}

fn handle_open(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    state.app.show(Screen::ParentDashboard);
    if let Some(p) = get_optional_str(&req.params, "period") {
        state.app.parent.select_period(&p);
    }
    let dependent = get_optional_str(&req.params, "dependent");
    let app = &mut state.app;
    app.parent.open(&mut app.session, dependent.as_deref())?;
    view(state)
}

fn handle_select_dependent(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let dependent = get_required_str(&req.params, "dependent")?;
    state.app.parent.select_dependent(&dependent)?;
    view(state)
}

fn handle_select_period(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let period = get_required_str(&req.params, "period")?;
    state.app.parent.select_period(&period);
    view(state)
}

fn handle_query(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    let app = &mut state.app;
    app.parent.query(&mut app.session)?;
    view(state)
}

fn handle_report(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    let app = &mut state.app;
    app.parent.report(&mut app.session)?;
    view(state)
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let id = &req.id;
    match req.method.as_str() {
        "parent.open" => Some(respond(id, handle_open(state, req))),
        "parent.selectDependent" => Some(respond(id, handle_select_dependent(state, req))),
        "parent.selectPeriod" => Some(respond(id, handle_select_period(state, req))),
        "parent.query" => Some(respond(id, handle_query(state))),
        "parent.report" => Some(respond(id, handle_report(state))),
        "parent.state" => Some(respond(id, view(state))),
        _ => None,
    }
}
