use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_parsed, get_required_str};
use crate::ipc::types::{AppState, Request};
use crate::model::{ExportFormat, Screen};

fn view(state: &AppState) -> Result<serde_json::Value, HandlerErr> {
    Ok(serde_json::to_value(state.app.admin.snapshot())?)
}

fn handle_select_dimension(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let dimension = get_required_str(&req.params, "dimension")?;
    state.app.admin.select_dimension(&dimension);
    view(state)
}

fn handle_export(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let format = get_parsed(&req.params, "format", ExportFormat::parse)?;
    let app = &mut state.app;
    app.admin.export(&mut app.session, format);
    view(state)
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let id = &req.id;
    match req.method.as_str() {
        "admin.open" => {
            state.app.show(Screen::AdminDashboard);
            Some(respond(id, view(state)))
        }
        "admin.selectDimension" => Some(respond(id, handle_select_dimension(state, req))),
        "admin.generate" => {
            let app = &mut state.app;
            app.admin.generate(&mut app.session);
            Some(respond(id, view(state)))
        }
        "admin.export" => Some(respond(id, handle_export(state, req))),
        "admin.configuration" => {
            let app = &mut state.app;
            app.admin.configuration(&mut app.session);
            Some(respond(id, view(state)))
        }
        _ => None,
    }
}
