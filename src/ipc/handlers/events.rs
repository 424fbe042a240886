use crate::ipc::error::respond;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "events.poll" => json!({ "notices": state.app.session.feedback.drain() }),
        "events.pending" => json!({
            "pending": state.app.session.sched.pending(),
            "nextDueMs": state.app.session.sched.next_due(),
            "nowMs": state.now_ms(),
        }),
        "events.settle" => {
            let fired = state.settle();
            json!({
                "fired": fired,
                "notices": state.app.session.feedback.drain(),
            })
        }
        _ => return None,
    };
    Some(respond(&req.id, Ok(result)))
}
