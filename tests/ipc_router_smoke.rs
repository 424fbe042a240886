use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_asistechd");
    let mut child = Command::new(exe)
        .env("ASISTECH_DELAY_SCALE", "0")
        .env("ASISTECH_SUCCESS_RATE", "1")
        .env("ASISTECH_SEED", "7")
        .env_remove("ASISTECH_CONFIG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn asistechd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn send(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = send(stdin, reader, id, method, params);
    if value.get("ok").and_then(|v| v.as_bool()) == Some(false) {
        let code = value
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        assert_ne!(
            code, "not_implemented",
            "unexpected unknown method for {}",
            method
        );
    }
    value
}

#[test]
fn router_dispatch_smoke_covers_handler_families() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let calls = [
        ("health", json!({})),
        ("session.snapshot", json!({})),
        ("session.screen", json!({})),
        ("validate.field", json!({ "kind": "email", "text": "a@b.com" })),
        ("memory.keys", json!({})),
        ("memory.get", json!({ "key": "selectedRole" })),
        ("roles.open", json!({})),
        ("roles.select", json!({ "role": "docente" })),
        ("roles.next", json!({})),
        ("modal.close", json!({})),
        ("registration.open", json!({})),
        ("registration.input", json!({ "field": "email", "text": "x" })),
        ("registration.blur", json!({ "field": "email" })),
        ("registration.submit", json!({})),
        ("registration.state", json!({})),
        ("teacher.open", json!({})),
        ("teacher.selectProgram", json!({ "program": "web" })),
        ("teacher.toggleEdit", json!({})),
        ("teacher.setCell", json!({ "row": 0, "column": "late", "mark": "-" })),
        ("teacher.save", json!({})),
        ("teacher.directivo", json!({})),
        ("parent.open", json!({})),
        ("parent.selectDependent", json!({ "dependent": "maria" })),
        ("parent.selectPeriod", json!({ "period": "mes" })),
        ("parent.query", json!({})),
        ("parent.report", json!({})),
        ("parent.state", json!({})),
        ("admin.open", json!({})),
        ("admin.selectDimension", json!({ "dimension": "carrera" })),
        ("admin.generate", json!({})),
        ("admin.export", json!({ "format": "pdf" })),
        ("admin.configuration", json!({})),
        ("student.open", json!({})),
        ("student.input", json!({ "field": "materia", "text": "Inglés" })),
        ("student.save", json!({})),
        ("student.state", json!({})),
        ("events.pending", json!({})),
        ("events.settle", json!({})),
        ("events.poll", json!({})),
    ];
    for (i, (method, params)) in calls.into_iter().enumerate() {
        let _ = request(&mut stdin, &mut reader, &i.to_string(), method, params);
    }

    let unknown = send(&mut stdin, &mut reader, "x", "nope.nothing", json!({}));
    assert_eq!(unknown["error"]["code"], "not_implemented");

    writeln!(stdin, "{{not json").expect("write garbage");
    stdin.flush().expect("flush");
    let mut line = String::new();
    reader.read_line(&mut line).expect("read bad_json reply");
    let v: serde_json::Value = serde_json::from_str(line.trim()).expect("parse");
    assert_eq!(v["error"]["code"], "bad_json");

    drop(stdin);
    let _ = child.wait();
}
