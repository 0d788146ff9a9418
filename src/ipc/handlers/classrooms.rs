use crate::classroom::{self, ClassRoom, SELECT_COLUMNS};
use crate::choices::{ClassRoomCode, ClassRoomTitle, Stream};
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use rusqlite::{Connection, OptionalExtension};
use serde_json::json;
use uuid::Uuid;

struct HandlerErr {
    code: &'static str,
    message: String,
    details: Option<serde_json::Value>,
}

impl HandlerErr {
    fn response(self, id: &str) -> serde_json::Value {
        err(id, self.code, self.message, self.details)
    }

    fn bad_params(message: impl Into<String>) -> HandlerErr {
        HandlerErr {
            code: "bad_params",
            message: message.into(),
            details: None,
        }
    }

    fn db(code: &'static str, e: rusqlite::Error) -> HandlerErr {
        HandlerErr {
            code,
            message: e.to_string(),
            details: Some(json!({ "table": "classrooms" })),
        }
    }
}

fn get_required_str(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))
}

fn parse_title(label: &str) -> Result<ClassRoomTitle, HandlerErr> {
    ClassRoomTitle::parse(label)
        .ok_or_else(|| HandlerErr::bad_params(format!("unknown title: {}", label)))
}

fn parse_stream(label: &str) -> Result<Stream, HandlerErr> {
    Stream::parse(label)
        .ok_or_else(|| HandlerErr::bad_params(format!("unknown stream: {}", label)))
}

fn parse_code(label: &str) -> Result<ClassRoomCode, HandlerErr> {
    ClassRoomCode::parse(label)
        .ok_or_else(|| HandlerErr::bad_params(format!("unknown code: {}", label)))
}

fn parse_capacity(params: &serde_json::Value) -> Result<Option<i64>, HandlerErr> {
    let Some(v) = params.get("capacity") else {
        return Ok(None);
    };
    match v.as_u64() {
        Some(n) => Ok(Some(n as i64)),
        None => Err(HandlerErr::bad_params(
            "capacity must be a non-negative integer",
        )),
    }
}

fn load_classroom(conn: &Connection, id: &str) -> Result<Option<ClassRoom>, HandlerErr> {
    conn.query_row(
        &format!("SELECT {} FROM classrooms WHERE id = ?", SELECT_COLUMNS),
        [id],
        ClassRoom::from_row,
    )
    .optional()
    .map_err(|e| HandlerErr::db("db_query_failed", e))
}

fn classroom_json(room: &ClassRoom) -> serde_json::Value {
    json!({
        "id": room.id,
        "title": room.title,
        "code": room.code,
        "capacity": room.capacity,
        "stream": room.stream,
        "updatedAt": room.updated_at,
    })
}

fn handle_classrooms_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return ok(&req.id, json!({ "classrooms": [] }));
    };

    let mut stmt = match conn.prepare(&format!(
        "SELECT {} FROM classrooms ORDER BY title",
        SELECT_COLUMNS
    )) {
        Ok(s) => s,
        Err(e) => return err(&req.id, "db_query_failed", e.to_string(), None),
    };

    let rows = stmt
        .query_map([], ClassRoom::from_row)
        .and_then(|it| it.collect::<Result<Vec<_>, _>>());

    match rows {
        Ok(rooms) => ok(
            &req.id,
            json!({ "classrooms": rooms.iter().map(classroom_json).collect::<Vec<_>>() }),
        ),
        Err(e) => err(&req.id, "db_query_failed", e.to_string(), None),
    }
}

fn create_classroom(
    conn: &Connection,
    params: &serde_json::Value,
) -> Result<ClassRoom, HandlerErr> {
    let title = parse_title(&get_required_str(params, "title")?)?;
    let stream = parse_stream(&get_required_str(params, "stream")?)?;
    let capacity = parse_capacity(params)?.unwrap_or(1);

    // A caller-supplied code is validated but overwritten by the derivation.
    let requested_code = match params.get("code").and_then(|v| v.as_str()) {
        Some(raw) => Some(parse_code(raw)?),
        None => None,
    };

    let code = classroom::derive_code(title.as_str(), requested_code.map(|c| c.as_str()));
    let classroom_id = Uuid::new_v4().to_string();

    conn.execute(
        "INSERT INTO classrooms(id, title, code, capacity, stream, updated_at)
         VALUES(?, ?, ?, ?, ?, strftime('%Y-%m-%dT%H:%M:%SZ','now'))",
        (
            &classroom_id,
            title.as_str(),
            &code,
            capacity,
            stream.as_str(),
        ),
    )
    .map_err(|e| HandlerErr::db("db_insert_failed", e))?;

    load_classroom(conn, &classroom_id)?.ok_or_else(|| HandlerErr {
        code: "db_query_failed",
        message: "inserted classroom not found".to_string(),
        details: None,
    })
}

fn handle_classrooms_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    match create_classroom(conn, &req.params) {
        Ok(room) => ok(&req.id, json!({ "classroom": classroom_json(&room) })),
        Err(e) => e.response(&req.id),
    }
}

fn handle_classrooms_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let classroom_id = match get_required_str(&req.params, "classroomId") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };

    match load_classroom(conn, &classroom_id) {
        Ok(Some(room)) => ok(&req.id, json!({ "classroom": classroom_json(&room) })),
        Ok(None) => err(&req.id, "not_found", "classroom not found", None),
        Err(e) => e.response(&req.id),
    }
}

fn update_classroom(
    conn: &Connection,
    params: &serde_json::Value,
) -> Result<Option<ClassRoom>, HandlerErr> {
    let classroom_id = get_required_str(params, "classroomId")?;
    let Some(mut room) = load_classroom(conn, &classroom_id)? else {
        return Ok(None);
    };

    if let Some(raw) = params.get("title").and_then(|v| v.as_str()) {
        room.title = parse_title(raw)?.as_str().to_string();
    }
    if let Some(raw) = params.get("stream").and_then(|v| v.as_str()) {
        room.stream = parse_stream(raw)?.as_str().to_string();
    }
    if let Some(capacity) = parse_capacity(params)? {
        room.capacity = capacity;
    }

    // Re-derive on every save, not only when the title changed.
    room.code = classroom::derive_code(&room.title, room.code.as_deref());

    conn.execute(
        "UPDATE classrooms
         SET title = ?, code = ?, capacity = ?, stream = ?,
             updated_at = strftime('%Y-%m-%dT%H:%M:%SZ','now')
         WHERE id = ?",
        (
            &room.title,
            &room.code,
            room.capacity,
            &room.stream,
            &classroom_id,
        ),
    )
    .map_err(|e| HandlerErr::db("db_update_failed", e))?;

    load_classroom(conn, &classroom_id)
}

fn handle_classrooms_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    match update_classroom(conn, &req.params) {
        Ok(Some(room)) => ok(&req.id, json!({ "classroom": classroom_json(&room) })),
        Ok(None) => err(&req.id, "not_found", "classroom not found", None),
        Err(e) => e.response(&req.id),
    }
}

fn handle_classrooms_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let classroom_id = match get_required_str(&req.params, "classroomId") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };

    let exists = match load_classroom(conn, &classroom_id) {
        Ok(v) => v.is_some(),
        Err(e) => return e.response(&req.id),
    };
    if !exists {
        return err(&req.id, "not_found", "classroom not found", None);
    }

    if let Err(e) = conn.execute("DELETE FROM classrooms WHERE id = ?", [&classroom_id]) {
        return err(
            &req.id,
            "db_delete_failed",
            e.to_string(),
            Some(json!({ "table": "classrooms" })),
        );
    }

    ok(&req.id, json!({ "ok": true }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "classrooms.list" => Some(handle_classrooms_list(state, req)),
        "classrooms.create" => Some(handle_classrooms_create(state, req)),
        "classrooms.get" => Some(handle_classrooms_get(state, req)),
        "classrooms.update" => Some(handle_classrooms_update(state, req)),
        "classrooms.delete" => Some(handle_classrooms_delete(state, req)),
        _ => None,
    }
}
