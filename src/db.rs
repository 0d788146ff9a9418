use rusqlite::Connection;
use std::path::Path;

pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join("classroomd.sqlite3");
    let conn = Connection::open(db_path)?;

    // Uniqueness of title and code is enforced here, not in handlers.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS classrooms(
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL UNIQUE,
            code TEXT UNIQUE,
            capacity INTEGER NOT NULL DEFAULT 1 CHECK(capacity >= 0),
            stream TEXT NOT NULL,
            updated_at TEXT
        )",
        [],
    )?;

    // Existing workspaces may have a classrooms table without updated_at.
    ensure_classrooms_updated_at(&conn)?;

    Ok(conn)
}

fn ensure_classrooms_updated_at(conn: &Connection) -> anyhow::Result<()> {
    if table_has_column(conn, "classrooms", "updated_at")? {
        return Ok(());
    }
    conn.execute("ALTER TABLE classrooms ADD COLUMN updated_at TEXT", [])?;
    Ok(())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> anyhow::Result<bool> {
    let sql = format!("PRAGMA table_info({})", table);
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}
