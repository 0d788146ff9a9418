use std::fmt;

use rusqlite::Row;

use crate::choices::{ClassRoomCode, ClassRoomTitle};

/// One persisted classroom row.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassRoom {
    pub id: String,
    pub title: String,
    pub code: Option<String>,
    pub capacity: i64,
    pub stream: String,
    pub updated_at: Option<String>,
}

impl ClassRoom {
    /// Column order must match `SELECT_COLUMNS`.
    pub fn from_row(row: &Row) -> rusqlite::Result<ClassRoom> {
        Ok(ClassRoom {
            id: row.get(0)?,
            title: row.get(1)?,
            code: row.get(2)?,
            capacity: row.get(3)?,
            stream: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }
}

pub const SELECT_COLUMNS: &str = "id, title, code, capacity, stream, updated_at";

impl fmt::Display for ClassRoom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// Title -> code association table, in grade order.
const TITLE_TO_CODE: [(ClassRoomTitle, ClassRoomCode); 6] = [
    (ClassRoomTitle::JuniorSecondarySchool1, ClassRoomCode::Jss1),
    (ClassRoomTitle::JuniorSecondarySchool2, ClassRoomCode::Jss2),
    (ClassRoomTitle::JuniorSecondarySchool3, ClassRoomCode::Jss3),
    (ClassRoomTitle::SeniorSecondarySchool1, ClassRoomCode::Sss1),
    (ClassRoomTitle::SeniorSecondarySchool2, ClassRoomCode::Sss2),
    (ClassRoomTitle::SeniorSecondarySchool3, ClassRoomCode::Sss3),
];

/// Resolve the code a classroom persists with.
///
/// A title outside the table keeps whatever code the record already holds.
/// Callers write the result back into the record immediately before every
/// insert or update, so the stored code always tracks the stored title.
pub fn derive_code(title: &str, current: Option<&str>) -> Option<String> {
    for (t, c) in TITLE_TO_CODE {
        if t.as_str() == title {
            return Some(c.as_str().to_string());
        }
    }
    current.map(|s| s.to_string())
}
