use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Deserialize;
use std::path::Path;

use crate::college::{College, NewCollege};
use crate::error::Result;

const SELECT_COLUMNS: &str = "id, college_name, college_code, created_at, updated_at";

/// Create the schema. Idempotent: safe to call on every startup.
pub fn setup_database(conn: &Connection) -> Result<()> {
    // WAL for file-backed databases (in-memory ones stay in "memory" mode)
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS colleges (
            id TEXT PRIMARY KEY NOT NULL,
            college_name TEXT NOT NULL,
            college_code TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    // No UNIQUE constraints: names and codes may repeat
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_college_name ON colleges(college_name)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_college_code ON colleges(college_code)",
        [],
    )?;

    Ok(())
}

fn parse_timestamp(idx: usize, value: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn row_to_college(row: &Row<'_>) -> rusqlite::Result<College> {
    Ok(College {
        id: row.get(0)?,
        college_name: row.get(1)?,
        college_code: row.get(2)?,
        created_at: parse_timestamp(3, row.get(3)?)?,
        updated_at: parse_timestamp(4, row.get(4)?)?,
    })
}

/// Insert a batch of colleges in one transaction.
///
/// Either every row is written or none is. Returns the stored records in
/// input order.
pub fn insert_colleges(conn: &Connection, new_colleges: &[NewCollege]) -> Result<Vec<College>> {
    let tx = conn.unchecked_transaction()?;
    let now = Utc::now();
    let now_str = now.to_rfc3339();

    let mut saved = Vec::with_capacity(new_colleges.len());
    {
        let mut stmt = tx.prepare(
            "INSERT INTO colleges (id, college_name, college_code, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
        )?;

        for new_college in new_colleges {
            let college = new_college.clone().into_college(now);
            stmt.execute(params![
                college.id,
                college.college_name,
                college.college_code,
                now_str,
            ])?;
            saved.push(college);
        }
    }

    tx.commit()?;

    Ok(saved)
}

pub fn get_all_colleges(conn: &Connection) -> Result<Vec<College>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SELECT_COLUMNS} FROM colleges ORDER BY rowid"
    ))?;

    let colleges = stmt
        .query_map([], row_to_college)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(colleges)
}

/// Colleges whose name starts with `letter`, ignoring case.
///
/// The letter is compared literally against the first character of the
/// name; it is never interpreted as a pattern.
pub fn get_colleges_by_first_letter(conn: &Connection, letter: char) -> Result<Vec<College>> {
    let colleges = get_all_colleges(conn)?
        .into_iter()
        .filter(|college| {
            college
                .college_name
                .chars()
                .next()
                .is_some_and(|first| same_letter_ignoring_case(first, letter))
        })
        .collect();

    Ok(colleges)
}

/// Compares lower-case forms, so 'ẞ' and 'ß' match even though
/// 'ß'.to_uppercase() expands to "SS"
fn same_letter_ignoring_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// One uniformly sampled college, or `None` when the table is empty
pub fn get_random_college(conn: &Connection) -> Result<Option<College>> {
    let college = conn
        .query_row(
            &format!("SELECT {SELECT_COLUMNS} FROM colleges ORDER BY RANDOM() LIMIT 1"),
            [],
            row_to_college,
        )
        .optional()?;

    Ok(college)
}

/// Overwrite name and code of the first college named `old_name`.
///
/// Returns the updated record, or `None` when no college has that name.
pub fn rename_college(
    conn: &Connection,
    old_name: &str,
    renamed: &NewCollege,
) -> Result<Option<College>> {
    let now_str = Utc::now().to_rfc3339();

    let college = conn
        .query_row(
            &format!(
                "UPDATE colleges
                 SET college_name = ?1, college_code = ?2, updated_at = ?3
                 WHERE id = (
                     SELECT id FROM colleges WHERE college_name = ?4 ORDER BY rowid LIMIT 1
                 )
                 RETURNING {SELECT_COLUMNS}"
            ),
            params![renamed.college_name, renamed.college_code, now_str, old_name],
            row_to_college,
        )
        .optional()?;

    Ok(college)
}

/// Column a delete looks its record up by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteKey {
    Name,
    Code,
}

impl DeleteKey {
    fn column(self) -> &'static str {
        match self {
            DeleteKey::Name => "college_name",
            DeleteKey::Code => "college_code",
        }
    }
}

/// Remove the first college whose name or code equals `value`.
///
/// Returns the removed record, or `None` when nothing matched.
pub fn delete_college(conn: &Connection, key: DeleteKey, value: &str) -> Result<Option<College>> {
    let column = key.column();

    let college = conn
        .query_row(
            &format!(
                "DELETE FROM colleges
                 WHERE id = (
                     SELECT id FROM colleges WHERE {column} = ?1 ORDER BY rowid LIMIT 1
                 )
                 RETURNING {SELECT_COLUMNS}"
            ),
            [value],
            row_to_college,
        )
        .optional()?;

    Ok(college)
}

pub fn verify_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM colleges", [], |row| row.get(0))?;

    Ok(count)
}

#[derive(Debug, Deserialize)]
struct NameRow {
    #[serde(rename = "collegeName", alias = "name")]
    college_name: String,
}

/// Read college names from a CSV with a `collegeName` (or `name`) header.
/// Blank names are skipped.
pub fn load_college_names(csv_path: &Path) -> Result<Vec<String>> {
    let mut rdr = csv::Reader::from_path(csv_path)?;

    let mut names = Vec::new();
    for result in rdr.deserialize() {
        let row: NameRow = result?;
        if !row.college_name.trim().is_empty() {
            names.push(row.college_name);
        }
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();
        conn
    }

    fn find_college_by_name(conn: &Connection, college_name: &str) -> Option<College> {
        conn.query_row(
            &format!(
                "SELECT {SELECT_COLUMNS} FROM colleges
                 WHERE college_name = ?1 ORDER BY rowid LIMIT 1"
            ),
            [college_name],
            row_to_college,
        )
        .optional()
        .unwrap()
    }

    fn seed(conn: &Connection, names: &[&str]) -> Vec<College> {
        let batch: Vec<NewCollege> = names.iter().map(|n| NewCollege::from_name(*n)).collect();
        insert_colleges(conn, &batch).unwrap()
    }

    #[test]
    fn test_setup_is_idempotent() {
        let conn = test_db();
        seed(&conn, &["Alpha College"]);

        setup_database(&conn).unwrap();
        setup_database(&conn).unwrap();

        assert_eq!(verify_count(&conn).unwrap(), 1);
    }

    #[test]
    fn test_insert_preserves_input_order() {
        let conn = test_db();
        let saved = seed(&conn, &["Charlie Institute", "Alpha College", "Bravo University"]);

        let names: Vec<&str> = saved.iter().map(|c| c.college_name.as_str()).collect();
        assert_eq!(names, ["Charlie Institute", "Alpha College", "Bravo University"]);
        assert_eq!(saved[1].college_code, "alpha-college");

        let stored = get_all_colleges(&conn).unwrap();
        assert_eq!(stored, saved);
    }

    #[test]
    fn test_insert_batch_is_atomic() {
        let conn = test_db();
        seed(&conn, &["Existing College"]);

        // Make the second row of the batch fail after the first was written
        conn.execute(
            "CREATE TRIGGER reject_bad BEFORE INSERT ON colleges
             WHEN NEW.college_name = 'Bad Name'
             BEGIN SELECT RAISE(ABORT, 'rejected'); END",
            [],
        )
        .unwrap();

        let result = insert_colleges(
            &conn,
            &[NewCollege::from_name("New One"), NewCollege::from_name("Bad Name")],
        );

        assert!(result.is_err());
        assert_eq!(verify_count(&conn).unwrap(), 1, "no partial batch may remain");
    }

    #[test]
    fn test_first_letter_is_case_insensitive() {
        let conn = test_db();
        seed(&conn, &["zenith college", "Zulekha Nursing College", "Alpha College"]);

        let lower = get_colleges_by_first_letter(&conn, 'z').unwrap();
        let upper = get_colleges_by_first_letter(&conn, 'Z').unwrap();

        assert_eq!(lower.len(), 2);
        assert_eq!(lower, upper);
        assert!(get_colleges_by_first_letter(&conn, 'q').unwrap().is_empty());
    }

    #[test]
    fn test_first_letter_is_literal() {
        let conn = test_db();
        seed(&conn, &["Alpha College", "%Percent Academy", ".Dot School"]);

        assert!(get_colleges_by_first_letter(&conn, '_').unwrap().is_empty());
        assert_eq!(get_colleges_by_first_letter(&conn, '%').unwrap().len(), 1);
        assert_eq!(get_colleges_by_first_letter(&conn, '.').unwrap().len(), 1);
    }

    #[test]
    fn test_first_letter_non_ascii() {
        let conn = test_db();
        seed(&conn, &["École Polytechnique", "éducation Institute"]);

        assert_eq!(get_colleges_by_first_letter(&conn, 'é').unwrap().len(), 2);
        assert_eq!(get_colleges_by_first_letter(&conn, 'É').unwrap().len(), 2);
    }

    #[test]
    fn test_first_letter_with_expanding_case_mapping() {
        let conn = test_db();
        seed(&conn, &["ẞtraße Akademie", "ßeta School", "Sigma College"]);

        assert_eq!(get_colleges_by_first_letter(&conn, 'ß').unwrap().len(), 2);
        assert_eq!(get_colleges_by_first_letter(&conn, 'ẞ').unwrap().len(), 2);
        assert_eq!(get_colleges_by_first_letter(&conn, 's').unwrap().len(), 1);
    }

    #[test]
    fn test_random_college() {
        let conn = test_db();
        assert!(get_random_college(&conn).unwrap().is_none());

        let saved = seed(&conn, &["Alpha College", "Bravo College", "Charlie College"]);
        for _ in 0..10 {
            let picked = get_random_college(&conn).unwrap().unwrap();
            assert!(saved.contains(&picked));
        }
    }

    #[test]
    fn test_rename_recomputes_code() {
        let conn = test_db();
        let saved = seed(&conn, &["Old Name College"]);

        let renamed = NewCollege::from_name("New Name, Delhi");
        let updated = rename_college(&conn, "Old Name College", &renamed).unwrap().unwrap();

        assert_eq!(updated.id, saved[0].id);
        assert_eq!(updated.college_name, "New Name, Delhi");
        assert_eq!(updated.college_code, "new-name-delhi");
        assert_eq!(updated.created_at, saved[0].created_at);
        assert!(find_college_by_name(&conn, "Old Name College").is_none());
    }

    #[test]
    fn test_rename_missing_leaves_store_unchanged() {
        let conn = test_db();
        let saved = seed(&conn, &["Alpha College"]);

        let updated = rename_college(&conn, "Nope", &NewCollege::from_name("Whatever")).unwrap();

        assert!(updated.is_none());
        assert_eq!(get_all_colleges(&conn).unwrap(), saved);
    }

    #[test]
    fn test_rename_duplicate_names_updates_first_only() {
        let conn = test_db();
        let saved = seed(&conn, &["Twin College", "Twin College"]);

        let updated = rename_college(&conn, "Twin College", &NewCollege::from_name("Solo College"))
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, saved[0].id);
        let remaining = find_college_by_name(&conn, "Twin College").unwrap();
        assert_eq!(remaining.id, saved[1].id);
    }

    #[test]
    fn test_delete_by_name_and_code() {
        let conn = test_db();
        seed(&conn, &["Alpha College", "Bravo College, Pune"]);

        let deleted = delete_college(&conn, DeleteKey::Name, "Alpha College").unwrap().unwrap();
        assert_eq!(deleted.college_name, "Alpha College");

        let deleted = delete_college(&conn, DeleteKey::Code, "bravo-college-pune")
            .unwrap()
            .unwrap();
        assert_eq!(deleted.college_name, "Bravo College, Pune");

        assert_eq!(verify_count(&conn).unwrap(), 0);
        assert!(delete_college(&conn, DeleteKey::Name, "Alpha College").unwrap().is_none());
    }

    #[test]
    fn test_load_college_names() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "collegeName").unwrap();
        writeln!(file, "\"Zulekha Nursing College, Mangalore\"").unwrap();
        writeln!(file, "   ").unwrap();
        writeln!(file, "A.B. College").unwrap();
        file.flush().unwrap();

        let names = load_college_names(file.path()).unwrap();

        assert_eq!(names, ["Zulekha Nursing College, Mangalore", "A.B. College"]);
    }

    #[test]
    fn test_load_college_names_with_name_header() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name").unwrap();
        writeln!(file, "Alpha College").unwrap();
        file.flush().unwrap();

        assert_eq!(load_college_names(file.path()).unwrap(), ["Alpha College"]);
    }
}
