// College Store Service
//
// Thin CRUD facade over the store. Every operation validates its input
// before touching the database, then maps "nothing matched" to NotFound.
// Store failures propagate unchanged; the HTTP layer decides what the
// caller gets to see.

use crate::college::{College, NewCollege};
use crate::db::{self, DeleteKey};
use crate::error::{Error, Result};
use crate::store::CollegeStore;

pub const MSG_COLLEGES_REQUIRED: &str = "Colleges array is required";
pub const MSG_SINGLE_LETTER: &str = "Please provide a single character as the first letter";
pub const MSG_RENAME_FIELDS: &str = "Both oldCollegeName and newCollegeName are required";
pub const MSG_DELETE_FIELDS: &str = "collegeName or collegeCode is required";
pub const MSG_COLLEGE_NOT_FOUND: &str = "College not found";
pub const MSG_NO_COLLEGES: &str = "No colleges found";

#[derive(Clone)]
pub struct CollegeService {
    store: CollegeStore,
}

/// Treat absent and empty strings the same way
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl CollegeService {
    pub fn new(store: CollegeStore) -> Self {
        CollegeService { store }
    }

    pub fn store(&self) -> &CollegeStore {
        &self.store
    }

    /// Every stored college
    pub fn list_all(&self) -> Result<Vec<College>> {
        let conn = self.store.lock()?;
        let colleges = db::get_all_colleges(&conn)?;
        tracing::debug!(count = colleges.len(), "listed colleges");
        Ok(colleges)
    }

    /// Colleges whose name starts with `letter` (case-insensitive).
    ///
    /// `letter` must be exactly one character. Zero matches is NotFound,
    /// never an empty list.
    pub fn list_by_letter(&self, letter: Option<&str>) -> Result<Vec<College>> {
        let letter = parse_letter(letter)?;

        let conn = self.store.lock()?;
        let colleges = db::get_colleges_by_first_letter(&conn, letter)?;
        if colleges.is_empty() {
            tracing::warn!(%letter, "no colleges for letter");
            return Err(Error::not_found(format!(
                "No colleges found starting with \"{letter}\""
            )));
        }

        tracing::debug!(%letter, count = colleges.len(), "listed colleges by letter");
        Ok(colleges)
    }

    /// One uniformly sampled college
    pub fn random(&self) -> Result<College> {
        let conn = self.store.lock()?;
        db::get_random_college(&conn)?.ok_or_else(|| Error::not_found(MSG_NO_COLLEGES))
    }

    /// Insert one college per name, deriving each code, as a single batch.
    /// Returns the new records in input order.
    pub fn create_many<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<College>> {
        if names.is_empty() {
            return Err(Error::validation(MSG_COLLEGES_REQUIRED));
        }

        let batch: Vec<NewCollege> = names
            .iter()
            .map(|name| NewCollege::from_name(name.as_ref()))
            .collect();

        let conn = self.store.lock()?;
        let saved = db::insert_colleges(&conn, &batch)?;
        tracing::info!(count = saved.len(), "created colleges");
        Ok(saved)
    }

    /// Rename the first college called `old_name`, recomputing its code
    pub fn rename(&self, old_name: Option<&str>, new_name: Option<&str>) -> Result<College> {
        let (Some(old_name), Some(new_name)) = (present(old_name), present(new_name)) else {
            return Err(Error::validation(MSG_RENAME_FIELDS));
        };

        let renamed = NewCollege::from_name(new_name);
        let conn = self.store.lock()?;
        match db::rename_college(&conn, old_name, &renamed)? {
            Some(college) => {
                tracing::info!(id = %college.id, from = old_name, to = new_name, "renamed college");
                Ok(college)
            }
            None => {
                tracing::warn!(name = old_name, "rename target not found");
                Err(Error::not_found(MSG_COLLEGE_NOT_FOUND))
            }
        }
    }

    /// Delete one college by name, or by code when no name is given
    pub fn delete(
        &self,
        college_name: Option<&str>,
        college_code: Option<&str>,
    ) -> Result<College> {
        let (key, value) = match (present(college_name), present(college_code)) {
            (Some(name), _) => (DeleteKey::Name, name),
            (None, Some(code)) => (DeleteKey::Code, code),
            (None, None) => return Err(Error::validation(MSG_DELETE_FIELDS)),
        };

        let conn = self.store.lock()?;
        match db::delete_college(&conn, key, value)? {
            Some(college) => {
                tracing::info!(id = %college.id, ?key, value, "deleted college");
                Ok(college)
            }
            None => {
                tracing::warn!(?key, value, "delete target not found");
                Err(Error::not_found(MSG_COLLEGE_NOT_FOUND))
            }
        }
    }
}

fn parse_letter(letter: Option<&str>) -> Result<char> {
    let mut chars = letter.unwrap_or_default().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(Error::validation(MSG_SINGLE_LETTER)),
    }
}
