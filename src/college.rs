// College Entity
//
// Identity is the store-assigned `id` (UUID, never reused).
// `college_name` is the user-supplied value; `college_code` is derived from
// it on every write and is never accepted from the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::code::generate_code;

/// A stored college record, serialized as `{id, collegeName, collegeCode, ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct College {
    /// Stable identity assigned on insert
    pub id: String,

    pub college_name: String,

    /// Derived from `college_name` at the time of the last write
    pub college_code: String,

    // ========================================================================
    // STORE METADATA
    // ========================================================================
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Write model for inserts: a name plus the code derived from it
#[derive(Debug, Clone, PartialEq)]
pub struct NewCollege {
    pub college_name: String,
    pub college_code: String,
}

impl NewCollege {
    /// Build an insert from a raw name, deriving the code
    pub fn from_name(name: impl Into<String>) -> Self {
        let college_name = name.into();
        let college_code = generate_code(&college_name);

        NewCollege {
            college_name,
            college_code,
        }
    }

    /// Assign identity and timestamps, producing the record as stored
    pub fn into_college(self, now: DateTime<Utc>) -> College {
        College {
            id: uuid::Uuid::new_v4().to_string(),
            college_name: self.college_name,
            college_code: self.college_code,
            created_at: now,
            updated_at: now,
        }
    }
}
