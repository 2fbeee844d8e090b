// College API - Core Library
// Shared by the operator CLI, the API server, and tests

pub mod code;
pub mod college;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod service;
pub mod store;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use code::generate_code;
pub use college::{College, NewCollege};
pub use config::{Cli, Command, ServerConfig, StoreArgs};
pub use db::{
    delete_college, get_all_colleges, get_colleges_by_first_letter, get_random_college,
    insert_colleges, load_college_names, rename_college, setup_database, verify_count, DeleteKey,
};
pub use error::{Error, Result};
pub use service::CollegeService;
pub use store::CollegeStore;

#[cfg(feature = "server")]
pub use api::{router, AppState};
