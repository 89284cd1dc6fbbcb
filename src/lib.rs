//! Voice-driven book recommendations.
//!
//! A clip is recorded (or uploaded), transcribed by an external speech
//! service, mapped to coarse genre labels by keyword, and matched against a
//! CSV book catalog.

pub mod asr;
pub mod audio;
pub mod books;
pub mod config_manager;
pub mod genre;
pub mod handlers;
pub mod python_service;
pub mod recommendation;
pub mod routes;
pub mod state;
pub mod utils;

pub use books::{BookCatalog, BookRecord};
pub use config_manager::Config;
pub use genre::{extract_genres, KeywordTable};
pub use state::AppState;
