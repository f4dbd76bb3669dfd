//! Phishing-awareness training state manager.
//!
//! `store` persists one session document, `trainer` runs the
//! load → mutate → save → render cycle for every trainee action,
//! and `dashboard` reflects the document back onto a `page`.

pub mod capture;
pub mod clock;
pub mod command;
pub mod config;
pub mod confirm;
pub mod dashboard;
pub mod error;
pub mod event;
pub mod page;
pub mod scenario;
pub mod state;
pub mod store;
pub mod theme;
pub mod trainer;
pub mod types;
