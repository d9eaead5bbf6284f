//! Health Advisor API Library
//!
//! Rule-based wellness analysis behind a small HTTP service: a visitor
//! submits the questionnaire, gets a score with likely deficiencies,
//! imbalances, action steps and product suggestions, and can reset or book
//! a follow-up test.
//!
//! # Modules
//!
//! - `api`: HTTP layer (handlers and routing).
//! - `core`: Domain logic (analysis, intake validation, models, errors).
//! - `analysis`: The wellness analyzer.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `intake`: Questionnaire validation.
//! - `models`: Domain and questionnaire types.
//! - `report`: Plain-text rendering of an analysis.
//! - `router`: Route table and middleware.
//! - `session`: Per-visitor result state and its store.

pub mod api;
pub mod core;

pub mod analysis;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod intake;
pub mod models;
pub mod report;
pub mod router;
pub mod session;
