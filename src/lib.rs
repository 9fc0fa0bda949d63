//! localefill - Fill missing-language content in multilingual records
//!
//! Records keep text per locale. For a chosen source and target locale the
//! orchestrator sends every field whose target text is blank to a remote
//! translation API and writes the result back, never overwriting content
//! that is already there.

pub mod cli;
pub mod config;
pub mod error;
pub mod locale;
pub mod orchestrator;
pub mod provider;
pub mod record;
pub mod store;
pub mod tone;
