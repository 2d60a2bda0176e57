//! Questionnaire-driven shortlisting of security data platform vendors.
//!
//! Load a [`advisor::ReferenceCatalog`] and [`advisor::QuestionCatalog`], record answers in an
//! [`advisor::AnswerState`], and run [`advisor::AdvisorEngine::evaluate`] after every change.

pub mod advisor;
pub mod config;
pub mod error;
pub mod telemetry;
