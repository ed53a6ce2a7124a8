//! exercizer-core — Exercise ingestion, answer comparison, and grading.
//!
//! This crate turns loosely-shaped exercise payloads into one canonical
//! model and grades learner submissions against it. Every public entry
//! point is a pure, synchronous function of its inputs.

pub mod catalog;
pub mod compare;
pub mod config;
pub mod error;
pub mod grading;
pub mod ingest;
pub mod model;
pub mod text;
pub mod validate;
