//! Edurisk - Student dropout risk prediction
//!
//! A local-first CLI that scores students for dropout risk using a
//! logistic classifier over four academic/behavioral signals:
//! attendance, CGPA, failed assessments, and disciplinary issues.
//!
//! Predictions map to LOW / MEDIUM / HIGH risk tiers and can be applied
//! in batch against an embedded student record store.

pub mod batch;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod models;
pub mod store;
