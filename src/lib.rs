//! Athkar tools - data-migration utilities for a devotional-text corpus
//!
//! Converts a raw dataset into the app's daily corpus, reconciles duplicate
//! texts, aligns local texts with the Fortress of the Muslim reference service
//! by fuzzy matching, and renders HTML reports for manual review.

pub mod cli;
pub mod domain;
pub mod remote;
pub mod report;
pub mod storage;

pub use domain::{Category, RecordId, TextRecord};
