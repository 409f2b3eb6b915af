//! Keyword scoring for app-store optimization.
//!
//! Turns already-fetched marketplace signals into two bounded scores per
//! keyword: a Difficulty Score (how hard it is to rank) and a Traffic Score
//! (how much search volume the keyword likely carries). It also lists the
//! competing apps that rank for the most keywords.

pub mod batch;
pub mod config;
pub mod output;
pub mod scoring;
pub mod signals;
