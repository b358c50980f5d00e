//! Classifies raw document tables and extracts emission-outlet records.

pub mod basis;
pub mod classify;
pub mod docextract;
pub mod fields;
pub mod header;
pub mod records;
pub mod validate;
