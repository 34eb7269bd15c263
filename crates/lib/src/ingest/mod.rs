//! # Document Ingestion
//!
//! Converters from source documents into plain text ready for prompting.

pub mod pdf;
