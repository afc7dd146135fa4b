/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! # IronSwift Core
//!
//! Core types and error definitions for the IronSwift structured-field engine.
//!
//! This crate provides the fundamental building blocks used across all IronSwift crates:
//! - **Error types**: Unified error handling with `thiserror`
//! - **Tag types**: `Tag` and `TagName`, the raw `(name, value)` unit a field is parsed from
//! - **Core types**: `LineBreak` and `DecimalMark` wire conventions

pub mod error;
pub mod tag;
pub mod types;

pub use error::{
    FieldError, InterchangeIssue, PatternError, RegistryError, Result, SwiftError,
    ValidationFailure, Violation,
};
pub use tag::{TAG_NAME_MAX_LEN, Tag, TagName};
pub use types::{DecimalMark, LineBreak};
