/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! # IronSwift Field
//!
//! Pattern-driven splitting, formatting and validation of structured fields.
//!
//! A [`Field`] is created from a raw wire value, from a [`Tag`], from
//! individual components or from a label map, and always formats back to a
//! wire value derived from its components.
//!
//! ## Features
//!
//! - **Total parsing**: malformed input yields components and a remainder,
//!   never an error
//! - **Lossless round trip**: components split from a value format back to
//!   the same value, line break style included
//! - **Advisory validation**: class, length and value-format checks are
//!   reported, not enforced
//! - **Typed bindings**: named accessors for common field types

pub mod bindings;
pub mod field;
pub mod interchange;
pub mod lookup;
pub mod serializer;
pub mod splitter;
pub mod validation;

pub use bindings::{
    Field20, Field22F, Field32A, Field50F, Field50K, Field59, Field79, Field95P, Field98C,
};
pub use field::{Field, ParseOutcome};
pub use interchange::NAME_KEY;
pub use ironswift_core::error::{FieldError, InterchangeIssue, ValidationFailure, Violation};
pub use ironswift_core::tag::{Tag, TagName};
pub use ironswift_dictionary::{FieldConfig, FieldDescriptor, Registry};
pub use lookup::{FieldLookup, all_of, first_of};
pub use splitter::Split;
pub use validation::ValidationReport;
