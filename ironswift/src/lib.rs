/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! # IronSwift
//!
//! A structured field engine for SWIFT MT style financial messages.
//!
//! Every field type is described by a compact pattern grammar. IronSwift
//! compiles those patterns, splits raw field values into labeled components,
//! validates them against character-class and length rules, and formats
//! components back into the exact wire value.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ironswift::prelude::*;
//!
//! let tags = vec![Tag::new("50F", "/ACC/123456\nJOHN DOE")?];
//! let field = Field50F::get_first(&tags).unwrap();
//! assert_eq!(field.party_identifier(), Some("/ACC/123456"));
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: Tag names, line break and decimal settings, error definitions
//! - [`pattern`]: Pattern grammar and character classes
//! - [`dictionary`]: Field descriptors, catalog and registry
//! - [`field`]: Field instances, splitting, formatting and validation

pub mod core {
    //! Tag names, line break and decimal settings, error definitions.
    pub use ironswift_core::*;
}

pub mod pattern {
    //! Pattern grammar and character classes.
    pub use ironswift_pattern::*;
}

pub mod dictionary {
    //! Field descriptors, catalog and registry.
    pub use ironswift_dictionary::*;
}

pub mod field {
    //! Field instances, splitting, formatting and validation.
    pub use ironswift_field::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types
    pub use ironswift_core::{
        DecimalMark, FieldError, InterchangeIssue, LineBreak, PatternError, RegistryError, Result,
        SwiftError, Tag, TagName, ValidationFailure, Violation,
    };

    // Pattern grammar
    pub use ironswift_pattern::{CharClass, ComponentRule, Length, Pattern};

    // Dictionary
    pub use ironswift_dictionary::{
        ComponentSpec, DescriptorSpec, FieldConfig, FieldDescriptor, Registry, RegistryBuilder,
        ValueFormat,
    };

    // Fields
    pub use ironswift_field::{
        Field, Field20, Field22F, Field32A, Field50F, Field50K, Field59, Field79, Field95P,
        Field98C, FieldLookup, ParseOutcome, ValidationReport, field_binding,
    };
}
