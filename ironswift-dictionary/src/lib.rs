/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! # IronSwift Dictionary
//!
//! Field descriptors and descriptor registry for the IronSwift engine.
//!
//! This crate provides:
//! - **Schema definitions**: Field and component descriptors with their patterns
//! - **Value formats**: Date, time, currency, amount and BIC checks on top of
//!   the character-class rules
//! - **Label mapping**: Component index to semantic label and interchange key
//! - **Registry**: An immutable, shareable catalog built once at startup
//! - **Embedded catalog**: Descriptors for the common field families

pub mod catalog;
pub mod config;
pub mod format;
pub mod labels;
pub mod registry;
pub mod schema;

pub use config::FieldConfig;
pub use format::ValueFormat;
pub use labels::{index_of_label, label_key, label_of};
pub use registry::{Registry, RegistryBuilder};
pub use schema::{ComponentDescriptor, ComponentSpec, DescriptorSpec, FieldDescriptor};
