/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Descriptor registry.
//!
//! The registry is populated once through a [`RegistryBuilder`] and frozen
//! into an immutable [`Registry`]. Lookups need no locking; descriptors are
//! handed out as `Arc`s so field instances can keep them alive cheaply.

use crate::catalog::{self, CatalogEntry};
use crate::config::FieldConfig;
use crate::schema::{DescriptorSpec, FieldDescriptor};
use ironswift_core::error::RegistryError;
use ironswift_core::tag::TagName;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use tracing::{debug, error, warn};

/// Process-wide registry built from the embedded catalog.
static STANDARD: LazyLock<Registry> = LazyLock::new(|| {
    let mut builder = RegistryBuilder::new();
    for entry in catalog::STANDARD {
        if let Err(err) = builder.register_entry(entry) {
            warn!(field = entry.name, %err, "skipping catalog entry");
        }
    }
    builder.build()
});

/// Mutable registry under construction.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    descriptors: HashMap<TagName, Arc<FieldDescriptor>>,
    config: FieldConfig,
}

impl RegistryBuilder {
    /// Creates an empty builder with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder preloaded with the embedded catalog.
    ///
    /// # Errors
    /// Returns the first `RegistryError` raised by a catalog entry.
    pub fn with_standard_catalog() -> Result<Self, RegistryError> {
        let mut builder = Self::new();
        for entry in catalog::STANDARD {
            builder.register_entry(entry)?;
        }
        Ok(builder)
    }

    /// Sets the configuration handed to fields created through the registry.
    #[must_use]
    pub const fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers a compiled descriptor.
    ///
    /// Registering the same name again with an identical descriptor is a
    /// no-op.
    ///
    /// # Errors
    /// Returns `RegistryError::Conflict` if the name is already registered
    /// with a different descriptor.
    pub fn register(
        &mut self,
        descriptor: FieldDescriptor,
    ) -> Result<Arc<FieldDescriptor>, RegistryError> {
        let name = *descriptor.name();
        if let Some(existing) = self.descriptors.get(&name) {
            if **existing == descriptor {
                return Ok(Arc::clone(existing));
            }
            error!(field = %name, "conflicting descriptor registration");
            return Err(RegistryError::Conflict {
                name: name.to_string(),
            });
        }
        debug!(
            field = %name,
            components = descriptor.component_count(),
            "registered field descriptor"
        );
        let descriptor = Arc::new(descriptor);
        self.descriptors.insert(name, Arc::clone(&descriptor));
        Ok(descriptor)
    }

    /// Compiles and registers a catalog record.
    ///
    /// # Errors
    /// Returns `RegistryError::Malformed` or `RegistryError::Catalog` if the
    /// record does not compile, `RegistryError::Conflict` on a conflicting
    /// name. A failure only affects this record.
    pub fn register_spec(
        &mut self,
        spec: &DescriptorSpec,
    ) -> Result<Arc<FieldDescriptor>, RegistryError> {
        let descriptor = spec.compile()?;
        self.register(descriptor)
    }

    /// Compiles and registers an embedded catalog entry.
    ///
    /// # Errors
    /// See [`RegistryBuilder::register_spec`].
    pub fn register_entry(
        &mut self,
        entry: &CatalogEntry,
    ) -> Result<Arc<FieldDescriptor>, RegistryError> {
        self.register_spec(&entry.to_spec())
    }

    /// Loads a JSON array of [`DescriptorSpec`] records.
    ///
    /// Each record is registered independently; the returned vector holds one
    /// result per record, in document order.
    ///
    /// # Errors
    /// Returns `RegistryError::Catalog` if the document is not a JSON array of
    /// records.
    pub fn load_json(
        &mut self,
        json: &str,
    ) -> Result<Vec<Result<Arc<FieldDescriptor>, RegistryError>>, RegistryError> {
        let specs: Vec<DescriptorSpec> =
            serde_json::from_str(json).map_err(|err| RegistryError::Catalog(err.to_string()))?;
        let results: Vec<_> = specs
            .iter()
            .map(|spec| {
                let result = self.register_spec(spec);
                if let Err(err) = &result {
                    warn!(field = %spec.name, %err, "catalog record rejected");
                }
                result
            })
            .collect();
        Ok(results)
    }

    /// Freezes the builder into an immutable registry.
    #[must_use]
    pub fn build(self) -> Registry {
        Registry {
            descriptors: self.descriptors,
            config: self.config,
        }
    }
}

/// Immutable catalog of field descriptors.
#[derive(Debug, Clone)]
pub struct Registry {
    descriptors: HashMap<TagName, Arc<FieldDescriptor>>,
    config: FieldConfig,
}

impl Registry {
    /// Returns the process-wide registry built from the embedded catalog.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Looks up a descriptor by field name (case-sensitive).
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Arc<FieldDescriptor>> {
        let name = TagName::new(name).ok()?;
        self.descriptors.get(&name)
    }

    /// Returns true if a descriptor is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Returns the number of registered descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true if no descriptor is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Returns the registered names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.descriptors.keys().map(TagName::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the configuration for fields created through this registry.
    #[must_use]
    pub const fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Returns an iterator over all descriptors.
    pub fn descriptors(&self) -> impl Iterator<Item = &Arc<FieldDescriptor>> {
        self.descriptors.values()
    }
}
