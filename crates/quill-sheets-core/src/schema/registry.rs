//! Per-type schema cache

use std::any::{Any, TypeId};
use std::sync::Arc;

use ahash::AHashMap;

use super::{Exportable, Schema};
use crate::error::Result;

/// Caches one built [`Schema`] per record type
///
/// Schemas are built on first request and shared afterwards, so every sheet
/// of a document that exports the same record type sees the same columns.
#[derive(Default)]
pub struct SchemaRegistry {
    schemas: AHashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the schema for `T`, building and caching it on first use.
    ///
    /// A failed build is not cached; the next request tries again.
    pub fn schema<T: Exportable>(&mut self) -> Result<Arc<Schema<T>>> {
        let id = TypeId::of::<T>();

        if let Some(entry) = self.schemas.get(&id) {
            if let Ok(schema) = Arc::clone(entry).downcast::<Schema<T>>() {
                log::debug!("schema cache hit for '{}'", schema.record_name());
                return Ok(schema);
            }
        }

        let schema = Arc::new(Schema::<T>::build()?);
        log::debug!(
            "built schema for '{}' with {} columns",
            schema.record_name(),
            schema.len()
        );
        self.schemas.insert(id, schema.clone());
        Ok(schema)
    }

    /// Check if a schema for `T` has been cached
    pub fn contains<T: Exportable>(&self) -> bool {
        self.schemas.contains_key(&TypeId::of::<T>())
    }

    /// Number of cached schemas
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl std::fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("len", &self.schemas.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldSet;

    struct Order {
        id: u32,
    }

    impl Exportable for Order {
        fn describe(fields: &mut FieldSet<Self>) {
            fields.field("id", |o: &Order| &o.id);
        }
    }

    struct Nothing;

    impl Exportable for Nothing {
        fn describe(_: &mut FieldSet<Self>) {}
    }

    #[test]
    fn test_repeated_lookup_shares_schema() {
        let mut registry = SchemaRegistry::new();
        assert!(!registry.contains::<Order>());

        let first = registry.schema::<Order>().unwrap();
        let second = registry.schema::<Order>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
        assert_eq!(first.extract(&Order { id: 7 }).unwrap().len(), 1);
    }

    #[test]
    fn test_failed_build_is_not_cached() {
        let mut registry = SchemaRegistry::new();
        assert!(registry.schema::<Nothing>().is_err());
        assert!(registry.is_empty());
    }
}
