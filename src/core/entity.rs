//! Record traits defining the abstraction the query layer works over

use crate::core::field::FieldValue;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::hash::Hash;

/// A closed, statically known set of field paths for one record type.
///
/// Paths are the dotted names the UI uses for columns (`"company.name"`).
/// Parsing an unknown path yields `None` instead of failing, so a filter or
/// sort on a column the record type does not have simply never resolves.
pub trait FieldPath: Copy + Eq + Debug + Send + Sync + 'static {
    /// Resolve a dotted path to a field, `None` if the path is unknown
    fn parse(path: &str) -> Option<Self>;

    /// The dotted path of this field
    fn path(&self) -> &'static str;
}

/// Base trait for every record the query layer can process.
///
/// A record has:
/// - id: Unique identifier, immutable once created
/// - field_value: Typed access to each field by its path enum
/// - searchable_fields: Fields inspected by the global search
pub trait Record: Clone + Send + Sync + 'static {
    /// Identifier type
    type Id: Copy + Ord + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Field enum for this record type
    type Field: FieldPath;

    /// Get the unique identifier for this record
    fn id(&self) -> Self::Id;

    /// Get the value of a field
    ///
    /// Returns `None` when the field (or one of its parent objects) is absent.
    fn field_value(&self, field: Self::Field) -> Option<FieldValue>;

    /// Fields inspected by the global search, flattened to leaves
    fn searchable_fields() -> &'static [Self::Field];

    /// Resolve a dotted path against this record
    fn resolve(&self, path: &str) -> Option<FieldValue> {
        Self::Field::parse(path).and_then(|field| self.field_value(field))
    }
}
