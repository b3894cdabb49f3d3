//! Dataset providers.
//!
//! A [`DatasetProvider`] hands the explorer the full collection of records
//! for an object type. The explorer never caches what it receives: every
//! request asks the provider again and works on its own copy, so concurrent
//! requests cannot observe each other.
//!
//! [`MockDatasetProvider`] serves a fixed, deterministic demo dataset. It is
//! lenient about object types: anything it does not know gets the contacts
//! collection.

mod catalog;
mod contacts;

use std::fmt;
use std::str::FromStr;

use crm_seeker::Record;

use crate::error::DatasetError;

pub use contacts::CONTACT_COUNT;

/// Source of records for an object type.
pub trait DatasetProvider {
    /// Returns every record of `object_type`.
    fn dataset(&self, object_type: &str) -> Result<Vec<Record>, DatasetError>;

    /// Object types this provider serves natively.
    fn object_types(&self) -> Vec<String>;

    /// Returns `true` if `object_type` is served natively.
    fn knows(&self, object_type: &str) -> bool {
        self.object_types().iter().any(|t| t == object_type)
    }
}

/// Object types of the demo dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Contacts,
    Tags,
    CustomFields,
    Deals,
}

impl ObjectType {
    pub const ALL: [ObjectType; 4] = [
        ObjectType::Contacts,
        ObjectType::Tags,
        ObjectType::CustomFields,
        ObjectType::Deals,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ObjectType::Contacts => "contacts",
            ObjectType::Tags => "tags",
            ObjectType::CustomFields => "custom_fields",
            ObjectType::Deals => "deals",
        }
    }

    /// Resolves a name, falling back to contacts for unknown names.
    pub fn resolve(name: &str) -> ObjectType {
        name.parse().unwrap_or(ObjectType::Contacts)
    }
}

impl FromStr for ObjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown object type '{}'", s))
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Deterministic in-memory demo data, rebuilt on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockDatasetProvider;

impl MockDatasetProvider {
    pub fn new() -> Self {
        MockDatasetProvider
    }

    /// Builds the records for a known object type.
    pub fn records(object_type: ObjectType) -> Vec<Record> {
        match object_type {
            ObjectType::Contacts => contacts::flattened_contacts(),
            ObjectType::Tags => catalog::tags(),
            ObjectType::CustomFields => catalog::custom_fields(),
            ObjectType::Deals => catalog::deals(),
        }
    }
}

impl DatasetProvider for MockDatasetProvider {
    fn dataset(&self, object_type: &str) -> Result<Vec<Record>, DatasetError> {
        Ok(Self::records(ObjectType::resolve(object_type)))
    }

    fn object_types(&self) -> Vec<String> {
        ObjectType::ALL.iter().map(|t| t.as_str().to_string()).collect()
    }
}
