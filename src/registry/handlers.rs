//! HandlerRegistry: the primary request type → handler table.

use std::any::TypeId;
use std::collections::hash_map::{Entry as MapEntry, HashMap};

use super::error::RegistryError;
use super::route::{Entry, Route};
use crate::key::TypeKey;
use crate::request::{Request, RequestInfo};

/// Exactly one handler per request type.
///
/// Filled by `RegistryBuilder` at startup and read-only afterwards; lookups
/// are plain map reads and safe from any number of threads.
#[derive(Default)]
pub struct HandlerRegistry {
    entries: HashMap<TypeId, Entry>,
}

impl HandlerRegistry {
    /// Record an entry. A second entry for the same request type is a
    /// conflict, never a replacement.
    pub(crate) fn insert(&mut self, entry: Entry) -> Result<(), RegistryError> {
        let request = entry.request();
        match self.entries.entry(request.type_id()) {
            MapEntry::Occupied(existing) => Err(RegistryError::Conflict {
                request: request.name(),
                existing: existing.get().handler().name(),
                duplicate: entry.handler().name(),
            }),
            MapEntry::Vacant(slot) => {
                slot.insert(entry);
                Ok(())
            }
        }
    }

    /// The route for `Q`, if one is registered.
    pub fn get<Q: Request>(&self) -> Option<&Route<Q>> {
        self.entries
            .get(&TypeId::of::<Q>())
            .and_then(|entry| entry.route::<Q>())
    }

    /// The handler type registered for `Q`.
    pub fn handler_for<Q: Request>(&self) -> Option<TypeKey> {
        self.get::<Q>().map(|route| route.handler())
    }

    pub fn contains<Q: Request>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<Q>())
    }

    /// All request types with a registered handler.
    pub fn requests(&self) -> Vec<RequestInfo> {
        self.entries.values().map(|entry| entry.request()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
