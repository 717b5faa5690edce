//! DecoratorTable: metadata-driven overrides of the primary table.

use std::any::TypeId;
use std::collections::hash_map::{Entry as MapEntry, HashMap};

use super::error::RegistryError;
use super::route::{Entry, Route};
use crate::key::TypeKey;
use crate::request::{Request, RequestKind};

/// At most one decorator per request type, kept separately for commands
/// and queries.
///
/// Entries come from handlers carrying `#[decorates(Target)]`. A duplicate
/// decorator for the same request type fails the build, the same as a
/// duplicate primary handler.
#[derive(Default)]
pub struct DecoratorTable {
    commands: HashMap<TypeId, Entry>,
    queries: HashMap<TypeId, Entry>,
}

impl DecoratorTable {
    fn table(&self, kind: RequestKind) -> &HashMap<TypeId, Entry> {
        match kind {
            RequestKind::Command => &self.commands,
            RequestKind::Query => &self.queries,
        }
    }

    pub(crate) fn insert(&mut self, entry: Entry) -> Result<(), RegistryError> {
        let request = entry.request();
        let table = match request.kind() {
            RequestKind::Command => &mut self.commands,
            RequestKind::Query => &mut self.queries,
        };
        match table.entry(request.type_id()) {
            MapEntry::Occupied(existing) => Err(RegistryError::DecoratorConflict {
                request: request.name(),
                kind: request.kind(),
                existing: existing.get().handler().name(),
                duplicate: entry.handler().name(),
            }),
            MapEntry::Vacant(slot) => {
                slot.insert(entry);
                Ok(())
            }
        }
    }

    /// The overriding route for `Q`, if any.
    pub fn get<Q: Request>(&self) -> Option<&Route<Q>> {
        self.table(Q::KIND)
            .get(&TypeId::of::<Q>())
            .and_then(|entry| entry.route::<Q>())
    }

    /// The decorator type registered for `Q`.
    pub fn decorator_for<Q: Request>(&self) -> Option<TypeKey> {
        self.get::<Q>().map(|route| route.handler())
    }

    pub fn contains<Q: Request>(&self) -> bool {
        self.table(Q::KIND).contains_key(&TypeId::of::<Q>())
    }

    /// Number of decorators of one shape.
    pub fn count(&self, kind: RequestKind) -> usize {
        self.table(kind).len()
    }

    pub fn len(&self) -> usize {
        self.commands.len() + self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
