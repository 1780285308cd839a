//! Name interning for gates and basic events.

use std::collections::HashMap;

use crate::domain::foundation::EventId;

/// Bidirectional name ↔ `EventId` table, built once per model.
#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    names: Vec<String>,
    index: HashMap<String, EventId>,
}

impl EventCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `name`, registering it if unseen.
    pub fn intern(&mut self, name: &str) -> EventId {
        if let Some(id) = self.index.get(name) {
            return *id;
        }
        let id = EventId::from_index(self.names.len());
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        id
    }

    pub fn lookup(&self, name: &str) -> Option<EventId> {
        self.index.get(name).copied()
    }

    /// Returns the name of a registered id.
    ///
    /// Ids come only from this catalog, so the index is always in bounds.
    pub fn name(&self, id: EventId) -> &str {
        &self.names[id.index()]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_idempotent() {
        let mut catalog = EventCatalog::new();
        let a = catalog.intern("A");
        let b = catalog.intern("B");
        assert_ne!(a, b);
        assert_eq!(catalog.intern("A"), a);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn lookup_and_name_agree() {
        let mut catalog = EventCatalog::new();
        let id = catalog.intern("PUMP_A");
        assert_eq!(catalog.lookup("PUMP_A"), Some(id));
        assert_eq!(catalog.name(id), "PUMP_A");
        assert_eq!(catalog.lookup("PUMP_B"), None);
    }
}
