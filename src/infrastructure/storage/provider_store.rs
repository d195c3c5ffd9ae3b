//! In-memory provider store

use std::sync::atomic::{AtomicI32, Ordering};

use dashmap::DashMap;
use tracing::debug;

use crate::domain::{DomainError, DomainResult, Provider, ProviderRepository};

pub struct InMemoryProviderStore {
    providers: DashMap<i32, Provider>,
    counter: AtomicI32,
}

impl InMemoryProviderStore {
    pub fn new() -> Self {
        Self {
            providers: DashMap::new(),
            counter: AtomicI32::new(1),
        }
    }
}

impl Default for InMemoryProviderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderRepository for InMemoryProviderStore {
    fn add(&self, mut provider: Provider) -> DomainResult<i32> {
        let id = self.counter.fetch_add(1, Ordering::SeqCst);
        provider.id = id;
        self.providers.insert(id, provider);
        debug!(provider_id = id, "Provider stored");
        Ok(id)
    }

    fn find_by_id(&self, id: i32) -> DomainResult<Option<Provider>> {
        Ok(self.providers.get(&id).map(|p| p.clone()))
    }

    fn find_all(&self) -> DomainResult<Vec<Provider>> {
        let mut providers: Vec<Provider> =
            self.providers.iter().map(|p| p.value().clone()).collect();
        providers.sort_by_key(|p| p.id);
        Ok(providers)
    }

    /// The station list is owned by the link operations and survives a
    /// plain update unchanged.
    fn update(&self, mut provider: Provider) -> DomainResult<bool> {
        match self.providers.get_mut(&provider.id) {
            Some(mut stored) => {
                provider.replace_stations(stored.station_ids().to_vec());
                *stored = provider;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&self, id: i32) -> DomainResult<bool> {
        Ok(self.providers.remove(&id).is_some())
    }

    fn link_station(&self, provider_id: i32, station_id: i32) -> DomainResult<bool> {
        let mut provider = self
            .providers
            .get_mut(&provider_id)
            .ok_or_else(|| DomainError::not_found("Provider", "id", provider_id))?;
        Ok(provider.add_station(station_id))
    }

    fn unlink_station(&self, provider_id: i32, station_id: i32) -> DomainResult<bool> {
        let mut provider = self
            .providers
            .get_mut(&provider_id)
            .ok_or_else(|| DomainError::not_found("Provider", "id", provider_id))?;
        Ok(provider.remove_station(station_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_and_unlink_keep_order() {
        let store = InMemoryProviderStore::new();
        let id = store.add(Provider::new("PowerPlugs")).unwrap();
        assert!(store.link_station(id, 5).unwrap());
        assert!(store.link_station(id, 2).unwrap());
        assert!(!store.link_station(id, 5).unwrap());

        assert_eq!(store.find_by_id(id).unwrap().unwrap().station_ids(), &[5, 2]);

        assert!(store.unlink_station(id, 5).unwrap());
        assert!(!store.unlink_station(id, 5).unwrap());
        assert_eq!(store.find_by_id(id).unwrap().unwrap().station_ids(), &[2]);
    }

    #[test]
    fn update_preserves_station_list() {
        let store = InMemoryProviderStore::new();
        let id = store.add(Provider::new("VoltVenture")).unwrap();
        store.link_station(id, 7).unwrap();

        let mut renamed = Provider::new("VoltVenture d.o.o.");
        renamed.id = id;
        assert!(store.update(renamed).unwrap());

        let stored = store.find_by_id(id).unwrap().unwrap();
        assert_eq!(stored.name, "VoltVenture d.o.o.");
        assert_eq!(stored.station_ids(), &[7]);
    }

    #[test]
    fn linking_to_unknown_provider_fails() {
        let store = InMemoryProviderStore::new();
        assert!(matches!(
            store.link_station(3, 1),
            Err(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn find_all_is_ordered_by_id() {
        let store = InMemoryProviderStore::new();
        for name in ["A", "B", "C"] {
            store.add(Provider::new(name)).unwrap();
        }
        let ids: Vec<i32> = store.find_all().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
