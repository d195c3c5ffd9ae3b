//! In-memory user store

use std::sync::atomic::{AtomicI32, Ordering};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::{DomainError, DomainResult, User, UserRepository};

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

pub struct InMemoryUserStore {
    users: DashMap<i32, User>,
    /// Lower-cased email -> user id
    emails: DashMap<String, i32>,
    counter: AtomicI32,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            emails: DashMap::new(),
            counter: AtomicI32::new(1),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserRepository for InMemoryUserStore {
    fn add(&self, mut user: User) -> DomainResult<i32> {
        match self.emails.entry(email_key(&user.email)) {
            Entry::Occupied(_) => Err(DomainError::Conflict(format!(
                "user with email {}",
                user.email
            ))),
            Entry::Vacant(slot) => {
                let id = self.counter.fetch_add(1, Ordering::SeqCst);
                user.id = id;
                slot.insert(id);
                self.users.insert(id, user);
                debug!(user_id = id, "User stored");
                Ok(id)
            }
        }
    }

    fn find_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let id = match self.emails.get(&email_key(email)) {
            Some(id) => *id,
            None => return Ok(None),
        };
        self.find_by_id(id)
    }

    fn find_all(&self) -> DomainResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|u| u.value().clone()).collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    fn update(&self, user: User) -> DomainResult<bool> {
        let old_key = match self.users.get(&user.id) {
            Some(existing) => email_key(&existing.email),
            None => return Ok(false),
        };

        let new_key = email_key(&user.email);
        if new_key != old_key {
            match self.emails.entry(new_key) {
                Entry::Occupied(_) => {
                    return Err(DomainError::Conflict(format!(
                        "user with email {}",
                        user.email
                    )))
                }
                Entry::Vacant(slot) => {
                    slot.insert(user.id);
                }
            }
            self.emails.remove(&old_key);
        }

        match self.users.get_mut(&user.id) {
            Some(mut stored) => {
                *stored = user;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&self, id: i32) -> DomainResult<bool> {
        match self.users.remove(&id) {
            Some((_, user)) => {
                self.emails.remove(&email_key(&user.email));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn credit(&self, id: i32, amount: Decimal) -> DomainResult<Decimal> {
        let mut user = self
            .users
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("User", "id", id))?;
        user.add_funds(amount)
    }

    fn debit(&self, id: i32, amount: Decimal) -> DomainResult<bool> {
        let mut user = self
            .users
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("User", "id", id))?;
        user.deduct_funds(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VehicleClass;

    fn user(email: &str, balance: i64) -> User {
        User::new("Test", email, Decimal::from(balance), VehicleClass::Sedan)
    }

    #[test]
    fn ids_are_sequential_and_never_reused() {
        let store = InMemoryUserStore::new();
        let a = store.add(user("a@example.com", 1)).unwrap();
        let b = store.add(user("b@example.com", 1)).unwrap();
        assert_eq!((a, b), (1, 2));

        assert!(store.delete(b).unwrap());
        let c = store.add(user("c@example.com", 1)).unwrap();
        assert_eq!(c, 3);
    }

    #[test]
    fn duplicate_email_is_a_conflict_regardless_of_case() {
        let store = InMemoryUserStore::new();
        store.add(user("john.doe@example.com", 1)).unwrap();
        let err = store.add(user("John.Doe@Example.com", 1)).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(store.find_all().unwrap().len(), 1);
    }

    #[test]
    fn reads_are_independent_copies() {
        let store = InMemoryUserStore::new();
        let id = store.add(user("a@example.com", 10)).unwrap();

        let mut copy = store.find_by_id(id).unwrap().unwrap();
        copy.balance = Decimal::from(999);

        assert_eq!(
            store.find_by_id(id).unwrap().unwrap().balance,
            Decimal::from(10)
        );
    }

    #[test]
    fn find_by_email_is_case_insensitive() {
        let store = InMemoryUserStore::new();
        let id = store.add(user("emma@example.com", 1)).unwrap();
        assert_eq!(
            store.find_by_email("EMMA@example.com").unwrap().map(|u| u.id),
            Some(id)
        );
        assert!(store.find_by_email("nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn update_moves_email_index() {
        let store = InMemoryUserStore::new();
        let id = store.add(user("old@example.com", 1)).unwrap();
        let other = store.add(user("taken@example.com", 1)).unwrap();

        let mut changed = store.find_by_id(id).unwrap().unwrap();
        changed.email = "new@example.com".into();
        assert!(store.update(changed).unwrap());
        assert!(store.find_by_email("old@example.com").unwrap().is_none());
        assert_eq!(
            store.find_by_email("new@example.com").unwrap().map(|u| u.id),
            Some(id)
        );

        let mut clash = store.find_by_id(id).unwrap().unwrap();
        clash.email = "taken@example.com".into();
        assert!(store.update(clash).is_err());
        assert_eq!(
            store.find_by_email("taken@example.com").unwrap().map(|u| u.id),
            Some(other)
        );
    }

    #[test]
    fn update_unknown_user_returns_false() {
        let store = InMemoryUserStore::new();
        let mut ghost = user("ghost@example.com", 1);
        ghost.id = 42;
        assert!(!store.update(ghost).unwrap());
    }

    #[test]
    fn debit_only_succeeds_when_covered() {
        let store = InMemoryUserStore::new();
        let id = store.add(user("a@example.com", 15)).unwrap();

        assert!(store.debit(id, Decimal::from(15)).unwrap());
        assert!(!store.debit(id, Decimal::from(15)).unwrap());
        assert_eq!(store.credit(id, Decimal::from(15)).unwrap(), Decimal::from(15));
        assert!(store.debit(999, Decimal::ONE).is_err());
    }
}
