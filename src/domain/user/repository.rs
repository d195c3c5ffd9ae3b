use rust_decimal::Decimal;

use super::model::User;
use crate::domain::DomainResult;

/// User store contract.
///
/// Reads return independent copies; mutations only happen through these
/// methods. Ids start at 1 and are never reused.
pub trait UserRepository: Send + Sync {
    /// Persist a new user, returning the assigned id. Fails with
    /// `Conflict` if the email is already registered.
    fn add(&self, user: User) -> DomainResult<i32>;
    fn find_by_id(&self, id: i32) -> DomainResult<Option<User>>;
    fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    fn find_all(&self) -> DomainResult<Vec<User>>;
    /// Replace a stored user. `Ok(false)` if the id is unknown.
    fn update(&self, user: User) -> DomainResult<bool>;
    fn delete(&self, id: i32) -> DomainResult<bool>;
    /// Atomically add funds, returning the new balance.
    fn credit(&self, id: i32, amount: Decimal) -> DomainResult<Decimal>;
    /// Atomically deduct funds. `Ok(false)` when the balance is insufficient.
    fn debit(&self, id: i32, amount: Decimal) -> DomainResult<bool>;
}
