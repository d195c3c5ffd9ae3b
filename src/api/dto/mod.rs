//! API request and response types

mod charging;
mod common;
mod provider;
mod station;
mod user;

pub use charging::*;
pub use common::*;
pub use provider::*;
pub use station::*;
pub use user::*;
