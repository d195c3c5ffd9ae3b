//! Charging request admission

mod chain;
mod rules;

pub use chain::{Admission, AdmissionChain};
pub use rules::{AdmissionRule, Rejection};
