pub mod admission;
pub mod context;
pub mod processor;
pub mod seed;
pub mod services;

// Re-export key types for convenience
pub use admission::{Admission, AdmissionChain, AdmissionRule, Rejection};
pub use context::{AppContext, ContextOptions, SharedContext};
pub use processor::{ChargingOutcome, ChargingRequestProcessor, StopOutcome};
pub use seed::{run_scenarios, seed_demo_data, ScenarioReport, SeedSummary};
pub use services::{ProviderService, StationQueries, StationService, UserService};
