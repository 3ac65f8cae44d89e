//! Invoice generation rules.
//!
//! Generation bills every student of a class for one period using either all
//! active fee heads or a caller-supplied override list.

pub mod error;
pub mod heads;
pub mod period;
pub mod request;
pub mod types;

pub use error::BillingError;
pub use heads::HeadResolver;
pub use period::BillingPeriod;
pub use request::{GenerationPlan, GenerationRequest};
pub use types::{FeeHeadInfo, GenerationStrategy, GenerationSummary, HeadOverride, ResolvedHead};
