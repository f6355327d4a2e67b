// Plan requests, plan documents and daily log types

pub mod daily_totals;
pub mod plan;
pub mod plan_envelope;
pub mod plan_request;
pub mod validation;

pub use daily_totals::*;
pub use plan::*;
pub use plan_envelope::*;
pub use plan_request::*;
pub use validation::*;
