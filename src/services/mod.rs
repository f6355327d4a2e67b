// Plan generation and the model provider boundary

pub mod openai_client;
pub mod plan_error;
pub mod plan_generation_service;
pub mod plan_response_repairer;

pub use openai_client::{ChatProvider, OpenAiClient};
pub use plan_error::{PlanError, PlanErrorKind};
pub use plan_generation_service::PlanGenerationService;
pub use plan_response_repairer::repair_plan_reply;
