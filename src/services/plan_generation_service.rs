use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::openai_client::{ChatCompletion, ChatMessage, ChatProvider, ChatRequest};
use super::plan_error::PlanError;
use super::plan_response_repairer::repair_plan_reply;
use crate::config::OpenAiConfig;
use crate::models::{PlanRequest, PlanWeek};

/// How long a cancelled provider call may take to tear down before it is dropped
pub const CANCEL_GRACE: Duration = Duration::from_millis(250);

pub const COACH_SYSTEM_PROMPT: &str =
    "You are a professional fitness coach. Return only valid JSON, no markdown or explanations.";

#[derive(Clone)]
pub struct PlanGenerationService {
    config: OpenAiConfig,
    provider: Arc<dyn ChatProvider>,
}

impl PlanGenerationService {
    pub fn new(config: OpenAiConfig, provider: Arc<dyn ChatProvider>) -> Self {
        Self { config, provider }
    }

    /// Generate a week of workouts for an already validated request.
    ///
    /// Makes at most one provider call, bounded by the configured deadline.
    pub async fn generate_week(&self, request: &PlanRequest) -> Result<PlanWeek, PlanError> {
        let api_key = self.config.usable_api_key().ok_or_else(|| {
            warn!("OpenAI API key missing or left as placeholder, skipping provider call");
            PlanError::MissingApiKey
        })?;

        info!(
            days = request.days,
            minutes = request.minutes,
            goal = %request.goal,
            style = %request.style,
            "Requesting weekly plan from model provider"
        );

        let chat = self.build_chat_request(request);
        let completion = self.complete_before_deadline(&chat, api_key).await?;

        let content = completion
            .first_content()
            .filter(|content| !content.is_empty())
            .ok_or(PlanError::EmptyResponse)?;

        repair_plan_reply(content, request.days)
    }

    pub fn build_chat_request(&self, request: &PlanRequest) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(COACH_SYSTEM_PROMPT),
                ChatMessage::user(build_plan_prompt(request)),
            ],
            temperature: self.config.temperature,
        }
    }

    async fn complete_before_deadline(
        &self,
        chat: &ChatRequest,
        api_key: &str,
    ) -> Result<ChatCompletion, PlanError> {
        let cancel = CancellationToken::new();
        let call = self.provider.complete(chat, api_key, &cancel);
        tokio::pin!(call);

        tokio::select! {
            result = &mut call => result,
            () = tokio::time::sleep(self.config.timeout) => {
                warn!(
                    timeout_ms = self.config.timeout.as_millis() as u64,
                    "Plan generation deadline reached, cancelling provider call"
                );
                cancel.cancel();
                // a late reply is discarded; a provider that ignores the token is dropped
                if tokio::time::timeout(CANCEL_GRACE, call).await.is_err() {
                    warn!("Provider ignored cancellation, dropping the call");
                }
                Err(PlanError::Timeout)
            }
        }
    }
}

/// Natural-language instruction embedding every request field and the
/// expected output schema.
pub fn build_plan_prompt(request: &PlanRequest) -> String {
    let days = request.days;
    let experience = &request.experience;

    format!(
        "Create a {days}-day workout plan with the following parameters:
- Goal: {goal}
- Style: {style}
- Experience: {experience}
- Intensity: {intensity}
- Minutes per session: {minutes}
- Focus areas: {focus}
- Equipment: {equipment}

Return a JSON array with {days} workout days. Each day should have:
- id: unique string
- title: descriptive name (e.g., \"Day 1: Upper Body Strength\")
- summary: brief description of the workout
- minutes: estimated duration
- focus: array of focus areas
- tags: array of relevant tags
- blocks: array of workout blocks, each with:
  - kind: one of warmup, strength, metcon, skill, finisher, cooldown, circuit, workout
  - text: description of the exercise
  - minutes: duration for this block
  - loadRx: optional load prescription
  - equipment: array of equipment needed
  - scale: optional scaling options
  - coach: optional coaching cue

Return only the JSON array, with no prose before or after it.
Make the workouts practical, safe, and appropriate for {experience} level.",
        goal = request.goal,
        style = request.style,
        intensity = request.intensity,
        minutes = request.minutes,
        focus = join_or(&request.focus, "general fitness"),
        equipment = join_or(&request.equipment, "bodyweight"),
    )
}

fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}
