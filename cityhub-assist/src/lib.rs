pub mod gemini;
pub mod prompts;

use std::sync::Arc;

use async_trait::async_trait;

use cityhub_domain::spot::ParkingSpot;
use cityhub_lot::LotStats;

pub use gemini::GeminiProvider;

/// Opaque text-completion collaborator.
#[async_trait]
pub trait TextProvider: Send + Sync {
    async fn generate(&self, system_instruction: &str, prompt: &str) -> anyhow::Result<String>;
}

/// Pass-through assistant. Any provider failure or empty completion is
/// swallowed and replaced by a fixed fallback line; the portal never
/// surfaces an assistant error. No retry, no backoff.
pub struct Assistant {
    provider: Arc<dyn TextProvider>,
}

impl Assistant {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    /// Help a driver find a free spot, grounded in live availability.
    pub async fn driver_assistance(&self, query: &str, spots: &[ParkingSpot]) -> String {
        let prompt = prompts::driver_prompt(query, spots);
        match self
            .provider
            .generate(prompts::SYSTEM_INSTRUCTION_DRIVER, &prompt)
            .await
        {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => "I'm having trouble connecting to the network right now.".to_string(),
            Err(err) => {
                tracing::warn!("driver assistance call failed: {:#}", err);
                "System offline. Please look for the green lights.".to_string()
            }
        }
    }

    /// Operations report for the lot manager, grounded in current stats.
    pub async fn manager_insights(&self, stats: &LotStats) -> String {
        let prompt = prompts::manager_prompt(stats);
        match self
            .provider
            .generate(prompts::SYSTEM_INSTRUCTION_MANAGER, &prompt)
            .await
        {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => "Unable to generate insights at this time.".to_string(),
            Err(err) => {
                tracing::warn!("manager insights call failed: {:#}", err);
                "AI Service Unavailable. Please check your API key.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoProvider;

    #[async_trait]
    impl TextProvider for EchoProvider {
        async fn generate(&self, _system: &str, prompt: &str) -> anyhow::Result<String> {
            Ok(format!("echo: {}", prompt.lines().next().unwrap_or_default()))
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl TextProvider for FailingProvider {
        async fn generate(&self, _system: &str, _prompt: &str) -> anyhow::Result<String> {
            anyhow::bail!("connection refused")
        }
    }

    struct EmptyProvider;

    #[async_trait]
    impl TextProvider for EmptyProvider {
        async fn generate(&self, _system: &str, _prompt: &str) -> anyhow::Result<String> {
            Ok("   ".to_string())
        }
    }

    #[tokio::test]
    async fn passes_completions_through() {
        let assistant = Assistant::new(Arc::new(EchoProvider));
        let reply = assistant.driver_assistance("where to park?", &[]).await;
        assert!(reply.starts_with("echo:"));
    }

    #[tokio::test]
    async fn provider_failure_yields_fixed_fallback() {
        let assistant = Assistant::new(Arc::new(FailingProvider));

        let reply = assistant.driver_assistance("where to park?", &[]).await;
        assert_eq!(reply, "System offline. Please look for the green lights.");

        let stats = LotStats {
            total_spots: 0,
            available_spots: 0,
            occupied_spots: 0,
            occupancy_rate: 0.0,
            revenue: 0.0,
            peak_hours: "17:00 - 21:00".to_string(),
        };
        let insights = assistant.manager_insights(&stats).await;
        assert_eq!(insights, "AI Service Unavailable. Please check your API key.");
    }

    #[tokio::test]
    async fn blank_completion_yields_fixed_fallback() {
        let assistant = Assistant::new(Arc::new(EmptyProvider));
        let reply = assistant.driver_assistance("where to park?", &[]).await;
        assert_eq!(reply, "I'm having trouble connecting to the network right now.");
    }
}
