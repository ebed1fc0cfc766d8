//! Content generation with graceful degradation.
//!
//! `ContentGenerator::generate` never fails: without a provider, or when the
//! provider errors, it returns the fallback reading for the request and tags
//! it as such.

use metrics::{counter, histogram};
use std::sync::Arc;
use std::time::Instant;

use super::prompts::{fallback_for, params_for, prompt_for};
use super::providers::TextProvider;
use crate::models::{ContentRequest, ContentSource, GeneratedContent};

#[derive(Clone)]
pub struct ContentGenerator {
    provider: Option<Arc<dyn TextProvider>>,
}

impl ContentGenerator {
    pub fn new(provider: Option<Arc<dyn TextProvider>>) -> Self {
        Self { provider }
    }

    /// A generator that always serves fallback content.
    pub fn fallback_only() -> Self {
        Self { provider: None }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Name of the active backend, or `"fallback"`.
    pub fn backend_name(&self) -> &'static str {
        self.provider
            .as_ref()
            .map(|provider| provider.name())
            .unwrap_or("fallback")
    }

    /// Check that the provider is reachable. A failed probe is only logged;
    /// requests keep going to the provider and fall back per call.
    pub async fn probe(&self) -> bool {
        let Some(provider) = &self.provider else {
            return false;
        };
        match provider.health_check().await {
            Ok(()) => {
                tracing::info!(provider = provider.name(), "Text provider reachable");
                true
            }
            Err(e) => {
                tracing::warn!(provider = provider.name(), error = %e, "Text provider health check failed");
                false
            }
        }
    }

    #[tracing::instrument(skip(self, request), fields(service_type = %request.service_type()))]
    pub async fn generate(&self, request: &ContentRequest) -> GeneratedContent {
        let content = match &self.provider {
            Some(provider) => {
                let prompt = prompt_for(request);
                let params = params_for(request);
                let start = Instant::now();
                let result = provider.generate(&prompt, &params).await;
                histogram!("genai_provider_latency_seconds", "provider" => provider.name())
                    .record(start.elapsed().as_secs_f64());

                match result {
                    Ok(response) => {
                        tracing::debug!(
                            input_tokens = response.input_tokens,
                            output_tokens = response.output_tokens,
                            finish_reason = ?response.finish_reason,
                            "Content generated"
                        );
                        GeneratedContent {
                            text: response.text,
                            source: ContentSource::Generated,
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Generation failed, serving fallback content");
                        counter!(
                            "genai_provider_errors_total",
                            "provider" => provider.name(),
                            "kind" => e.kind()
                        )
                        .increment(1);
                        fallback(request)
                    }
                }
            }
            None => fallback(request),
        };

        counter!(
            "content_generations_total",
            "service_type" => request.service_type().as_str(),
            "source" => content.source.as_str()
        )
        .increment(1);

        content
    }
}

fn fallback(request: &ContentRequest) -> GeneratedContent {
    GeneratedContent {
        text: fallback_for(request),
        source: ContentSource::Fallback,
    }
}
