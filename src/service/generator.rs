use std::sync::Arc;

use crate::compose::request::Poem;
use crate::foundation::error::PhotoverseResult;
use crate::service::options::{Language, PoemMood, PoemStyle};
use crate::service::prompt::build_prompt;

/// Failure of a poem provider.
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    /// Quota, overload, transport or availability failure.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// The provider answered, but not with a usable poem.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("no poem providers configured")]
    NoProviders,

    #[error("all {attempts} providers failed; last error: {last}")]
    Exhausted {
        attempts: usize,
        last: Box<ServiceError>,
    },
}

impl ServiceError {
    /// Whether trying an alternate provider may help.
    pub fn is_fallback_eligible(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::MalformedResponse(_))
    }
}

/// One generation request: the photo plus the chosen style, mood and language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoemRequest {
    pub image_bytes: Arc<[u8]>,
    pub mime_type: String,
    pub style: PoemStyle,
    pub mood: PoemMood,
    pub language: Language,
}

impl PoemRequest {
    pub fn prompt(&self) -> String {
        build_prompt(self.style, self.mood, self.language)
    }
}

/// A text-generation provider.
///
/// Calls block until the provider answers; async callers run them on their own executor.
pub trait PoemGenerator: Send + Sync {
    fn name(&self) -> &str;
    fn generate(&self, req: &PoemRequest) -> Result<Poem, ServiceError>;
}

/// Providers tried in order until one succeeds.
#[derive(Default)]
pub struct FallbackChain {
    providers: Vec<Box<dyn PoemGenerator>>,
}

impl FallbackChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, provider: impl PoemGenerator + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Ask each provider in turn. Errors that are not fallback-eligible stop the chain.
    pub fn generate(&self, req: &PoemRequest) -> Result<Poem, ServiceError> {
        let mut last = None;
        for (attempt, provider) in self.providers.iter().enumerate() {
            match provider.generate(req) {
                Ok(poem) => {
                    if attempt > 0 {
                        tracing::info!(
                            provider = provider.name(),
                            attempt,
                            "fallback provider answered"
                        );
                    }
                    return Ok(poem);
                }
                Err(err) if err.is_fallback_eligible() => {
                    tracing::warn!(
                        provider = provider.name(),
                        error = %err,
                        "provider failed; trying next"
                    );
                    last = Some(err);
                }
                Err(err) => return Err(err),
            }
        }
        match last {
            Some(last) => Err(ServiceError::Exhausted {
                attempts: self.providers.len(),
                last: Box::new(last),
            }),
            None => Err(ServiceError::NoProviders),
        }
    }
}

/// Generate a poem for a photo through `chain`.
#[tracing::instrument(
    skip(chain, req),
    fields(style = %req.style, mood = %req.mood, lang = req.language.code())
)]
pub fn generate_poem(chain: &FallbackChain, req: &PoemRequest) -> PhotoverseResult<Poem> {
    Ok(chain.generate(req)?)
}

#[cfg(test)]
#[path = "../../tests/unit/service/generator.rs"]
mod tests;
