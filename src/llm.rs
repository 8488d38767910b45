//! LLM supplier summaries over an OpenAI compatible chat completion API.
//!
//! The summarizer is optional: without an API key, or with `[llm] enabled =
//! false`, supplier lists are answered with a plain fallback sentence.

use crate::{
    config::LlmConfig,
    entities::supplier,
    errors::{Error, Result},
    parsers::Language,
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info};

/// Turns a list of suppliers into a short natural-language answer.
#[async_trait]
pub trait SupplierSummarizer: Send + Sync {
    /// Answers `question`, asked in `lang`, about `suppliers`, all located
    /// in `country`. The answer is written in `lang`.
    async fn summarize(
        &self,
        question: &str,
        lang: Language,
        country: &str,
        suppliers: &[supplier::Model],
    ) -> Result<String>;
}

/// Chat completion client for supplier summaries.
pub struct OpenAiSummarizer {
    client: reqwest::Client,
    api_key: String,
    config: LlmConfig,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl OpenAiSummarizer {
    /// Builds a summarizer, or `None` when disabled or no API key is set.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &LlmConfig, api_key: Option<String>) -> Result<Option<Self>> {
        if !config.enabled {
            info!("LLM summaries disabled in config.");
            return Ok(None);
        }
        let Some(api_key) = api_key.filter(|key| !key.trim().is_empty()) else {
            info!("OPENAI_API_KEY not set, supplier lists use the plain fallback.");
            return Ok(None);
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Some(Self {
            client,
            api_key,
            config: config.clone(),
        }))
    }

    fn request_body(
        &self,
        question: &str,
        lang: Language,
        country: &str,
        suppliers: &[supplier::Model],
    ) -> Value {
        let system_prompt = lang.pick(
            &self.config.system_prompt,
            &self.config.english_system_prompt,
        );
        json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_prompt(question, lang, country, suppliers) },
            ],
        })
    }
}

fn user_prompt(
    question: &str,
    lang: Language,
    country: &str,
    suppliers: &[supplier::Model],
) -> String {
    let listed: Vec<Value> = suppliers
        .iter()
        .map(|s| {
            json!({
                "name": s.name,
                "city": s.city,
                "contactPerson": s.contact_person,
            })
        })
        .collect();
    let listed = Value::Array(listed);
    match lang {
        Language::Hebrew => {
            format!("השאלה: \"{question}\"\nהספקים במדינה {country}:\n{listed:#}")
        }
        Language::English => {
            format!("Question: \"{question}\"\nSuppliers in {country}:\n{listed:#}")
        }
    }
}

fn first_content(completion: ChatCompletion) -> Result<String> {
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| Error::Llm {
            message: "completion had no content".to_string(),
        })
}

#[async_trait]
impl SupplierSummarizer for OpenAiSummarizer {
    async fn summarize(
        &self,
        question: &str,
        lang: Language,
        country: &str,
        suppliers: &[supplier::Model],
    ) -> Result<String> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        debug!(
            "Requesting summary of {} suppliers from {url}",
            suppliers.len()
        );

        let completion: ChatCompletion = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(question, lang, country, suppliers))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        first_content(completion)
    }
}
