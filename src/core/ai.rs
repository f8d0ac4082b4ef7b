// ai integration - sends the diagnosis prompt to gemini or claude

use crate::Error;
use serde::{Deserialize, Serialize};
use std::future::Future;

const GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const CLAUDE_URL: &str = "https://api.anthropic.com/v1/messages";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Provider {
    #[default]
    Gemini,
    Claude,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Gemini, Provider::Claude];

    pub fn name(self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::Claude => "claude",
        }
    }

    // env vars checked for a key, in order
    pub fn key_vars(self) -> &'static [&'static str] {
        match self {
            Provider::Gemini => &["GEMINI_API_KEY", "GOOGLE_API_KEY", "GEMNI_API_KEY"],
            Provider::Claude => &["ANTHROPIC_API_KEY", "CLAUDE_API_KEY", "CLAUDE_KEY"],
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&p| p == self).unwrap_or(0)
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Provider::Gemini => "gemini-2.0-flash",
            Provider::Claude => "claude-sonnet-4-20250514",
        }
    }

    pub fn key_from_env(self) -> Option<String> {
        self.key_vars()
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|k| !k.trim().is_empty()))
    }
}

/// Anything that can turn a prompt into free-form text.
pub trait Generate: Send + Sync {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, Error>> + Send;
}

pub struct Ai {
    client: reqwest::Client,
    provider: Provider,
    api_key: String,
    model: String,
}

// gemini wire format
#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiReply>,
}

#[derive(Deserialize)]
struct GeminiReply {
    #[serde(default)]
    parts: Vec<GeminiReplyPart>,
}

#[derive(Deserialize)]
struct GeminiReplyPart {
    #[serde(default)]
    text: String,
}

// claude wire format
#[derive(Serialize)]
struct ClaudeRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ClaudeMessage<'a>>,
}

#[derive(Serialize)]
struct ClaudeMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ClaudeResponse {
    content: Vec<ClaudeContent>,
}

#[derive(Deserialize)]
struct ClaudeContent {
    #[serde(default)]
    text: String,
}

impl Ai {
    /// An explicit key wins over the environment; `model` falls back to the provider default.
    pub fn new(
        provider: Provider,
        api_key: Option<String>,
        model: Option<String>,
    ) -> Result<Self, Error> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| provider.key_from_env())
            .ok_or(Error::MissingApiKey(provider))?;

        Ok(Self {
            client: reqwest::Client::new(),
            provider,
            api_key,
            model: model.unwrap_or_else(|| provider.default_model().to_string()),
        })
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn gemini(&self, prompt: &str) -> Result<String, Error> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(format!("{GEMINI_URL}/{}:generateContent", self.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await?;
            return Err(Error::Provider(format!("gemini returned {status}: {body}")));
        }

        let response: GeminiResponse = response.json().await?;

        // concatenate the parts of the first candidate
        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(Error::Provider("gemini returned no text".to_string()));
        }

        Ok(text)
    }

    async fn claude(&self, prompt: &str) -> Result<String, Error> {
        let request = ClaudeRequest {
            model: &self.model,
            max_tokens: 2048,
            messages: vec![ClaudeMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(CLAUDE_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await?;
            return Err(Error::Provider(format!("claude returned {status}: {body}")));
        }

        let response: ClaudeResponse = response.json().await?;
        let text = response
            .content
            .into_iter()
            .next()
            .map(|c| c.text)
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(Error::Provider("claude returned no text".to_string()));
        }

        Ok(text)
    }
}

impl Generate for Ai {
    async fn generate(&self, prompt: &str) -> Result<String, Error> {
        match self.provider {
            Provider::Gemini => self.gemini(prompt).await,
            Provider::Claude => self.claude(prompt).await,
        }
    }
}
