//! Backend provider kinds and their defaults.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Request/response shape spoken by a provider's HTTP API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    /// `POST {base}/chat/completions` with `system` + `user` messages
    OpenAiCompatible,
    /// `POST {base}/messages` with a top-level `system` field
    Anthropic,
    /// `POST {base}/models/{model}:generateContent`
    Gemini,
    /// `POST {base}/api/chat` against a local daemon
    Ollama,
    /// `POST {base}/{model}` text-generation inference
    HuggingFace,
}

/// Whether a provider can be used without an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialRequirement {
    Required,
    Optional,
    None,
}

/// LLM providers that can take a seat on the council
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Claude,
    #[serde(rename = "chatgpt")]
    ChatGpt,
    Gemini,
    Mistral,
    Ollama,
    Groq,
    #[serde(rename = "huggingface")]
    HuggingFace,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "openrouter")]
    OpenRouter,
    Comet,
}

impl ProviderKind {
    /// Canonical seating order used when no agents are requested explicitly.
    ///
    /// The first available provider becomes the synthesizer.
    pub const ALL: [ProviderKind; 10] = [
        ProviderKind::Claude,
        ProviderKind::ChatGpt,
        ProviderKind::Gemini,
        ProviderKind::Mistral,
        ProviderKind::Ollama,
        ProviderKind::Groq,
        ProviderKind::HuggingFace,
        ProviderKind::DeepSeek,
        ProviderKind::OpenRouter,
        ProviderKind::Comet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Claude => "claude",
            ProviderKind::ChatGpt => "chatgpt",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Mistral => "mistral",
            ProviderKind::Ollama => "ollama",
            ProviderKind::Groq => "groq",
            ProviderKind::HuggingFace => "huggingface",
            ProviderKind::DeepSeek => "deepseek",
            ProviderKind::OpenRouter => "openrouter",
            ProviderKind::Comet => "comet",
        }
    }

    /// Display name of the agent seated with default settings.
    pub fn default_agent_name(&self) -> &'static str {
        match self {
            ProviderKind::Claude => "Claude",
            ProviderKind::ChatGpt => "ChatGPT",
            ProviderKind::Gemini => "Gemini",
            ProviderKind::Mistral => "Mistral",
            ProviderKind::Ollama => "Llama",
            ProviderKind::Groq => "Groq",
            ProviderKind::HuggingFace => "HuggingFace",
            ProviderKind::DeepSeek => "DeepSeek",
            ProviderKind::OpenRouter => "OpenRouter",
            ProviderKind::Comet => "Comet",
        }
    }

    pub fn default_role(&self) -> &'static str {
        match self {
            ProviderKind::Claude => {
                "Critical Analyst - Questions assumptions and explores edge cases"
            }
            ProviderKind::ChatGpt => "Pragmatic Problem Solver - Focuses on practical solutions",
            ProviderKind::Gemini => "Research Synthesizer - Integrates diverse perspectives",
            ProviderKind::Mistral => {
                "Devil's Advocate - Challenges consensus and explores alternatives"
            }
            ProviderKind::Ollama => "Local Reasoning Expert - Free local inference",
            ProviderKind::Groq => "Fast Inference Specialist - Ultra-fast free API",
            ProviderKind::HuggingFace => "Open Source Specialist - Community-driven models",
            ProviderKind::DeepSeek => "Technical Innovator - Cutting-edge Chinese LLM",
            ProviderKind::OpenRouter => "Versatile AI - Access to 100+ models",
            ProviderKind::Comet => "Comet AI Analysis - Versatile and powerful models",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Claude => "claude-3-5-sonnet-20241022",
            ProviderKind::ChatGpt => "gpt-4-turbo-preview",
            ProviderKind::Gemini => "gemini-1.5-pro",
            ProviderKind::Mistral => "mistral-large-latest",
            ProviderKind::Ollama => "llama2",
            ProviderKind::Groq => "llama3-70b-8192",
            ProviderKind::HuggingFace => "mistralai/Mistral-7B-Instruct-v0.2",
            ProviderKind::DeepSeek => "deepseek-chat",
            ProviderKind::OpenRouter => "anthropic/claude-3.5-sonnet",
            ProviderKind::Comet => "gpt-3.5-turbo",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Claude => "https://api.anthropic.com/v1",
            ProviderKind::ChatGpt => "https://api.openai.com/v1",
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            ProviderKind::Mistral => "https://api.mistral.ai/v1",
            ProviderKind::Ollama => "http://localhost:11434",
            ProviderKind::Groq => "https://api.groq.com/openai/v1",
            ProviderKind::HuggingFace => "https://api-inference.huggingface.co/models",
            ProviderKind::DeepSeek => "https://api.deepseek.com",
            ProviderKind::OpenRouter => "https://openrouter.ai/api/v1",
            ProviderKind::Comet => "https://api.comet.ml/api/v1",
        }
    }

    /// Prefix of the environment variables configuring this provider
    /// (`<PREFIX>_API_KEY`, `<PREFIX>_MODEL`, `<PREFIX>_BASE_URL`).
    pub fn env_prefix(&self) -> &'static str {
        match self {
            ProviderKind::Claude => "ANTHROPIC",
            ProviderKind::ChatGpt => "OPENAI",
            ProviderKind::Gemini => "GOOGLE",
            ProviderKind::Mistral => "MISTRAL",
            ProviderKind::Ollama => "OLLAMA",
            ProviderKind::Groq => "GROQ",
            ProviderKind::HuggingFace => "HUGGINGFACE",
            ProviderKind::DeepSeek => "DEEPSEEK",
            ProviderKind::OpenRouter => "OPENROUTER",
            ProviderKind::Comet => "COMET",
        }
    }

    pub fn api_key_var(&self) -> String {
        format!("{}_API_KEY", self.env_prefix())
    }

    pub fn credential_requirement(&self) -> CredentialRequirement {
        match self {
            ProviderKind::Ollama => CredentialRequirement::None,
            ProviderKind::HuggingFace => CredentialRequirement::Optional,
            _ => CredentialRequirement::Required,
        }
    }

    pub fn wire_format(&self) -> WireFormat {
        match self {
            ProviderKind::Claude => WireFormat::Anthropic,
            ProviderKind::Gemini => WireFormat::Gemini,
            ProviderKind::Ollama => WireFormat::Ollama,
            ProviderKind::HuggingFace => WireFormat::HuggingFace,
            ProviderKind::ChatGpt
            | ProviderKind::Mistral
            | ProviderKind::Groq
            | ProviderKind::DeepSeek
            | ProviderKind::OpenRouter
            | ProviderKind::Comet => WireFormat::OpenAiCompatible,
        }
    }

    /// Inverse of [`env_prefix`](Self::env_prefix), case-insensitive.
    pub fn from_env_prefix(prefix: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.env_prefix().eq_ignore_ascii_case(prefix))
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "claude" | "anthropic" => Ok(ProviderKind::Claude),
            "chatgpt" | "openai" | "gpt" => Ok(ProviderKind::ChatGpt),
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "mistral" => Ok(ProviderKind::Mistral),
            "ollama" => Ok(ProviderKind::Ollama),
            "groq" => Ok(ProviderKind::Groq),
            "huggingface" | "hf" => Ok(ProviderKind::HuggingFace),
            "deepseek" => Ok(ProviderKind::DeepSeek),
            "openrouter" => Ok(ProviderKind::OpenRouter),
            "comet" => Ok(ProviderKind::Comet),
            other => Err(DomainError::UnknownProvider(other.to_string())),
        }
    }
}
