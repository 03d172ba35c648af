use std::path::PathBuf;

use anyhow::{Result, anyhow};
use dotenv::dotenv;

use crate::audio::{MIN_SEGMENT_LENGTH_MS, SEGMENT_LENGTH_MS};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "whisper-1";

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct WhisperConfig {
    #[serde(skip_serializing)]
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub segment_length_ms: u64,
    /// Send the transcript so far as the prompt for the next segment.
    pub carry_prompt: bool,
    pub workspace_root: Option<PathBuf>,
}

impl WhisperConfig {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow!("OPENAI_API_KEY is not set"))?;

        let base_url = lookup("OPENAI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let segment_length_ms = match lookup("SEGMENT_LENGTH_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms >= MIN_SEGMENT_LENGTH_MS)
                .ok_or_else(|| {
                    anyhow!(
                        "SEGMENT_LENGTH_MS must be an integer of at least {MIN_SEGMENT_LENGTH_MS}, got {raw:?}"
                    )
                })?,
            None => SEGMENT_LENGTH_MS,
        };

        let carry_prompt = match lookup("WHISPER_CARRY_PROMPT") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| anyhow!("WHISPER_CARRY_PROMPT must be true or false, got {raw:?}"))?,
            None => false,
        };

        Ok(Self {
            api_key,
            base_url,
            model: lookup("WHISPER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            segment_length_ms,
            carry_prompt,
            workspace_root: lookup("WORKSPACE_ROOT").map(PathBuf::from),
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
