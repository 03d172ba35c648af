use serde::{Deserialize, Serialize};

fn default_lang() -> String {
    "en".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranscriptionRequest {
    pub url: String,
    #[serde(default = "default_lang")]
    pub lang: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TranscriptionDto {
    pub text: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorDto {
    pub detail: String,
}
