use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "mp3-transcribe",
    about = "MP3 Transcribe - transcribe remote MP3 files",
    long_about = "Downloads an MP3 from a URL, splits it into ten-minute segments and transcribes each one with an OpenAI-compatible speech-to-text API. Runs as an HTTP service or as a client of one.",
    after_help = "EXAMPLES:\n    # Start the transcription server\n    mp3-transcribe serve\n\n    # Transcribe a remote file through a running server\n    mp3-transcribe url https://example.com/episode.mp3\n\n    # German audio, different server\n    mp3-transcribe url https://example.com/folge.mp3 --lang de --server-url http://my-server:8080"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(name = "serve")]
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value = "8080")]
        port: u16,
    },
    #[command(name = "url")]
    TranscribeUrl {
        url: String,

        #[arg(long, default_value = "en", value_parser = validate_lang)]
        lang: String,

        #[arg(long, default_value = "http://localhost:8080")]
        server_url: String,
    },
}

pub fn validate_lang(s: &str) -> Result<String, String> {
    let s = s.trim();
    if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic() || c == '-') {
        Ok(s.to_ascii_lowercase())
    } else {
        Err("Language must be a code such as en, de or pt-br".to_string())
    }
}
