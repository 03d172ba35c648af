use anyhow::{Result, anyhow};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::dto::TranscriptionRequest;

pub async fn send_transcription_request(client: &reqwest::Client, config: &ClientConfig) -> Result<Value> {
    let request = TranscriptionRequest {
        url: config.url.clone(),
        lang: config.lang.clone(),
    };

    println!("🚀 Sending transcription request to: {}", config.transcribe_endpoint());
    println!("   Audio: {}, Language: {}", request.url, request.lang);

    let response = client
        .post(config.transcribe_endpoint())
        .json(&request)
        .send()
        .await
        .map_err(|e| anyhow!("Failed to send request: {}", e))?;

    let status = response.status();
    let response_text = response
        .text()
        .await
        .map_err(|e| anyhow!("Failed to read response: {}", e))?;

    if !status.is_success() {
        return Err(anyhow!(
            "Server returned error {}: {}",
            status,
            response_text
        ));
    }

    let json: Value = serde_json::from_str(&response_text)
        .map_err(|e| anyhow!("Failed to parse JSON response: {}", e))?;

    Ok(json)
}

pub async fn check_server_health(client: &reqwest::Client, config: &ClientConfig) -> Result<()> {
    let endpoint = config.root_endpoint();
    println!("🔍 Checking server at: {endpoint}");

    let response = client
        .get(&endpoint)
        .send()
        .await
        .map_err(|e| anyhow!("Failed to connect to server: {}", e))?;

    if response.status().is_success() {
        println!("✅ Server is up");
        Ok(())
    } else {
        Err(anyhow!("Server health check failed: {}", response.status()))
    }
}

pub async fn run_client(config: ClientConfig) -> Result<()> {
    println!("🎵 MP3 Transcribe Client");
    println!("========================");

    let client = reqwest::Client::new();

    if let Err(e) = check_server_health(&client, &config).await {
        eprintln!("❌ {e}");
        eprintln!("💡 Make sure the server is running: mp3-transcribe serve");
        return Err(e);
    }

    match send_transcription_request(&client, &config).await {
        Ok(result) => {
            println!("\n✅ Transcription completed!");
            println!("📝 Result:");
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Err(e) => {
            eprintln!("❌ Transcription failed: {e}");
            return Err(e);
        }
    }

    Ok(())
}
