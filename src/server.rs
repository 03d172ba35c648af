use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware::Logger, post, web};
use anyhow::Result;
use log::{debug, error, info};

use crate::audio::Mp3Decoder;
use crate::download::Fetcher;
use crate::dto::{ErrorDto, TranscriptionDto, TranscriptionRequest};
use crate::pipeline::TranscriptionPipeline;
use crate::whisper::config::WhisperConfig;
use crate::whisper::service::OpenAiWhisper;
use crate::whisper::transcriber::SegmentTranscriber;

pub struct AppState {
    pub pipeline: TranscriptionPipeline,
}

impl AppState {
    /// Wires the production pipeline: symphonia decoding and the OpenAI
    /// transcription API, sharing one HTTP client.
    pub fn from_config(config: &WhisperConfig) -> Self {
        let client = reqwest::Client::new();
        let service = Arc::new(OpenAiWhisper::new(client.clone(), config));
        let transcriber = SegmentTranscriber::from_config(Arc::new(Mp3Decoder), service, config);
        let pipeline = TranscriptionPipeline::new(Fetcher::new(client), transcriber)
            .with_workspace_root(config.workspace_root.clone());
        Self { pipeline }
    }
}

#[get("/")]
pub async fn read_root() -> impl Responder {
    debug!("Root endpoint called");
    HttpResponse::Ok().json(serde_json::json!({ "Hello": "World" }))
}

#[post("/mp3transcribe/")]
pub async fn transcribe_mp3(
    data: web::Data<AppState>,
    request: web::Json<TranscriptionRequest>,
) -> impl Responder {
    let request = request.into_inner();
    info!("Transcription requested for {} (lang={})", request.url, request.lang);

    match data.pipeline.run(&request).await {
        Ok(text) => HttpResponse::Ok().json(TranscriptionDto { text }),
        Err(e) if e.is_download_failure() => {
            error!("{e}");
            HttpResponse::InternalServerError().json(ErrorDto {
                detail: "Failed to download audio file".to_string(),
            })
        }
        Err(e) => {
            error!("Transcription of {} failed: {e:#}", request.url);
            HttpResponse::InternalServerError().json(ErrorDto {
                detail: "Internal Server Error".to_string(),
            })
        }
    }
}

/// Registers the service's routes.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(read_root).service(transcribe_mp3);
}

pub async fn run_server(host: String, port: u16) -> Result<()> {
    info!("Starting MP3 transcription service");

    let config = WhisperConfig::from_env()?;
    info!(
        "Using configuration: {}",
        serde_json::to_string(&config).unwrap_or_default()
    );

    let app_state = web::Data::new(AppState::from_config(&config));

    info!("Starting HTTP server on {host}:{port}");

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(web::JsonConfig::default().limit(64 * 1024))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    Ok(())
}
