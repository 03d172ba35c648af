use clap::Parser;

use mp3_transcribe::cli::{Cli, Commands};
use mp3_transcribe::client::run_client;
use mp3_transcribe::config::ClientConfig;
use mp3_transcribe::server::run_server;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => run_server(host, port).await,
        Commands::TranscribeUrl {
            url,
            lang,
            server_url,
        } => run_client(ClientConfig::new(server_url, url, lang)).await,
    }
}
