/// Settings for the `url` client subcommand.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    pub url: String,
    pub lang: String,
}

impl ClientConfig {
    pub fn new(server_url: String, url: String, lang: String) -> Self {
        Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            url,
            lang,
        }
    }

    pub fn transcribe_endpoint(&self) -> String {
        format!("{}/mp3transcribe/", self.server_url)
    }

    pub fn root_endpoint(&self) -> String {
        format!("{}/", self.server_url)
    }
}
