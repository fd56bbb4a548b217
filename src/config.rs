use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TasteDive similar-items endpoint
    #[serde(default = "default_tastedive_api_url")]
    pub tastedive_api_url: String,

    /// TasteDive API key, sent as `k` when present
    #[serde(default)]
    pub tastedive_api_key: Option<String>,

    /// OMDb metadata endpoint
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// OMDb API key, sent as `apikey` when present
    #[serde(default)]
    pub omdb_api_key: Option<String>,

    /// Number of related titles requested per seed title
    #[serde(default = "default_related_limit")]
    pub related_limit: u32,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tastedive_api_url() -> String {
    "https://tastedive.com/api/similar".to_string()
}

fn default_omdb_api_url() -> String {
    "http://www.omdbapi.com/".to_string()
}

fn default_related_limit() -> u32 {
    5
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tastedive_api_url: default_tastedive_api_url(),
            tastedive_api_key: None,
            omdb_api_url: default_omdb_api_url(),
            omdb_api_key: None,
            related_limit: default_related_limit(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
