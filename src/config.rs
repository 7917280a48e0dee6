use serde::Deserialize;

/// Connection settings for the document store, read from the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub url: String,
    pub db_name: String,
}

impl StoreConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let db_name = std::env::var("MONGODB_DB").unwrap_or_else(|_| "viconv".into());

        // MONGODB_URL wins when set; otherwise the URL is composed from
        // host and port.
        let url = match std::env::var("MONGODB_URL") {
            Ok(url) => url,
            Err(_) => {
                let host = std::env::var("MONGODB_HOST").unwrap_or_else(|_| "localhost".into());
                let port = std::env::var("MONGODB_PORT").unwrap_or_else(|_| "27017".into());
                port.parse::<u16>()
                    .map_err(|_| anyhow::anyhow!("MONGODB_PORT is not a valid port: {port}"))?;
                compose_url(&host, &port)
            }
        };

        Ok(Self { url, db_name })
    }
}

fn compose_url(host: &str, port: &str) -> String {
    format!("mongodb://{host}:{port}")
}
