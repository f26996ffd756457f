use anyhow::Result;

/// Configuration loaded from environment variables
#[derive(Debug)]
pub struct Config {
    pub base_url: String,
    pub access_token: String,
}

/// Load configuration from `.env` and environment
pub fn load_config() -> Result<Config> {
    // Load `.env` file if present
    dotenv::dotenv().ok();
    // Read variables
    let base_url = std::env::var("PROVIDER_BASE_URL")?;
    let access_token = std::env::var("PROVIDER_ACCESS_TOKEN")?;
    Ok(Config {
        base_url,
        access_token,
    })
}
