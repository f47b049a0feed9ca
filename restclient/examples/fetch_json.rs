use restclient::{json_status_response, ApiClient, ClientConfig, ErrorCode, RequestOptions};
use std::time::Duration;
use tracing::{error, info};

#[derive(Debug, Clone, Copy)]
enum DemoError {
    NotFound,
    RateLimited,
}

impl ErrorCode for DemoError {
    fn code(&self) -> &str {
        match self {
            DemoError::NotFound => "not_found",
            DemoError::RateLimited => "rate_limited",
        }
    }

    fn name(&self) -> &str {
        match self {
            DemoError::NotFound => "NotFound",
            DemoError::RateLimited => "RateLimited",
        }
    }

    fn all() -> &'static [Self] {
        &[DemoError::NotFound, DemoError::RateLimited]
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    let mut args = std::env::args().skip(1);
    let base_url = args.next().unwrap_or_else(|| "https://httpbin.org".to_string());
    let path = args.next().unwrap_or_else(|| "json".to_string());

    let config = ClientConfig::new(base_url).with_retry(2, Duration::from_secs(1));
    let client = ApiClient::<DemoError>::with_config(config)?;

    match client.get(&path, RequestOptions::new(), json_status_response) {
        Ok((body, status)) => {
            info!("Status: {}", status);
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Err(e) => {
            error!("Request failed: {}", e);
            if let Some(code) = e.error() {
                error!("Domain error: {}", code.name());
            }
            return Err(e.into());
        }
    }

    Ok(())
}
