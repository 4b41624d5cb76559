//! Headless stand-in for an audio element
//!
//! There is no decoder in the CLI. A track "starts" when its stream answers
//! a `HEAD` request, and never starts otherwise, which leaves the stall
//! watchdog to move past it.

use crate::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

#[async_trait]
pub trait TrackProbe: Send + Sync {
    /// Whether the stream at `url` would start playing
    async fn reachable(&self, url: &str) -> bool;
}

pub struct HttpProbe {
    http: Client,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(format!("Tocata/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl TrackProbe for HttpProbe {
    async fn reachable(&self, url: &str) -> bool {
        match self.http.head(url).send().await {
            Ok(response) => {
                let status = response.status();
                debug!(url = %url, status = status.as_u16(), "Probed stream");
                status.is_success()
            }
            Err(e) => {
                debug!(url = %url, error = %e, "Stream unreachable");
                false
            }
        }
    }
}
