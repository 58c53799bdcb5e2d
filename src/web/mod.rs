//! Web quotation fetcher
//!
//! One blocking GET per run, no retries. Transport problems come back as
//! [`BcvError::Transport`]; a page without the expected markup is a
//! [`BcvError::Markup`] error.
//!
//! # Certificate validation
//!
//! The central bank site has served an incomplete certificate chain, so
//! `insecure_transport` can disable certificate validation for this client.
//! It is off by default. Turning it on means the fetched rates can be
//! tampered with by anyone on the network path; it is logged as a warning
//! every time the client is built.

mod page;

pub use page::{parse_quotation_page, parse_timestamp_date, WebQuotation};

use crate::config::Config;
use crate::error::{BcvError, BcvResult};
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("bcv-rates/", env!("CARGO_PKG_VERSION"));

pub struct WebFetcher {
    http: reqwest::blocking::Client,
    url: String,
}

impl WebFetcher {
    pub fn new(config: &Config) -> BcvResult<Self> {
        if config.insecure_transport {
            warn!(
                url = %config.source_url,
                "TLS certificate validation is DISABLED for the quotation source"
            );
        }

        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(config.insecure_transport)
            .build()
            .map_err(|e| BcvError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: config.source_url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download the page body.
    pub fn fetch_page(&self) -> BcvResult<String> {
        debug!(url = %self.url, "fetching quotation page");
        let response = self.http.get(&self.url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(BcvError::Transport(format!(
                "{} returned HTTP {}",
                self.url,
                status.as_u16()
            )));
        }
        Ok(response.text()?)
    }

    /// Fetch and parse the current quotation.
    pub fn fetch(&self) -> BcvResult<WebQuotation> {
        let body = self.fetch_page()?;
        parse_quotation_page(&body)
    }
}
