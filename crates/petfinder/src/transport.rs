//! Blocking transport seam for the listing service.
//!
//! The client is generic over [`ListingTransport`] so the pagination and
//! retry protocol can be exercised against a scripted transport in
//! tests. Production code uses [`HttpTransport`].

use tracing::debug;

use crate::error::{Error, Result};

/// Base URL for the shelter listing endpoint.
const GETPETS_URL: &str = "http://api.petfinder.com/shelter.getPets";

/// Parameters of one page request.
#[derive(Debug, Clone)]
pub struct PageQuery {
    pub shelter_id: String,
    pub status: String,
    pub offset: u32,
    pub count: u32,
}

/// One blocking page request against the listing service.
pub trait ListingTransport {
    /// Deliver the request and return the raw response body.
    ///
    /// Any error from this call is a transport failure: the caller must
    /// not retry it.
    fn get_page(&self, api_key: &str, query: &PageQuery) -> Result<String>;
}

/// HTTP transport over a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    /// Create a transport against the production endpoint.
    pub fn new() -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            base_url: GETPETS_URL.to_string(),
        }
    }

    /// Create a transport against a custom endpoint URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl ListingTransport for HttpTransport {
    fn get_page(&self, api_key: &str, query: &PageQuery) -> Result<String> {
        debug!(url = %self.base_url, offset = query.offset, "requesting listing page");
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("key", api_key),
                ("id", &query.shelter_id),
                ("status", &query.status),
                ("offset", &query.offset.to_string()),
                ("count", &query.count.to_string()),
                ("output", "full"),
                ("format", "xml"),
            ])
            .send()?;

        if !response.status().is_success() {
            return Err(Error::Transport(format!(
                "service returned HTTP {}",
                response.status()
            )));
        }
        Ok(response.text()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_defaults_to_production_endpoint() {
        let transport = HttpTransport::new();
        assert_eq!(transport.base_url, GETPETS_URL);
    }

    #[test]
    fn test_transport_with_custom_endpoint() {
        let transport = HttpTransport::with_base_url("http://localhost:9999/getPets");
        assert_eq!(transport.base_url, "http://localhost:9999/getPets");
    }
}
