use std::sync::Arc;

use reqwest::{Client, Url};
use reqwest_cookie_store::CookieStoreMutex;

use crate::error::WilmaError;

/// Context object shared by every Wilma request: the HTTP client with its
/// cookie jar and the validated base URL. The jar carries the session state
/// established by the login POST; it lives in memory only and dies with the
/// process.
pub struct WilmaClient {
    client: Client,
    base_url: Url,
}

impl WilmaClient {
    /// Builds the client from the CLI-supplied address. Accepts either a bare
    /// host (`wilma.example.fi`) or a full `https://` URL; an address that
    /// does not parse is fatal before any network call.
    pub fn new(wilma_url: &str) -> Result<WilmaClient, WilmaError> {
        let with_scheme = if wilma_url.contains("://") {
            wilma_url.to_owned()
        } else {
            format!("https://{}/", wilma_url)
        };

        let mut base_url = Url::parse(&with_scheme)
            .map_err(|_| WilmaError::InvalidUrl(with_scheme.clone()))?;
        if base_url.host_str().is_none() {
            return Err(WilmaError::InvalidUrl(with_scheme));
        }
        // Request paths are appended directly, so the base must end in a slash.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let cookie_store = Arc::new(CookieStoreMutex::new(
            reqwest_cookie_store::CookieStore::new(None),
        ));
        let client = Client::builder()
            .cookie_provider(Arc::clone(&cookie_store))
            .gzip(true)
            .build()?;

        Ok(WilmaClient { client, base_url })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Resolves a path like `index_json` or `schedule/index_json?...`
    /// against the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_https_scheme() {
        let client = WilmaClient::new("wilma.example.fi").unwrap();
        assert_eq!(
            client.url("index_json"),
            "https://wilma.example.fi/index_json"
        );
    }

    #[test]
    fn full_url_is_kept() {
        let client = WilmaClient::new("https://wilma.example.fi/").unwrap();
        assert_eq!(client.url("login"), "https://wilma.example.fi/login");
    }

    #[test]
    fn url_with_path_keeps_trailing_slash() {
        let client = WilmaClient::new("https://wilma.example.fi/prod").unwrap();
        assert_eq!(
            client.url("index_json"),
            "https://wilma.example.fi/prod/index_json"
        );
    }

    #[test]
    fn garbage_address_is_rejected() {
        assert!(matches!(
            WilmaClient::new("not a url at all"),
            Err(WilmaError::InvalidUrl(_))
        ));
    }
}
