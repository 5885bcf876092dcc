use crate::fetch::error::FetchError;
use log::warn;
use reqwest::Client;
use std::future::Future;

/// Something that can turn a URL into the text of the page behind it.
///
/// [`HttpPageSource`] is the real implementation; the seam exists so the
/// cache logic can be exercised without the network.
pub trait PageSource {
    fn fetch_page(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Plain HTTP GET with `reqwest`, no timeout beyond the client default.
#[derive(Debug, Clone, Default)]
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl PageSource for HttpPageSource {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    FetchError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    FetchError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.to_string(), e))?;

        // The service does not always declare a charset, so decode ourselves.
        String::from_utf8(bytes.to_vec()).map_err(|e| FetchError::Decode(url.to_string(), e))
    }
}
