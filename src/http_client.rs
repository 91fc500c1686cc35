use url::Url;

use crate::{
    config::ClientConfig,
    errors::Error,
    transport::{ApiRequest, Transport},
    types::AnyJson,
};

/// A [`Transport`] that talks to the Dodo Payments API over HTTP.
///
/// Sends the configured bearer token with every request. No retries are
/// attempted.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    pub base_url: Url,
    pub client: reqwest::Client,
    pub config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Self::with_client(config, client)
    }

    /// Uses a preconfigured reqwest client (proxies, TLS, ...).
    pub fn with_client(config: ClientConfig, client: reqwest::Client) -> Result<Self, Error> {
        Ok(HttpTransport {
            base_url: config.resolved_base_url()?,
            client,
            config,
        })
    }

    /// Resolves the request's path segments and query against the base URL.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| Error::InvalidConfiguration {
                message: format!("base URL {} cannot have path segments", self.base_url),
            })?;
            segments.pop_if_empty().extend(&request.segments);
        }
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }
}

impl Transport for HttpTransport {
    type Error = Error;

    async fn send(&self, request: &ApiRequest) -> Result<AnyJson, Self::Error> {
        let mut builder = self
            .client
            .request(request.method.clone(), self.url_for(request)?)
            .bearer_auth(&self.config.bearer_token);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        #[cfg(feature = "tracing")]
        tracing::debug!("{} {} -> {}", request.method, request.path(), status);

        if !status.is_success() {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "Request {} {} failed with status {}",
                request.method,
                request.path(),
                status
            );

            // Error bodies are not always JSON (proxies, gateways).
            let body = serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| AnyJson::String(String::from_utf8_lossy(&bytes).into_owned()));
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        if bytes.is_empty() {
            return Ok(AnyJson::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}
