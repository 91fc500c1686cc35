//! Runs endpoints over a transport and decodes their responses.

use serde::Deserialize;

use crate::{
    errors::{Error, Result},
    transport::{Endpoint, Transport},
};

/// Executes generated endpoints over a [`Transport`].
///
/// Responses are decoded into the endpoint's response type without validation;
/// call [`Validate::validate`](crate::core::Validate::validate) on the result for
/// strict checking.
#[derive(Debug, Clone)]
pub struct Client<T> {
    transport: T,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Client { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn execute<E: Endpoint>(&self, endpoint: &E) -> Result<E::Response> {
        let request = endpoint.request()?;

        #[cfg(feature = "tracing")]
        tracing::debug!("Sending {} {}", request.method, request.path());

        let body = self.transport.send(&request).await.map_err(Into::<Error>::into)?;

        let response = E::Response::deserialize(&body).map_err(|err| {
            Error::invalid_data(format!(
                "response to {} {}: {err}",
                request.method,
                request.path()
            ))
        })?;

        #[cfg(feature = "tracing")]
        tracing::debug!("Decoded response to {} {}", request.method, request.path());

        Ok(response)
    }
}

#[cfg(feature = "client")]
impl Client<crate::http_client::HttpTransport> {
    /// Builds an HTTP client from `DODO_PAYMENTS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let config = crate::config::ClientConfig::from_env()?;
        Ok(Client::new(crate::http_client::HttpTransport::new(config)?))
    }
}
