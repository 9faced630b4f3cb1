//! Fetch plumbing for the TechStore storefront.
//!
//! The storefront makes one kind of request: a `GET` built with
//! [`RequestBuilder`] and carried by a [`Transport`], which is the window's
//! `fetch` on `wasm32` or a scripted [`MockTransport`] everywhere else.
//!
//! ```rust,ignore
//! use techstore_data::FetchClient;
//!
//! #[derive(serde::Deserialize)]
//! struct User {
//!     name: String,
//!     email: String,
//! }
//!
//! let users: Vec<User> = FetchClient::browser()
//!     .get("/api/users")
//!     .accept("application/json")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```

#[cfg(target_arch = "wasm32")]
mod browser;
mod error;
mod mock;
mod request;
mod response;

use std::fmt;
use std::rc::Rc;

use async_trait::async_trait;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserTransport;
pub use error::FetchError;
pub use mock::MockTransport;
pub use request::RequestBuilder;
pub use response::Response;

/// Carries one request to the server and brings back whatever it answered.
///
/// Only transport failures are errors here; a 4xx or 5xx is still `Ok`.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

/// Shared entry point for outgoing requests.
#[derive(Clone)]
pub struct FetchClient {
    transport: Rc<dyn Transport>,
}

impl FetchClient {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self::from_shared(Rc::new(transport))
    }

    /// For callers that keep their own handle on the transport, as tests do.
    pub fn from_shared(transport: Rc<dyn Transport>) -> Self {
        Self { transport }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        Self::new(BrowserTransport)
    }

    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        ClientRequestBuilder {
            builder: RequestBuilder::get(url),
            transport: Rc::clone(&self.transport),
        }
    }
}

impl fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchClient").finish_non_exhaustive()
    }
}

/// A [`RequestBuilder`] that knows which transport will send it.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
    transport: Rc<dyn Transport>,
}

impl ClientRequestBuilder {
    pub fn accept(mut self, content_type: impl Into<String>) -> Self {
        self.builder = self.builder.accept(content_type);
        self
    }

    pub async fn send(self) -> Result<Response, FetchError> {
        self.transport.send(self.builder).await
    }
}

pub mod prelude {
    pub use crate::{FetchClient, FetchError, Response, Transport};
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_get_is_sent_as_built() {
        let transport = Rc::new(MockTransport::new().respond_with(200, "[]"));
        let client = FetchClient::from_shared(transport.clone());

        let response =
            block_on(client.get("/api/users").accept("application/json").send()).unwrap();

        assert!(response.is_success());
        let sent = &transport.requests()[0];
        assert_eq!(sent.url(), "/api/users");
        assert_eq!(sent.header_value("Accept"), Some("application/json"));
    }

    #[test]
    fn test_clones_share_the_transport() {
        let transport = Rc::new(
            MockTransport::new()
                .respond_with(200, "[]")
                .respond_with(200, "[]"),
        );
        let client = FetchClient::from_shared(transport.clone());
        let other = client.clone();

        block_on(client.get("/api/users").send()).unwrap();
        block_on(other.get("/api/users").send()).unwrap();

        assert_eq!(transport.requests().len(), 2);
    }

    #[test]
    fn test_transport_failure_is_returned() {
        let client = FetchClient::new(
            MockTransport::new().fail_with(FetchError::RequestError("offline".to_string())),
        );

        let result = block_on(client.get("/api/users").send());
        assert!(matches!(result, Err(FetchError::RequestError(_))));
    }

    #[test]
    fn test_unscripted_request_fails() {
        let client = FetchClient::new(MockTransport::new());
        assert!(block_on(client.get("/api/users").send()).is_err());
    }
}
