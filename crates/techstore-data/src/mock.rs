//! Scripted transport for native builds and tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;

use crate::{FetchError, RequestBuilder, Response, Transport};

/// A [`Transport`] that answers from a queue of scripted results and
/// records every request it sees.
#[derive(Debug, Default)]
pub struct MockTransport {
    script: RefCell<VecDeque<Result<Response, FetchError>>>,
    requests: RefCell<Vec<RequestBuilder>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body.
    pub fn respond_with(self, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.push(Ok(Response::json_body(status, body)));
        self
    }

    /// Queue a transport-level failure.
    pub fn fail_with(self, error: FetchError) -> Self {
        self.push(Err(error));
        self
    }

    /// Queue a result on a shared transport.
    pub fn push(&self, result: Result<Response, FetchError>) {
        self.script.borrow_mut().push_back(result);
    }

    /// Requests sent so far, oldest first.
    pub fn requests(&self) -> Vec<RequestBuilder> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        self.requests.borrow_mut().push(request);
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::RequestError("no scripted response".to_string())))
    }
}
