//! Shared fakes for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

pub use futures::executor::block_on;
use serde_json::json;

use crate::net::error::ApiError;
use crate::net::http::{ApiRequest, ApiResponse, Transport};

/// Transport that records every request and replays scripted responses.
/// With nothing scripted it answers `200 {}`.
#[derive(Default)]
pub struct FakeTransport {
    pub sent: RefCell<Vec<ApiRequest>>,
    replies: RefCell<VecDeque<Result<ApiResponse, ApiError>>>,
}

impl FakeTransport {
    pub fn reply(self, status: u16, body: &str) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Ok(ApiResponse { status, body: body.to_owned() }));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Err(ApiError::Network(message.to_owned())));
        self
    }

    pub fn last(&self) -> ApiRequest {
        self.sent.borrow().last().cloned().expect("no request was sent")
    }

    pub fn count(&self) -> usize {
        self.sent.borrow().len()
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.sent.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse { status: 200, body: "{}".to_owned() }))
    }
}

/// JSON body of a successful login exchange.
pub fn grant_body(token: &str, role: &str) -> String {
    json!({ "token": token, "user": { "id": 1, "username": "operator", "role": role } }).to_string()
}
