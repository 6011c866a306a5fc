pub mod cancel;
pub mod client;
pub mod error;
pub mod interceptors;
pub mod transport;

use futures::future::AbortRegistration;
use http::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

pub use cancel::{add_cancel_token, CancelSource};
pub use client::{HttpClient, HttpClientBuilder, RequestFuture};
pub use error::RequestError;
pub use interceptors::{BearerAuth, RequestInterceptor, ResponseInterceptor, UnwrapEnvelope};
pub use transport::{HttpResponse, OutgoingRequest, ReqwestTransport, Transport};

/// Per-call options handed to the client together with the path.
#[derive(Debug, Default)]
pub struct RequestConfig {
    pub params: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
    cancel: Option<AbortRegistration>,
}

impl RequestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn is_cancellable(&self) -> bool {
        self.cancel.is_some()
    }

    fn take_cancel(&mut self) -> Option<AbortRegistration> {
        self.cancel.take()
    }
}
