use http::header::AUTHORIZATION;
use http::HeaderValue;
use parley_types::envelope::{classify_code, CodeOutcome};
use parley_types::Session;
use serde_json::Value;
use tracing::{error, warn};

use super::{HttpResponse, OutgoingRequest, RequestError};

const DEFAULT_ERROR_MESSAGE: &str = "request failed";
const NETWORK_ERROR_MESSAGE: &str = "network error";

/// Stage run on every request before it reaches the transport. Returning an
/// error aborts the call.
pub trait RequestInterceptor {
    fn on_request(&self, request: OutgoingRequest) -> Result<OutgoingRequest, RequestError>;
}

impl<F> RequestInterceptor for F
where
    F: Fn(OutgoingRequest) -> Result<OutgoingRequest, RequestError>,
{
    fn on_request(&self, request: OutgoingRequest) -> Result<OutgoingRequest, RequestError> {
        self(request)
    }
}

/// Stage run on every outcome coming back from the transport, successful or
/// not.
pub trait ResponseInterceptor {
    fn on_response(
        &self,
        outcome: Result<HttpResponse, RequestError>,
    ) -> Result<HttpResponse, RequestError>;
}

impl<F> ResponseInterceptor for F
where
    F: Fn(Result<HttpResponse, RequestError>) -> Result<HttpResponse, RequestError>,
{
    fn on_response(
        &self,
        outcome: Result<HttpResponse, RequestError>,
    ) -> Result<HttpResponse, RequestError> {
        self(outcome)
    }
}

/// Sets `Authorization: Bearer <token>` while the session holds a token.
pub struct BearerAuth {
    session: Session,
}

impl BearerAuth {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl RequestInterceptor for BearerAuth {
    fn on_request(&self, mut request: OutgoingRequest) -> Result<OutgoingRequest, RequestError> {
        let Some(token) = self.session.token() else {
            return Ok(request);
        };

        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers.insert(AUTHORIZATION, value);
            }
            Err(e) => warn!("stored token is not a valid header value, sending without it: {e}"),
        }
        Ok(request)
    }
}

/// Unwraps `{ code, message, data }` envelopes and logs every failure.
pub struct UnwrapEnvelope;

impl ResponseInterceptor for UnwrapEnvelope {
    fn on_response(
        &self,
        outcome: Result<HttpResponse, RequestError>,
    ) -> Result<HttpResponse, RequestError> {
        let mut response = match outcome {
            Ok(response) => response,
            Err(e) => {
                error!("request error: {e}");
                let errorMessage = e.server_message().unwrap_or(NETWORK_ERROR_MESSAGE);
                error!("{errorMessage}");
                return Err(e);
            }
        };

        match classify_code(response.body.get("code")) {
            CodeOutcome::Failure(code) => {
                let message = response
                    .body
                    .get("message")
                    .and_then(Value::as_str)
                    .filter(|message| !message.is_empty())
                    .unwrap_or(DEFAULT_ERROR_MESSAGE)
                    .to_string();
                error!(code, "{message}");
                Err(RequestError::Api { code, message })
            }
            CodeOutcome::Success => {
                response.body = response
                    .body
                    .get_mut("data")
                    .map(Value::take)
                    .unwrap_or(Value::Null);
                Ok(response)
            }
            CodeOutcome::Absent => Ok(response),
        }
    }
}
