use std::rc::Rc;

use futures::future::{Abortable, LocalBoxFuture};
use futures::FutureExt;
use http::header::{HeaderName, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method};
use parley_types::Session;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::{
    BearerAuth, HttpResponse, OutgoingRequest, RequestConfig, RequestError, RequestInterceptor,
    ReqwestTransport, ResponseInterceptor, Transport, UnwrapEnvelope,
};
use crate::config::ClientConfig;

/// Pending call; nothing is sent until it is first polled.
pub type RequestFuture<T> = LocalBoxFuture<'static, Result<T, RequestError>>;

/// Configured HTTP client with a fixed interceptor pipeline.
///
/// Every call runs the request stages in order, hits the transport once, then
/// folds the outcome through the response stages. Cheap to clone.
#[derive(Clone)]
pub struct HttpClient {
    inner: Rc<ClientInner>,
}

struct ClientInner {
    config: ClientConfig,
    default_headers: HeaderMap,
    transport: Box<dyn Transport>,
    request_interceptors: Vec<Box<dyn RequestInterceptor>>,
    response_interceptors: Vec<Box<dyn ResponseInterceptor>>,
}

pub struct HttpClientBuilder {
    config: ClientConfig,
    session: Session,
    default_headers: HeaderMap,
    transport: Option<Box<dyn Transport>>,
    request_interceptors: Vec<Box<dyn RequestInterceptor>>,
    response_interceptors: Vec<Box<dyn ResponseInterceptor>>,
}

impl HttpClientBuilder {
    /// Replaces the default reqwest transport.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    pub fn default_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    /// Runs after the bearer stage, in registration order.
    pub fn request_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.request_interceptors.push(Box::new(interceptor));
        self
    }

    /// Runs after the envelope stage, in registration order.
    pub fn response_interceptor(mut self, interceptor: impl ResponseInterceptor + 'static) -> Self {
        self.response_interceptors.push(Box::new(interceptor));
        self
    }

    pub fn build(self) -> Result<HttpClient, RequestError> {
        let transport: Box<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Box::new(ReqwestTransport::new(self.config.timeout())?),
        };

        let mut requestStages: Vec<Box<dyn RequestInterceptor>> =
            vec![Box::new(BearerAuth::new(self.session))];
        requestStages.extend(self.request_interceptors);

        let mut responseStages: Vec<Box<dyn ResponseInterceptor>> =
            vec![Box::new(UnwrapEnvelope)];
        responseStages.extend(self.response_interceptors);

        Ok(HttpClient {
            inner: Rc::new(ClientInner {
                config: self.config,
                default_headers: self.default_headers,
                transport,
                request_interceptors: requestStages,
                response_interceptors: responseStages,
            }),
        })
    }
}

impl HttpClient {
    pub fn builder(config: ClientConfig, session: Session) -> HttpClientBuilder {
        let mut defaultHeaders = HeaderMap::new();
        defaultHeaders.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        HttpClientBuilder {
            config,
            session,
            default_headers: defaultHeaders,
            transport: None,
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
        }
    }

    /// Client with the default pipeline over reqwest.
    pub fn new(config: ClientConfig, session: Session) -> Result<Self, RequestError> {
        Self::builder(config, session).build()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn get<T>(&self, path: &str, config: RequestConfig) -> RequestFuture<T>
    where
        T: DeserializeOwned + 'static,
    {
        self.request(Method::GET, path, config)
    }

    pub fn delete<T>(&self, path: &str, config: RequestConfig) -> RequestFuture<T>
    where
        T: DeserializeOwned + 'static,
    {
        self.request(Method::DELETE, path, config)
    }

    pub fn post<T, B>(&self, path: &str, body: &B, config: RequestConfig) -> RequestFuture<T>
    where
        T: DeserializeOwned + 'static,
        B: Serialize + ?Sized,
    {
        self.request_with_body(Method::POST, path, body, config)
    }

    pub fn put<T, B>(&self, path: &str, body: &B, config: RequestConfig) -> RequestFuture<T>
    where
        T: DeserializeOwned + 'static,
        B: Serialize + ?Sized,
    {
        self.request_with_body(Method::PUT, path, body, config)
    }

    pub fn patch<T, B>(&self, path: &str, body: &B, config: RequestConfig) -> RequestFuture<T>
    where
        T: DeserializeOwned + 'static,
        B: Serialize + ?Sized,
    {
        self.request_with_body(Method::PATCH, path, body, config)
    }

    /// Issues one call. If `config` carries a cancellation signal, the whole
    /// pipeline is aborted when its source fires before the call settles.
    pub fn request<T>(&self, method: Method, path: &str, mut config: RequestConfig) -> RequestFuture<T>
    where
        T: DeserializeOwned + 'static,
    {
        let client = self.clone();
        let url = self.inner.config.url_for(path);
        let registration = config.take_cancel();

        let logUrl = url.clone();
        let dispatch = async move {
            let response = client.dispatch(method, url, config).await?;
            serde_json::from_value(response.body).map_err(|e| RequestError::Decode(e.to_string()))
        };

        match registration {
            None => dispatch.boxed_local(),
            Some(registration) => Abortable::new(dispatch, registration)
                .map(move |outcome| {
                    outcome.unwrap_or_else(|_aborted| {
                        debug!(url = %logUrl, "request cancelled");
                        Err(RequestError::Cancelled)
                    })
                })
                .boxed_local(),
        }
    }

    fn request_with_body<T, B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        mut config: RequestConfig,
    ) -> RequestFuture<T>
    where
        T: DeserializeOwned + 'static,
        B: Serialize + ?Sized,
    {
        match serde_json::to_value(body) {
            Ok(value) => {
                config.body = Some(value);
                config
                    .headers
                    .entry(CONTENT_TYPE)
                    .or_insert(HeaderValue::from_static("application/json"));
                self.request(method, path, config)
            }
            Err(e) => {
                let error = RequestError::Encode(e.to_string());
                async move { Err(error) }.boxed_local()
            }
        }
    }

    async fn dispatch(
        &self,
        method: Method,
        url: String,
        config: RequestConfig,
    ) -> Result<HttpResponse, RequestError> {
        let mut headers = self.inner.default_headers.clone();
        headers.extend(config.headers);

        let mut request = OutgoingRequest {
            method,
            url,
            params: config.params,
            headers,
            body: config.body,
        };
        for interceptor in &self.inner.request_interceptors {
            request = interceptor.on_request(request)?;
        }

        debug!(method = %request.method, url = %request.url, "dispatching request");
        let mut outcome = self
            .inner
            .transport
            .send(request)
            .await
            .and_then(|response| {
                if response.status.is_success() {
                    Ok(response)
                } else {
                    Err(RequestError::Status {
                        status: response.status,
                        body: response.body,
                    })
                }
            });

        for interceptor in &self.inner.response_interceptors {
            outcome = interceptor.on_response(outcome);
        }
        outcome
    }
}
