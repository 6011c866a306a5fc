#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use http::StatusCode;
use parley_client::request::{HttpResponse, OutgoingRequest, Transport};
use parley_client::{ClientConfig, HttpClient, RequestError};
use parley_types::Session;
use serde_json::Value;

pub const BASE_URL: &str = "http://api.test";

/// Replays queued outcomes in order and records every request it saw.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    replies: Rc<RefCell<VecDeque<Result<HttpResponse, RequestError>>>>,
    pub seen: Rc<RefCell<Vec<OutgoingRequest>>>,
}

impl ScriptedTransport {
    pub fn reply(&self, status: StatusCode, body: Value) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn fail(&self, error: RequestError) -> &Self {
        self.replies.borrow_mut().push_back(Err(error));
        self
    }

    pub fn last_request(&self) -> OutgoingRequest {
        self.seen
            .borrow()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<HttpResponse, RequestError> {
        self.seen.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(RequestError::Network("no scripted reply".into())))
    }
}

/// Holds every request open until the test releases the gate.
#[derive(Clone)]
pub struct GatedTransport {
    gate: Rc<RefCell<Option<oneshot::Receiver<HttpResponse>>>>,
    pub started: Rc<Cell<usize>>,
    pub settled: Rc<Cell<usize>>,
}

impl GatedTransport {
    pub fn new() -> (Self, oneshot::Sender<HttpResponse>) {
        let (sender, receiver) = oneshot::channel();
        let transport = Self {
            gate: Rc::new(RefCell::new(Some(receiver))),
            started: Rc::new(Cell::new(0)),
            settled: Rc::new(Cell::new(0)),
        };
        (transport, sender)
    }
}

#[async_trait(?Send)]
impl Transport for GatedTransport {
    async fn send(&self, _request: OutgoingRequest) -> Result<HttpResponse, RequestError> {
        self.started.set(self.started.get() + 1);
        let receiver = self.gate.borrow_mut().take().expect("gate used twice");
        let response = receiver
            .await
            .map_err(|_| RequestError::Network("gate dropped".into()))?;
        self.settled.set(self.settled.get() + 1);
        Ok(response)
    }
}

pub fn client_with(transport: impl Transport + 'static, session: Session) -> HttpClient {
    HttpClient::builder(ClientConfig::new(BASE_URL), session)
        .transport(transport)
        .build()
        .expect("client builds with a custom transport")
}
