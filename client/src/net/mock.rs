//! Scripted transport for tests.
//!
//! Replies are consumed in order. A gated reply holds its request in flight
//! until the test sends the response through the paired oneshot sender.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::oneshot;

use super::http::{HttpRequest, HttpResponse, HttpTransport, TransportError};

type Reply = Result<HttpResponse, TransportError>;

enum Scripted {
    Ready(Reply),
    Gated(oneshot::Receiver<Reply>),
}

#[derive(Clone, Default)]
pub(crate) struct MockTransport {
    replies: Arc<Mutex<VecDeque<Scripted>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(&self, status: u16, body: &str) -> &Self {
        self.push(Scripted::Ready(Ok(HttpResponse::new(status, body))));
        self
    }

    pub(crate) fn reply_json(&self, status: u16, body: &serde_json::Value) -> &Self {
        self.reply(status, &body.to_string())
    }

    pub(crate) fn fail(&self, message: &str) -> &Self {
        self.push(Scripted::Ready(Err(TransportError(message.to_owned()))));
        self
    }

    /// Queue a reply the test releases later.
    pub(crate) fn gate(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.push(Scripted::Gated(rx));
        tx
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub(crate) fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request was sent")
    }

    fn push(&self, scripted: Scripted) {
        self.replies.lock().unwrap_or_else(PoisonError::into_inner).push_back(scripted);
    }
}

impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(request);
        let next = self.replies.lock().unwrap_or_else(PoisonError::into_inner).pop_front();
        match next {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(TransportError("gate dropped".to_owned()))),
            None => Err(TransportError("no scripted reply".to_owned())),
        }
    }
}
