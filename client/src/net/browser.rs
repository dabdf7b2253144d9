//! `gloo-net` transport for the browser build.
//!
//! Browser (csr): real `fetch` calls via `gloo-net`.
//! Native: every send fails, since these requests are only meaningful in
//! the browser; the cli supplies its own transport.

#![allow(clippy::unused_async)]

use super::api::ApiConfig;
use super::http::{HttpRequest, HttpResponse, HttpTransport, TransportError};
#[cfg(feature = "csr")]
use super::http::{Body, Method, join_url};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowserTransport {
    base_url: String,
}

impl BrowserTransport {
    pub fn new(config: ApiConfig) -> Self {
        Self { base_url: config.base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl HttpTransport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::Request;

            let url = join_url(&self.base_url, &request.path);
            let mut builder = match request.method {
                Method::Get => Request::get(&url),
                Method::Post => Request::post(&url),
                Method::Put => Request::put(&url),
                Method::Patch => Request::patch(&url),
                Method::Delete => Request::delete(&url),
            };
            if !request.query.is_empty() {
                builder = builder.query(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            }
            if let Some(token) = &request.bearer {
                builder = builder.header("Authorization", &format!("Bearer {token}"));
            }
            let prepared = match &request.body {
                Body::Empty => builder.build(),
                Body::Json(value) => builder.json(value),
                Body::Form(pairs) => {
                    let encoded = serde_urlencoded::to_string(pairs).map_err(|e| TransportError(e.to_string()))?;
                    builder
                        .header("Content-Type", "application/x-www-form-urlencoded")
                        .body(encoded)
                }
            }
            .map_err(|e| TransportError(e.to_string()))?;

            let resp = prepared.send().await.map_err(|e| TransportError(e.to_string()))?;
            let status = resp.status();
            let body = resp.text().await.map_err(|e| TransportError(e.to_string()))?;
            Ok(HttpResponse { status, body })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(TransportError("not available outside the browser".to_owned()))
        }
    }
}
