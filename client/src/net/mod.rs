//! Networking modules for the backend REST surface.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` defines the transport seam, `api` builds authenticated requests and
//! decodes responses, `browser` is the `gloo-net` transport used in the WASM
//! build, and `types` defines the shared wire schema.

pub mod api;
pub mod browser;
pub mod http;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;
