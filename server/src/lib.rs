//! HTTP transport for the suggestion engine.
//!
//! Each client is tracked with a cookie; its game lives in a
//! [`store::SessionStore`] slot. [`Router`] is a pure function from
//! [`HttpRequest`] to [`HttpResponse`], and [`run_server`] feeds it from a
//! `tiny_http` listener.

pub mod error;
pub mod http;
pub mod router;
mod server;
pub mod store;

pub use error::ServerError;
pub use http::HttpRequest;
pub use http::HttpResponse;
pub use http::Method;
pub use http::SESSION_COOKIE;
pub use router::Router;
pub use server::run_server;
