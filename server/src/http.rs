//! Transport-neutral request and response types. The router only sees
//! these, so it can be driven without a socket.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::ServerError;

pub const SESSION_COOKIE: &str = "lexapprox_session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Options,
    Other(String),
}

impl Method {
    pub fn parse(method: &str) -> Self {
        match method.to_ascii_uppercase().as_str() {
            "GET" => Method::Get,
            "OPTIONS" => Method::Options,
            other => Method::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub origin: Option<String>,
    pub session_id: Option<Uuid>,
}

impl HttpRequest {
    /// Split `url` into path and decoded query parameters. Later duplicates
    /// of a parameter win.
    pub fn new(method: Method, url: &str) -> Self {
        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, parse_query(query)),
            None => (url, HashMap::new()),
        };
        Self {
            method,
            path: path.to_string(),
            query,
            origin: None,
            session_id: None,
        }
    }

    pub fn get(url: &str) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_session(mut self, id: Uuid) -> Self {
        self.session_id = Some(id);
        self
    }

    /// Read the session id out of a `Cookie` header. Malformed ids are
    /// ignored so the client simply starts a new session.
    pub fn with_cookie_header(mut self, header: &str) -> Self {
        self.session_id = header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok());
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }
}

fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key), decode(value))
        })
        .collect()
}

fn decode(component: &str) -> String {
    let spaced = component.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn json<T: Serialize>(value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self::with_body(200, "application/json", body),
            Err(err) => Self::error_body(500, "serialization", &err.to_string()),
        }
    }

    pub fn png(body: Vec<u8>) -> Self {
        Self::with_body(200, "image/png", body)
    }

    pub fn no_content() -> Self {
        Self {
            status: 204,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn from_error(err: &ServerError) -> Self {
        Self::error_body(err.status(), err.code(), &err.to_string())
    }

    fn error_body(status: u16, code: &str, message: &str) -> Self {
        let body = json!({ "error": { "code": code, "message": message } });
        Self::with_body(status, "application/json", body.to_string().into_bytes())
    }

    fn with_body(status: u16, content_type: &str, body: Vec<u8>) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".to_string(), content_type.to_string())],
            body,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn push_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.push((name.to_string(), value.into()));
    }

    pub fn json_body(&self) -> Option<serde_json::Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_path_and_decodes_query() {
        let request = HttpRequest::get("/suggestions?item=back%20pain&x=a+b&flag");
        assert_eq!(request.path, "/suggestions");
        assert_eq!(request.param("item"), Some("back pain"));
        assert_eq!(request.param("x"), Some("a b"));
        assert_eq!(request.param("flag"), Some(""));
        assert_eq!(request.param("missing"), None);
    }

    #[test]
    fn reads_session_cookie() {
        let id = Uuid::new_v4();
        let request = HttpRequest::get("/undo")
            .with_cookie_header(&format!("theme=dark; {SESSION_COOKIE}={id}; other=1"));
        assert_eq!(request.session_id, Some(id));

        let garbage = HttpRequest::get("/undo").with_cookie_header("lexapprox_session=nope");
        assert_eq!(garbage.session_id, None);
    }

    #[test]
    fn error_responses_carry_code() {
        let response = HttpResponse::from_error(&ServerError::MissingParameter("item"));
        assert_eq!(response.status, 422);
        assert_eq!(
            response.json_body().unwrap()["error"]["code"],
            "missing_parameter"
        );
        assert_eq!(response.header("content-type"), Some("application/json"));
    }

    #[test]
    fn methods_are_case_insensitive() {
        assert_eq!(Method::parse("get"), Method::Get);
        assert_eq!(Method::parse("OPTIONS"), Method::Options);
        assert_eq!(Method::parse("post"), Method::Other("POST".into()));
    }
}
