//! Request configuration

use super::error::ClientError;
use reqwest::Method;
use serde::Serialize;

/// One API request: method, path, optional JSON body, and the cross-cutting
/// flags the dispatcher honors.
///
/// `skip_auth` means "do not attach the bearer token and do not attempt a
/// refresh on 401", required for the login and refresh calls themselves.
/// `skip_loading` keeps the request out of the global loading indicator.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
    pub headers: Vec<(String, String)>,
    pub params: Vec<(String, String)>,
    pub skip_auth: bool,
    pub skip_loading: bool,
}

impl RequestConfig {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: Vec::new(),
            params: Vec::new(),
            skip_auth: false,
            skip_loading: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Append one query parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Append one request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Send without a bearer token and without 401 interception.
    pub fn skip_auth(mut self) -> Self {
        self.skip_auth = true;
        self
    }

    /// Keep this request out of the loading indicator.
    pub fn skip_loading(mut self) -> Self {
        self.skip_loading = true;
        self
    }
}
