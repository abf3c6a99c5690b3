//! HTTP access to the provider's administrative API.

use std::fmt::{self, Display};

use reqwest::{
    blocking::Client,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde_json::Value;

use crate::{
    error::{Error, Result},
    settings::Settings,
};

pub const GROUPS_PATH: &str = "/api/v1/groups";
pub const GROUP_RULES_PATH: &str = "/api/v1/groups/rules";

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Method {
    Post,
    Put,
    Delete,
}

impl Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        write!(f, "{verb}")
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new<S>(method: Method, path: S, body: Option<Value>) -> Self
    where
        S: Into<String>,
    {
        Self {
            method,
            path: path.into(),
            body,
        }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new<S>(status: u16, body: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok_or_created(&self) -> bool {
        matches!(self.status, 200 | 201)
    }

    pub fn is_no_content(&self) -> bool {
        self.status == 204
    }

    /// The `id` string of a JSON response body, if any.
    pub fn id(&self) -> Option<String> {
        serde_json::from_str::<Value>(&self.body)
            .ok()?
            .get("id")?
            .as_str()
            .map(ToString::to_string)
    }
}

/// Sends one request and hands back the raw status and body.
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

/// Blocking `reqwest` transport. Requests are never retried.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::try_from(format!("SSWS {}", settings.api_token))
            .map_err(|_| Error::InvalidToken)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = self.url(&request.path);
        let builder = match request.method {
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        tracing::debug!(method = %request.method, %url, "sending request");
        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        tracing::debug!(method = %request.method, %url, status, "received response");

        Ok(ApiResponse::new(status, body))
    }
}
