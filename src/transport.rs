use reqwest::Method;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    // Connection failures and non-success statuses.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

// A request against the diary backend, relative to its base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: vec![],
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            query: vec![],
            body: Some(body),
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

// Transport executes requests and returns the decoded JSON body.
// Any non-success outcome is an error. An empty body decodes to Value::Null.
pub trait Transport {
    fn execute(&self, req: Request) -> Result<Value, TransportError>;
}

// HttpTransport sends requests to a diary backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    fn execute(&self, req: Request) -> Result<Value, TransportError> {
        let url = format!("{}{}", self.base_url, req.path);
        let mut builder = self.client.request(req.method, url);
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        if let Some(body) = &req.body {
            // Sets Content-Type: application/json.
            builder = builder.json(body);
        }
        let req = builder.build()?;

        log::debug!("Sending request: {req:?}");

        let text = self.client.execute(req)?.error_for_status()?.text()?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_get_with_query() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/api/v1/scores"),
                request::query(url_decoded(contains(("userId", "42")))),
            ])
            .respond_with(json_encoded(json!([{"line": "a", "score": 1, "date": "2024-01-01"}]))),
        );
        let transport = HttpTransport::new(server.url("/").to_string());

        let actual = transport
            .execute(Request::get("/api/v1/scores").query("userId", "42"))
            .unwrap();
        assert_eq!(
            actual,
            json!([{"line": "a", "score": 1, "date": "2024-01-01"}])
        );
    }

    #[test]
    fn test_post_json_body() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/api/v1/scores"),
                request::headers(contains(key("content-type"))),
                request::body(json_decoded(eq(json!({"hello": "world"})))),
            ])
            .respond_with(status_code(201)),
        );
        let transport = HttpTransport::new(server.url("/").to_string());

        let actual = transport
            .execute(Request::post("/api/v1/scores", json!({"hello": "world"})))
            .unwrap();
        assert_eq!(actual, Value::Null);
    }

    #[test]
    fn test_error_status() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/broken"))
                .respond_with(status_code(500)),
        );
        let transport = HttpTransport::new(server.url("/").to_string());

        let err = transport.execute(Request::get("/broken")).unwrap_err();
        assert!(matches!(err, TransportError::Http(_)), "{err:?}");
    }

    #[test]
    fn test_undecodable_body() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/garbage"))
                .respond_with(status_code(200).body("<html>oops</html>")),
        );
        let transport = HttpTransport::new(server.url("/").to_string());

        let err = transport.execute(Request::get("/garbage")).unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)), "{err:?}");
    }
}
