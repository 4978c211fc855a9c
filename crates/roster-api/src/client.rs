// Employee collection HTTP client
//
// Wraps `reqwest::Client` with collection/record URL construction and
// status checking. Endpoint methods live in `employees.rs` as inherent
// methods so this module stays focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::{Error, body_preview};
use crate::models::RecordId;
use crate::transport::TransportConfig;

/// Raw HTTP client for one REST collection resource.
///
/// `base_url` is the collection itself (e.g. `http://localhost:5000/employees`);
/// individual records are addressed as `{base_url}/{id}`.
#[derive(Debug, Clone)]
pub struct EmployeeClient {
    http: reqwest::Client,
    base_url: Url,
}

impl EmployeeClient {
    /// Create a client for `base_url`, building the HTTP client from `transport`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(http, base_url)
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn from_reqwest(http: reqwest::Client, base_url: Url) -> Result<Self, Error> {
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    /// The collection URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build the record URL: `{base}/{id}`.
    ///
    /// The id is appended as a single percent-encoded path segment, so ids
    /// containing `/` or `?` cannot escape the collection.
    pub fn record_url(&self, id: &RecordId) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&id.to_string());
        }
        url
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        let body = Self::read_body(resp).await?;

        decode(&body)
    }

    /// Send a POST request with a JSON body, returning the raw response body.
    pub(crate) async fn post(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<String, Error> {
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::read_body(resp).await
    }

    /// Send a PUT request with a JSON body, returning the raw response body.
    pub(crate) async fn put(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<String, Error> {
        debug!("PUT {}", url);

        let resp = self
            .http
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::read_body(resp).await
    }

    /// Send a DELETE request, returning the raw response body.
    pub(crate) async fn send_delete(&self, url: Url) -> Result<String, Error> {
        debug!("DELETE {}", url);

        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::read_body(resp).await
    }

    /// Check the status and read the body as text.
    ///
    /// Any non-2xx status is an `Error::Status` carrying a body preview.
    async fn read_body(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body: body_preview(&body),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        trace!(status = status.as_u16(), bytes = body.len(), "response received");
        Ok(body)
    }
}

/// Decode a JSON body, attaching a preview of the payload on failure.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| {
        let preview = body_preview(body);
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.to_owned(),
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> EmployeeClient {
        EmployeeClient::from_reqwest(reqwest::Client::new(), Url::parse(base).unwrap()).unwrap()
    }

    #[test]
    fn record_url_appends_one_segment() {
        let c = client("http://localhost:5000/employees");
        assert_eq!(
            c.record_url(&RecordId::Number(42_u64.into())).as_str(),
            "http://localhost:5000/employees/42"
        );
    }

    #[test]
    fn record_url_tolerates_trailing_slash() {
        let c = client("http://localhost:5000/employees/");
        assert_eq!(
            c.record_url(&RecordId::Text("abc".into())).as_str(),
            "http://localhost:5000/employees/abc"
        );
    }

    #[test]
    fn record_url_encodes_reserved_characters() {
        let c = client("http://localhost:5000/employees");
        let url = c.record_url(&RecordId::Text("a/b?c".into()));
        assert_eq!(url.as_str(), "http://localhost:5000/employees/a%2Fb%3Fc");
    }

    #[test]
    fn rejects_cannot_be_a_base_urls() {
        let err = EmployeeClient::from_reqwest(
            reqwest::Client::new(),
            Url::parse("mailto:hr@example.com").unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidBaseUrl(_)));
    }

    #[test]
    fn decode_failure_keeps_body() {
        let err = decode::<Vec<u8>>("not json").unwrap_err();
        match err {
            Error::Deserialization { body, .. } => assert_eq!(body, "not json"),
            other => panic!("expected Deserialization, got {other:?}"),
        }
    }
}
