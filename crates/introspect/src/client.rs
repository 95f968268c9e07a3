//! Configurable GraphQL introspection client.
//!
//! Requests are retried with exponential backoff when the endpoint is
//! unreachable, answers with a server error, or throttles the caller. A
//! throttle is either a 429 status or a 200 response whose `errors` list
//! contains a `Throttled` message.

use crate::{IntrospectionError, IntrospectionResponse, Result, INTROSPECTION_QUERY};
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

/// Default timeout for introspection requests (30 seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout (15 seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 15;

/// Default number of retry attempts.
const DEFAULT_RETRIES: u32 = 5;

const DEFAULT_MIN_WAIT: Duration = Duration::from_secs(1);
const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(60);

/// Message a throttling endpoint puts in the GraphQL `errors` list.
const THROTTLED_MESSAGE: &str = "Throttled";

/// A configurable client for executing GraphQL introspection queries.
///
/// # Examples
///
/// ```no_run
/// use graphql_introspect::IntrospectionClient;
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = IntrospectionClient::new()
///     .with_header("X-Shopify-Access-Token", "secret")
///     .with_timeout(Duration::from_secs(60))
///     .with_retries(3);
/// let response = client.execute("https://shop.example.com/api/graphql.json").await?;
/// println!("{} types", response.data.schema.types.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct IntrospectionClient {
    headers: HashMap<String, String>,
    timeout: Duration,
    connect_timeout: Duration,
    retries: u32,
    min_wait: Duration,
    max_wait: Duration,
}

impl Default for IntrospectionClient {
    fn default() -> Self {
        Self::new()
    }
}

impl IntrospectionClient {
    /// Creates a new introspection client with default settings.
    ///
    /// Default settings:
    /// - 30 second request timeout
    /// - 15 second connection timeout
    /// - 5 retries, waiting between 1 and 60 seconds
    /// - No custom headers
    #[must_use]
    pub fn new() -> Self {
        Self {
            headers: HashMap::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            retries: DEFAULT_RETRIES,
            min_wait: DEFAULT_MIN_WAIT,
            max_wait: DEFAULT_MAX_WAIT,
        }
    }

    /// Adds a custom HTTP header to be sent with the introspection request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds multiple HTTP headers from an iterator.
    ///
    /// ```no_run
    /// # use graphql_introspect::IntrospectionClient;
    /// let headers = vec![
    ///     ("Authorization", "Bearer token"),
    ///     ("X-Request-ID", "12345"),
    /// ];
    /// let client = IntrospectionClient::new().with_headers(headers);
    /// ```
    #[must_use]
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.headers.insert(name.into(), value.into());
        }
        self
    }

    /// Sets the request timeout (connection + transfer).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connection timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the number of retry attempts after the first request.
    #[must_use]
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Sets the bounds of the backoff delay between attempts.
    ///
    /// The first retry waits `min`, each later retry doubles the previous
    /// delay, and no delay exceeds `max`.
    #[must_use]
    pub fn with_wait(mut self, min: Duration, max: Duration) -> Self {
        self.min_wait = min;
        self.max_wait = max.max(min);
        self
    }

    /// Executes an introspection query against the specified GraphQL endpoint.
    ///
    /// # Errors
    ///
    /// Returns the last error once all attempts are spent, or the first
    /// error that is not worth retrying (4xx other than 429, malformed
    /// bodies, GraphQL errors without data).
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, url: &str) -> Result<IntrospectionResponse> {
        let value = self.with_retry(|| self.execute_once(url)).await?;
        let introspection: IntrospectionResponse =
            serde_json::from_value(value).inspect_err(|e| {
                tracing::error!(error = %e, "Failed to parse introspection response");
            })?;

        tracing::info!(
            types = introspection.data.schema.types.len(),
            directives = introspection.data.schema.directives.len(),
            "Introspection successful"
        );
        Ok(introspection)
    }

    /// Executes introspection and returns the raw JSON response.
    ///
    /// Useful for saving the schema exactly as the server sent it.
    #[tracing::instrument(skip(self))]
    pub async fn execute_raw(&self, url: &str) -> Result<serde_json::Value> {
        self.with_retry(|| self.execute_once(url)).await
    }

    async fn with_retry<T, F, Fut>(&self, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let attempts = self.retries.saturating_add(1);
        let mut attempt = 0;

        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    attempt += 1;
                    tracing::warn!(attempt, error = %e, "Request failed");
                    if attempt >= attempts || !Self::is_retryable(&e) {
                        return Err(e);
                    }

                    let retry_after = match e {
                        IntrospectionError::Throttled { retry_after } => retry_after,
                        _ => None,
                    };
                    let delay = self.backoff_delay(attempt, retry_after);
                    tracing::info!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying after delay"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Sends one request and returns the decoded JSON body.
    async fn execute_once(&self, url: &str) -> Result<serde_json::Value> {
        tracing::debug!("Creating HTTP client with timeouts");
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .build()
            .map_err(|e| {
                IntrospectionError::Network(format!("Failed to create HTTP client: {e}"))
            })?;

        let query_body = serde_json::json!({
            "query": INTROSPECTION_QUERY
        });

        tracing::info!("Sending introspection query");
        let mut request = client.post(url).header("Content-Type", "application/json");
        for (name, value) in &self.headers {
            request = request.header(name, value);
        }

        let response = request
            .json(&query_body)
            .send()
            .await
            .map_err(|e| IntrospectionError::Network(e.to_string()))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Received response");

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(parse_retry_after);
            return Err(IntrospectionError::Throttled { retry_after });
        }

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %error_body, "HTTP error response");
            return Err(IntrospectionError::Http(status.as_u16(), error_body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| IntrospectionError::Network(e.to_string()))?;
        let value: serde_json::Value = serde_json::from_str(&body)?;
        check_graphql_errors(&value)?;
        Ok(value)
    }

    /// Determines if an error is retryable.
    ///
    /// Network errors, 5xx server errors and throttling are retryable.
    fn is_retryable(error: &IntrospectionError) -> bool {
        match error {
            IntrospectionError::Network(_) | IntrospectionError::Throttled { .. } => true,
            IntrospectionError::Http(status, _) => *status >= 500,
            IntrospectionError::Parse(_) | IntrospectionError::Invalid(_) => false,
        }
    }

    /// Delay before the retry following failed attempt number `attempt` (1-based).
    fn backoff_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        let delay = retry_after.unwrap_or_else(|| {
            let factor = 1u32.checked_shl(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
            self.min_wait.saturating_mul(factor)
        });
        delay.min(self.max_wait)
    }
}

/// Parses a `Retry-After` header given in seconds.
fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

/// Inspects the GraphQL `errors` list of a 200 response.
///
/// A `Throttled` message becomes [`IntrospectionError::Throttled`]. Other
/// errors are only fatal when the response carries no data.
fn check_graphql_errors(body: &serde_json::Value) -> Result<()> {
    let messages: Vec<&str> = body
        .get("errors")
        .and_then(serde_json::Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|error| error.get("message").and_then(serde_json::Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if messages.is_empty() {
        return Ok(());
    }

    if messages
        .iter()
        .any(|message| message.eq_ignore_ascii_case(THROTTLED_MESSAGE))
    {
        return Err(IntrospectionError::Throttled { retry_after: None });
    }

    let has_data = body.get("data").is_some_and(|data| !data.is_null());
    if has_data {
        tracing::warn!(errors = ?messages, "Introspection response contained errors");
        Ok(())
    } else {
        Err(IntrospectionError::Invalid(messages.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[test]
    fn test_client_default() {
        let client = IntrospectionClient::new();
        assert!(client.headers.is_empty());
        assert_eq!(client.timeout, Duration::from_secs(30));
        assert_eq!(client.connect_timeout, Duration::from_secs(15));
        assert_eq!(client.retries, 5);
        assert_eq!(client.min_wait, Duration::from_secs(1));
        assert_eq!(client.max_wait, Duration::from_secs(60));
    }

    #[test]
    fn test_client_with_headers() {
        let client = IntrospectionClient::new()
            .with_header("Authorization", "Bearer token")
            .with_headers(vec![("X-API-Key", "key123"), ("X-Request-ID", "1")]);

        assert_eq!(
            client.headers.get("Authorization"),
            Some(&"Bearer token".to_string())
        );
        assert_eq!(client.headers.get("X-API-Key"), Some(&"key123".to_string()));
        assert_eq!(client.headers.len(), 3);
    }

    #[test]
    fn test_client_timeouts() {
        let client = IntrospectionClient::new()
            .with_timeout(Duration::from_secs(90))
            .with_connect_timeout(Duration::from_secs(3));
        assert_eq!(client.timeout, Duration::from_secs(90));
        assert_eq!(client.connect_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_client_with_wait_keeps_max_above_min() {
        let client =
            IntrospectionClient::new().with_wait(Duration::from_secs(5), Duration::from_secs(2));
        assert_eq!(client.min_wait, Duration::from_secs(5));
        assert_eq!(client.max_wait, Duration::from_secs(5));
    }

    #[test]
    fn test_is_retryable() {
        assert!(IntrospectionClient::is_retryable(
            &IntrospectionError::Network("timeout".into())
        ));
        assert!(IntrospectionClient::is_retryable(
            &IntrospectionError::Throttled { retry_after: None }
        ));
        assert!(IntrospectionClient::is_retryable(
            &IntrospectionError::Http(503, "error".into())
        ));
        assert!(!IntrospectionClient::is_retryable(
            &IntrospectionError::Http(401, "error".into())
        ));
        assert!(!IntrospectionClient::is_retryable(
            &IntrospectionError::Parse("error".into())
        ));
        assert!(!IntrospectionClient::is_retryable(
            &IntrospectionError::Invalid("error".into())
        ));
    }

    #[test]
    fn test_backoff_delay_doubles_and_caps() {
        let client = IntrospectionClient::new();
        assert_eq!(client.backoff_delay(1, None), Duration::from_secs(1));
        assert_eq!(client.backoff_delay(2, None), Duration::from_secs(2));
        assert_eq!(client.backoff_delay(4, None), Duration::from_secs(8));
        assert_eq!(client.backoff_delay(7, None), Duration::from_secs(60));
        assert_eq!(client.backoff_delay(40, None), Duration::from_secs(60));
    }

    #[test]
    fn test_backoff_delay_honors_retry_after() {
        let client = IntrospectionClient::new();
        assert_eq!(
            client.backoff_delay(1, Some(Duration::from_secs(7))),
            Duration::from_secs(7)
        );
        assert_eq!(
            client.backoff_delay(1, Some(Duration::from_secs(600))),
            Duration::from_secs(60)
        );
    }

    #[test]
    fn test_parse_retry_after() {
        assert_eq!(parse_retry_after("3"), Some(Duration::from_secs(3)));
        assert_eq!(parse_retry_after(" 10 "), Some(Duration::from_secs(10)));
        assert_eq!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"), None);
    }

    #[test]
    fn test_check_graphql_errors() {
        assert!(check_graphql_errors(&json!({"data": {}})).is_ok());

        let throttled = json!({"errors": [{"message": "THROTTLED"}]});
        assert!(matches!(
            check_graphql_errors(&throttled),
            Err(IntrospectionError::Throttled { retry_after: None })
        ));

        let partial = json!({"data": {"__schema": {}}, "errors": [{"message": "boom"}]});
        assert!(check_graphql_errors(&partial).is_ok());

        let failed = json!({"data": null, "errors": [{"message": "denied"}, {"message": "nope"}]});
        assert!(matches!(
            check_graphql_errors(&failed),
            Err(IntrospectionError::Invalid(ref msg)) if msg == "denied; nope"
        ));
    }

    /// Serves one canned HTTP response per connection, in order.
    async fn serve(responses: Vec<String>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        tokio::spawn(async move {
            for response in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                counter.fetch_add(1, Ordering::SeqCst);
                read_request(&mut socket).await;
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
        });

        (format!("http://{addr}/graphql"), hits)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    return;
                }
            }
        }
    }

    fn http_response(status: &str, extra_headers: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n{extra_headers}\r\n{body}",
            body.len()
        )
    }

    const SCHEMA_BODY: &str = r#"{"data":{"__schema":{"types":[{"kind":"OBJECT","name":"Query"}],"directives":[]}}}"#;

    fn fast_client(retries: u32) -> IntrospectionClient {
        IntrospectionClient::new()
            .with_retries(retries)
            .with_wait(Duration::from_millis(1), Duration::from_millis(5))
    }

    #[tokio::test]
    async fn test_execute_retries_after_throttling() {
        let (url, hits) = serve(vec![
            http_response("429 Too Many Requests", "Retry-After: 0\r\n", "{}"),
            http_response("200 OK", "", r#"{"errors":[{"message":"Throttled"}]}"#),
            http_response("200 OK", "", SCHEMA_BODY),
        ])
        .await;

        let response = fast_client(5).execute(&url).await.unwrap();
        assert_eq!(response.data.schema.types[0].name, "Query");
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_execute_gives_up_after_retries() {
        let (url, hits) = serve(vec![
            http_response("503 Service Unavailable", "", "down"),
            http_response("503 Service Unavailable", "", "down"),
        ])
        .await;

        let err = fast_client(1).execute(&url).await.unwrap_err();
        assert!(matches!(err, IntrospectionError::Http(503, _)));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_execute_does_not_retry_client_errors() {
        let (url, hits) = serve(vec![http_response("401 Unauthorized", "", "no")]).await;

        let err = fast_client(3).execute(&url).await.unwrap_err();
        assert!(matches!(err, IntrospectionError::Http(401, ref body) if body == "no"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_execute_raw_returns_body() {
        let (url, _) = serve(vec![http_response("200 OK", "", SCHEMA_BODY)]).await;

        let value = fast_client(0).execute_raw(&url).await.unwrap();
        assert_eq!(value["data"]["__schema"]["types"][0]["kind"], "OBJECT");
    }
}
