use keygate::http::request::{Method, RequestHead};

fn head(method: Method, path: &str, headers: &[(&str, &str)]) -> RequestHead {
    RequestHead {
        method,
        path: path.to_string(),
        version: "HTTP/1.1".to_string(),
        headers: headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

#[test]
fn test_header_retrieval() {
    let req = head(
        Method::POST,
        "/db",
        &[("Host", "example.com"), ("Accept", "application/json")],
    );

    assert_eq!(req.header("Host"), Some("example.com"));
    assert_eq!(req.header("Accept"), Some("application/json"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_header_retrieval_is_case_insensitive() {
    // Header names are case-insensitive in HTTP; values are untouched
    let req = head(Method::POST, "/db", &[("accept", "application/json")]);

    assert_eq!(req.header("Accept"), Some("application/json"));
    assert_eq!(req.header("ACCEPT"), Some("application/json"));
}

#[test]
fn test_content_length_parsing() {
    let req = head(Method::POST, "/db", &[("Content-Length", "42")]);

    assert_eq!(req.content_length(), 42);
}

#[test]
fn test_content_length_missing() {
    let req = head(Method::POST, "/db", &[]);

    assert_eq!(req.content_length(), 0);
}

#[test]
fn test_content_length_invalid() {
    let req = head(Method::POST, "/db", &[("Content-Length", "not-a-number")]);

    assert_eq!(req.content_length(), 0);
}

#[test]
fn test_keep_alive_http11_default() {
    // HTTP/1.1 defaults to keep-alive
    let req = head(Method::POST, "/db", &[]);

    assert!(req.keep_alive());
}

#[test]
fn test_keep_alive_explicit_header() {
    let req = head(Method::POST, "/db", &[("Connection", "keep-alive")]);

    assert!(req.keep_alive());
}

#[test]
fn test_keep_alive_close() {
    let req = head(Method::POST, "/db", &[("Connection", "close")]);

    assert!(!req.keep_alive());
}

#[test]
fn test_keep_alive_case_insensitive() {
    let req = head(Method::POST, "/db", &[("Connection", "Keep-Alive")]);

    assert!(req.keep_alive());
}

#[test]
fn test_endpoint_strips_leading_separator() {
    assert_eq!(head(Method::POST, "/db", &[]).endpoint(), "db");
}

#[test]
fn test_endpoint_strips_query_string() {
    assert_eq!(head(Method::POST, "/db?trace=1", &[]).endpoint(), "db");
    assert_eq!(head(Method::POST, "/a/b?q=x&y=z", &[]).endpoint(), "a/b");
}

#[test]
fn test_endpoint_empty_for_root() {
    assert_eq!(head(Method::POST, "/", &[]).endpoint(), "");
    assert_eq!(head(Method::POST, "/?trace=1", &[]).endpoint(), "");
}

#[test]
fn test_method_equality() {
    assert_eq!(Method::POST, Method::POST);
    assert_ne!(Method::GET, Method::POST);
}

#[test]
fn test_method_from_string() {
    assert_eq!(Method::from_str("GET"), Some(Method::GET));
    assert_eq!(Method::from_str("POST"), Some(Method::POST));
    assert_eq!(Method::from_str("INVALID"), None);
    assert_eq!(Method::from_str("post"), None); // Case-sensitive
}

#[test]
fn test_request_head_is_cloneable() {
    let req = head(Method::POST, "/db", &[("Host", "example.com")]);
    let cloned = req.clone();

    assert_eq!(cloned.path, req.path);
    assert_eq!(cloned.header("Host"), req.header("Host"));
}
