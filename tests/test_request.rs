use courier::http::request::{Method, RequestBuilder};

#[test]
fn test_request_header_retrieval_is_case_insensitive() {
    let req = RequestBuilder::new(Method::Get, "/")
        .header("Host", "example.com")
        .header("Content-Type", "application/json")
        .build();

    assert_eq!(req.header("Host"), Some("example.com"));
    assert_eq!(req.header("HOST"), Some("example.com"));
    assert_eq!(req.header("content-type"), Some("application/json"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_accepts_encoding_exact_token() {
    let req = RequestBuilder::new(Method::Get, "/echo/x")
        .header("Accept-Encoding", "gzip")
        .build();

    assert!(req.accepts_encoding("gzip"));
    assert!(!req.accepts_encoding("br"));
}

#[test]
fn test_accepts_encoding_comma_separated_list() {
    let req = RequestBuilder::new(Method::Get, "/echo/x")
        .header("Accept-Encoding", "deflate, gzip , br")
        .build();

    assert!(req.accepts_encoding("gzip"));
    assert!(req.accepts_encoding("deflate"));
}

#[test]
fn test_accepts_encoding_is_case_insensitive() {
    let req = RequestBuilder::new(Method::Get, "/echo/x")
        .header("Accept-Encoding", "GZIP")
        .build();

    assert!(req.accepts_encoding("gzip"));
}

#[test]
fn test_accepts_encoding_rejects_substring_tokens() {
    // Exact-match tokens only: "supergzip" is not "gzip"
    let req = RequestBuilder::new(Method::Get, "/echo/x")
        .header("Accept-Encoding", "supergzip")
        .build();

    assert!(!req.accepts_encoding("gzip"));
}

#[test]
fn test_accepts_encoding_missing_header() {
    let req = RequestBuilder::new(Method::Get, "/echo/x").build();

    assert!(!req.accepts_encoding("gzip"));
}

#[test]
fn test_method_from_token() {
    assert_eq!(Method::from_token("GET"), Some(Method::Get));
    assert_eq!(Method::from_token("get"), Some(Method::Get));
    assert_eq!(Method::from_token("PoSt"), Some(Method::Post));
    assert_eq!(Method::from_token("PUT"), None);
    assert_eq!(Method::from_token("DELETE"), None);
    assert_eq!(Method::from_token(""), None);
}

#[test]
fn test_method_as_str() {
    assert_eq!(Method::Get.as_str(), "GET");
    assert_eq!(Method::Post.as_str(), "POST");
}

#[test]
fn test_builder_defaults() {
    let req = RequestBuilder::new(Method::Get, "/").build();

    assert_eq!(req.protocol, "HTTP/1.1");
    assert_eq!(req.body, "");
    assert!(req.headers.is_empty());
}

#[test]
fn test_builder_with_body() {
    let req = RequestBuilder::new(Method::Post, "/files/a.txt")
        .body("test body content")
        .build();

    assert_eq!(req.body, "test body content");
}
