use std::path::Path;

use shelf::http::parser::{FieldEnd, read_field, read_request};
use shelf::http::request::{BoundedField, Method, PATH_LEN};

const ROOT: &str = "/srv/www";

#[tokio::test]
async fn test_parse_simple_get_request() {
    let mut input: &[u8] = b"GET /docs/a.txt HTTP/1.1\r\n";
    let parsed = read_request(&mut input, Path::new(ROOT)).await;

    assert_eq!(parsed.method(), Some(Method::GET));
    assert_eq!(parsed.path.as_bytes(), b"/srv/www/docs/a.txt");
    assert_eq!(parsed.version.as_bytes(), b"HTTP/1.1");
    assert!(input.is_empty());
}

#[tokio::test]
async fn test_parse_leaves_headers_unread() {
    let mut input: &[u8] = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    read_request(&mut input, Path::new(ROOT)).await;

    assert_eq!(input, b"Host: example.com\r\n\r\n");
}

#[tokio::test]
async fn test_parse_without_carriage_return() {
    let mut input: &[u8] = b"POST /form HTTP/1.0\n";
    let parsed = read_request(&mut input, Path::new(ROOT)).await;

    assert_eq!(parsed.method(), Some(Method::POST));
    assert_eq!(parsed.version.as_bytes(), b"HTTP/1.0");
}

#[tokio::test]
async fn test_parse_overlong_method_spills_into_next_field() {
    let mut input: &[u8] = b"DELETE / HTTP/1.1\r\n";
    let parsed = read_request(&mut input, Path::new(ROOT)).await;

    assert_eq!(parsed.method.as_bytes(), b"DELE");
    assert_eq!(parsed.method(), None);
    assert_eq!(parsed.path.as_bytes(), b"/srv/wwwTE");
    assert_eq!(parsed.version.as_bytes(), b"/");
    assert_eq!(input, b"HTTP/1.1\r\n");
}

#[tokio::test]
async fn test_parse_truncates_version() {
    let mut input: &[u8] = b"GET / HTTP/1.1.1.1\r\n";
    let parsed = read_request(&mut input, Path::new(ROOT)).await;

    assert_eq!(parsed.version.as_bytes(), b"HTTP/1.1.");
    assert_eq!(input, b"1.1\r\n");
}

#[tokio::test]
async fn test_parse_truncates_path_at_bound() {
    let mut line = b"GET /".to_vec();
    line.extend(std::iter::repeat(b'a').take(PATH_LEN * 2));
    line.extend_from_slice(b" HTTP/1.1\r\n");
    let mut input: &[u8] = &line;

    let parsed = read_request(&mut input, Path::new(ROOT)).await;

    assert_eq!(parsed.path.len(), PATH_LEN);
    assert!(parsed.path.as_bytes().starts_with(b"/srv/www/aaa"));
    // The rest of the path is read as the version.
    assert_eq!(parsed.version.as_bytes(), b"aaaaaaaaa");
}

#[tokio::test]
async fn test_parse_empty_input() {
    let mut input: &[u8] = b"";
    let parsed = read_request(&mut input, Path::new(ROOT)).await;

    assert!(parsed.method.is_empty());
    assert_eq!(parsed.path.as_bytes(), ROOT.as_bytes());
    assert!(parsed.version.is_empty());
}

#[tokio::test]
async fn test_parse_stream_closed_mid_path() {
    let mut input: &[u8] = b"GET /partial";
    let parsed = read_request(&mut input, Path::new(ROOT)).await;

    assert_eq!(parsed.method(), Some(Method::GET));
    assert_eq!(parsed.path.as_bytes(), b"/srv/www/partial");
    assert!(parsed.version.is_empty());
}

#[tokio::test]
async fn test_parse_method_only_resolves_to_root() {
    let mut input: &[u8] = b"GET\r\n";
    let parsed = read_request(&mut input, Path::new(ROOT)).await;

    assert_eq!(parsed.method(), Some(Method::GET));
    assert_eq!(parsed.fs_path(), Path::new(ROOT));
}

#[tokio::test]
async fn test_parse_keeps_dot_dot_segments() {
    let mut input: &[u8] = b"GET /../etc/passwd HTTP/1.1\r\n";
    let parsed = read_request(&mut input, Path::new(ROOT)).await;

    assert_eq!(parsed.path.as_bytes(), b"/srv/www/../etc/passwd");
}

#[tokio::test]
async fn test_read_field_reports_how_it_ended() {
    let mut field = BoundedField::<8>::new();
    let mut input: &[u8] = b"abc def";
    assert_eq!(read_field(&mut input, &mut field).await, FieldEnd::Separator);
    assert_eq!(field.as_bytes(), b"abc");

    let mut field = BoundedField::<2>::new();
    let mut input: &[u8] = b"abc";
    assert_eq!(read_field(&mut input, &mut field).await, FieldEnd::Full);
    assert_eq!(input, b"c");

    let mut field = BoundedField::<8>::new();
    let mut input: &[u8] = b"ab";
    assert_eq!(read_field(&mut input, &mut field).await, FieldEnd::Closed);
    assert_eq!(field.as_bytes(), b"ab");
}
