//! Round-trip tests for the HTTP metadata resolver against a mock server.

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shelfmark_core::{Error, MetadataResolver};
use shelfmark_resolver::{HttpMetadataResolver, ResolverConfig};

fn resolver() -> HttpMetadataResolver {
    HttpMetadataResolver::new(ResolverConfig::new().timeout(Duration::from_secs(5)))
        .expect("Failed to build resolver")
}

#[tokio::test]
async fn test_text_page_with_redirect_resolves_terminal_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/a"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("Location", "/a-final"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/a-final"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(&mock_server)
        .await;

    let body = r#"<html><head><title>Example Page</title></head>
        <body><img src="pic.png"></body></html>"#;
    Mock::given(method("GET"))
        .and(path("/a-final"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/html")
                .set_body_string(body),
        )
        .mount(&mock_server)
        .await;

    let submitted = format!("{}/a", mock_server.uri());
    let meta = resolver().resolve(&submitted).await.unwrap();

    assert_eq!(meta.normal_url, submitted);
    assert_eq!(meta.resolved_url, format!("{}/a-final", mock_server.uri()));
    assert_eq!(meta.mime_type, "text");
    assert_eq!(meta.title, "Example Page");
    assert!(meta.has_image);
    assert!(!meta.has_video);
}

#[tokio::test]
async fn test_image_resource_needs_no_body_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/photos/cat.png"))
        .respond_with(ResponseTemplate::new(200).insert_header("Content-Type", "image/png"))
        .mount(&mock_server)
        .await;

    // No GET mock mounted: a body fetch would fail the resolution.
    let meta = resolver()
        .resolve(&format!("{}/photos/cat.png", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(meta.mime_type, "image");
    assert_eq!(meta.title, "cat.png");
    assert!(meta.has_image);
    assert!(!meta.has_video);
}

#[tokio::test]
async fn test_video_resource_flags() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/media/clip.mp4"))
        .respond_with(ResponseTemplate::new(200).insert_header("Content-Type", "video/mp4"))
        .mount(&mock_server)
        .await;

    let meta = resolver()
        .resolve(&format!("{}/media/clip.mp4", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(meta.mime_type, "video");
    assert_eq!(meta.title, "clip.mp4");
    assert!(meta.has_video);
    assert!(!meta.has_image);
}

#[tokio::test]
async fn test_unsupported_content_type_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/doc.pdf"))
        .respond_with(ResponseTemplate::new(200).insert_header("Content-Type", "application/pdf"))
        .mount(&mock_server)
        .await;

    let err = resolver()
        .resolve(&format!("{}/doc.pdf", mock_server.uri()))
        .await
        .unwrap_err();

    match err {
        Error::UnsupportedContentType { content_type } => {
            assert_eq!(content_type, "application/pdf");
        }
        other => panic!("Expected UnsupportedContentType, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_content_type_is_unsupported_wildcard() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/mystery"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let err = resolver()
        .resolve(&format!("{}/mystery", mock_server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UnsupportedContentType { .. }));
}

#[tokio::test]
async fn test_unauthorized_and_forbidden_map_to_access_denied() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/needs-login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/members-only"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let r = resolver();
    let err = r
        .resolve(&format!("{}/needs-login", mock_server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AccessDenied { .. }));

    let err = r
        .resolve(&format!("{}/members-only", mock_server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AccessDenied { .. }));
}

#[tokio::test]
async fn test_server_error_carries_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let err = resolver()
        .resolve(&format!("{}/broken", mock_server.uri()))
        .await
        .unwrap_err();

    match err {
        Error::ResolutionFailed { status, .. } => assert_eq!(status, 503),
        other => panic!("Expected ResolutionFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_not_found_is_resolution_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let err = resolver()
        .resolve(&format!("{}/gone", mock_server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ResolutionFailed { status: 404, .. }));
}

#[tokio::test]
async fn test_nonstandard_status_code_is_unknown_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/weird"))
        .respond_with(ResponseTemplate::new(599))
        .mount(&mock_server)
        .await;

    let err = resolver()
        .resolve(&format!("{}/weird", mock_server.uri()))
        .await
        .unwrap_err();

    match err {
        Error::UnknownServerResponse { code, .. } => assert_eq!(code, 599),
        other => panic!("Expected UnknownServerResponse, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_host() {
    // Nothing listens on this port.
    let err = resolver()
        .resolve("http://127.0.0.1:9/never")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UnreachableResource { .. }));
}

#[tokio::test]
async fn test_text_page_without_title_yields_empty_string() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/bare"))
        .respond_with(ResponseTemplate::new(200).insert_header("Content-Type", "text/plain"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bare"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/plain")
                .set_body_string("just words"),
        )
        .mount(&mock_server)
        .await;

    let meta = resolver()
        .resolve(&format!("{}/bare", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(meta.title, "");
    assert!(!meta.has_image);
    assert!(!meta.has_video);
}
