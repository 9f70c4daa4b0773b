//! End-to-end tests for the registration intake handler: the router is
//! exercised directly with `tower::ServiceExt::oneshot`, each test against
//! its own temporary store file.

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use intake::{intake::app, store::Store};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower::ServiceExt;

struct TestStore {
    _dir: tempfile::TempDir,
    path: PathBuf,
}

fn test_app() -> (Router, TestStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("registrations.csv");
    let router = app(Arc::new(Store::new(path.clone())));

    (router, TestStore { _dir: dir, path })
}

async fn post_form(router: Router, body: &str) -> Result<(StatusCode, String)> {
    let request = Request::builder()
        .method("POST")
        .uri("/register")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))?;

    let response = router.oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;

    Ok((status, String::from_utf8(bytes.to_vec())?))
}

fn store_lines(path: &Path) -> Vec<String> {
    if !path.exists() {
        return Vec::new();
    }
    fs::read_to_string(path)
        .expect("read store")
        .lines()
        .map(ToString::to_string)
        .collect()
}

const VALID_BODY: &str = "fullname=Asha+Rao&username=asha&email=asha%40example.com\
&phone=9876543210&password=secret1&confirm_password=secret1";

#[tokio::test]
async fn non_post_is_redirected_and_store_untouched() -> Result<()> {
    let (router, store) = test_app();

    let request = Request::builder()
        .method("GET")
        .uri("/register")
        .body(Body::empty())?;
    let response = router.oneshot(request).await?;

    assert!(response.status().is_redirection());
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/register.html"
    );
    assert!(store_lines(&store.path).is_empty());

    Ok(())
}

#[tokio::test]
async fn unknown_path_is_redirected() -> Result<()> {
    let (router, _store) = test_app();

    let request = Request::builder()
        .method("GET")
        .uri("/elsewhere")
        .body(Body::empty())?;
    let response = router.oneshot(request).await?;

    assert!(response.status().is_redirection());

    Ok(())
}

#[tokio::test]
async fn password_mismatch_renders_error_and_writes_nothing() -> Result<()> {
    let (router, store) = test_app();

    let body = "fullname=Asha+Rao&username=asha&email=asha%40example.com\
&password=secret1&confirm_password=secret2";
    let (status, page) = post_form(router, body).await?;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Passwords do not match."));
    assert!(store_lines(&store.path).is_empty());

    Ok(())
}

#[tokio::test]
async fn invalid_email_is_reported() -> Result<()> {
    let (router, _store) = test_app();

    let body = "fullname=Asha+Rao&username=asha&email=asha.example.com\
&password=secret1&confirm_password=secret1";
    let (status, page) = post_form(router, body).await?;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Email is not valid."));

    Ok(())
}

#[tokio::test]
async fn phone_format_checked_only_when_present() -> Result<()> {
    let (router, _store) = test_app();
    let body = "fullname=Asha+Rao&username=asha&email=asha%40example.com\
&phone=12345&password=secret1&confirm_password=secret1";
    let (status, page) = post_form(router.clone(), body).await?;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Phone must be 10 digits if provided."));

    // Empty phone is fine; a missing fullname keeps the submission on the
    // error page without triggering the phone message
    let body = "username=asha&email=asha%40example.com&phone=\
&password=secret1&confirm_password=secret1";
    let (_, page) = post_form(router, body).await?;

    assert!(page.contains("Full name is required."));
    assert!(!page.contains("Phone must be 10 digits if provided."));

    Ok(())
}

#[tokio::test]
async fn password_length_boundary() -> Result<()> {
    let (router, _store) = test_app();

    let body = "fullname=Asha+Rao&username=asha&email=asha%40example.com\
&password=five5&confirm_password=five5";
    let (_, page) = post_form(router.clone(), body).await?;
    assert!(page.contains("Password must be at least 6 characters."));

    let body = "fullname=Asha+Rao&username=asha&email=asha%40example.com\
&password=sixsix&confirm_password=sixsix";
    let (_, page) = post_form(router, body).await?;
    assert!(!page.contains("Password must be at least 6 characters."));
    assert!(page.contains("Thank you, Asha Rao"));

    Ok(())
}

#[tokio::test]
async fn empty_submission_lists_failures_in_order() -> Result<()> {
    let (router, store) = test_app();

    let (status, page) = post_form(router, "").await?;

    assert_eq!(status, StatusCode::OK);

    let fullname = page.find("Full name is required.").unwrap();
    let username = page.find("Username is required.").unwrap();
    let email = page.find("Email is required.").unwrap();
    let password = page.find("Password is required.").unwrap();

    assert!(fullname < username && username < email && email < password);
    assert!(store_lines(&store.path).is_empty());

    Ok(())
}

#[tokio::test]
async fn valid_submission_appends_one_row() -> Result<()> {
    let (router, store) = test_app();

    let (status, page) = post_form(router, VALID_BODY).await?;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Thank you, Asha Rao"));

    let lines = store_lines(&store.path);
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "timestamp,fullname,username,email,phone,password_hash"
    );

    let row = &lines[1];
    assert!(row.contains(",Asha Rao,asha,asha@example.com,9876543210,"));
    // The hash field is a quoted Argon2 PHC string, never the raw password
    assert!(row.contains("$argon2"));
    assert!(!row.contains("secret1"));

    Ok(())
}

#[tokio::test]
async fn header_is_written_once_across_submissions() -> Result<()> {
    let (router, store) = test_app();

    post_form(router.clone(), VALID_BODY).await?;
    post_form(router, VALID_BODY).await?;

    let lines = store_lines(&store.path);
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines
            .iter()
            .filter(|line| line.starts_with("timestamp,"))
            .count(),
        1
    );

    // Two records with the same password still never store the raw value
    for row in &lines[1..] {
        assert!(row.contains("$argon2"));
        assert!(!row.contains("secret1"));
    }

    Ok(())
}

#[tokio::test]
async fn markup_in_fields_is_stored_inert() -> Result<()> {
    let (router, store) = test_app();

    let body = "fullname=%3Cb%3EAsha%3C%2Fb%3E&username=asha&email=asha%40example.com\
&password=secret1&confirm_password=secret1";
    let (_, page) = post_form(router, body).await?;

    assert!(page.contains("Thank you, &lt;b&gt;Asha&lt;/b&gt;"));

    let lines = store_lines(&store.path);
    assert!(lines[1].contains("&lt;b&gt;Asha&lt;/b&gt;"));
    assert!(!lines[1].contains("<b>"));

    Ok(())
}

#[tokio::test]
async fn health_reports_package_metadata() -> Result<()> {
    let (router, _store) = test_app();

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())?;
    let response = router.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("X-App"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body: serde_json::Value = serde_json::from_slice(&bytes)?;

    assert_eq!(body["name"], "intake");

    Ok(())
}
