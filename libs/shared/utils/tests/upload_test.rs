use axum::body::Body;
use axum::extract::{FromRequest, Multipart};
use axum::http::{header::CONTENT_TYPE, Request};

use shared_models::error::AppError;
use shared_utils::upload::{save_image, MAX_IMAGE_SIZE, UPLOAD_BODY_LIMIT};

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

fn multipart_request(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn extract(request: Request<Body>) -> Multipart {
    Multipart::from_request(request, &()).await.unwrap()
}

#[tokio::test]
async fn png_upload_is_stored() {
    let dir = tempfile::tempdir().unwrap();
    let upload_dir = dir.path().to_str().unwrap();

    let request = multipart_request("avatar", "me.png", "image/png", b"\x89PNG fake image");
    let multipart = extract(request).await;

    let file_name = save_image(multipart, "avatar", upload_dir, "users").await.unwrap();
    assert!(file_name.ends_with(".png"));

    let stored = dir.path().join("users").join(&file_name);
    assert_eq!(std::fs::read(stored).unwrap(), b"\x89PNG fake image");
}

#[tokio::test]
async fn disallowed_content_type_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let request = multipart_request("avatar", "notes.txt", "text/plain", b"hello");
    let multipart = extract(request).await;

    let err = save_image(multipart, "avatar", dir.path().to_str().unwrap(), "users")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn oversized_upload_gets_the_size_error() {
    let dir = tempfile::tempdir().unwrap();
    let big = vec![0u8; MAX_IMAGE_SIZE + 1];
    let request = multipart_request("avatar", "big.jpg", "image/jpeg", &big);

    // The route body cap leaves room for an over-limit image plus its
    // multipart framing, so the caller sees the size message rather than a
    // truncated body.
    assert!(UPLOAD_BODY_LIMIT >= MAX_IMAGE_SIZE + 1024);

    let multipart = extract(request).await;
    let err = save_image(multipart, "avatar", dir.path().to_str().unwrap(), "users")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("File size too large"));
}

#[tokio::test]
async fn missing_field_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let request = multipart_request("other", "me.png", "image/png", b"data");
    let multipart = extract(request).await;

    let err = save_image(multipart, "avatar", dir.path().to_str().unwrap(), "users")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}
