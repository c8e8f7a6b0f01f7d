use axum::body::Body;
use axum::extract::{FromRequest, Multipart};
use axum::http::{header::CONTENT_TYPE, Request};

use shared_utils::upload::save_image;
use specialty_cell::handlers::IMAGE_FIELD;

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

fn multipart_request(field: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"derma.png\"\r\n",
            field
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
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

// The web client posts the file under "specImage".
#[tokio::test]
async fn client_field_name_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let upload_dir = dir.path().to_str().unwrap();

    let request = multipart_request(IMAGE_FIELD, b"\x89PNG fake image");
    let multipart = extract(request).await;

    let file_name = save_image(multipart, IMAGE_FIELD, upload_dir, "specializations")
        .await
        .unwrap();
    assert!(file_name.ends_with(".png"));
    assert!(dir.path().join("specializations").join(&file_name).exists());
}

#[tokio::test]
async fn other_field_names_are_ignored() {
    let dir = tempfile::tempdir().unwrap();

    let request = multipart_request("specializationImage", b"\x89PNG fake image");
    let multipart = extract(request).await;

    let err = save_image(multipart, IMAGE_FIELD, dir.path().to_str().unwrap(), "specializations")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("specImage"));
}
