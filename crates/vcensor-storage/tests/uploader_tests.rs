//! Blob uploader tests against a mock store.

use bytes::Bytes;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vcensor_models::UploadCredential;
use vcensor_storage::{BlobUploader, StorageError};

#[tokio::test]
async fn uploads_bytes_with_declared_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/store/clip_17.mp4"))
        .and(header("content-type", "video/mp4"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let credential = UploadCredential::new(format!("{}/store/clip_17.mp4?sig=abc", server.uri()));
    BlobUploader::new()
        .upload(&credential, Bytes::from_static(b"frames"), "video/mp4")
        .await
        .expect("upload");
}

#[tokio::test]
async fn rejected_transfer_reports_status() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(403).set_body_string("signature expired"))
        .mount(&server)
        .await;

    let credential = UploadCredential::new(format!("{}/store/clip.mp4", server.uri()));
    let err = BlobUploader::new()
        .upload(&credential, Bytes::from_static(b"frames"), "video/mp4")
        .await
        .expect_err("rejection");

    match err {
        StorageError::Rejected { status, message } => {
            assert_eq!(status.as_u16(), 403);
            assert_eq!(message, "signature expired");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unreachable_store_is_a_transport_failure() {
    let credential = UploadCredential::new("http://127.0.0.1:9/store/clip.mp4");

    let err = BlobUploader::new()
        .upload(&credential, Bytes::from_static(b"frames"), "video/mp4")
        .await
        .expect_err("transport failure");

    assert!(err.is_unreachable());
}
