mod harness;

use harness::config::ConfigBuilder;
use harness::mock_upstream::{MockUpstream, STUCK_IMAGE, VIDEO_URL};
use harness::server::TestServer;
use serde_json::json;

#[tokio::test]
async fn queued_job_is_polled_until_complete() {
    let mock = MockUpstream::start().await.unwrap();
    let config = ConfigBuilder::new().with_video(&mock.queue_url(), "5s").build();
    let server = TestServer::start(config).await.unwrap();

    let (status, body) = server
        .post_json(
            "/generate_video",
            json!({ "image_url": "https://cdn.test/host.png", "audio_url": "https://cdn.test/line.mp3" }),
        )
        .await;

    assert_eq!(status, 200, "{body}");
    assert_eq!(body, json!({ "video_url": VIDEO_URL }));
    assert_eq!(mock.status_polls(), 2);
}

#[tokio::test]
async fn job_that_never_finishes_times_out() {
    let mock = MockUpstream::start().await.unwrap();
    let config = ConfigBuilder::new().with_video(&mock.queue_url(), "200ms").build();
    let server = TestServer::start(config).await.unwrap();

    let (status, body) = server
        .post_json(
            "/generate_video",
            json!({ "image_url": STUCK_IMAGE, "audio_url": "https://cdn.test/line.mp3" }),
        )
        .await;

    assert_eq!(status, 504);
    assert_eq!(body["error"]["type"], "timeout_error");
    assert!(mock.status_polls() >= 1);
}

#[tokio::test]
async fn missing_audio_url_is_rejected() {
    let mock = MockUpstream::start().await.unwrap();
    let config = ConfigBuilder::new().with_video(&mock.queue_url(), "5s").build();
    let server = TestServer::start(config).await.unwrap();

    let (status, _) = server
        .post_json("/generate_video", json!({ "image_url": "https://cdn.test/host.png" }))
        .await;

    assert_eq!(status, 400);
    assert_eq!(mock.status_polls(), 0);
}
