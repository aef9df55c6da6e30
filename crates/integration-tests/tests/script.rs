mod harness;

use harness::config::ConfigBuilder;
use harness::mock_upstream::{MockUpstream, UNPARSABLE_TOPIC};
use harness::server::TestServer;
use serde_json::{Value, json};

fn request(description: &str) -> Value {
    json!({
        "characters": [
            { "name": "Ada", "description": "a mathematician" },
            { "name": "Grace", "description": "a naval officer" }
        ],
        "podcast_description": description
    })
}

#[tokio::test]
async fn script_is_returned_as_dialogues() {
    let mock = MockUpstream::start().await.unwrap();
    let config = ConfigBuilder::new().with_llm(&mock.v1_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let (status, body) = server.post_json("/generate-script/", request("early computing")).await;

    assert_eq!(status, 200, "{body}");
    let dialogues = body["dialogues"].as_array().unwrap();
    assert_eq!(dialogues.len(), 2);
    assert_eq!(dialogues[0]["character"], 1);
    assert_eq!(dialogues[1]["text"], "Glad to be here.");
    assert_eq!(mock.completion_count(), 1);
}

#[tokio::test]
async fn unparsable_completion_is_handed_back() {
    let mock = MockUpstream::start().await.unwrap();
    let config = ConfigBuilder::new().with_llm(&mock.v1_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let (status, body) = server.post_json("/generate-script/", request(UNPARSABLE_TOPIC)).await;

    assert_eq!(status, 200);
    assert!(body["error"].is_string());
    assert_eq!(body["response"], "Sorry, I cannot write that podcast.");
}

#[tokio::test]
async fn one_character_is_not_enough() {
    let mock = MockUpstream::start().await.unwrap();
    let config = ConfigBuilder::new().with_llm(&mock.v1_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let body = json!({
        "characters": [{ "name": "Ada", "description": "a mathematician" }],
        "podcast_description": "solo show"
    });
    let (status, body) = server.post_json("/generate-script/", body).await;

    assert_eq!(status, 400);
    assert_eq!(
        body["error"]["message"],
        "Please provide exactly 2 characters and a podcast description."
    );
    assert_eq!(mock.completion_count(), 0);
}
