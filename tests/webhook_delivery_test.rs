use teams_card_sink::card::{CardFact, CardSection, MessageCard};
use teams_card_sink::sender::{DeliveryError, WebhookClient};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_card() -> MessageCard {
    MessageCard {
        title: "Log Event".to_string(),
        text: "payment declined".to_string(),
        theme_color: "d9534f".to_string(),
        sections: vec![CardSection {
            activity_title: "Properties".to_string(),
            facts: vec![CardFact::new("Level", "Error")],
        }],
    }
}

#[tokio::test]
async fn test_post_card_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(header("content-type", "application/json; charset=utf-8"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = WebhookClient::new(&format!("{}/hook", mock_server.uri()), None).unwrap();
    let receipt = client.post_card(&sample_card()).await.unwrap();

    assert_eq!(receipt.status_code, 200);
    assert!(receipt.bytes_sent > 0);
}

#[tokio::test]
async fn test_post_card_sends_wire_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(body_partial_json(serde_json::json!({
            "title": "Log Event",
            "text": "payment declined",
            "themeColor": "d9534f",
            "sections": [{
                "activityTitle": "Properties",
                "facts": [{"name": "Level", "value": "Error"}]
            }]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = WebhookClient::new(&format!("{}/hook", mock_server.uri()), None).unwrap();
    assert!(client.post_card(&sample_card()).await.is_ok());
}

#[tokio::test]
async fn test_card_without_sections_omits_the_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let mut card = sample_card();
    card.sections.clear();

    let client = WebhookClient::new(&format!("{}/hook", mock_server.uri()), None).unwrap();
    client.post_card(&card).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("sections").is_none());
}

#[tokio::test]
async fn test_non_success_status_is_a_hard_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = WebhookClient::new(&format!("{}/hook", mock_server.uri()), None).unwrap();
    let result = client.post_card(&sample_card()).await;

    match result {
        Err(DeliveryError::DeliveryFailed { status }) => assert_eq!(status, 500),
        other => panic!("expected DeliveryFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_endpoint_is_a_transport_error() {
    // Port 1 is never listening.
    let client = WebhookClient::new("http://127.0.0.1:1/hook", None).unwrap();
    let result = client.post_card(&sample_card()).await;

    assert!(matches!(result, Err(DeliveryError::Transport(_))));
}
