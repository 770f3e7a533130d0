use linkify::{LinkFinder, LinkKind};
use newsletter_dispatch::CORS_ALLOW_HEADERS;
use serde_json::{json, Value};
use test_server::{email_endpoint, TestServer, SITE_URL};
use wiremock::{matchers::body_partial_json, ResponseTemplate};

fn subscribers(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| json!({ "email": format!("reader{i}@example.com"), "name": format!("Reader {i}") }))
        .collect()
}

fn body(kind: &str, content: &str, subscribers: Vec<Value>) -> Value {
    json!({
        "title": "Spring launch",
        "content": content,
        "type": kind,
        "subscribers": subscribers,
    })
}

#[macros::test]
async fn one_subscriber_receives_one_email(server: TestServer) {
    server
        .mock_email_server(ResponseTemplate::new(200), Some(1))
        .await;
    let request = json!({
        "title": "T",
        "content": "C",
        "type": "article",
        "subscribers": [{ "email": "a@x.com", "name": "A" }],
    });

    let response = server.post_send_newsletter(&request).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "success": true, "sent": 1, "failed": 0 }));
    let emails = server.sent_emails().await;
    assert_eq!(emails[0]["to"], json!(["a@x.com"]));
    assert!(emails[0]["subject"].as_str().unwrap().contains('T'));
}

#[macros::test]
async fn every_subscriber_is_counted(server: TestServer) {
    server
        .mock_email_server(ResponseTemplate::new(200), Some(5))
        .await;

    let response = server
        .post_send_newsletter(&body("company", "Body", subscribers(5)))
        .await;

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["sent"].as_u64().unwrap() + body["failed"].as_u64().unwrap(), 5);
    assert_eq!(body["sent"], 5);
}

#[macros::test]
async fn a_rejected_email_is_counted_as_failed(server: TestServer) {
    email_endpoint()
        .and(body_partial_json(json!({ "to": ["reader1@example.com"] })))
        .respond_with(ResponseTemplate::new(422))
        .with_priority(1)
        .expect(1)
        .mount(&server.email_server)
        .await;
    server
        .mock_email_server(ResponseTemplate::new(200), Some(3))
        .await;

    let response = server
        .post_send_newsletter(&body("article", "Body", subscribers(4)))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "success": true, "sent": 3, "failed": 1 }));
}

#[macros::test]
async fn an_unreachable_provider_fails_every_email_without_failing_the_request(
    server: TestServer,
) {
    server
        .mock_email_server(
            ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(5)),
            None,
        )
        .await;

    let response = server
        .post_send_newsletter(&body("article", "Body", subscribers(2)))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "success": true, "sent": 0, "failed": 2 }));
}

#[macros::test]
async fn an_empty_subscriber_list_sends_nothing(server: TestServer) {
    server
        .mock_email_server(ResponseTemplate::new(200), Some(0))
        .await;

    let response = server
        .post_send_newsletter(&body("article", "Body", vec![]))
        .await;

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "success": true, "sent": 0, "failed": 0 }));
}

#[macros::test]
async fn names_with_punctuation_are_greeted_as_written(server: TestServer) {
    server
        .mock_email_server(ResponseTemplate::new(200), Some(2))
        .await;
    let subscribers = vec![
        json!({ "email": "a@x.com", "name": "Sara (HR)" }),
        json!({ "email": "b@x.com", "name": "B" }),
    ];

    let response = server
        .post_send_newsletter(&body("article", "Body", subscribers))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "success": true, "sent": 2, "failed": 0 }));
    let emails = server.sent_emails().await;
    assert!(emails
        .iter()
        .any(|email| email["html"].as_str().unwrap().contains("مرحباً Sara (HR)،")));
}

#[macros::test]
async fn an_invalid_address_fails_only_its_own_email(server: TestServer) {
    server
        .mock_email_server(ResponseTemplate::new(200), Some(1))
        .await;
    let subscribers = vec![
        json!({ "email": "a@x.com", "name": "A" }),
        json!({ "email": "not-an-email", "name": "B" }),
    ];

    let response = server
        .post_send_newsletter(&body("article", "Body", subscribers))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "success": true, "sent": 1, "failed": 1 }));
    assert_eq!(server.sent_emails().await[0]["to"], json!(["a@x.com"]));
}

#[macros::test]
async fn subscriber_lists_larger_than_two_mebibytes_are_accepted(server: TestServer) {
    server
        .mock_email_server(ResponseTemplate::new(200), Some(0))
        .await;
    let subscribers = (0..40_000)
        .map(|i| {
            json!({
                "email": format!("reader{i}.example.com"),
                "name": format!("Reader {i} {}", "x".repeat(40)),
            })
        })
        .collect();
    let request = body("article", "Body", subscribers);
    assert!(serde_json::to_vec(&request).unwrap().len() > 2 * 1024 * 1024);

    let response = server.post_send_newsletter(&request).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "success": true, "sent": 0, "failed": 40_000 }));
}

#[macros::test]
async fn long_content_is_previewed_up_to_300_characters(server: TestServer) {
    server
        .mock_email_server(ResponseTemplate::new(200), Some(1))
        .await;
    let content = format!("{}{}", "x".repeat(300), "Z".repeat(50));

    server
        .post_send_newsletter(&body("article", &content, subscribers(1)))
        .await;

    let emails = server.sent_emails().await;
    let html = emails[0]["html"].as_str().unwrap();
    assert!(html.contains(&format!("{}...", "x".repeat(300))));
    assert!(!html.contains('Z'));
}

#[macros::test]
async fn the_call_to_action_points_at_the_site(server: TestServer) {
    server
        .mock_email_server(ResponseTemplate::new(200), Some(1))
        .await;

    server
        .post_send_newsletter(&body("article", "Body", subscribers(1)))
        .await;

    let emails = server.sent_emails().await;
    let links = LinkFinder::new()
        .links(emails[0]["html"].as_str().unwrap())
        .filter(|l| l.kind() == &LinkKind::Url)
        .map(|l| l.as_str().to_owned())
        .collect::<Vec<_>>();
    assert_eq!(links, vec![SITE_URL.to_owned()]);
}

#[macros::test]
async fn article_and_company_issues_have_distinct_subjects(server: TestServer) {
    server
        .mock_email_server(ResponseTemplate::new(200), Some(2))
        .await;

    server
        .post_send_newsletter(&body("article", "Body", subscribers(1)))
        .await;
    server
        .post_send_newsletter(&body("company", "Body", subscribers(1)))
        .await;

    let emails = server.sent_emails().await;
    assert_eq!(emails[0]["subject"], "مقال جديد: Spring launch");
    assert_eq!(emails[1]["subject"], "رحلة شركة جديدة: Spring launch");
}

#[macros::test]
async fn malformed_payloads_are_answered_with_500_and_an_error(server: TestServer) {
    server
        .mock_email_server(ResponseTemplate::new(200), Some(0))
        .await;
    let cases = vec![
        (
            json!({ "content": "C", "type": "article", "subscribers": [] }),
            "missing title",
        ),
        (
            json!({ "title": "T", "content": "C", "type": "event", "subscribers": [] }),
            "unknown type",
        ),
        (
            json!({
                "title": "T",
                "content": "C",
                "type": "article",
                "subscribers": [{ "name": "A" }],
            }),
            "a subscriber without an email",
        ),
        (
            json!({ "title": " ", "content": "C", "type": "article", "subscribers": [] }),
            "blank title",
        ),
    ];
    for (invalid_body, reason) in cases {
        let response = server.post_send_newsletter(&invalid_body).await;
        assert_eq!(
            response.status().as_u16(),
            500,
            "The function does not return 500 when the payload has {reason}."
        );
        let body: Value = response.json().await.unwrap();
        assert!(
            body["error"].as_str().map_or(false, |e| !e.is_empty()),
            "The function does not describe the error when the payload has {reason}."
        );
    }
}

#[macros::test]
async fn a_body_that_is_not_json_is_answered_with_500(server: TestServer) {
    let response = server.post_send_newsletter_raw("{ not json").await;

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[macros::test]
async fn preflight_requests_are_allowed_from_any_origin(server: TestServer) {
    let response = server.options_send_newsletter().await;

    assert_eq!(response.status().as_u16(), 200);
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-headers"], CORS_ALLOW_HEADERS);
}

#[macros::test]
async fn every_response_carries_cors_headers(server: TestServer) {
    server
        .mock_email_server(ResponseTemplate::new(200), None)
        .await;

    let ok = server
        .post_send_newsletter(&body("article", "Body", subscribers(1)))
        .await;
    let failed = server.post_send_newsletter_raw("[]").await;

    for response in [ok, failed] {
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }
}
