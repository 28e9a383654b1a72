use httpmock::prelude::*;
use portfolio_site::core::contact::ContactEndpoint;
use portfolio_site::core::notify::{notifier_for, WebhookNotifier};
use portfolio_site::core::server::{router, AppState};
use portfolio_site::core::Notifier;
use portfolio_site::domain::model::{ContactSubmission, FormField, FormState, SubmissionStatus};
use portfolio_site::{ContactClient, ContactForm, PortfolioData, SiteError, Theme};
use std::sync::Arc;
use std::time::Duration;

fn filled_form() -> ContactForm {
    ContactForm::with_state(FormState::new("Ann", "a@b.com", "Hi"))
}

fn submission() -> ContactSubmission {
    ContactSubmission {
        name: "Ann".to_string(),
        email: "a@b.com".to_string(),
        message: "Hi".to_string(),
        received_at: chrono::Utc::now(),
    }
}

#[tokio::test]
async fn test_successful_submission_clears_form() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/.netlify/functions/contact-form")
                .body_contains("\"name\":\"Ann\"")
                .body_contains("\"email\":\"a@b.com\"")
                .body_contains("\"message\":\"Hi\"");
            then.status(200)
                .json_body(serde_json::json!({ "message": "Message sent successfully!" }));
        })
        .await;

    let client = ContactClient::new(server.url("/.netlify/functions/contact-form"));
    let mut form = filled_form();

    let status = form.submit_with(&client).await;

    mock.assert_async().await;
    assert_eq!(status, SubmissionStatus::Success);
    assert_eq!(form.state(), &FormState::default());
    assert!(!form.is_loading());
}

#[tokio::test]
async fn test_rejected_submission_keeps_fields() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/contact");
            then.status(400)
                .json_body(serde_json::json!({ "message": "Please fill out all fields." }));
        })
        .await;

    let client = ContactClient::new(server.url("/contact"));
    let outcome = client.submit(&FormState::new("", "a@b.com", "Hi")).await.unwrap();
    assert!(!outcome.ok);
    assert_eq!(outcome.status, 400);
    assert_eq!(outcome.message, "Please fill out all fields.");

    let mut form = ContactForm::new();
    form.handle_change(FormField::Email, "a@b.com");
    let status = form.submit_with(&client).await;
    assert_eq!(status, SubmissionStatus::Error);
    assert_eq!(form.state().email, "a@b.com");
}

#[tokio::test]
async fn test_unparsable_reply_is_an_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/contact");
            then.status(200).body("<html>gateway</html>");
        })
        .await;

    let client = ContactClient::new(server.url("/contact"));
    assert!(client.submit(&FormState::new("Ann", "a@b.com", "Hi")).await.is_err());

    let mut form = filled_form();
    assert_eq!(form.submit_with(&client).await, SubmissionStatus::Error);
    assert_eq!(form.state().name, "Ann");
}

#[tokio::test]
async fn test_network_failure_is_an_error() {
    let client =
        ContactClient::with_timeout("http://127.0.0.1:9/contact", Duration::from_secs(2)).unwrap();
    let mut form = filled_form();

    assert_eq!(form.submit_with(&client).await, SubmissionStatus::Error);
    assert!(!form.is_loading());
}

#[tokio::test]
async fn test_webhook_notifier_posts_submission() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/hooks/contact")
                .body_contains("\"name\":\"Ann\"")
                .body_contains("\"received_at\"");
            then.status(204);
        })
        .await;

    let notifier =
        WebhookNotifier::new(server.url("/hooks/contact"), Duration::from_secs(5)).unwrap();
    notifier.deliver(&submission()).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_webhook_notifier_reports_error_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/hooks/contact");
            then.status(503);
        })
        .await;

    let notifier =
        WebhookNotifier::new(server.url("/hooks/contact"), Duration::from_secs(5)).unwrap();
    let err = notifier.deliver(&submission()).await.unwrap_err();

    assert!(matches!(err, SiteError::DeliveryError { .. }));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_endpoint_with_failing_webhook_returns_500() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/hooks/contact");
            then.status(500);
        })
        .await;

    let hook_url = server.url("/hooks/contact");
    let notifier = notifier_for(Some(hook_url.as_str()), Duration::from_secs(5)).unwrap();
    let endpoint = ContactEndpoint::new(notifier);

    let response = endpoint
        .handle(
            "POST",
            Some(r#"{"name":"Ann","email":"a@b.com","message":"Hi"}"#),
        )
        .await;

    assert_eq!(response.status_code, 500);
    assert_eq!(response.message().as_deref(), Some("Failed to send message."));
}

#[tokio::test]
async fn test_form_against_running_server() {
    let state = Arc::new(AppState::new(
        PortfolioData::default(),
        Some(Theme::Light),
        ContactEndpoint::default(),
    ));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });

    let client = ContactClient::new(format!(
        "http://{}/.netlify/functions/contact-form",
        addr
    ));

    let mut form = filled_form();
    assert_eq!(form.submit_with(&client).await, SubmissionStatus::Success);

    // Submitting the now-empty form is rejected by the endpoint.
    assert_eq!(form.submit_with(&client).await, SubmissionStatus::Error);
}
