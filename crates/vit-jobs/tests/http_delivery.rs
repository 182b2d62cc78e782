//! Mail and webhook delivery against a local HTTP endpoint.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use pretty_assertions::assert_eq;
use vit_config::{JobsConfig, MailConfig, WebhooksConfig};
use vit_jobs::webhook::{EVENT_HEADER, SIGNATURE_HEADER, sign};
use vit_jobs::{
    Dispatcher, EmailTemplate, Job, JobQueue, MailOutcome, Mailer, WebhookEvent,
};

#[derive(Clone, Default)]
struct Endpoint {
    requests: Arc<Mutex<Vec<(HeaderMap, Bytes)>>>,
    /// Statuses to answer with, in order; 200 once exhausted.
    script: Arc<Mutex<Vec<u16>>>,
    hits: Arc<AtomicUsize>,
}

async fn capture(State(ep): State<Endpoint>, headers: HeaderMap, body: Bytes) -> StatusCode {
    ep.hits.fetch_add(1, Ordering::SeqCst);
    ep.requests.lock().unwrap().push((headers, body));
    let mut script = ep.script.lock().unwrap();
    if script.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::from_u16(script.remove(0)).unwrap()
    }
}

async fn spawn_endpoint(script: Vec<u16>) -> (SocketAddr, Endpoint) {
    let ep = Endpoint {
        script: Arc::new(Mutex::new(script)),
        ..Endpoint::default()
    };
    let app = Router::new()
        .route("/hook", post(capture))
        .with_state(ep.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, ep)
}

fn fast_jobs() -> JobsConfig {
    JobsConfig {
        workers: 1,
        queue_capacity: 16,
        max_attempts: 3,
        base_delay_ms: 1,
        max_delay_ms: 10,
    }
}

#[tokio::test]
async fn mailer_posts_json_with_bearer_key() {
    let (addr, ep) = spawn_endpoint(vec![]).await;
    let mailer = Mailer::new(
        reqwest::Client::new(),
        MailConfig {
            api_url: format!("http://{addr}/hook"),
            api_key: "mail-key".into(),
            from_address: "Vitrine <no-reply@vitrine.test>".into(),
        },
    );
    let message = EmailTemplate::Welcome
        .render("ada@example.com", &[("name", "Ada"), ("email", "ada@example.com")])
        .unwrap();

    assert_eq!(mailer.send(&message).await.unwrap(), MailOutcome::Sent);

    let requests = ep.requests.lock().unwrap();
    let (headers, body) = &requests[0];
    assert_eq!(headers["authorization"], "Bearer mail-key");
    let json: serde_json::Value = serde_json::from_slice(body).unwrap();
    assert_eq!(json["from"], "Vitrine <no-reply@vitrine.test>");
    assert_eq!(json["to"], "ada@example.com");
    assert_eq!(json["subject"], "Welcome to Vitrine, Ada");
    assert!(json["html"].is_string());
}

#[tokio::test]
async fn unconfigured_mailer_skips() {
    let mailer = Mailer::new(reqwest::Client::new(), MailConfig::default());
    let message = EmailTemplate::Welcome
        .render("ada@example.com", &[("name", "Ada"), ("email", "ada@example.com")])
        .unwrap();
    assert_eq!(mailer.send(&message).await.unwrap(), MailOutcome::Skipped);
}

#[tokio::test]
async fn webhook_is_signed_and_retried() {
    let (addr, ep) = spawn_endpoint(vec![500]).await;
    let dispatcher = Arc::new(
        Dispatcher::from_config(
            &MailConfig::default(),
            &WebhooksConfig {
                urls: vec![format!("http://{addr}/hook")],
                secret: "s3cret".into(),
            },
        )
        .unwrap(),
    );
    let queue = JobQueue::start(Arc::clone(&dispatcher), &fast_jobs());

    let event = WebhookEvent::new(
        "app.published",
        serde_json::json!({"slug": "pixel-garden"}),
    );
    for job in dispatcher.webhook_jobs(&event) {
        queue.enqueue(job).unwrap();
    }
    queue.shutdown().await;

    assert_eq!(ep.hits.load(Ordering::SeqCst), 2);
    let stats = queue.stats();
    assert_eq!(stats.retried, 1);
    assert_eq!(stats.succeeded, 1);

    let requests = ep.requests.lock().unwrap();
    let (headers, body) = &requests[1];
    assert_eq!(headers[EVENT_HEADER], "app.published");
    assert_eq!(
        headers[SIGNATURE_HEADER].to_str().unwrap(),
        sign("s3cret", body).unwrap()
    );
    let sent: WebhookEvent = serde_json::from_slice(body).unwrap();
    assert_eq!(sent, event);
}

#[tokio::test]
async fn client_errors_are_dead_on_first_attempt() {
    let (addr, ep) = spawn_endpoint(vec![404, 404, 404]).await;
    let dispatcher = Arc::new(
        Dispatcher::from_config(
            &MailConfig::default(),
            &WebhooksConfig {
                urls: vec![format!("http://{addr}/hook")],
                secret: String::new(),
            },
        )
        .unwrap(),
    );
    let queue = JobQueue::start(Arc::clone(&dispatcher), &fast_jobs());
    for job in dispatcher.webhook_jobs(&WebhookEvent::new("app.deleted", serde_json::json!({}))) {
        queue.enqueue(job).unwrap();
    }
    queue.shutdown().await;

    assert_eq!(ep.hits.load(Ordering::SeqCst), 1);
    assert_eq!(queue.stats().dead, 1);
    let requests = ep.requests.lock().unwrap();
    assert!(requests[0].0.get(SIGNATURE_HEADER).is_none());
}

#[tokio::test]
async fn jobs_report_their_kind() {
    let job = Job::SendEmail(
        EmailTemplate::Welcome
            .render("a@example.com", &[("name", "A"), ("email", "a@example.com")])
            .unwrap(),
    );
    assert_eq!(job.kind(), "send_email");
}
