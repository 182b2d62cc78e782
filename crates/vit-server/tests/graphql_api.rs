mod common;

use async_graphql::Request;
use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use vit_server::graphql::{Caller, VitSchema, build_schema};
use vit_server::router;

async fn schema() -> VitSchema {
    build_schema(common::state(common::config()).await)
}

fn admin_caller() -> Caller {
    Caller {
        admin: true,
        actor: Some("ada".into()),
    }
}

async fn run(schema: &VitSchema, query: &str, caller: Caller) -> Value {
    let response = schema.execute(Request::new(query).data(caller)).await;
    serde_json::to_value(&response).unwrap()
}

const CREATE_APP: &str = r#"
    mutation {
        createApp(input: { slug: "pixel-garden", name: "Pixel Garden", platforms: [WEB], tags: ["Games"] }) {
            id
            status
            tags
        }
    }
"#;

#[tokio::test]
async fn create_then_query_apps() {
    let schema = schema().await;
    let created = run(&schema, CREATE_APP, admin_caller()).await;
    assert_eq!(created["errors"], Value::Null, "{created}");
    assert_eq!(created["data"]["createApp"]["status"], "DRAFT");
    assert_eq!(created["data"]["createApp"]["tags"], json!(["games"]));

    let listed = run(
        &schema,
        "{ apps(filter: { tag: \"games\" }) { total items { slug } } }",
        admin_caller(),
    )
    .await;
    assert_eq!(listed["data"]["apps"]["total"], 1);
    assert_eq!(listed["data"]["apps"]["items"][0]["slug"], "pixel-garden");
}

#[tokio::test]
async fn publishing_makes_app_visible_in_catalog() {
    let schema = schema().await;
    let created = run(&schema, CREATE_APP, admin_caller()).await;
    let id = created["data"]["createApp"]["id"].as_str().unwrap().to_string();

    let before = run(&schema, "{ catalog { total } }", Caller::default()).await;
    assert_eq!(before["data"]["catalog"]["total"], 0);

    let published = run(
        &schema,
        &format!(r#"mutation {{ transitionApp(id: "{id}", status: PUBLISHED) {{ status publishedAt }} }}"#),
        admin_caller(),
    )
    .await;
    assert_eq!(published["data"]["transitionApp"]["status"], "PUBLISHED");
    assert!(published["data"]["transitionApp"]["publishedAt"].is_string());

    let after = run(
        &schema,
        "{ catalog { total } catalogApp(slug: \"pixel-garden\") { name } }",
        Caller::default(),
    )
    .await;
    assert_eq!(after["data"]["catalog"]["total"], 1);
    assert_eq!(after["data"]["catalogApp"]["name"], "Pixel Garden");
}

#[tokio::test]
async fn mutations_require_admin() {
    let schema = schema().await;
    let denied = run(&schema, CREATE_APP, Caller::default()).await;
    assert_eq!(denied["data"], Value::Null);
    assert_eq!(denied["errors"][0]["extensions"]["code"], "unauthorized");
}

#[tokio::test]
async fn admin_queries_are_hidden_from_the_public() {
    let schema = schema().await;
    let denied = run(&schema, "{ organizations { total } }", Caller::default()).await;
    assert_eq!(denied["errors"][0]["extensions"]["code"], "unauthorized");
}

#[tokio::test]
async fn domain_errors_carry_codes() {
    let schema = schema().await;
    let missing = run(&schema, r#"{ app(id: "app-00000000") { id } }"#, admin_caller()).await;
    assert_eq!(missing["errors"][0]["extensions"]["code"], "not_found");

    let created = run(&schema, CREATE_APP, admin_caller()).await;
    let id = created["data"]["createApp"]["id"].as_str().unwrap().to_string();
    let archive = format!(r#"mutation {{ transitionApp(id: "{id}", status: ARCHIVED) {{ status }} }}"#);
    run(&schema, &archive, admin_caller()).await;
    let publish = format!(r#"mutation {{ transitionApp(id: "{id}", status: PUBLISHED) {{ status }} }}"#);
    let invalid = run(&schema, &publish, admin_caller()).await;
    assert_eq!(invalid["errors"][0]["extensions"]["code"], "invalid_transition");

    let duplicate = run(&schema, CREATE_APP, admin_caller()).await;
    assert_eq!(duplicate["errors"][0]["extensions"]["code"], "conflict");
}

#[tokio::test]
async fn versions_and_timeline_resolve() {
    let schema = schema().await;
    let created = run(&schema, CREATE_APP, admin_caller()).await;
    let id = created["data"]["createApp"]["id"].as_str().unwrap().to_string();

    for version in ["1.0.0", "1.1.0"] {
        let reply = run(
            &schema,
            &format!(
                r#"mutation {{ createAppVersion(input: {{ appId: "{id}", version: "{version}" }}) {{ version }} }}"#
            ),
            admin_caller(),
        )
        .await;
        assert_eq!(reply["errors"], Value::Null, "{reply}");
    }

    let read = run(
        &schema,
        &format!(r#"{{ versions(appId: "{id}") {{ version }} timeline(appId: "{id}") {{ kind title }} }}"#),
        admin_caller(),
    )
    .await;
    assert_eq!(read["data"]["versions"][0]["version"], "1.1.0");
    assert_eq!(read["data"]["timeline"].as_array().unwrap().len(), 2);
    assert_eq!(read["data"]["timeline"][0]["kind"], "RELEASE");
}

#[tokio::test]
async fn http_endpoint_uses_bearer_token() {
    let router = router(common::state(common::config()).await);
    let query = json!({ "query": "mutation { createOrganization(input: { name: \"Acme\", slug: \"acme\" }) { slug } }" });

    let anonymous = common::send(&router, Method::POST, "/graphql", None, Some(query.clone())).await;
    assert_eq!(anonymous.status, StatusCode::OK);
    assert_eq!(anonymous.body["errors"][0]["extensions"]["code"], "unauthorized");

    let admin = common::send(&router, Method::POST, "/graphql", Some(common::TOKEN), Some(query)).await;
    assert_eq!(admin.body["data"]["createOrganization"]["slug"], "acme");
}
