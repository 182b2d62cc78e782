//! Serde roundtrip and JsonSchema validation tests for entity and input types.

use chrono::Utc;
use schemars::schema_for;
use vit_core::entities::*;
use vit_core::enums::*;
use vit_core::inputs::*;
use vit_core::responses::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_media() -> Media {
    Media {
        id: "med-0b1c2d3e".into(),
        app_id: "app-9f8e7d6c".into(),
        kind: MediaKind::Screenshot,
        status: MediaStatus::Ready,
        storage_key: "media/app-9f8e7d6c/med-0b1c2d3e/home.png".into(),
        file_name: "home.png".into(),
        content_type: "image/png".into(),
        size_bytes: Some(48_213),
        alt_text: Some("Home screen".into()),
        position: 0,
        uploaded_at: Some(Utc::now()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

roundtrip_and_validate!(
    organization_roundtrip,
    Organization,
    Organization {
        id: "org-1a2b3c4d".into(),
        name: "Northwind Labs".into(),
        slug: "northwind".into(),
        website_url: Some("https://northwind.example".into()),
        description: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    user_roundtrip,
    User,
    User {
        id: "usr-5e6f7a8b".into(),
        email: "ada@northwind.example".into(),
        name: "Ada".into(),
        role: UserRole::Admin,
        organization_id: Some("org-1a2b3c4d".into()),
        avatar_url: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    app_roundtrip,
    App,
    App {
        id: "app-9f8e7d6c".into(),
        slug: "pixel-garden".into(),
        name: "Pixel Garden".into(),
        tagline: Some("Grow tiny worlds".into()),
        description: Some("A cozy sandbox game.".into()),
        status: AppStatus::Published,
        platforms: vec![Platform::Web, Platform::Ios],
        tags: vec!["games".into(), "sandbox".into()],
        website_url: None,
        repository_url: Some("https://github.com/northwind/pixel-garden".into()),
        organization_id: Some("org-1a2b3c4d".into()),
        owner_id: Some("usr-5e6f7a8b".into()),
        featured: true,
        published_at: Some(Utc::now()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    app_version_roundtrip,
    AppVersion,
    AppVersion {
        id: "ver-2c3d4e5f".into(),
        app_id: "app-9f8e7d6c".into(),
        version: "1.2.0-beta.1".into(),
        release_notes: Some("New biomes".into()),
        released_at: Utc::now(),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(media_roundtrip, Media, sample_media());

roundtrip_and_validate!(
    timeline_roundtrip,
    TimelineEvent,
    TimelineEvent {
        id: "evt-6a7b8c9d".into(),
        app_id: "app-9f8e7d6c".into(),
        kind: TimelineKind::Launch,
        title: "Public launch".into(),
        body: None,
        link_url: Some("https://blog.northwind.example/launch".into()),
        occurred_at: Utc::now(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    audit_roundtrip,
    AuditEntry,
    AuditEntry {
        id: "aud-0f1e2d3c".into(),
        entity_type: EntityType::App,
        entity_id: "app-9f8e7d6c".into(),
        action: AuditAction::StatusChanged,
        actor: Some("admin".into()),
        detail: Some(serde_json::json!({"from": "draft", "to": "published"})),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    create_app_input_roundtrip,
    CreateAppInput,
    CreateAppInput {
        slug: "pixel-garden".into(),
        name: "Pixel Garden".into(),
        tagline: None,
        description: None,
        platforms: vec![Platform::Android],
        tags: vec!["games".into()],
        website_url: None,
        repository_url: None,
        organization_id: None,
        owner_id: None,
        featured: false,
    }
);

roundtrip_and_validate!(
    request_upload_roundtrip,
    RequestUploadInput,
    RequestUploadInput {
        app_id: "app-9f8e7d6c".into(),
        kind: MediaKind::Icon,
        file_name: "icon.svg".into(),
        content_type: "image/svg+xml".into(),
        size_bytes: 2048,
        alt_text: None,
        position: Some(0),
    }
);

roundtrip_and_validate!(
    presigned_upload_roundtrip,
    PresignedUpload,
    PresignedUpload {
        media: sample_media(),
        upload_url: "https://bucket.s3.amazonaws.com/media/x?X-Amz-Expires=900".into(),
        method: "PUT".into(),
        headers: vec![HeaderPair {
            name: "content-type".into(),
            value: "image/png".into(),
        }],
        expires_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    media_page_roundtrip,
    Page<MediaWithUrl>,
    Page::new(
        vec![MediaWithUrl {
            media: sample_media(),
            download_url: Some("https://cdn.example/media/x".into()),
        }],
        1,
        20,
        0,
    )
);

#[test]
fn update_input_accepts_empty_object() {
    let input: UpdateAppInput = serde_json::from_str("{}").unwrap();
    assert_eq!(input, UpdateAppInput::default());
}

#[test]
fn transition_input_rejects_unknown_status() {
    let result: Result<TransitionAppInput, _> =
        serde_json::from_str(r#"{"status":"live"}"#);
    assert!(result.is_err());
}
