//! End-to-end workflow over a file-backed database: an organization ships
//! an app, records releases, attaches media, and the catalog reflects it.

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use vit_core::enums::{AppStatus, MediaKind, MediaStatus, Platform, TimelineKind, UserRole};
use vit_core::ids::PREFIX_MEDIA;
use vit_core::inputs::{
    AppFilter, CreateAppInput, CreateAppVersionInput, CreateOrganizationInput, CreateUserInput,
    RequestUploadInput,
};
use vit_db::repos::audit::AuditFilter;
use vit_db::service::VitService;

async fn service_in(dir: &TempDir) -> VitService {
    let path = dir.path().join("vitrine.db");
    VitService::new_local(path.to_str().unwrap()).await.unwrap()
}

#[tokio::test]
async fn ship_an_app_end_to_end() {
    let dir = TempDir::new().unwrap();
    let svc = service_in(&dir).await;

    let org = svc
        .create_organization(
            Some("admin"),
            CreateOrganizationInput {
                name: "Acme Studio".into(),
                slug: "acme".into(),
                website_url: Some("https://acme.example.com".into()),
                description: None,
            },
        )
        .await
        .unwrap();
    let owner = svc
        .create_user(
            Some("admin"),
            CreateUserInput {
                email: "Maker@Acme.example.com".into(),
                name: "Maker".into(),
                role: Some(UserRole::Admin),
                organization_id: Some(org.id.clone()),
                avatar_url: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(owner.email, "maker@acme.example.com");

    let app = svc
        .create_app(
            Some(&owner.email),
            CreateAppInput {
                slug: "pixel-garden".into(),
                name: "Pixel Garden".into(),
                tagline: Some("Grow tiny worlds".into()),
                description: None,
                platforms: vec![Platform::Ios, Platform::Android],
                tags: vec!["games".into()],
                website_url: None,
                repository_url: None,
                organization_id: Some(org.id.clone()),
                owner_id: Some(owner.id.clone()),
                featured: true,
            },
        )
        .await
        .unwrap();

    svc.create_app_version(
        Some(&owner.email),
        CreateAppVersionInput {
            app_id: app.id.clone(),
            version: "1.0.0".into(),
            release_notes: Some("First release".into()),
            released_at: None,
        },
    )
    .await
    .unwrap();

    let media_id = svc.new_id(PREFIX_MEDIA).await.unwrap();
    let upload = RequestUploadInput {
        app_id: app.id.clone(),
        kind: MediaKind::Icon,
        file_name: "icon.png".into(),
        content_type: "image/png".into(),
        size_bytes: 512,
        alt_text: None,
        position: None,
    }
    .validated(1024)
    .unwrap();
    let key = format!("apps/{}/{media_id}/icon.png", app.id);
    svc.create_media(Some(&owner.email), &media_id, &upload, &key)
        .await
        .unwrap();
    svc.set_media_status(None, &media_id, MediaStatus::Ready, Some(512))
        .await
        .unwrap();

    // Drafts stay out of the catalog.
    assert_eq!(svc.catalog(&AppFilter::default(), 20, 0).await.unwrap().total, 0);

    svc.transition_app(Some("admin"), &app.id, AppStatus::InReview)
        .await
        .unwrap();
    svc.transition_app(Some("admin"), &app.id, AppStatus::Published)
        .await
        .unwrap();

    let catalog = svc
        .catalog(
            &AppFilter {
                platform: Some(Platform::Android),
                query: Some("tiny".into()),
                ..Default::default()
            },
            20,
            0,
        )
        .await
        .unwrap();
    assert_eq!(catalog.total, 1);
    assert_eq!(catalog.items[0].slug, "pixel-garden");

    let timeline = svc.list_timeline(&app.id).await.unwrap();
    assert_eq!(timeline[0].kind, TimelineKind::Release);
    assert_eq!(svc.list_media(&app.id, true).await.unwrap().len(), 1);

    let history = svc
        .query_audit(&AuditFilter {
            entity_id: Some(app.id.clone()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(history.len(), 3);

    drop(svc);
    let reopened = service_in(&dir).await;
    let persisted = reopened.get_app_by_slug("pixel-garden").await.unwrap();
    assert_eq!(persisted.status, AppStatus::Published);
    assert!(persisted.published_at.is_some());
}

#[tokio::test]
async fn deleting_an_organization_keeps_its_apps() {
    let dir = TempDir::new().unwrap();
    let svc = service_in(&dir).await;
    let org = svc
        .create_organization(
            None,
            CreateOrganizationInput {
                name: "Gone".into(),
                slug: "gone".into(),
                website_url: None,
                description: None,
            },
        )
        .await
        .unwrap();
    let app = svc
        .create_app(
            None,
            CreateAppInput {
                slug: "orphan".into(),
                name: "Orphan".into(),
                tagline: None,
                description: None,
                platforms: vec![],
                tags: vec![],
                website_url: None,
                repository_url: None,
                organization_id: Some(org.id.clone()),
                owner_id: None,
                featured: false,
            },
        )
        .await
        .unwrap();

    svc.delete_organization(None, &org.id).await.unwrap();
    assert_eq!(svc.get_app(&app.id).await.unwrap().organization_id, None);
}
