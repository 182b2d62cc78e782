//! Shared test utilities for vit-db tests.

pub mod helpers {
    use vit_core::entities::{App, Organization, User};
    use vit_core::inputs::{CreateAppInput, CreateOrganizationInput, CreateUserInput};

    use crate::service::VitService;

    /// Create an in-memory `VitService`.
    pub async fn test_service() -> VitService {
        VitService::new_local(":memory:").await.unwrap()
    }

    pub fn app_input(slug: &str) -> CreateAppInput {
        CreateAppInput {
            slug: slug.into(),
            name: format!("App {slug}"),
            tagline: None,
            description: None,
            platforms: vec![],
            tags: vec![],
            website_url: None,
            repository_url: None,
            organization_id: None,
            owner_id: None,
            featured: false,
        }
    }

    pub async fn create_test_app(svc: &VitService, slug: &str) -> App {
        svc.create_app(Some("test"), app_input(slug)).await.unwrap()
    }

    pub async fn create_test_org(svc: &VitService, slug: &str) -> Organization {
        svc.create_organization(
            Some("test"),
            CreateOrganizationInput {
                name: format!("Org {slug}"),
                slug: slug.into(),
                website_url: None,
                description: None,
            },
        )
        .await
        .unwrap()
    }

    pub async fn create_test_user(svc: &VitService, email: &str) -> User {
        svc.create_user(
            Some("test"),
            CreateUserInput {
                email: email.into(),
                name: "Test User".into(),
                role: None,
                organization_id: None,
                avatar_url: None,
            },
        )
        .await
        .unwrap()
    }
}
