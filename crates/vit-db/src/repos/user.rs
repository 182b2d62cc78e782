//! User repository.

use vit_core::entities::User;
use vit_core::enums::{AuditAction, EntityType, UserRole};
use vit_core::ids::PREFIX_USER;
use vit_core::inputs::{CreateUserInput, UpdateUserInput};
use vit_core::responses::Page;

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_opt_string, now, parse_datetime, parse_enum};
use crate::repos::count;
use crate::service::{VitService, to_detail};
use crate::updates::SetClauses;
use crate::updates::user::UserUpdate;

const COLUMNS: &str = "id, email, name, role, organization_id, avatar_url, created_at, updated_at";

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get::<String>(0)?,
        email: row.get::<String>(1)?,
        name: row.get::<String>(2)?,
        role: parse_enum(&row.get::<String>(3)?)?,
        organization_id: get_opt_string(row, 4)?,
        avatar_url: get_opt_string(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl VitService {
    /// # Errors
    ///
    /// Returns a validation error, `Conflict` if the email is taken, or
    /// `Constraint` if the organization does not exist.
    pub async fn create_user(
        &self,
        actor: Option<&str>,
        input: CreateUserInput,
    ) -> Result<User, DatabaseError> {
        let input = input.validated()?;
        let role = input.role.unwrap_or(UserRole::Editor);
        let now = now();
        let id = self.db().generate_id(PREFIX_USER).await?;

        self.db()
            .execute_with(
                "INSERT INTO users (id, email, name, role, organization_id, avatar_url, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                || {
                    libsql::params![
                        id.as_str(),
                        input.email.as_str(),
                        input.name.as_str(),
                        role.as_str(),
                        input.organization_id.as_deref(),
                        input.avatar_url.as_deref(),
                        format_datetime(&now),
                        format_datetime(&now)
                    ]
                },
            )
            .await?;

        self.audit(actor, EntityType::User, &id, AuditAction::Created, None)
            .await?;

        Ok(User {
            id,
            email: input.email,
            name: input.name,
            role,
            organization_id: input.organization_id,
            avatar_url: input.avatar_url,
            created_at: now,
            updated_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no user has this id.
    pub async fn get_user(&self, id: &str) -> Result<User, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(&format!("SELECT {COLUMNS} FROM users WHERE id = ?1"), || [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("user", id))?;
        row_to_user(&row)
    }

    /// Look up a user by email, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no user has this email.
    pub async fn get_user_by_email(&self, email: &str) -> Result<User, DatabaseError> {
        let email = email.trim().to_ascii_lowercase();
        let mut rows = self
            .db()
            .query_with(
                &format!("SELECT {COLUMNS} FROM users WHERE email = ?1 COLLATE NOCASE"),
                || [email.as_str()],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("user", email.as_str()))?;
        row_to_user(&row)
    }

    /// Partially update a user. Email uniqueness is re-checked by the index.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, a validation error, or `Conflict` on a taken email.
    pub async fn update_user(
        &self,
        actor: Option<&str>,
        id: &str,
        input: UpdateUserInput,
    ) -> Result<User, DatabaseError> {
        let update: UserUpdate = input.validated()?.into();

        let mut set = SetClauses::default();
        if let Some(ref email) = update.email {
            set.push("email", email.as_str());
        }
        if let Some(ref name) = update.name {
            set.push("name", name.as_str());
        }
        if let Some(role) = update.role {
            set.push("role", role.as_str());
        }
        if let Some(ref org) = update.organization_id {
            set.push("organization_id", org.as_deref());
        }
        if let Some(ref url) = update.avatar_url {
            set.push("avatar_url", url.as_deref());
        }

        if set.is_empty() {
            return self.get_user(id).await;
        }
        set.push("updated_at", format_datetime(&now()));

        let (sql, params) = set.into_update("users", id);
        let changed = self
            .db()
            .execute_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("user", id));
        }

        self.audit(
            actor,
            EntityType::User,
            id,
            AuditAction::Updated,
            Some(to_detail(&update)?),
        )
        .await?;

        self.get_user(id).await
    }

    /// Delete a user. Apps they own are kept with no owner.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no user has this id.
    pub async fn delete_user(&self, actor: Option<&str>, id: &str) -> Result<(), DatabaseError> {
        let changed = self
            .db()
            .execute_with("DELETE FROM users WHERE id = ?1", || [id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("user", id));
        }
        self.audit(actor, EntityType::User, id, AuditAction::Deleted, None)
            .await
    }

    /// List users, newest first, optionally restricted to one organization.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_users(
        &self,
        organization_id: Option<&str>,
        limit: u32,
        offset: u32,
    ) -> Result<Page<User>, DatabaseError> {
        let mut params: Vec<libsql::Value> = Vec::new();
        let where_clause = organization_id.map_or_else(String::new, |org| {
            params.push(org.into());
            "WHERE organization_id = ?1".to_string()
        });

        let total = count(
            self.db(),
            &format!("SELECT COUNT(*) FROM users {where_clause}"),
            &params,
        )
        .await?;

        let n = params.len();
        params.push(i64::from(limit).into());
        params.push(i64::from(offset).into());
        let sql = format!(
            "SELECT {COLUMNS} FROM users {where_clause}
             ORDER BY created_at DESC, id DESC LIMIT ?{} OFFSET ?{}",
            n + 1,
            n + 2
        );
        let mut rows = self
            .db()
            .query_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_user(&row)?);
        }
        Ok(Page::new(items, total, limit, offset))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vit_core::enums::UserRole;
    use vit_core::inputs::{CreateUserInput, UpdateUserInput};

    use crate::error::DatabaseError;
    use crate::test_support::helpers::{create_test_app, create_test_org, create_test_user, test_service};

    #[tokio::test]
    async fn create_normalizes_email_and_defaults_role() {
        let svc = test_service().await;
        let user = create_test_user(&svc, "Ada@Example.com").await;
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.role, UserRole::Editor);
        assert_eq!(svc.get_user(&user.id).await.unwrap(), user);
    }

    #[tokio::test]
    async fn email_uniqueness_is_case_insensitive() {
        let svc = test_service().await;
        create_test_user(&svc, "ada@example.com").await;
        let err = svc
            .create_user(
                None,
                CreateUserInput {
                    email: "ADA@example.com".into(),
                    name: "Ada again".into(),
                    role: None,
                    organization_id: None,
                    avatar_url: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(_)), "{err:?}");
    }

    #[tokio::test]
    async fn lookup_by_email_ignores_case() {
        let svc = test_service().await;
        let user = create_test_user(&svc, "grace@example.com").await;
        let found = svc.get_user_by_email(" Grace@Example.COM ").await.unwrap();
        assert_eq!(found.id, user.id);
    }

    #[tokio::test]
    async fn update_email_rechecks_uniqueness() {
        let svc = test_service().await;
        create_test_user(&svc, "ada@example.com").await;
        let grace = create_test_user(&svc, "grace@example.com").await;
        let err = svc
            .update_user(
                None,
                &grace.id,
                UpdateUserInput {
                    email: Some("Ada@Example.com".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(_)));
    }

    #[tokio::test]
    async fn unknown_organization_is_a_constraint_error() {
        let svc = test_service().await;
        let err = svc
            .create_user(
                None,
                CreateUserInput {
                    email: "x@example.com".into(),
                    name: "X".into(),
                    role: Some(UserRole::Viewer),
                    organization_id: Some("org-missing0".into()),
                    avatar_url: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Constraint(_)), "{err:?}");
    }

    #[tokio::test]
    async fn delete_orphans_owned_apps() {
        let svc = test_service().await;
        let user = create_test_user(&svc, "owner@example.com").await;
        let app = create_test_app(&svc, "owned").await;
        svc.update_app(
            None,
            &app.id,
            vit_core::inputs::UpdateAppInput {
                owner_id: Some(user.id.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        svc.delete_user(None, &user.id).await.unwrap();
        let app = svc.get_app(&app.id).await.unwrap();
        assert_eq!(app.owner_id, None);
        assert!(svc.delete_user(None, &user.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn list_filters_by_organization() {
        let svc = test_service().await;
        let org = create_test_org(&svc, "acme").await;
        let member = create_test_user(&svc, "member@acme.example").await;
        create_test_user(&svc, "outsider@example.com").await;
        svc.update_user(
            None,
            &member.id,
            UpdateUserInput {
                organization_id: Some(org.id.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let all = svc.list_users(None, 10, 0).await.unwrap();
        assert_eq!(all.total, 2);
        let members = svc.list_users(Some(&org.id), 10, 0).await.unwrap();
        assert_eq!(members.total, 1);
        assert_eq!(members.items[0].id, member.id);
    }
}
