//! App repository: CRUD, status transitions, filtered listing, and FTS.

use vit_core::entities::App;
use vit_core::enums::{AppStatus, AuditAction, EntityType};
use vit_core::errors::CoreError;
use vit_core::ids::PREFIX_APP;
use vit_core::inputs::{AppFilter, CreateAppInput, UpdateAppInput};
use vit_core::responses::Page;

use crate::error::DatabaseError;
use crate::helpers::{
    format_datetime, fts_query, get_opt_string, now, parse_datetime, parse_enum,
    parse_json_list, parse_optional_datetime, to_json_list,
};
use crate::repos::count;
use crate::service::{VitService, to_detail};
use crate::updates::SetClauses;
use crate::updates::app::AppUpdate;

const COLUMNS: &str = "id, slug, name, tagline, description, status, platforms, tags, \
     website_url, repository_url, organization_id, owner_id, featured, published_at, \
     created_at, updated_at";

fn row_to_app(row: &libsql::Row) -> Result<App, DatabaseError> {
    Ok(App {
        id: row.get::<String>(0)?,
        slug: row.get::<String>(1)?,
        name: row.get::<String>(2)?,
        tagline: get_opt_string(row, 3)?,
        description: get_opt_string(row, 4)?,
        status: parse_enum(&row.get::<String>(5)?)?,
        platforms: parse_json_list(&row.get::<String>(6)?)?,
        tags: parse_json_list(&row.get::<String>(7)?)?,
        website_url: get_opt_string(row, 8)?,
        repository_url: get_opt_string(row, 9)?,
        organization_id: get_opt_string(row, 10)?,
        owner_id: get_opt_string(row, 11)?,
        featured: row.get::<i64>(12)? != 0,
        published_at: parse_optional_datetime(get_opt_string(row, 13)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(14)?)?,
        updated_at: parse_datetime(&row.get::<String>(15)?)?,
    })
}

/// Build the WHERE clause for an app filter. Parameters are numbered from 1.
fn filter_clause(filter: &AppFilter) -> (String, Vec<libsql::Value>) {
    let mut conditions = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();

    if let Some(status) = filter.status {
        params.push(status.as_str().into());
        conditions.push(format!("status = ?{}", params.len()));
    }
    if let Some(platform) = filter.platform {
        params.push(platform.as_str().into());
        conditions.push(format!(
            "EXISTS (SELECT 1 FROM json_each(apps.platforms) WHERE json_each.value = ?{})",
            params.len()
        ));
    }
    if let Some(ref org) = filter.organization_id {
        params.push(org.as_str().into());
        conditions.push(format!("organization_id = ?{}", params.len()));
    }
    if let Some(ref tag) = filter.tag {
        params.push(tag.trim().to_lowercase().into());
        conditions.push(format!(
            "EXISTS (SELECT 1 FROM json_each(apps.tags) WHERE json_each.value = ?{})",
            params.len()
        ));
    }
    if let Some(featured) = filter.featured {
        params.push(i64::from(featured).into());
        conditions.push(format!("featured = ?{}", params.len()));
    }
    if let Some(q) = filter.query.as_deref().and_then(fts_query) {
        params.push(q.into());
        conditions.push(format!(
            "apps.rowid IN (SELECT rowid FROM apps_fts WHERE apps_fts MATCH ?{})",
            params.len()
        ));
    }

    let clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (clause, params)
}

impl VitService {
    /// Create an app in `draft` status.
    ///
    /// # Errors
    ///
    /// Returns a validation error, `Conflict` if the slug is taken, or
    /// `Constraint` if the organization or owner does not exist.
    pub async fn create_app(
        &self,
        actor: Option<&str>,
        input: CreateAppInput,
    ) -> Result<App, DatabaseError> {
        let input = input.validated()?;
        let now = now();
        let id = self.db().generate_id(PREFIX_APP).await?;
        let platforms = to_json_list(&input.platforms)?;
        let tags = to_json_list(&input.tags)?;

        self.db()
            .execute_with(
                "INSERT INTO apps (id, slug, name, tagline, description, status, platforms, tags,
                                   website_url, repository_url, organization_id, owner_id, featured,
                                   published_at, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, 'draft', ?6, ?7, ?8, ?9, ?10, ?11, ?12, NULL, ?13, ?14)",
                || {
                    libsql::params![
                        id.as_str(),
                        input.slug.as_str(),
                        input.name.as_str(),
                        input.tagline.as_deref(),
                        input.description.as_deref(),
                        platforms.as_str(),
                        tags.as_str(),
                        input.website_url.as_deref(),
                        input.repository_url.as_deref(),
                        input.organization_id.as_deref(),
                        input.owner_id.as_deref(),
                        i64::from(input.featured),
                        format_datetime(&now),
                        format_datetime(&now)
                    ]
                },
            )
            .await?;

        self.audit(actor, EntityType::App, &id, AuditAction::Created, None)
            .await?;

        Ok(App {
            id,
            slug: input.slug,
            name: input.name,
            tagline: input.tagline,
            description: input.description,
            status: AppStatus::Draft,
            platforms: input.platforms,
            tags: input.tags,
            website_url: input.website_url,
            repository_url: input.repository_url,
            organization_id: input.organization_id,
            owner_id: input.owner_id,
            featured: input.featured,
            published_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no app has this id.
    pub async fn get_app(&self, id: &str) -> Result<App, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(&format!("SELECT {COLUMNS} FROM apps WHERE id = ?1"), || [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("app", id))?;
        row_to_app(&row)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no app has this slug.
    pub async fn get_app_by_slug(&self, slug: &str) -> Result<App, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(&format!("SELECT {COLUMNS} FROM apps WHERE slug = ?1"), || [slug])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("app", slug))?;
        row_to_app(&row)
    }

    /// Catalog lookup: only published apps are visible.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the app does not exist or is not published.
    pub async fn get_published_app(&self, slug: &str) -> Result<App, DatabaseError> {
        let app = self.get_app_by_slug(slug).await?;
        if app.status == AppStatus::Published {
            Ok(app)
        } else {
            Err(DatabaseError::not_found("app", slug))
        }
    }

    /// Partially update an app's metadata. Status changes go through
    /// [`Self::transition_app`].
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, a validation error, `Conflict`, or `Constraint`.
    pub async fn update_app(
        &self,
        actor: Option<&str>,
        id: &str,
        input: UpdateAppInput,
    ) -> Result<App, DatabaseError> {
        let update: AppUpdate = input.validated()?.into();

        let mut set = SetClauses::default();
        if let Some(ref slug) = update.slug {
            set.push("slug", slug.as_str());
        }
        if let Some(ref name) = update.name {
            set.push("name", name.as_str());
        }
        if let Some(ref v) = update.tagline {
            set.push("tagline", v.as_deref());
        }
        if let Some(ref v) = update.description {
            set.push("description", v.as_deref());
        }
        if let Some(ref platforms) = update.platforms {
            set.push("platforms", to_json_list(platforms)?);
        }
        if let Some(ref tags) = update.tags {
            set.push("tags", to_json_list(tags)?);
        }
        if let Some(ref v) = update.website_url {
            set.push("website_url", v.as_deref());
        }
        if let Some(ref v) = update.repository_url {
            set.push("repository_url", v.as_deref());
        }
        if let Some(ref v) = update.organization_id {
            set.push("organization_id", v.as_deref());
        }
        if let Some(ref v) = update.owner_id {
            set.push("owner_id", v.as_deref());
        }
        if let Some(featured) = update.featured {
            set.push("featured", i64::from(featured));
        }

        if set.is_empty() {
            return self.get_app(id).await;
        }
        set.push("updated_at", format_datetime(&now()));

        let (sql, params) = set.into_update("apps", id);
        let changed = self
            .db()
            .execute_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("app", id));
        }

        self.audit(
            actor,
            EntityType::App,
            id,
            AuditAction::Updated,
            Some(to_detail(&update)?),
        )
        .await?;

        self.get_app(id).await
    }

    /// Move an app to `next`, validated against the status machine.
    /// Entering `published` stamps `published_at`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `CoreError::InvalidTransition`.
    pub async fn transition_app(
        &self,
        actor: Option<&str>,
        id: &str,
        next: AppStatus,
    ) -> Result<App, DatabaseError> {
        let current = self.get_app(id).await?;
        if !current.status.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                entity_type: "app".into(),
                id: id.to_string(),
                from: current.status.to_string(),
                to: next.to_string(),
            }
            .into());
        }

        if !self.update_app_status(id, current.status, next).await? {
            let actual = self.get_app(id).await?.status;
            return Err(CoreError::InvalidTransition {
                entity_type: "app".into(),
                id: id.to_string(),
                from: actual.to_string(),
                to: next.to_string(),
            }
            .into());
        }

        self.audit(
            actor,
            EntityType::App,
            id,
            AuditAction::StatusChanged,
            Some(serde_json::json!({
                "from": current.status.as_str(),
                "to": next.as_str(),
            })),
        )
        .await?;

        tracing::info!(app_id = id, from = %current.status, to = %next, "app status changed");
        self.get_app(id).await
    }

    /// Move an app from `from` to `next`. Returns `false` when the stored
    /// status is no longer `from`, leaving the row untouched.
    async fn update_app_status(
        &self,
        id: &str,
        from: AppStatus,
        next: AppStatus,
    ) -> Result<bool, DatabaseError> {
        let now = format_datetime(&now());
        let changed = self
            .db()
            .execute_with(
                "UPDATE apps
                 SET status = ?1,
                     published_at = CASE WHEN ?1 = 'published' THEN ?2 ELSE published_at END,
                     updated_at = ?2
                 WHERE id = ?3 AND status = ?4",
                || libsql::params![next.as_str(), now.as_str(), id, from.as_str()],
            )
            .await?;
        Ok(changed > 0)
    }

    /// Delete an app. Versions, media rows, and timeline events cascade.
    ///
    /// Returns the storage keys of the app's media so the caller can remove
    /// the stored objects.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no app has this id.
    pub async fn delete_app(
        &self,
        actor: Option<&str>,
        id: &str,
    ) -> Result<Vec<String>, DatabaseError> {
        let mut rows = self
            .db()
            .query_with("SELECT storage_key FROM media WHERE app_id = ?1", || [id])
            .await?;
        let mut keys = Vec::new();
        while let Some(row) = rows.next().await? {
            keys.push(row.get::<String>(0)?);
        }

        let changed = self
            .db()
            .execute_with("DELETE FROM apps WHERE id = ?1", || [id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("app", id));
        }

        self.audit(
            actor,
            EntityType::App,
            id,
            AuditAction::Deleted,
            Some(serde_json::json!({ "media_objects": keys.len() })),
        )
        .await?;
        Ok(keys)
    }

    /// List apps matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_apps(
        &self,
        filter: &AppFilter,
        limit: u32,
        offset: u32,
    ) -> Result<Page<App>, DatabaseError> {
        let (where_clause, mut params) = filter_clause(filter);

        let total = count(
            self.db(),
            &format!("SELECT COUNT(*) FROM apps {where_clause}"),
            &params,
        )
        .await?;

        let n = params.len();
        params.push(i64::from(limit).into());
        params.push(i64::from(offset).into());
        let sql = format!(
            "SELECT {COLUMNS} FROM apps {where_clause}
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
            items.push(row_to_app(&row)?);
        }
        Ok(Page::new(items, total, limit, offset))
    }

    /// Public catalog: [`Self::list_apps`] restricted to published apps.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn catalog(
        &self,
        filter: &AppFilter,
        limit: u32,
        offset: u32,
    ) -> Result<Page<App>, DatabaseError> {
        let filter = AppFilter {
            status: Some(AppStatus::Published),
            ..filter.clone()
        };
        self.list_apps(&filter, limit, offset).await
    }
}
