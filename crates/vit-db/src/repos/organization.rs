//! Organization repository.

use vit_core::entities::Organization;
use vit_core::enums::{AuditAction, EntityType};
use vit_core::ids::PREFIX_ORGANIZATION;
use vit_core::inputs::{CreateOrganizationInput, UpdateOrganizationInput};
use vit_core::responses::Page;

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_opt_string, now, parse_datetime};
use crate::repos::count;
use crate::service::{VitService, to_detail};
use crate::updates::SetClauses;
use crate::updates::organization::OrganizationUpdate;

const COLUMNS: &str = "id, name, slug, website_url, description, created_at, updated_at";

fn row_to_organization(row: &libsql::Row) -> Result<Organization, DatabaseError> {
    Ok(Organization {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        slug: row.get::<String>(2)?,
        website_url: get_opt_string(row, 3)?,
        description: get_opt_string(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl VitService {
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` on validation failure or
    /// `DatabaseError::Conflict` if the slug is taken.
    pub async fn create_organization(
        &self,
        actor: Option<&str>,
        input: CreateOrganizationInput,
    ) -> Result<Organization, DatabaseError> {
        let input = input.validated()?;
        let now = now();
        let id = self.db().generate_id(PREFIX_ORGANIZATION).await?;

        self.db()
            .execute_with(
                "INSERT INTO organizations (id, name, slug, website_url, description, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                || {
                    libsql::params![
                        id.as_str(),
                        input.name.as_str(),
                        input.slug.as_str(),
                        input.website_url.as_deref(),
                        input.description.as_deref(),
                        format_datetime(&now),
                        format_datetime(&now)
                    ]
                },
            )
            .await?;

        self.audit(actor, EntityType::Organization, &id, AuditAction::Created, None)
            .await?;

        Ok(Organization {
            id,
            name: input.name,
            slug: input.slug,
            website_url: input.website_url,
            description: input.description,
            created_at: now,
            updated_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no organization has this id.
    pub async fn get_organization(&self, id: &str) -> Result<Organization, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!("SELECT {COLUMNS} FROM organizations WHERE id = ?1"),
                || [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("organization", id))?;
        row_to_organization(&row)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no organization has this slug.
    pub async fn get_organization_by_slug(
        &self,
        slug: &str,
    ) -> Result<Organization, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!("SELECT {COLUMNS} FROM organizations WHERE slug = ?1"),
                || [slug],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("organization", slug))?;
        row_to_organization(&row)
    }

    /// Partially update an organization. Empty input returns the row unchanged.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, a validation error, or `Conflict` on a taken slug.
    pub async fn update_organization(
        &self,
        actor: Option<&str>,
        id: &str,
        input: UpdateOrganizationInput,
    ) -> Result<Organization, DatabaseError> {
        let update: OrganizationUpdate = input.validated()?.into();

        let mut set = SetClauses::default();
        if let Some(ref name) = update.name {
            set.push("name", name.as_str());
        }
        if let Some(ref slug) = update.slug {
            set.push("slug", slug.as_str());
        }
        if let Some(ref url) = update.website_url {
            set.push("website_url", url.as_deref());
        }
        if let Some(ref desc) = update.description {
            set.push("description", desc.as_deref());
        }

        if set.is_empty() {
            return self.get_organization(id).await;
        }
        set.push("updated_at", format_datetime(&now()));

        let (sql, params) = set.into_update("organizations", id);
        let changed = self
            .db()
            .execute_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("organization", id));
        }

        self.audit(
            actor,
            EntityType::Organization,
            id,
            AuditAction::Updated,
            Some(to_detail(&update)?),
        )
        .await?;

        self.get_organization(id).await
    }

    /// Delete an organization. Members and apps are kept, detached.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no organization has this id.
    pub async fn delete_organization(
        &self,
        actor: Option<&str>,
        id: &str,
    ) -> Result<(), DatabaseError> {
        let changed = self
            .db()
            .execute_with("DELETE FROM organizations WHERE id = ?1", || [id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("organization", id));
        }
        self.audit(actor, EntityType::Organization, id, AuditAction::Deleted, None)
            .await
    }

    /// List organizations alphabetically by name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_organizations(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Page<Organization>, DatabaseError> {
        let total = count(self.db(), "SELECT COUNT(*) FROM organizations", &[]).await?;
        let mut rows = self
            .db()
            .query_with(
                &format!(
                    "SELECT {COLUMNS} FROM organizations
                     ORDER BY name COLLATE NOCASE, id LIMIT ?1 OFFSET ?2"
                ),
                || libsql::params![i64::from(limit), i64::from(offset)],
            )
            .await?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_organization(&row)?);
        }
        Ok(Page::new(items, total, limit, offset))
    }
}
