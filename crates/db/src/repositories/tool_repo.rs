//! Repository for the `tools` table.

use aidex_core::slug::with_suffix;
use aidex_core::types::DbId;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use crate::models::tool::{NewTool, Tool, ToolFilter, ToolSort, ToolSummary, UpdateTool};
use crate::repositories::escape_like;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, short_description, description, logo, website, \
    website_domain, categories, tags, pricing, status, featured, trending, sponsored, \
    rating, votes, submitted_by, rejection_comment, rejected_at, rejected_by, \
    created_at, updated_at, updated_by";

/// Projection for list views; the long description stays server-side.
const SUMMARY_COLUMNS: &str = "id, name, slug, short_description, logo, website, \
    categories, tags, pricing, status, featured, trending, rating, votes, created_at";

/// Provides CRUD and query operations for tools.
pub struct ToolRepo;

impl ToolRepo {
    /// Insert a new tool, returning the created row.
    ///
    /// Takes a connection rather than the pool so bulk imports can run
    /// many inserts inside one transaction.
    pub async fn insert_in(conn: &mut PgConnection, input: &NewTool) -> Result<Tool, sqlx::Error> {
        let query = format!(
            "INSERT INTO tools \
                (name, slug, short_description, description, logo, website, website_domain, \
                 categories, tags, pricing, status, featured, trending, sponsored, rating, \
                 votes, submitted_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tool>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.short_description)
            .bind(&input.description)
            .bind(&input.logo)
            .bind(&input.website)
            .bind(&input.website_domain)
            .bind(&input.categories)
            .bind(&input.tags)
            .bind(&input.pricing)
            .bind(&input.status)
            .bind(input.featured)
            .bind(input.trending)
            .bind(input.sponsored)
            .bind(input.rating)
            .bind(input.votes)
            .bind(&input.submitted_by)
            .fetch_one(conn)
            .await
    }

    /// Resolve a free slug for `base`, appending `-2`, `-3`, ... on
    /// collision. Slugs are the public lookup key, so uniqueness is
    /// enforced rather than left to chance.
    pub async fn ensure_unique_slug(
        conn: &mut PgConnection,
        base: &str,
    ) -> Result<String, sqlx::Error> {
        // Slugs only contain [a-z0-9-], so base is safe inside a LIKE.
        let taken: Vec<String> =
            sqlx::query_scalar("SELECT slug FROM tools WHERE slug = $1 OR slug LIKE $1 || '-%'")
                .bind(base)
                .fetch_all(&mut *conn)
                .await?;

        if !taken.iter().any(|s| s == base) {
            return Ok(base.to_string());
        }
        let mut n = 2;
        loop {
            let candidate = with_suffix(base, n);
            if !taken.contains(&candidate) {
                return Ok(candidate);
            }
            n += 1;
        }
    }

    /// Find a single tool by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tool>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tools WHERE id = $1");
        sqlx::query_as::<_, Tool>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a single tool by slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Tool>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tools WHERE slug = $1");
        sqlx::query_as::<_, Tool>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Find a tool by its normalized website domain.
    pub async fn find_by_domain(pool: &PgPool, domain: &str) -> Result<Option<Tool>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tools WHERE website_domain = $1");
        sqlx::query_as::<_, Tool>(&query)
            .bind(domain)
            .fetch_optional(pool)
            .await
    }

    /// All known normalized domains; seeds the bulk-import dedup set.
    pub async fn list_domains(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT website_domain FROM tools WHERE website_domain IS NOT NULL")
            .fetch_all(pool)
            .await
    }

    /// List tools matching `filter`, ordered by `sort`, paginated.
    pub async fn list(
        pool: &PgPool,
        filter: &ToolFilter,
        sort: ToolSort,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ToolSummary>, sqlx::Error> {
        let mut qb = QueryBuilder::new(format!("SELECT {SUMMARY_COLUMNS} FROM tools"));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY ")
            .push(sort.order_by())
            .push(" LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);
        qb.build_query_as::<ToolSummary>().fetch_all(pool).await
    }

    /// Count tools matching `filter` (for total-pages computation).
    pub async fn count(pool: &PgPool, filter: &ToolFilter) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM tools");
        push_filter(&mut qb, filter);
        qb.build_query_scalar::<i64>().fetch_one(pool).await
    }

    /// Approved + featured tools, most voted first.
    pub async fn list_featured(pool: &PgPool, limit: i64) -> Result<Vec<ToolSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM tools \
             WHERE status = 'approved' AND featured = TRUE \
             ORDER BY votes DESC LIMIT $1"
        );
        sqlx::query_as::<_, ToolSummary>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Approved + trending tools, most voted first.
    pub async fn list_trending(pool: &PgPool, limit: i64) -> Result<Vec<ToolSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM tools \
             WHERE status = 'approved' AND trending = TRUE \
             ORDER BY votes DESC LIMIT $1"
        );
        sqlx::query_as::<_, ToolSummary>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// A user's own submissions, newest first.
    pub async fn list_by_submitter(pool: &PgPool, user_id: &str) -> Result<Vec<Tool>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM tools WHERE submitted_by = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Tool>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Full rows for the admin review queue, optionally status-filtered.
    pub async fn list_for_admin(
        pool: &PgPool,
        status: Option<&str>,
    ) -> Result<Vec<Tool>, sqlx::Error> {
        match status {
            Some(status) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM tools WHERE status = $1 ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, Tool>(&query)
                    .bind(status)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM tools ORDER BY created_at DESC");
                sqlx::query_as::<_, Tool>(&query).fetch_all(pool).await
            }
        }
    }

    /// Summaries for a specific id set (bulk-log detail view). Missing
    /// ids are simply absent from the result.
    pub async fn list_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<ToolSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM tools WHERE id = ANY($1) ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ToolSummary>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Global-search match on approved tools (name, short description,
    /// tags), limited summaries.
    pub async fn search(
        pool: &PgPool,
        term: &str,
        limit: i64,
    ) -> Result<Vec<ToolSummary>, sqlx::Error> {
        let pattern = format!("%{}%", escape_like(term));
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM tools \
             WHERE status = 'approved' AND \
                   (name ILIKE $1 OR short_description ILIKE $1 \
                    OR array_to_string(tags, ' ') ILIKE $1) \
             ORDER BY votes DESC LIMIT $2"
        );
        sqlx::query_as::<_, ToolSummary>(&query)
            .bind(pattern)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Approve a tool. Clears any stale rejection metadata so a
    /// re-approved tool does not carry its old rejection comment.
    pub async fn approve(
        pool: &PgPool,
        id: DbId,
        actor: &str,
    ) -> Result<Option<Tool>, sqlx::Error> {
        let query = format!(
            "UPDATE tools SET status = 'approved', rejection_comment = NULL, \
                 rejected_at = NULL, rejected_by = NULL, \
                 updated_at = now(), updated_by = $2 \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tool>(&query)
            .bind(id)
            .bind(actor)
            .fetch_optional(pool)
            .await
    }

    /// Reject a tool with a comment, stamping who rejected it and when.
    pub async fn reject(
        pool: &PgPool,
        id: DbId,
        comment: &str,
        actor: &str,
    ) -> Result<Option<Tool>, sqlx::Error> {
        let query = format!(
            "UPDATE tools SET status = 'rejected', rejection_comment = $2, \
                 rejected_at = now(), rejected_by = $3, \
                 updated_at = now(), updated_by = $3 \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tool>(&query)
            .bind(id)
            .bind(comment)
            .bind(actor)
            .fetch_optional(pool)
            .await
    }

    /// Idempotent set of the `featured` flag.
    pub async fn set_featured(
        pool: &PgPool,
        id: DbId,
        value: bool,
        actor: &str,
    ) -> Result<Option<Tool>, sqlx::Error> {
        let query = format!(
            "UPDATE tools SET featured = $2, updated_at = now(), updated_by = $3 \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tool>(&query)
            .bind(id)
            .bind(value)
            .bind(actor)
            .fetch_optional(pool)
            .await
    }

    /// Idempotent set of the `trending` flag.
    pub async fn set_trending(
        pool: &PgPool,
        id: DbId,
        value: bool,
        actor: &str,
    ) -> Result<Option<Tool>, sqlx::Error> {
        let query = format!(
            "UPDATE tools SET trending = $2, updated_at = now(), updated_by = $3 \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tool>(&query)
            .bind(id)
            .bind(value)
            .bind(actor)
            .fetch_optional(pool)
            .await
    }

    /// Partial-field update. Only non-`None` fields are applied; the
    /// update stamp is always written. `website_domain` must be the
    /// recomputed domain whenever `input.website` is provided.
    pub async fn update_fields(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTool,
        website_domain: Option<String>,
        actor: &str,
    ) -> Result<Option<Tool>, sqlx::Error> {
        let query = format!(
            "UPDATE tools SET
                name = COALESCE($2, name),
                short_description = COALESCE($3, short_description),
                description = COALESCE($4, description),
                logo = COALESCE($5, logo),
                website = COALESCE($6, website),
                website_domain = CASE WHEN $6 IS NULL THEN website_domain ELSE $7 END,
                categories = COALESCE($8, categories),
                tags = COALESCE($9, tags),
                pricing = COALESCE($10, pricing),
                status = COALESCE($11, status),
                featured = COALESCE($12, featured),
                trending = COALESCE($13, trending),
                sponsored = COALESCE($14, sponsored),
                updated_at = now(),
                updated_by = $15
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tool>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.short_description)
            .bind(&input.description)
            .bind(&input.logo)
            .bind(&input.website)
            .bind(website_domain)
            .bind(&input.categories)
            .bind(&input.tags)
            .bind(&input.pricing)
            .bind(&input.status)
            .bind(input.featured)
            .bind(input.trending)
            .bind(input.sponsored)
            .bind(actor)
            .fetch_optional(pool)
            .await
    }

    /// Hard delete. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tools WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard delete on a connection (used by undo inside a transaction).
    pub async fn delete_in(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tools WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Append the WHERE clause for a [`ToolFilter`] conjunction.
fn push_filter<'a>(qb: &mut QueryBuilder<'a, Postgres>, filter: &'a ToolFilter) {
    qb.push(" WHERE TRUE");
    if let Some(status) = &filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(category) = &filter.category {
        qb.push(" AND ").push_bind(category).push(" = ANY(categories)");
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", escape_like(search));
        qb.push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR short_description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}
