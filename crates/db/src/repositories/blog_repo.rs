//! Repository for the `blogs` table.

use aidex_core::slug::with_suffix;
use aidex_core::types::DbId;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use crate::models::blog::{Blog, BlogFilter, BlogSummary};
use crate::repositories::escape_like;

const COLUMNS: &str = "id, title, slug, excerpt, content, cover_image, category, tags, \
    status, featured, views, author, author_id, read_time, published_at, created_at, updated_at";

const SUMMARY_COLUMNS: &str = "id, title, slug, excerpt, cover_image, category, tags, \
    status, featured, views, author, read_time, published_at, created_at";

/// Insert-ready blog record.
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: String,
    pub category: String,
    pub tags: Vec<String>,
    pub author: String,
    pub author_id: String,
    pub read_time: i32,
}

/// Provides CRUD and query operations for blogs.
pub struct BlogRepo;

impl BlogRepo {
    /// Insert a new pending blog, returning the created row.
    pub async fn insert_in(conn: &mut PgConnection, input: &NewBlog) -> Result<Blog, sqlx::Error> {
        let query = format!(
            "INSERT INTO blogs \
                (title, slug, excerpt, content, cover_image, category, tags, author, \
                 author_id, read_time) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.excerpt)
            .bind(&input.content)
            .bind(&input.cover_image)
            .bind(&input.category)
            .bind(&input.tags)
            .bind(&input.author)
            .bind(&input.author_id)
            .bind(input.read_time)
            .fetch_one(conn)
            .await
    }

    /// Resolve a free slug for `base`, appending `-2`, `-3`, ... on
    /// collision.
    pub async fn ensure_unique_slug(
        conn: &mut PgConnection,
        base: &str,
    ) -> Result<String, sqlx::Error> {
        let taken: Vec<String> =
            sqlx::query_scalar("SELECT slug FROM blogs WHERE slug = $1 OR slug LIKE $1 || '-%'")
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

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blogs WHERE id = $1");
        sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blogs WHERE slug = $1");
        sqlx::query_as::<_, Blog>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List blogs matching `filter`, most recently published first.
    pub async fn list(
        pool: &PgPool,
        filter: &BlogFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BlogSummary>, sqlx::Error> {
        let mut qb = QueryBuilder::new(format!("SELECT {SUMMARY_COLUMNS} FROM blogs"));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY published_at DESC NULLS LAST, created_at DESC")
            .push(" LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);
        qb.build_query_as::<BlogSummary>().fetch_all(pool).await
    }

    pub async fn count(pool: &PgPool, filter: &BlogFilter) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM blogs");
        push_filter(&mut qb, filter);
        qb.build_query_scalar::<i64>().fetch_one(pool).await
    }

    /// Published + featured blogs, most recently published first.
    pub async fn list_featured(pool: &PgPool, limit: i64) -> Result<Vec<BlogSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM blogs \
             WHERE status = 'published' AND featured = TRUE \
             ORDER BY published_at DESC LIMIT $1"
        );
        sqlx::query_as::<_, BlogSummary>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// A user's own blog submissions, newest first.
    pub async fn list_by_author(pool: &PgPool, author_id: &str) -> Result<Vec<Blog>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM blogs WHERE author_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Blog>(&query)
            .bind(author_id)
            .fetch_all(pool)
            .await
    }

    /// Full rows for the admin review queue, optionally status-filtered.
    pub async fn list_for_admin(
        pool: &PgPool,
        status: Option<&str>,
    ) -> Result<Vec<Blog>, sqlx::Error> {
        match status {
            Some(status) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM blogs WHERE status = $1 ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, Blog>(&query)
                    .bind(status)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM blogs ORDER BY created_at DESC");
                sqlx::query_as::<_, Blog>(&query).fetch_all(pool).await
            }
        }
    }

    /// Global-search match on published blogs (title, excerpt).
    pub async fn search(
        pool: &PgPool,
        term: &str,
        limit: i64,
    ) -> Result<Vec<BlogSummary>, sqlx::Error> {
        let pattern = format!("%{}%", escape_like(term));
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM blogs \
             WHERE status = 'published' AND (title ILIKE $1 OR excerpt ILIKE $1) \
             ORDER BY published_at DESC LIMIT $2"
        );
        sqlx::query_as::<_, BlogSummary>(&query)
            .bind(pattern)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Bump the view counter for a blog fetched by slug.
    pub async fn increment_views(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE blogs SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Publish a blog, stamping `published_at` on first publication.
    pub async fn publish(pool: &PgPool, id: DbId) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!(
            "UPDATE blogs SET status = 'published', \
                 published_at = COALESCE(published_at, now()), updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Reject a pending blog.
    pub async fn reject(pool: &PgPool, id: DbId) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!(
            "UPDATE blogs SET status = 'rejected', updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Idempotent set of the `featured` flag.
    pub async fn set_featured(
        pool: &PgPool,
        id: DbId,
        value: bool,
    ) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!(
            "UPDATE blogs SET featured = $2, updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .bind(value)
            .fetch_optional(pool)
            .await
    }

    /// Hard delete. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn push_filter<'a>(qb: &mut QueryBuilder<'a, Postgres>, filter: &'a BlogFilter) {
    qb.push(" WHERE TRUE");
    if let Some(status) = &filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(category) = &filter.category {
        qb.push(" AND category = ").push_bind(category);
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", escape_like(search));
        qb.push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR excerpt ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR content ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}
