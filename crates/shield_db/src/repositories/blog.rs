//! Blog post model and SQL repository

use crate::error::DbError;
use crate::DbClient;
use serde::{Deserialize, Serialize};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error};
use uuid::Uuid;

/// A titled section within a blog post body.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BlogSection {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A blog post. Images are URL strings; upload handling lives elsewhere.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: String,
    pub title: String,
    pub short_description: String,
    pub content: String,
    pub author: String,
    pub author_bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub category: String,
    pub published: bool,
    pub sections: Vec<BlogSection>,
    pub created_at: String,
    pub updated_at: String,
}

impl Blog {
    /// Build a fresh post with generated id and timestamps.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: String,
        short_description: String,
        content: String,
        author: String,
        author_bio: String,
        image: Option<String>,
        category: String,
        sections: Vec<BlogSection>,
    ) -> Self {
        let now = super::now_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            short_description,
            content,
            author,
            author_bio,
            image,
            category,
            published: true,
            sections,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// One page of blog posts plus pagination metadata.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPage {
    pub blogs: Vec<Blog>,
    pub current_page: i64,
    pub total_pages: i64,
    pub total_blogs: i64,
}

/// SQL repository for blog posts
#[derive(Debug, Clone)]
pub struct SqlBlogRepository {
    db_client: DbClient,
}

fn row_to_blog(row: &AnyRow) -> Blog {
    let sections_json: String = row.try_get("sections").unwrap_or_default();
    Blog {
        id: row.try_get("id").unwrap_or_default(),
        title: row.try_get("title").unwrap_or_default(),
        short_description: row.try_get("short_description").unwrap_or_default(),
        content: row.try_get("content").unwrap_or_default(),
        author: row.try_get("author").unwrap_or_default(),
        author_bio: row.try_get("author_bio").unwrap_or_default(),
        image: row.try_get::<Option<String>, _>("image").ok().flatten(),
        category: row.try_get("category").unwrap_or_default(),
        published: row.try_get::<i64, _>("published").unwrap_or(1) != 0,
        sections: serde_json::from_str(&sections_json).unwrap_or_default(),
        created_at: row.try_get("created_at").unwrap_or_default(),
        updated_at: row.try_get("updated_at").unwrap_or_default(),
    }
}

impl SqlBlogRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    pub async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing blogs schema");
        let query = r#"
            CREATE TABLE IF NOT EXISTS blogs (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                short_description TEXT NOT NULL DEFAULT '',
                content TEXT NOT NULL DEFAULT '',
                author TEXT NOT NULL DEFAULT '',
                author_bio TEXT NOT NULL DEFAULT '',
                image TEXT,
                category TEXT NOT NULL DEFAULT 'Technology',
                published INTEGER NOT NULL DEFAULT 1,
                sections TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
        "#;
        self.db_client.execute(query).await?;
        Ok(())
    }

    pub async fn create(&self, blog: Blog) -> Result<Blog, DbError> {
        let sections_json =
            serde_json::to_string(&blog.sections).map_err(|e| DbError::DecodeError(e.to_string()))?;
        let query = r#"
            INSERT INTO blogs (
                id, title, short_description, content, author, author_bio,
                image, category, published, sections, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#;

        sqlx::query(query)
            .bind(&blog.id)
            .bind(&blog.title)
            .bind(&blog.short_description)
            .bind(&blog.content)
            .bind(&blog.author)
            .bind(&blog.author_bio)
            .bind(&blog.image)
            .bind(&blog.category)
            .bind(if blog.published { 1i64 } else { 0i64 })
            .bind(&sections_json)
            .bind(&blog.created_at)
            .bind(&blog.updated_at)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert blog: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(blog)
    }

    /// One page of posts, newest first, with the total count for paging.
    pub async fn find_page(&self, page: i64, limit: i64) -> Result<BlogPage, DbError> {
        let page = page.max(1);
        let limit = limit.max(1);
        let offset = (page - 1) * limit;

        let total_row = sqlx::query("SELECT COUNT(*) AS total FROM blogs")
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;
        let total_blogs: i64 = total_row.try_get("total").unwrap_or(0);

        let rows =
            sqlx::query("SELECT * FROM blogs ORDER BY created_at DESC LIMIT $1 OFFSET $2")
                .bind(limit)
                .bind(offset)
                .fetch_all(self.db_client.pool())
                .await
                .map_err(|e| DbError::QueryError(e.to_string()))?;

        let total_pages = if total_blogs == 0 {
            0
        } else {
            (total_blogs + limit - 1) / limit
        };

        Ok(BlogPage {
            blogs: rows.iter().map(row_to_blog).collect(),
            current_page: page,
            total_pages,
            total_blogs,
        })
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Blog>, DbError> {
        let row = sqlx::query("SELECT * FROM blogs WHERE id = $1")
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(row.as_ref().map(row_to_blog))
    }

    /// Overwrite the mutable fields of an existing post. Returns the updated
    /// record, or None when the id is unknown.
    pub async fn update(&self, blog: &Blog) -> Result<Option<Blog>, DbError> {
        let sections_json =
            serde_json::to_string(&blog.sections).map_err(|e| DbError::DecodeError(e.to_string()))?;
        let query = r#"
            UPDATE blogs SET
                title = $1, short_description = $2, content = $3, author = $4,
                author_bio = $5, image = $6, category = $7, published = $8,
                sections = $9, updated_at = $10
            WHERE id = $11
        "#;

        let result = sqlx::query(query)
            .bind(&blog.title)
            .bind(&blog.short_description)
            .bind(&blog.content)
            .bind(&blog.author)
            .bind(&blog.author_bio)
            .bind(&blog.image)
            .bind(&blog.category)
            .bind(if blog.published { 1i64 } else { 0i64 })
            .bind(&sections_json)
            .bind(super::now_rfc3339())
            .bind(&blog.id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(&blog.id).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
