// File: crates/shield_content/src/blog_handlers.rs
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use shield_auth::AdminUser;
use shield_db::{Blog, BlogPage, BlogSection};
use tracing::error;

use crate::state::ContentState;

const DEFAULT_PAGE_SIZE: i64 = 6;

#[derive(Deserialize, Debug)]
pub struct BlogListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogRequest {
    pub title: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub content: String,
    pub author: Option<String>,
    pub author_bio: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub sections: Vec<BlogSection>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub author_bio: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub published: Option<bool>,
    pub sections: Option<Vec<BlogSection>>,
}

/// Handler for the public, paginated blog listing.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/blogs", // Path relative to /api
    responses(
        (status = 200, description = "One page of blog posts", body = BlogPage),
        (status = 500, description = "Internal error")
    ),
    tag = "Content"
))]
pub async fn list_blogs_handler(
    State(state): State<ContentState>,
    Query(query): Query<BlogListQuery>,
) -> Result<Json<BlogPage>, (StatusCode, String)> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);

    state.blogs.find_page(page, limit).await.map(Json).map_err(|e| {
        error!("Blog listing failed: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to fetch blogs".to_string(),
        )
    })
}

/// Handler fetching a single blog post.
#[axum::debug_handler]
pub async fn get_blog_handler(
    State(state): State<ContentState>,
    Path(id): Path<String>,
) -> Result<Json<Blog>, (StatusCode, String)> {
    let blog = state
        .blogs
        .find_by_id(&id)
        .await
        .map_err(|e| {
            error!("Blog lookup failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch blog".to_string(),
            )
        })?
        .ok_or((StatusCode::NOT_FOUND, "Blog not found".to_string()))?;

    Ok(Json(blog))
}

/// Handler creating a blog post (admin only).
#[axum::debug_handler]
pub async fn create_blog_handler(
    State(state): State<ContentState>,
    _admin: AdminUser,
    Json(payload): Json<CreateBlogRequest>,
) -> Result<Json<Blog>, (StatusCode, String)> {
    let blog = Blog::new(
        payload.title,
        payload.short_description,
        payload.content,
        payload.author.unwrap_or_else(|| "Admin".to_string()),
        payload.author_bio.unwrap_or_else(|| {
            "Expert in IT solutions and digital transformation.".to_string()
        }),
        payload.image,
        payload.category.unwrap_or_else(|| "Technology".to_string()),
        payload.sections,
    );

    state.blogs.create(blog).await.map(Json).map_err(|e| {
        error!("Blog creation failed: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to create blog".to_string(),
        )
    })
}

/// Handler updating a blog post (admin only).
#[axum::debug_handler]
pub async fn update_blog_handler(
    State(state): State<ContentState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateBlogRequest>,
) -> Result<Json<Blog>, (StatusCode, String)> {
    let mut blog = state
        .blogs
        .find_by_id(&id)
        .await
        .map_err(|e| {
            error!("Blog lookup failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Update failed".to_string())
        })?
        .ok_or((StatusCode::NOT_FOUND, "Blog not found".to_string()))?;

    if let Some(title) = payload.title {
        blog.title = title;
    }
    if let Some(short_description) = payload.short_description {
        blog.short_description = short_description;
    }
    if let Some(content) = payload.content {
        blog.content = content;
    }
    if let Some(author) = payload.author {
        blog.author = author;
    }
    if let Some(author_bio) = payload.author_bio {
        blog.author_bio = author_bio;
    }
    if let Some(category) = payload.category {
        blog.category = category;
    }
    if let Some(image) = payload.image {
        blog.image = Some(image);
    }
    if let Some(published) = payload.published {
        blog.published = published;
    }
    if let Some(sections) = payload.sections {
        blog.sections = sections;
    }

    let updated = state
        .blogs
        .update(&blog)
        .await
        .map_err(|e| {
            error!("Blog update failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Update failed".to_string())
        })?
        .ok_or((StatusCode::NOT_FOUND, "Blog not found".to_string()))?;

    Ok(Json(updated))
}

/// Handler deleting a blog post (admin only).
#[axum::debug_handler]
pub async fn delete_blog_handler(
    State(state): State<ContentState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let deleted = state.blogs.delete(&id).await.map_err(|e| {
        error!("Blog deletion failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Delete failed".to_string())
    })?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Blog not found".to_string()));
    }

    Ok(Json(json!({ "message": "Blog deleted" })))
}
