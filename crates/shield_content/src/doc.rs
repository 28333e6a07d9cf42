// --- File: crates/shield_content/src/doc.rs ---
#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::blog_handlers::{CreateBlogRequest, UpdateBlogRequest};
use crate::career_handlers::{CareerRequest, JobApplicationRequest};
use shield_db::{Blog, BlogPage, BlogSection, Career, JobLocation, SalaryRange};

#[utoipa::path(
    get,
    path = "/blogs/{id}", // Path relative to /api
    params(("id" = String, Path, description = "Blog post id")),
    responses(
        (status = 200, description = "The blog post", body = Blog),
        (status = 404, description = "Blog not found")
    ),
    tag = "Content"
)]
fn doc_get_blog_handler() {}

#[utoipa::path(
    post,
    path = "/blogs", // Path relative to /api
    request_body = CreateBlogRequest,
    responses(
        (status = 200, description = "Created blog post", body = Blog),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Admin access required")
    ),
    tag = "Content"
)]
fn doc_create_blog_handler() {}

#[utoipa::path(
    get,
    path = "/careers", // Path relative to /api
    responses(
        (status = 200, description = "Job postings (active only without an admin token)", body = [Career]),
    ),
    tag = "Content"
)]
fn doc_list_careers_handler() {}

#[utoipa::path(
    post,
    path = "/careers/apply", // Path relative to /api
    request_body = JobApplicationRequest,
    responses(
        (status = 200, description = "Application submitted"),
        (status = 400, description = "Missing required fields"),
        (status = 503, description = "Mailer disabled")
    ),
    tag = "Content"
)]
fn doc_apply_career_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_get_blog_handler,
        doc_create_blog_handler,
        doc_list_careers_handler,
        doc_apply_career_handler
    ),
    components(schemas(
        Blog,
        BlogPage,
        BlogSection,
        Career,
        JobLocation,
        SalaryRange,
        CreateBlogRequest,
        UpdateBlogRequest,
        CareerRequest,
        JobApplicationRequest
    )),
    tags((name = "Content", description = "Blog and careers content API"))
)]
pub struct ContentApiDoc;
