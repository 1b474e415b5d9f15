//! Post API handlers
//!
//! JSON adapters over the CMS service: a paginated, searchable listing and a
//! single-post lookup by slug.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::handlers::params::{require_slug, SlugParam};
use crate::models::{PageInfo, PostDetail, PostSummary};
use crate::services::cms::{CmsError, ListPostsParams};
use crate::AppState;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 50;

const LIST_FETCH_ERROR: &str = "Failed to fetch posts from WordPress.";
const POST_FETCH_ERROR: &str = "Post not found or failed to fetch from WordPress.";

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub first: Option<String>,
    pub after: Option<String>,
    pub search: Option<String>,
}

#[derive(Serialize)]
struct ListPostsResponse {
    posts: Vec<PostSummary>,
    #[serde(rename = "pageInfo")]
    page_info: PageInfo,
}

#[derive(Serialize)]
struct PostResponse {
    post: PostDetail,
}

/// Page size from the raw `first` parameter: default 10 when absent, invalid
/// or non-positive; clamped to 50.
pub(crate) fn parse_page_size(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return DEFAULT_PAGE_SIZE;
    };
    match raw.trim().parse::<i64>() {
        Ok(n) if n > 0 => n.min(MAX_PAGE_SIZE),
        _ => DEFAULT_PAGE_SIZE,
    }
}

/// Trimmed search text; empty means no search variable at all.
pub(crate) fn normalize_search(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Opaque cursor; the empty string means absent.
pub(crate) fn normalize_after(raw: Option<String>) -> Option<String> {
    raw.filter(|after| !after.is_empty())
}

/// GET /api/wordpress/posts
///
/// Query Parameters:
/// - first: page size (default 10, max 50)
/// - after: opaque pagination cursor
/// - search: free-text filter
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let params = ListPostsParams {
        first: parse_page_size(query.first.as_deref()),
        after: normalize_after(query.after),
        search: normalize_search(query.search.as_deref()),
    };

    let list = state.cms.list_posts(params).await.map_err(map_list_error)?;

    Ok(HttpResponse::Ok().json(ListPostsResponse {
        posts: list.posts,
        page_info: list.page_info,
    }))
}

/// GET /api/wordpress/posts/{slug}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    get_post_response(&state, SlugParam::ready(path.into_inner())).await
}

/// Shared body of the detail route, independent of how the slug arrives.
pub(crate) async fn get_post_response(
    state: &AppState,
    slug: SlugParam,
) -> Result<HttpResponse, AppError> {
    let Some(slug) = require_slug(slug).await else {
        return Err(AppError::Validation("Slug is required.".to_string()));
    };

    match state.cms.post_by_slug(&slug).await {
        Ok(post) => Ok(HttpResponse::Ok().json(PostResponse { post })),
        Err(CmsError::NotFound { details }) => Err(AppError::NotFound {
            message: POST_FETCH_ERROR.to_string(),
            details,
        }),
        Err(CmsError::Upstream { status, details }) => Err(AppError::Upstream {
            message: POST_FETCH_ERROR.to_string(),
            status,
            details,
        }),
    }
}

/// Map listing failures: propagate upstream statuses at or above 400,
/// everything else becomes a 502.
fn map_list_error(err: CmsError) -> AppError {
    let (status, details) = match err {
        CmsError::Upstream { status, details } => (status, details),
        CmsError::NotFound { details } => (404, details),
    };
    AppError::Upstream {
        message: LIST_FETCH_ERROR.to_string(),
        status: if status >= 400 { status } else { 502 },
        details,
    }
}

/// Configure post API routes
pub fn configure_post_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/posts").route(web::get().to(list_posts)))
        .service(web::resource("/posts/{slug}").route(web::get().to(get_post)));
}
