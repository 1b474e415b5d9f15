//! Post wire types.
//!
//! Upstream node shapes follow the WPGraphQL schema; outgoing DTOs are the
//! flattened projections the gateway exposes. Both serialize camelCase.

use serde::{Deserialize, Serialize};

/// A post node as returned by the upstream GraphQL API.
///
/// Serves both the list and the detail query; the list query never requests
/// `content`, so it deserializes as absent there.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostNode {
    pub id: String,
    pub database_id: i64,
    pub slug: String,
    pub uri: Option<String>,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub date: Option<String>,
    pub featured_image: Option<FeaturedImageField>,
    pub author: Option<AuthorField>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeaturedImageField {
    pub node: Option<ImageNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageNode {
    pub source_url: Option<String>,
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorField {
    pub node: Option<AuthorNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorNode {
    pub name: Option<String>,
}

/// Opaque cursor-based pagination info, forwarded verbatim to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PostConnection {
    pub nodes: Vec<PostNode>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
}

/// `data` shape of the list query.
#[derive(Debug, Deserialize)]
pub struct PostsData {
    pub posts: PostConnection,
}

/// `data` shape of the detail query.
#[derive(Debug, Deserialize)]
pub struct PostData {
    pub post: Option<PostNode>,
}

/// Featured image projection exposed to clients.
#[derive(Debug, Clone, Serialize)]
pub struct FeaturedImage {
    pub url: Option<String>,
    pub alt: Option<String>,
}

/// Listing projection of a post.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: String,
    pub database_id: i64,
    pub slug: String,
    pub uri: Option<String>,
    pub post_url: Option<String>,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub date: Option<String>,
    pub author_name: Option<String>,
    pub featured_image: Option<FeaturedImage>,
}

/// Detail projection of a post. `title` and `content` are always populated;
/// missing upstream values fall back to placeholders and `content` has passed
/// the sanitizer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    pub id: String,
    pub database_id: i64,
    pub slug: String,
    pub uri: Option<String>,
    pub post_url: Option<String>,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub date: Option<String>,
    pub author_name: Option<String>,
    pub featured_image: Option<FeaturedImage>,
}
