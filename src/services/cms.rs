//! CMS service
//!
//! Owns the fixed WordPress queries and turns gateway results into the
//! flattened post projections the handlers expose. Upstream failures surface
//! as typed errors carrying the upstream status and the protocol error
//! messages so handlers can translate them into boundary responses.

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::config::Config;
use crate::models::{FeaturedImage, PageInfo, PostDetail, PostNode, PostSummary, PostData, PostsData};
use crate::services::graphql::{GraphQLGateway, GraphQLRequest};
use crate::services::sanitize::sanitize_content;

const POSTS_QUERY: &str = r#"
  query WordPressPosts($first: Int!, $after: String, $search: String) {
    posts(
      first: $first
      after: $after
      where: {
        search: $search
        orderby: { field: DATE, order: DESC }
        status: PUBLISH
      }
    ) {
      nodes {
        id
        databaseId
        slug
        uri
        title
        excerpt
        date
        featuredImage {
          node {
            sourceUrl
            altText
          }
        }
        author {
          node {
            name
          }
        }
      }
      pageInfo {
        hasNextPage
        hasPreviousPage
        startCursor
        endCursor
      }
    }
  }
"#;

const POST_QUERY: &str = r#"
  query WordPressPostBySlug($slug: ID!) {
    post(id: $slug, idType: SLUG) {
      id
      databaseId
      slug
      uri
      title
      excerpt
      content
      date
      featuredImage {
        node {
          sourceUrl
          altText
        }
      }
      author {
        node {
          name
        }
      }
    }
  }
"#;

const UNTITLED_POST: &str = "Untitled post";
const EMPTY_CONTENT: &str = "<p>No content available.</p>";

/// Failure of a CMS lookup, as seen by handlers.
#[derive(Debug, Error)]
pub enum CmsError {
    /// The upstream returned no usable data or reported protocol errors.
    #[error("upstream GraphQL request failed with status {status}")]
    Upstream { status: u16, details: Vec<String> },
    /// The requested post does not exist upstream.
    #[error("post not found")]
    NotFound { details: Vec<String> },
}

/// Parameters of one listing request, already parsed and normalized.
#[derive(Debug, Clone)]
pub struct ListPostsParams {
    pub first: i64,
    pub after: Option<String>,
    pub search: Option<String>,
}

/// A page of posts plus the upstream's opaque pagination cursors.
#[derive(Debug)]
pub struct PostList {
    pub posts: Vec<PostSummary>,
    pub page_info: PageInfo,
}

/// Stateless CMS client over the GraphQL gateway.
#[derive(Clone)]
pub struct CmsService {
    gateway: GraphQLGateway,
    endpoint: String,
    token: Option<String>,
    origin: Option<String>,
    timeout: Duration,
}

impl CmsService {
    pub fn new(config: &Config) -> Self {
        Self {
            gateway: GraphQLGateway::new(),
            endpoint: config.graphql_url.clone(),
            token: config.graphql_token.clone(),
            origin: config.graphql_origin.clone(),
            timeout: Duration::from_millis(config.request_timeout_ms),
        }
    }

    /// Fetch one page of published posts, optionally filtered by search text.
    pub async fn list_posts(&self, params: ListPostsParams) -> Result<PostList, CmsError> {
        let mut variables = serde_json::Map::new();
        variables.insert("first".into(), params.first.into());
        if let Some(after) = params.after {
            variables.insert("after".into(), after.into());
        }
        if let Some(search) = params.search {
            variables.insert("search".into(), search.into());
        }

        let request = GraphQLRequest::new(&self.endpoint, POSTS_QUERY)
            .with_variables(variables.into())
            .with_token(self.token.clone())
            .with_timeout(self.timeout);

        let result = self.gateway.send::<PostsData>(request).await;

        let has_errors = result.has_errors();
        let status = result.status;
        let details = result.error_messages();
        let connection = match result.data {
            Some(data) if !has_errors => data.posts,
            _ => return Err(CmsError::Upstream { status, details }),
        };
        let origin = self.origin.as_deref();
        Ok(PostList {
            posts: connection
                .nodes
                .into_iter()
                .map(|node| map_post_summary(node, origin))
                .collect(),
            page_info: connection.page_info,
        })
    }

    /// Fetch exactly one post by slug.
    ///
    /// A missing post is `CmsError::NotFound` regardless of protocol errors;
    /// a present post accompanied by protocol errors keeps the upstream
    /// status so callers can propagate it verbatim.
    pub async fn post_by_slug(&self, slug: &str) -> Result<PostDetail, CmsError> {
        let request = GraphQLRequest::new(&self.endpoint, POST_QUERY)
            .with_variables(serde_json::json!({ "slug": slug }))
            .with_token(self.token.clone())
            .with_timeout(self.timeout);

        let result = self.gateway.send::<PostData>(request).await;
        let has_errors = result.has_errors();
        let details = result.error_messages();
        let post = result.data.and_then(|data| data.post);

        match post {
            None => Err(CmsError::NotFound { details }),
            Some(_) if has_errors => Err(CmsError::Upstream {
                status: result.status,
                details,
            }),
            Some(node) => Ok(map_post_detail(node, self.origin.as_deref())),
        }
    }
}

/// Resolve a post's `uri` into an absolute URL.
///
/// Absolute uris pass through unchanged; relative uris resolve against the
/// configured GraphQL origin; without a usable origin the uri is returned
/// as-is.
pub(crate) fn resolve_post_url(uri: Option<&str>, origin: Option<&str>) -> Option<String> {
    let uri = uri?;
    if uri.starts_with("http") {
        return Some(uri.to_string());
    }
    match origin.and_then(|o| Url::parse(o).ok()) {
        Some(base) => Some(
            base.join(uri)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| uri.to_string()),
        ),
        None => Some(uri.to_string()),
    }
}

pub(crate) fn map_post_summary(node: PostNode, origin: Option<&str>) -> PostSummary {
    let post_url = resolve_post_url(node.uri.as_deref(), origin);
    PostSummary {
        id: node.id,
        database_id: node.database_id,
        slug: node.slug,
        uri: node.uri,
        post_url,
        title: node.title,
        excerpt: node.excerpt,
        date: node.date,
        author_name: author_name(&node.author),
        featured_image: featured_image(&node.featured_image),
    }
}

pub(crate) fn map_post_detail(node: PostNode, origin: Option<&str>) -> PostDetail {
    let post_url = resolve_post_url(node.uri.as_deref(), origin);
    PostDetail {
        id: node.id,
        database_id: node.database_id,
        slug: node.slug,
        uri: node.uri,
        post_url,
        title: node.title.unwrap_or_else(|| UNTITLED_POST.to_string()),
        excerpt: node.excerpt,
        content: sanitize_content(node.content.as_deref().unwrap_or(EMPTY_CONTENT)),
        date: node.date,
        author_name: author_name(&node.author),
        featured_image: featured_image(&node.featured_image),
    }
}

fn author_name(author: &Option<crate::models::AuthorField>) -> Option<String> {
    author
        .as_ref()
        .and_then(|a| a.node.as_ref())
        .and_then(|n| n.name.clone())
}

fn featured_image(field: &Option<crate::models::FeaturedImageField>) -> Option<FeaturedImage> {
    field.as_ref().and_then(|f| f.node.as_ref()).map(|node| FeaturedImage {
        url: node.source_url.clone(),
        alt: node.alt_text.clone(),
    })
}
