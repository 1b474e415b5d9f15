//! Post page handler
//!
//! Server-rendered HTML view of a single post. Any lookup failure ends in the
//! terminal not-found page; only a cleanly fetched post renders.

use actix_web::{web, HttpResponse};
use chrono::{DateTime, NaiveDateTime};

use crate::handlers::params::{require_slug, SlugParam};
use crate::models::PostDetail;
use crate::AppState;

/// GET /wordpress/{slug}
pub async fn post_page(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    post_page_response(&state, SlugParam::ready(path.into_inner())).await
}

/// Shared body of the page route, independent of how the slug arrives.
pub(crate) async fn post_page_response(state: &AppState, slug: SlugParam) -> HttpResponse {
    let Some(slug) = require_slug(slug).await else {
        return not_found_page();
    };

    match state.cms.post_by_slug(&slug).await {
        Ok(post) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(render_post_page(&post)),
        Err(_) => not_found_page(),
    }
}

fn render_post_page(post: &PostDetail) -> String {
    let title = html_escape(&post.title);

    let mut byline = format_post_date(post.date.as_deref());
    if let Some(author) = &post.author_name {
        byline.push_str(" · By ");
        byline.push_str(&html_escape(author));
    }

    let live_link = post
        .post_url
        .as_ref()
        .map(|url| format!("<p><a href=\"{}\">View live</a></p>\n", html_escape(url)))
        .unwrap_or_default();

    let figure = post
        .featured_image
        .as_ref()
        .and_then(|image| image.url.as_ref().map(|url| (url, image.alt.as_deref())))
        .map(|(url, alt)| {
            format!(
                "<figure><img src=\"{}\" alt=\"{}\"></figure>\n",
                html_escape(url),
                html_escape(alt.unwrap_or(&post.title))
            )
        })
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         </head>\n\
         <body>\n\
         <article>\n\
         <header>\n\
         <h1>{title}</h1>\n\
         <p>{byline}</p>\n\
         {live_link}\
         </header>\n\
         {figure}\
         <div class=\"post-content\">\n{content}\n</div>\n\
         </article>\n\
         </body>\n\
         </html>\n",
        content = post.content,
    )
}

fn not_found_page() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(
            "<!DOCTYPE html>\n\
             <html lang=\"en\">\n\
             <head><meta charset=\"utf-8\"><title>Post not found</title></head>\n\
             <body>\n\
             <h1>Post not found</h1>\n\
             <p>The requested post does not exist or could not be fetched.</p>\n\
             <p><a href=\"/api/wordpress/posts\">Back to posts</a></p>\n\
             </body>\n\
             </html>\n",
        )
}

/// Human-readable publish date; anything unparseable reads "Unknown date".
fn format_post_date(date: Option<&str>) -> String {
    const DISPLAY: &str = "%B %-d, %Y";

    let Some(date) = date else {
        return "Unknown date".to_string();
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(date) {
        return parsed.format(DISPLAY).to_string();
    }
    // WPGraphQL emits naive timestamps without an offset.
    if let Ok(parsed) = NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S") {
        return parsed.format(DISPLAY).to_string();
    }
    "Unknown date".to_string()
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Configure post page routes
pub fn configure_page_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/wordpress/{slug}").route(web::get().to(post_page)));
}
