//! Denylist sanitizer for CMS-supplied HTML.
//!
//! Strips script and style elements, HTML comments, and embedded source-map
//! directives before post content is handed to downstream HTML rendering.
//! This is a defensive filter against markup that breaks HTML/script parsing,
//! not a full XSS sanitizer: inline event handlers and `javascript:` URLs
//! pass through untouched.

use std::sync::LazyLock;

use regex::Regex;

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script.*?>.*?</script>").expect("script pattern"));
static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style.*?>.*?</style>").expect("style pattern"));
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern"));
static SOURCE_MAP_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)/\*[#@]\s*sourceMappingURL.*?\*/").expect("source map block pattern")
});
static SOURCE_MAP_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)//[#@]\s*sourceMappingURL[^\n\r]*").expect("source map line pattern")
});
static SOURCE_MAP_BARE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)sourceMappingURL[^\s"'<>]*"#).expect("source map token pattern")
});

/// Strip script/style elements, comments, and source-map markers.
///
/// Idempotent: sanitizing already-sanitized content is a no-op.
pub fn sanitize_content(html: &str) -> String {
    let sanitized = SCRIPT_RE.replace_all(html, "");
    let sanitized = STYLE_RE.replace_all(&sanitized, "");
    let sanitized = COMMENT_RE.replace_all(&sanitized, "");
    let sanitized = SOURCE_MAP_BLOCK_RE.replace_all(&sanitized, "");
    let sanitized = SOURCE_MAP_LINE_RE.replace_all(&sanitized, "");
    SOURCE_MAP_BARE_RE.replace_all(&sanitized, "").into_owned()
}
