//! Route-parameter source.
//!
//! Routing layers deliver the slug either immediately or only after an
//! asynchronous resolution step. `SlugParam` hides the difference behind one
//! accessor so handlers always treat the slug as a suspension point.

use std::future::Future;
use std::pin::Pin;

pub enum SlugParam {
    Ready(Option<String>),
    Deferred(Pin<Box<dyn Future<Output = Option<String>> + Send>>),
}

impl SlugParam {
    pub fn ready(slug: impl Into<String>) -> Self {
        Self::Ready(Some(slug.into()))
    }

    pub fn absent() -> Self {
        Self::Ready(None)
    }

    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = Option<String>> + Send + 'static,
    {
        Self::Deferred(Box::pin(future))
    }

    /// Resolve the slug, awaiting the deferred form if necessary.
    pub async fn resolve(self) -> Option<String> {
        match self {
            Self::Ready(slug) => slug,
            Self::Deferred(future) => future.await,
        }
    }
}

/// Resolve a slug and reject the empty string as absent.
pub(crate) async fn require_slug(param: SlugParam) -> Option<String> {
    param.resolve().await.filter(|slug| !slug.is_empty())
}
