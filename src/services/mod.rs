pub mod cms;
pub mod graphql;
pub mod sanitize;

pub use cms::{CmsError, CmsService, ListPostsParams, PostList};
pub use graphql::{
    CacheMode, GraphQLError, GraphQLGateway, GraphQLRequest, GraphQLResult, PathSegment,
    DEFAULT_TIMEOUT_MS,
};
pub use sanitize::sanitize_content;
