pub mod post;

pub use post::{
    AuthorField, AuthorNode, FeaturedImage, FeaturedImageField, ImageNode, PageInfo, PostConnection,
    PostData, PostDetail, PostNode, PostSummary, PostsData,
};
