pub mod pages;
pub mod params;
pub mod posts;



pub use pages::configure_page_routes;
pub use params::SlugParam;
pub use posts::configure_post_routes;
