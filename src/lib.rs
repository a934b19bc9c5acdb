pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod server;
pub mod validation;

pub use db::ArticleRepository;
pub use error::{ApiError, StorageError};
pub use model::{Article, ArticleInput, NewArticle};
