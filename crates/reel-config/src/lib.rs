pub mod config;
pub mod paths;

pub use config::{CatalogConfig, Config, HttpConfig, RatingsConfig, SearchConfig, VideoConfig, PLACEHOLDER_KEY};
pub use paths::{container_base_path, PathManager};
