pub mod api;
pub mod client;

pub use api::TmdbEndpoint;
pub use client::TmdbClient;
