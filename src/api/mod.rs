pub mod cloudflare;
pub mod models;

pub use cloudflare::ListsClient;
