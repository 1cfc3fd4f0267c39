// luxplan-api: Raw catalog transport (HTTP + local files)

pub mod client;
pub mod error;
pub mod source;
pub mod transport;

pub use client::CatalogClient;
pub use error::Error;
pub use source::CatalogSource;
pub use transport::TransportConfig;
