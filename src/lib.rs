pub mod cache;
pub mod config;
pub mod entry;
pub mod error;
pub mod fixture;
pub mod identity;
pub mod month;
pub mod repository;
pub mod source;
pub mod transport;

pub use cache::*;
pub use config::*;
pub use entry::*;
pub use error::*;
pub use fixture::*;
pub use identity::*;
pub use month::*;
pub use repository::*;
pub use source::*;
pub use transport::*;

pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
