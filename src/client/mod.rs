pub mod error;
pub mod http;
pub mod memory;
pub mod traits;
pub mod wire;

pub use error::*;
pub use http::HttpClient;
pub use memory::{BackendState, InMemoryBackend};
pub use traits::*;
