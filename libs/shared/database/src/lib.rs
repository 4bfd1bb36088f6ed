pub mod retry;
pub mod store;

pub use retry::with_retry;
pub use store::{StoreClient, StoreError};
