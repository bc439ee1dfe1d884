mod client;
mod serde;

pub use client::{Client, ClientError, Result as NetResult};
pub use serde::nullable_vec;
