pub mod client;

pub use client::{STORE_KEY_HEADER, StoreApiClient};
