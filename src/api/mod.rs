pub mod client;
pub mod request;
pub mod types;

pub use client::DiffClient;
pub use request::{build_batch, PairSpec};
