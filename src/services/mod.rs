// Services module - clients for external collaborators

pub mod rest;

pub use rest::{RestStore, StoreClient};
