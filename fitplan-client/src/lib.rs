pub mod cache;
mod client;

pub use client::*;
