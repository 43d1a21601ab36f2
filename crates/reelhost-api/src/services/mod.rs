//! Application services

pub mod thumbnail;
