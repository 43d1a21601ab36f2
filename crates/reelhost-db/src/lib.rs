//! Reelhost database layer
//!
//! The video record gateway used by the thumbnail pipeline, its Postgres
//! implementation, and an in-memory implementation for tests.

pub mod db;
pub mod gateway;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;

pub use db::{run_migrations, PgVideoRepository};
pub use gateway::{RecordError, VideoRecordGateway};
#[cfg(any(test, feature = "test-util"))]
pub use memory::InMemoryVideoRepository;
