pub mod health;
pub mod thumbnail_upload;
