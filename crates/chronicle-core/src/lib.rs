pub mod config;
pub mod error;
pub mod favorites;
pub mod progress;
pub mod route;
pub mod settings;
pub mod storage;
pub mod timeline;

pub use config::{AppConfig, SmoothScrollConfig};
pub use error::{Error, Result};
pub use route::{Route, Router};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
