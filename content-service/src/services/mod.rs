pub mod database;
pub mod memory;
pub mod metrics;
pub mod seed;
pub mod store;

pub use database::MongoDb;
pub use memory::MemoryStore;
pub use metrics::{get_metrics, init_metrics};
pub use seed::{seed_content, SeedReport};
pub use store::{ContentRepository, DocumentStore, StoreDiagnostics};
