pub mod catalog;
pub mod health;
pub mod inquiries;
pub mod metrics;
pub mod seed;

pub use catalog::{get_program, list_posts, list_products, list_programs, list_therapy};
pub use health::{health_check, root, test_database};
pub use inquiries::{create_booking, create_message};
pub use metrics::metrics_endpoint;
pub use seed::seed;
