use super::Entity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub full_name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

impl Entity for ContactMessage {
    const COLLECTION: &'static str = "contactmessage";
}
