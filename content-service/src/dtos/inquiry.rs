use super::{required, Schema};
use crate::models::{Booking, ContactMessage};
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Deserialize, Validate)]
pub struct BookingPayload {
    #[validate(required(message = "full_name is required"))]
    pub full_name: Option<String>,

    #[validate(
        required(message = "email is required"),
        email(message = "email must be a valid email address")
    )]
    pub email: Option<String>,

    #[validate(required(message = "therapy_slug is required"))]
    pub therapy_slug: Option<String>,

    #[validate(required(message = "preferred_date is required"))]
    pub preferred_date: Option<String>,

    pub note: Option<String>,
    pub timezone: Option<String>,
}

impl Schema for BookingPayload {
    type Entity = Booking;

    fn build(self) -> Result<Booking, ValidationErrors> {
        Ok(Booking {
            full_name: required(self.full_name, "full_name")?,
            email: required(self.email, "email")?,
            therapy_slug: required(self.therapy_slug, "therapy_slug")?,
            preferred_date: required(self.preferred_date, "preferred_date")?,
            note: self.note,
            timezone: self.timezone,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ContactMessagePayload {
    #[validate(required(message = "full_name is required"))]
    pub full_name: Option<String>,

    #[validate(
        required(message = "email is required"),
        email(message = "email must be a valid email address")
    )]
    pub email: Option<String>,

    pub subject: Option<String>,

    #[validate(required(message = "message is required"))]
    pub message: Option<String>,
}

impl Schema for ContactMessagePayload {
    type Entity = ContactMessage;

    fn build(self) -> Result<ContactMessage, ValidationErrors> {
        Ok(ContactMessage {
            full_name: required(self.full_name, "full_name")?,
            email: required(self.email, "email")?,
            subject: self.subject,
            message: required(self.message, "message")?,
        })
    }
}
