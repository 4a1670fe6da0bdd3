//! Domain Layer
//!
//! Quote-intake business logic: entity, value objects, message rendering,
//! and the outbound mailer port.

pub mod entities;
pub mod mailer;
pub mod services;
pub mod value_objects;
