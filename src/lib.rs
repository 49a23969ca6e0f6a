pub mod config;
pub mod handlers;
pub mod logger;
pub mod mail;
pub mod models;
pub mod routes;

pub use config::Settings;
pub use mail::{Delivery, MailError, MailTransport, Mailer};
