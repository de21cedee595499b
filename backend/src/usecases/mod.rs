pub mod registration;
pub mod registration_sessions;
