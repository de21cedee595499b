pub mod enums;
pub mod plans;
pub mod registration_sessions;
pub mod site_content;
pub mod subscribers;
