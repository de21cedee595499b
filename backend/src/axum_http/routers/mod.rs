pub mod plans;
pub mod registrations;
pub mod site;
