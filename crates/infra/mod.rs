pub mod db;
pub mod subscriber_store;
pub mod supabase;
