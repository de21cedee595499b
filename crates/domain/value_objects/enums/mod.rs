pub mod subscriber_statuses;
