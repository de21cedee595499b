pub mod subscriber_table;
