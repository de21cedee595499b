pub mod expire_subscriptions;
