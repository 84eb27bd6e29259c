pub mod accounts;
pub mod enums;
pub mod feed;
pub mod follows;
pub mod plans;
pub mod subscriptions;
