pub mod account_roles;
pub mod difficulty_levels;
pub mod subscription_statuses;
