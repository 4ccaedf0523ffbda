pub mod activity;
pub mod admins;
pub mod content;
pub mod health;
pub mod permissions;
pub mod reports;
pub mod tasks;
pub mod users;
