pub mod admin;
pub mod auth;
pub mod jobs;
pub mod messages;
pub mod proposals;
pub mod reviews;
pub mod users;
