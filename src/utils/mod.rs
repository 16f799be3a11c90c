pub mod auth;
pub mod misc;
pub mod password;
pub mod time;
