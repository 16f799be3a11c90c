pub mod auth;
pub mod rewrite;
pub mod security_headers;

pub use auth::{AdminSession, SessionGate};
pub use rewrite::PathRewrite;
pub use security_headers::SecurityHeaders;
