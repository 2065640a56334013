pub mod cors;
pub mod rate_limit;

pub use cors::cors;
pub use rate_limit::{ClientRateLimiter, RateLimit};
