mod cookies;
pub mod endpoints;
mod errors;
mod session;
mod user_agent;
pub use self::cookies::parse_cookie_header;
pub use self::errors::Error;
pub use self::session::{Session, DEFAULT_BASE_URL};
pub use self::user_agent::USER_AGENT;
