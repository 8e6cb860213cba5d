//! Application-wide constants

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MIN_PAGE_SIZE: u32 = 1;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const SESSION_COOKIE_NAME: &str = "token";
pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 3600;
pub const DEVELOPMENT_SESSION_SECRET: &str = "secret";
pub const TITLE_MAX_LENGTH: u64 = 100;
pub const DESCRIPTION_MAX_LENGTH: u64 = 200;
