//! Command implementations.

pub mod avatar;
pub mod config;
pub mod reviews;

pub use self::avatar::execute_avatar;
pub use self::config::execute_config;
pub use self::reviews::execute_reviews;
