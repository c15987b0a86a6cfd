//! Configuration structs

mod app_config;

pub use app_config::{
    ActivationConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig,
    Environment, JwtConfig, RateLimitConfig, RedisConfig, ServerConfig,
};
