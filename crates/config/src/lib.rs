//! Farebeam Config
//!
//! Configuration loading and settings for the farebeam aggregator.

pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use loader::load_config;
pub use settings::{
	CacheSettings, EnvironmentProfile, EnvironmentSettings, LogFormat, LoggingSettings,
	RateLimitSettings, ServerSettings, Settings, SupplierConfig, TimeoutSettings,
};
pub use startup_logger::{log_service_info, log_startup_complete};
