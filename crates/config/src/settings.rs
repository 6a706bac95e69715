//! Configuration settings structures

use farebeam_types::SupplierConfig as DomainSupplierConfig;
use farebeam_types::TravelVertical;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
	pub server: ServerSettings,
	pub suppliers: HashMap<String, SupplierConfig>,
	pub timeouts: TimeoutSettings,
	pub cache: CacheSettings,
	pub environment: EnvironmentSettings,
	pub logging: LoggingSettings,
}

/// Server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

/// Individual supplier configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SupplierConfig {
	pub supplier_id: String,
	pub adapter_id: String,
	pub endpoint: String,
	pub vertical: TravelVertical,
	pub timeout_ms: u64,
	pub enabled: bool,
	pub headers: Option<HashMap<String, String>>,
	// Optional descriptive metadata
	pub name: Option<String>,
	pub description: Option<String>,
}

/// Convert from settings SupplierConfig to domain SupplierConfig
impl From<SupplierConfig> for DomainSupplierConfig {
	fn from(settings_config: SupplierConfig) -> Self {
		Self {
			supplier_id: settings_config.supplier_id,
			adapter_id: settings_config.adapter_id,
			endpoint: settings_config.endpoint,
			vertical: settings_config.vertical,
			timeout_ms: settings_config.timeout_ms,
			enabled: settings_config.enabled,
			headers: settings_config.headers,
			name: settings_config.name,
			description: settings_config.description,
		}
	}
}

/// Timeout configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TimeoutSettings {
	/// Per-supplier timeout in milliseconds
	pub per_supplier_ms: u64,
	/// Global aggregation deadline in milliseconds
	pub global_ms: u64,
	/// Request timeout for HTTP clients
	pub request_ms: u64,
}

/// Result cache configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheSettings {
	/// TTL for cached candidate sets in seconds; short, since live prices
	/// go stale quickly
	pub ttl_seconds: u64,
	/// Whether expired entries are swept by a background task
	pub cleanup_enabled: bool,
}

/// Environment-specific settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EnvironmentSettings {
	pub profile: EnvironmentProfile,
	pub debug: bool,
	pub rate_limiting: RateLimitSettings,
}

/// Environment profiles
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentProfile {
	Development,
	Staging,
	Production,
}

/// Rate limiting configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RateLimitSettings {
	pub enabled: bool,
	pub requests_per_minute: u32,
	pub burst_size: u32,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			server: ServerSettings {
				host: "0.0.0.0".to_string(),
				port: 3000,
			},
			suppliers: HashMap::new(),
			timeouts: TimeoutSettings {
				per_supplier_ms: 5000,
				global_ms: 8000,
				request_ms: 10000,
			},
			cache: CacheSettings {
				ttl_seconds: 180,
				cleanup_enabled: true,
			},
			environment: EnvironmentSettings {
				profile: EnvironmentProfile::Development,
				debug: true,
				rate_limiting: RateLimitSettings {
					enabled: false,
					requests_per_minute: 100,
					burst_size: 10,
				},
			},
			logging: LoggingSettings {
				level: "info".to_string(),
				format: LogFormat::Pretty,
				structured: false,
			},
		}
	}
}

impl Settings {
	/// Get server bind address
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.server.host, self.server.port)
	}

	/// Get enabled suppliers only
	pub fn enabled_suppliers(&self) -> HashMap<String, SupplierConfig> {
		self.suppliers
			.iter()
			.filter(|(_, config)| config.enabled)
			.map(|(k, v)| (k.clone(), v.clone()))
			.collect()
	}

	/// Check if running in production
	pub fn is_production(&self) -> bool {
		self.environment.profile == EnvironmentProfile::Production
	}

	/// Check if debug mode is enabled
	pub fn is_debug(&self) -> bool {
		self.environment.debug && !self.is_production()
	}

	/// Cache TTL as a chrono duration
	pub fn cache_ttl(&self) -> chrono::Duration {
		chrono::Duration::seconds(self.cache.ttl_seconds as i64)
	}
}
