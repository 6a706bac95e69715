//! Service startup logging
//!
//! Logs service, environment and system information when the aggregator
//! boots, so deploy logs show what configuration is actually in effect.

use std::env;
use tracing::info;

/// Logs comprehensive service information at startup
pub fn log_service_info() {
	// Use the root package name and version, not the current crate
	let service_name = "farebeam-aggregator";
	let service_version = env!("CARGO_PKG_VERSION");

	info!("=== Farebeam Aggregator Service Starting ===");
	info!("🚀 Service: {} v{}", service_name, service_version);

	info!("💻 Platform: {}", env::consts::OS);
	info!("🏗️ Architecture: {}", env::consts::ARCH);

	if let Ok(cwd) = env::current_dir() {
		info!("📁 Working Directory: {}", cwd.display());
	}

	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("🔧 Log Level: {}", rust_log);
	}

	if let Ok(config_path) = env::var("CONFIG_PATH") {
		info!("📋 Config Path: {}", config_path);
	}

	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);

	info!("🎯 Starting aggregator initialization...");
}

/// Logs startup completion with the effective bind address
pub fn log_startup_complete(bind_address: &str) {
	info!("=== Farebeam Aggregator Ready ===");
	info!("🌐 Listening on: http://{}", bind_address);
	info!(
		"🕒 Ready at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}
