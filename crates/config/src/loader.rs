//! Configuration loading utilities

use crate::Settings;
use config::{Config, ConfigError, Environment, File};

const PROFILE_ENV: &str = "FAREBEAM_PROFILE";
const DEFAULT_PROFILE: &str = "development";

/// Deployment profile selected via `FAREBEAM_PROFILE`
fn active_profile() -> String {
	std::env::var(PROFILE_ENV).unwrap_or_else(|_| DEFAULT_PROFILE.to_string())
}

/// Load settings from the layered configuration sources.
///
/// Later sources override earlier ones: the base `config/config` file, the
/// profile file `config/config.<profile>` selected by `FAREBEAM_PROFILE`,
/// and `FAREBEAM_`-prefixed environment variables with `__` as the section
/// separator (`FAREBEAM_SERVER__PORT=8080` overrides `server.port`).
pub fn load_config() -> Result<Settings, ConfigError> {
	let profile = active_profile();

	let s = Config::builder()
		.add_source(File::with_name("config/config").required(false))
		.add_source(File::with_name(&format!("config/config.{}", profile)).required(false))
		.add_source(Environment::with_prefix("FAREBEAM").separator("__"))
		.build()?;

	s.try_deserialize()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn profile_defaults_to_development() {
		std::env::remove_var(PROFILE_ENV);
		assert_eq!(active_profile(), "development");
	}

	#[test]
	fn environment_source_overrides_file_values() {
		let config = Config::builder()
			.set_default("server.port", 3000)
			.unwrap()
			.add_source(
				Environment::with_prefix("FAREBEAM")
					.separator("__")
					.source(Some(
						[("FAREBEAM_SERVER__PORT".to_string(), "8080".to_string())]
							.into_iter()
							.collect(),
					)),
			)
			.build()
			.unwrap();

		assert_eq!(config.get_int("server.port").unwrap(), 8080);
	}
}
