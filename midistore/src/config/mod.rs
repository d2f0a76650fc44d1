use bindable::BindableAddr;
use serde::Deserialize;
use tracing_subscriber::filter::LevelFilter;

const CONFIG_FILE: &str = "midistore.toml";
const ENV_PREFIX: &str = "MIDISTORE_";

#[derive(Deserialize)]
pub struct Config {
	/// Overrides `port` when present. Accepts `tcp://` and `unix://` addresses.
	pub address: Option<BindableAddr>,
	#[serde(default = "default_port")]
	pub port: u16,
	pub database_url: String,
	#[serde(default = "default_max_connections")]
	pub max_connections: u32,
	/// Largest accepted size, in bytes, of a single multipart field.
	#[serde(default = "default_max_file_size")]
	pub max_file_size: usize,
	#[serde(default = "default_log_level")]
	pub log_level: LogLevel,
}

const fn default_port() -> u16 {
	5000
}

const fn default_max_connections() -> u32 {
	5
}

const fn default_max_file_size() -> usize {
	16 * 1024 * 1024
}

fn deserialize_level_filter<'de, D: serde::de::Deserializer<'de>>(
	d: D,
) -> Result<LevelFilter, D::Error>
where
	D::Error: serde::de::Error,
{
	String::deserialize(d)?
		.parse()
		.map_err(serde::de::Error::custom)
}

/// Log levels for events from this crate (`internal`) and from dependencies (`external`).
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(from = "LogLevelSerdeHelper")]
pub struct LogLevel {
	pub internal: LevelFilter,
	pub external: LevelFilter,
}

const fn default_log_level_internal() -> LevelFilter {
	LevelFilter::INFO
}

const fn default_log_level_external() -> LevelFilter {
	LevelFilter::WARN
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LogLevelSerdeHelper {
	#[serde(deserialize_with = "deserialize_level_filter")]
	Together(LevelFilter),
	Separate {
		#[serde(
			deserialize_with = "deserialize_level_filter",
			default = "default_log_level_internal"
		)]
		internal: LevelFilter,
		#[serde(
			deserialize_with = "deserialize_level_filter",
			default = "default_log_level_external"
		)]
		external: LevelFilter,
	},
}

impl From<LogLevelSerdeHelper> for LogLevel {
	fn from(helper: LogLevelSerdeHelper) -> Self {
		match helper {
			LogLevelSerdeHelper::Together(level) => Self {
				internal: level,
				external: level,
			},
			LogLevelSerdeHelper::Separate { internal, external } => Self { internal, external },
		}
	}
}

const fn default_log_level() -> LogLevel {
	LogLevel {
		internal: default_log_level_internal(),
		external: default_log_level_external(),
	}
}

/// Later sources win: the config file, then `MIDISTORE_`-prefixed variables, then the bare `DATABASE_URL` and `PORT` variables.
pub fn config() -> Result<Config, figment::Error> {
	use figment::providers::{Env, Format as _, Toml};

	figment::Figment::new()
		.merge(Toml::file(CONFIG_FILE))
		.merge(Env::prefixed(ENV_PREFIX))
		.merge(Env::raw().only(&["DATABASE_URL", "PORT"]))
		.extract()
}

#[cfg(test)]
impl Config {
	pub fn for_tests() -> Self {
		Self {
			address: None,
			port: default_port(),
			database_url: String::new(),
			max_connections: 1,
			max_file_size: default_max_file_size(),
			log_level: default_log_level(),
		}
	}
}
