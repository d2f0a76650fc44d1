#![deny(
	absolute_paths_not_starting_with_crate,
	future_incompatible,
	keyword_idents,
	macro_use_extern_crate,
	meta_variable_misuse,
	missing_abi,
	missing_copy_implementations,
	non_ascii_idents,
	nonstandard_style,
	noop_method_call,
	rust_2018_idioms
)]
#![forbid(unsafe_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use bindable::BindableAddr;

mod config;
mod database;
mod error;
mod helpers;
mod routes;
mod server;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("reading configuration: {0}")]
	Config(#[from] figment::Error),
	#[error("connecting to database: {0}")]
	ConnectDb(#[from] sqlx::Error),
	#[error("running server: {0}")]
	RunServer(#[source] hyper::Error),
	#[error("binding to TCP address {1}: {0}")]
	BindTcp(#[source] hyper::Error, SocketAddr),
	#[error("binding to Unix socket at path {1}: {0}")]
	BindUnix(#[source] std::io::Error, std::path::PathBuf),
}

#[tokio::main]
async fn main() -> Result<(), Error> {
	let config = Arc::new(config::config()?);

	init_logging(&config.log_level);

	let database = database::connect(&config.database_url, config.max_connections)
		.await
		.map(Arc::new)?;

	let app = routes::app(database, Arc::clone(&config));

	let default_address;
	let address = match &config.address {
		Some(address) => address,
		None => {
			default_address = BindableAddr::Tcp(SocketAddr::from(([0, 0, 0, 0], config.port)));
			&default_address
		}
	};

	tracing::info!(%address, "listening");
	server::run(app, address).await?;
	tracing::info!("server stopped");

	Ok(())
}

fn init_logging(log_level: &config::LogLevel) {
	use tracing_subscriber::filter::FilterFn;
	use tracing_subscriber::layer::{Layer, SubscriberExt};
	use tracing_subscriber::util::SubscriberInitExt;

	let internal = log_level.internal;
	let external = log_level.external;
	let filter = FilterFn::new(move |metadata| {
		let is_internal = metadata
			.module_path()
			.and_then(|path| path.split("::").next())
			== Some(env!("CARGO_CRATE_NAME"));
		let required_level = if is_internal { internal } else { external };
		metadata.level() <= &required_level
	});

	let layer = tracing_subscriber::fmt::layer()
		.with_file(true)
		.with_line_number(true)
		.with_writer(std::io::stderr);

	tracing_subscriber::registry()
		.with(layer.with_filter(filter))
		.init();
}
