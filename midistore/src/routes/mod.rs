use std::sync::Arc;

use axum::handler::Handler as _;
use axum::routing::MethodRouter;
use axum::{Extension, Router};
use http::Method;
use tower_http::cors::{self, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::database::Store;

mod files;
mod tags;

macro_rules! merge {
	($app:ident, $store:ty; $($name:ident),+) => {
		$($app = $app.merge($name::configure::<$store>());)+
	};
}

/// Replaces the empty 405 response for unrouted methods with a JSON one.
fn with_json_405(route: MethodRouter) -> MethodRouter {
	route.fallback(crate::error::method_not_allowed_handler.into_service())
}

pub fn configure<S: Store>() -> Router {
	let mut app = Router::new();

	merge!(app, S; files, tags);

	app = app.fallback(crate::error::default_handler.into_service());

	app
}

fn cors() -> CorsLayer {
	CorsLayer::new()
		.allow_origin(cors::Any)
		.allow_methods([Method::GET, Method::POST, Method::DELETE])
		.allow_headers(cors::Any)
}

/// The complete application, with `store` and `config` available to every handler.
pub fn app<S: Store>(store: Arc<S>, config: Arc<Config>) -> Router {
	let mut app = configure::<S>();
	app = app.layer(Extension(store));
	app = app.layer(Extension(config));
	app = app.layer(cors());
	app = app.layer(TraceLayer::new_for_http());
	app
}
