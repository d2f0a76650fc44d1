use axum::routing::post;
use axum::Router;
use serde::Serialize;

use super::with_json_405;
use crate::database::Store;

mod add;
mod delete;
mod download;
mod query;
mod update;

#[derive(Serialize)]
struct Message {
	message: &'static str,
}

pub fn configure<S: Store>() -> Router {
	let mut app = Router::new();

	app = app.route("/addfile", with_json_405(post(add::post_handler::<S>)));
	app = app.route("/getfiles", with_json_405(post(query::post_handler::<S>)));
	app = app.route("/updatefile", with_json_405(post(update::post_handler::<S>)));
	app = app.route("/downloadfile", with_json_405(post(download::post_handler::<S>)));
	app = app.route("/deletefile", with_json_405(post(delete::post_handler::<S>)));

	app
}
