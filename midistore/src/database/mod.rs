use sqlx::postgres::{PgPool, PgPoolOptions};

#[cfg(test)]
pub mod memory;
pub mod models;
mod postgres;
mod repository;

pub use repository::{resolve_tags, Error, FileFilter, Repository, Store};

pub type Database = PgPool;

pub async fn connect(conn_str: &str, max_connections: u32) -> sqlx::Result<Database> {
	let conn = PgPoolOptions::new()
		.max_connections(max_connections)
		.connect(conn_str)
		.await?;
	sqlx::migrate!().run(&conn).await?;
	Ok(conn)
}
