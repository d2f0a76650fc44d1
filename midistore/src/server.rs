use std::pin::Pin;
use std::task::{Context, Poll};

use axum::Router;
use bindable::BindableAddr;
use futures::ready;
use hyper::server::accept::Accept;
use tokio::net::{UnixListener, UnixStream};

use super::Error;

struct UdsAccept(UnixListener);

impl UdsAccept {
	#[inline]
	fn new(path: &std::path::Path) -> std::io::Result<Self> {
		UnixListener::bind(path).map(Self)
	}
}

impl Accept for UdsAccept {
	type Conn = UnixStream;
	type Error = std::io::Error;

	fn poll_accept(
		self: Pin<&mut Self>,
		cx: &mut Context<'_>,
	) -> Poll<Option<Result<Self::Conn, Self::Error>>> {
		let (stream, _addr) = ready!(self.0.poll_accept(cx))?;
		Poll::Ready(Some(Ok(stream)))
	}
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
	let interrupt = async {
		if let Err(error) = tokio::signal::ctrl_c().await {
			tracing::error!(%error, "could not listen for Ctrl+C");
			std::future::pending::<()>().await;
		}
	};

	let terminate = async {
		use tokio::signal::unix::{signal, SignalKind};

		match signal(SignalKind::terminate()) {
			Ok(mut stream) => {
				stream.recv().await;
			}
			Err(error) => {
				tracing::error!(%error, "could not listen for SIGTERM");
				std::future::pending::<()>().await;
			}
		}
	};

	tokio::select! {
		() = interrupt => {},
		() = terminate => {},
	}

	tracing::info!("shutting down");
}

/// Serves `app` on `addr` until a shutdown signal arrives and in-flight requests finish.
pub async fn run(app: Router, addr: &BindableAddr) -> Result<(), Error> {
	match addr {
		BindableAddr::Tcp(socket_addr) => {
			axum::Server::try_bind(socket_addr)
				.map_err(|err| Error::BindTcp(err, *socket_addr))?
				.serve(app.into_make_service())
				.with_graceful_shutdown(shutdown_signal())
				.await
		}
		BindableAddr::Unix(path) => {
			let incoming = UdsAccept::new(path).map_err(|err| Error::BindUnix(err, path.clone()))?;
			axum::Server::builder(incoming)
				.serve(app.into_make_service())
				.with_graceful_shutdown(shutdown_signal())
				.await
		}
	}
	.map_err(Error::RunServer)
}
