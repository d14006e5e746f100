use anyhow::Result;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::routes;

/// Serve requests on the given listener until interrupted.
///
/// Each accepted connection is driven on its own task, so a slow client never
/// blocks the accept loop.
pub async fn serve(listener: TcpListener) -> Result<()> {
    info!("Listening on http://{}", listener.local_addr()?);

    loop {
        let (socket, remote) = tokio::select! {
            accepted = listener.accept() => accepted?,
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                return Ok(());
            }
        };

        debug!("Connection from {remote}");
        let socket = TokioIo::new(socket);
        tokio::spawn(async move {
            // Connection errors (resets, malformed requests) are the client's
            // problem, not ours; log and move on.
            if let Err(err) = http1::Builder::new()
                .serve_connection(socket, service_fn(routes::handle))
                .await
            {
                debug!("Error serving {remote}: {err}");
            }
        });
    }
}
