//! HTTP surface of the todo service.
//!
//! # Overview
//! Wires the router, the request middleware and the server lifecycle around
//! the domain core. `app` builds the router against any `TodoStore`-backed
//! service, which is what lets the integration tests run the full HTTP
//! surface over the in-memory store while `main` wires MongoDB.
//!
//! # Lifecycle
//! Starting → Listening → ShuttingDown → Stopped. The first SIGINT or
//! SIGTERM stops accepting connections and starts draining in-flight
//! requests; the drain is bounded, after which the process terminates
//! regardless. There is no restart path.

pub mod config;
pub mod handlers;
pub mod service;
pub mod store;

use anyhow::Context;
use axum::routing::{get, put};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::service::TodoService;

/// Builds the application router.
///
/// `TraceLayer` is the request log; `TimeoutLayer` bounds each request at
/// [`config::REQUEST_TIMEOUT`]. The collection is mounted at both `/todo`
/// and `/todo/` so either resolves.
pub fn app(service: TodoService) -> Router {
    let collection = get(handlers::list_todos).post(handlers::create_todo);

    Router::new()
        .route("/", get(handlers::home))
        .route("/todo", collection.clone())
        .route("/todo/", collection)
        .route(
            "/todo/{id}",
            put(handlers::update_todo).delete(handlers::delete_todo),
        )
        .layer(TimeoutLayer::new(config::REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serves `app` on `listener` until a shutdown signal arrives, then drains.
///
/// In-flight requests get [`config::SHUTDOWN_GRACE`] to finish. If the drain
/// outlives the grace period the server task is aborted — the process is
/// exiting either way, the bound just makes it prompt.
pub async fn run(listener: TcpListener, app: Router) -> anyhow::Result<()> {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
    });

    tokio::select! {
        // The server only finishes early if something went wrong.
        res = &mut server => {
            res.context("server task panicked")?
                .context("server exited unexpectedly")?;
            return Ok(());
        }
        () = shutdown_signal() => {}
    }

    info!(grace = ?config::SHUTDOWN_GRACE, "shutdown signal received, draining in-flight requests");
    let _ = shutdown_tx.send(());

    match tokio::time::timeout(config::SHUTDOWN_GRACE, &mut server).await {
        Ok(res) => {
            res.context("server task panicked")?
                .context("error while draining")?;
        }
        Err(_) => {
            warn!("grace period elapsed, terminating with requests still in flight");
            server.abort();
        }
    }

    info!("server stopped");
    Ok(())
}

/// Resolves on the first SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install ctrl+c handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install sigterm handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
