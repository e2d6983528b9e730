//! A REST API for managing categories.
//!
//! Categories can be created, listed, fetched by ID or name, renamed, and deleted. Categories are
//! stored in a SQLite database and exchanged with clients as JSON.
//!
//! Requests flow through three layers: the endpoint handlers in [category] map HTTP requests to
//! [CategoryService] calls, the service runs each operation in a database transaction against a
//! [CategoryRepository], and any failure is reported as an [Error], which renders as a JSON error
//! body with a matching status code.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
pub mod category;
mod db;
pub mod endpoints;
mod error;
mod logging;
mod routing;
#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use category::{CategoryDto, CategoryRepository, CategoryService};
pub use db::initialize as initialize_db;
pub use error::{Error, ErrorResponse, classify_store_error};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
        },
    }

    handle.graceful_shutdown(Some(Duration::from_secs(1)));
}
