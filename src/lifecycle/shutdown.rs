//! Shutdown coordination for the site server.
//!
//! A `watch` channel holds a single "stopping" flag. Listeners that start
//! after the trigger still see it, so a Ctrl+C that lands while the server is
//! binding is not lost.

use std::future::Future;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::lifecycle::signals::wait_for_signal;

/// Cloneable handle that stops every listener at once.
#[derive(Debug, Clone)]
pub struct Shutdown {
    stopping: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (stopping, _) = watch::channel(false);
        Self { stopping }
    }

    /// Future that resolves once [`Shutdown::trigger`] has been called.
    pub fn listen(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.stopping.subscribe();
        async move {
            // a dropped coordinator can never trigger; treat it as stopped
            let _ = rx.wait_for(|stopping| *stopping).await;
        }
    }

    /// Mark the server as stopping. Later calls are no-ops.
    pub fn trigger(&self) {
        self.stopping.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.stopping.borrow()
    }

    /// Trigger once Ctrl+C or SIGTERM arrives.
    pub fn trigger_on_signal(&self) -> JoinHandle<()> {
        let shutdown = self.clone();
        tokio::spawn(async move {
            wait_for_signal().await;
            tracing::info!("Shutdown signal received");
            shutdown.trigger();
        })
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
