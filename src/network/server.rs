//! TCP Server
//!
//! Accepts connections and runs each one on its own thread.

use std::io::ErrorKind;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};

use crate::config::Config;
use crate::engine::Engine;
use crate::error::{CatalogError, Result};

use super::Connection;

/// TCP server for bookcat
pub struct Server {
    config: Config,
    engine: Arc<Engine>,
    listener: TcpListener,

    /// Live connection count, shared with the connection threads
    active: Arc<AtomicUsize>,

    shutdown_tx: Sender<()>,
    shutdown_rx: Receiver<()>,
}

/// Cloneable handle that stops a running [`Server`]
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: Sender<()>,
}

impl ShutdownHandle {
    /// Ask the server to stop accepting and clear the catalog.
    /// Repeated calls are harmless.
    pub fn shutdown(&self) {
        let _ = self.tx.try_send(());
    }
}

impl Server {
    /// Bind the listening socket
    pub fn bind(config: Config, engine: Arc<Engine>) -> Result<Self> {
        let listener = TcpListener::bind(&config.listen_addr).map_err(|e| {
            CatalogError::Network(format!("Failed to bind {}: {}", config.listen_addr, e))
        })?;
        // Non-blocking accept lets the loop notice shutdown requests
        listener.set_nonblocking(true)?;

        let (shutdown_tx, shutdown_rx) = channel::bounded(1);

        Ok(Self {
            config,
            engine,
            listener,
            active: Arc::new(AtomicUsize::new(0)),
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Address actually bound (useful with port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            tx: self.shutdown_tx.clone(),
        }
    }

    /// Accept connections until shut down (blocking)
    ///
    /// On shutdown the listening socket is closed and the catalog cleared.
    /// Connection threads already running are left to finish on their own.
    pub fn run(self) -> Result<()> {
        tracing::info!("Listening on {}", self.local_addr()?);

        loop {
            if self.shutdown_rx.try_recv().is_ok() {
                break;
            }

            match self.listener.accept() {
                Ok((stream, addr)) => self.dispatch(stream, addr),
                Err(ref e) if e.kind() == ErrorKind::WouldBlock => {
                    match self
                        .shutdown_rx
                        .recv_timeout(self.config.accept_poll_interval)
                    {
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                        Err(RecvTimeoutError::Timeout) => {}
                    }
                }
                Err(ref e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => tracing::warn!("Accept failed: {}", e),
            }
        }

        tracing::info!("Shutting down listener");
        let Server {
            listener, engine, ..
        } = self;
        drop(listener);
        engine.clear();

        Ok(())
    }

    /// Start a handler thread for one accepted connection
    fn dispatch(&self, stream: TcpStream, addr: SocketAddr) {
        if self.active.load(Ordering::Acquire) >= self.config.max_connections {
            tracing::warn!(
                "Refusing {}: {} connections already open",
                addr,
                self.config.max_connections
            );
            return;
        }

        // Accepted sockets may inherit the listener's non-blocking mode
        if let Err(e) = stream.set_nonblocking(false) {
            tracing::warn!("Dropping {}: {}", addr, e);
            return;
        }

        tracing::info!("Accepted connection from {}", addr);

        let slot = ActiveSlot::acquire(Arc::clone(&self.active));
        let engine = Arc::clone(&self.engine);
        let read_ms = self.config.read_timeout_ms;
        let write_ms = self.config.write_timeout_ms;

        let spawned = thread::Builder::new()
            .name(format!("conn-{}", addr))
            .spawn(move || {
                let _slot = slot;
                let result = Connection::new(stream, engine).and_then(|mut conn| {
                    conn.set_timeouts(read_ms, write_ms)?;
                    conn.handle()
                });
                if let Err(e) = result {
                    tracing::warn!("Connection {} ended with error: {}", addr, e);
                }
            });

        if let Err(e) = spawned {
            tracing::error!("Failed to spawn handler for {}: {}", addr, e);
        }
    }
}

/// Counts one live connection for as long as it is held
struct ActiveSlot(Arc<AtomicUsize>);

impl ActiveSlot {
    fn acquire(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self(counter)
    }
}

impl Drop for ActiveSlot {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}
