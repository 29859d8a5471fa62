//! Consumer handle for the reader task.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{Result, TelemetryError};
use crate::reader::{Command, Reader, Response};
use crate::source::RegionSource;
use crate::types::TelemetrySnapshot;

/// Default wait for a snapshot reply before treating the request as
/// "no data available".
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(100);

/// Upper bound on the termination handshake before falling back to
/// cancellation.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

/// Wait for the one-time probe reply after spawn.
const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Outcome of the reader's one-time liveness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// The physics region held live data; the poll loop is running.
    Live,
    /// The region was all zero. Only [`TelemetryClient::shutdown`] is useful
    /// from here; the handshake completes the same way it would when live.
    Failed,
}

/// Handle to a spawned reader task.
///
/// Strictly half-duplex: one command in flight at a time, replies consumed in
/// order. Requires `&mut self` on every exchange so the type system enforces
/// the single-consumer discipline.
pub struct TelemetryClient {
    commands: mpsc::Sender<Command>,
    responses: mpsc::Receiver<Response>,
    handoff: watch::Receiver<Option<TelemetrySnapshot>>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
    request_timeout: Duration,
}

impl TelemetryClient {
    /// Spawn a reader task over `source` and return the handle to it.
    ///
    /// Call [`probe_and_start`](Self::probe_and_start) next; no other
    /// exchange is valid until the probe reply has been consumed.
    pub fn spawn<S: RegionSource>(source: S) -> Self {
        let channels = Reader::spawn(source);
        Self {
            commands: channels.commands,
            responses: channels.responses,
            handoff: channels.handoff,
            cancel: channels.cancel,
            handle: Some(channels.handle),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the per-request reply timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Consume the reader's one-time probe reply.
    pub async fn probe_and_start(&mut self) -> Result<Liveness> {
        match tokio::time::timeout(PROBE_TIMEOUT, self.responses.recv()).await {
            Err(_) => Err(TelemetryError::Timeout { duration: PROBE_TIMEOUT }),
            Ok(None) => Err(TelemetryError::handoff("reader task ended before its probe reply")),
            Ok(Some(Response::ReadingSuccess)) => Ok(Liveness::Live),
            Ok(Some(Response::ReadingFailure)) => {
                debug!("Probe reported an uninitialized memory region");
                Ok(Liveness::Failed)
            }
            Ok(Some(other)) => Err(TelemetryError::protocol(
                "ReadingSuccess or ReadingFailure",
                other.name(),
            )),
        }
    }

    /// Request a deep copy of the reader's latest snapshot.
    ///
    /// `Ok(None)` means no complete snapshot has been decoded yet, or the
    /// reply did not arrive within the request timeout. An unexpected reply
    /// kind is a protocol error; the exchange discipline was broken.
    pub async fn request_snapshot(&mut self) -> Result<Option<TelemetrySnapshot>> {
        self.drain_stale_replies();
        self.commands
            .send(Command::RequestSnapshot)
            .await
            .map_err(|_| TelemetryError::handoff("reader task is gone"))?;

        match tokio::time::timeout(self.request_timeout, self.responses.recv()).await {
            Err(_) => {
                debug!("Snapshot request timed out, treating as no data");
                Ok(None)
            }
            Ok(None) => Err(TelemetryError::handoff("reader task is gone")),
            Ok(Some(Response::DataOk)) => Ok(self.handoff.borrow_and_update().clone()),
            Ok(Some(other)) => Err(TelemetryError::protocol("DataOk", other.name())),
        }
    }

    /// A reply that arrived after its request timed out stays queued and
    /// would otherwise be consumed as the next exchange's answer. Discard
    /// anything pending before starting a new exchange.
    fn drain_stale_replies(&mut self) {
        while let Ok(stale) = self.responses.try_recv() {
            debug!("Discarding stale {} reply from a timed-out exchange", stale.name());
        }
    }

    /// Terminate the reader and wait for it to release its region handles.
    ///
    /// Always completes: an undelivered snapshot in the handoff slot cannot
    /// block the reader (the slot is latest-wins), and an unresponsive reader
    /// is cancelled after a bounded wait. Valid after a failed probe too.
    pub async fn shutdown(mut self) -> Result<()> {
        // Discard any undelivered snapshot so the final exchange starts clean
        self.handoff.borrow_and_update();

        if self.commands.send(Command::Stop).await.is_ok() {
            loop {
                match tokio::time::timeout(SHUTDOWN_TIMEOUT, self.responses.recv()).await {
                    Ok(Some(Response::ProcessTerminated)) | Ok(None) => break,
                    // A stale DataOk from a timed-out request can precede the
                    // termination reply; the channel is ordered, keep reading
                    Ok(Some(stale)) => {
                        debug!("Discarding stale {} reply during shutdown", stale.name());
                    }
                    Err(_) => {
                        warn!("Reader did not acknowledge stop, cancelling it");
                        break;
                    }
                }
            }
        }

        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("Reader task panicked: {e}");
            }
        }
        Ok(())
    }
}

impl Drop for TelemetryClient {
    fn drop(&mut self) {
        // Dropping without shutdown still ends the task
        self.cancel.cancel();
    }
}
