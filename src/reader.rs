//! Reader task owning the region source, and the command protocol.
//!
//! The reader is the only execution context that touches the live memory
//! mappings. It runs a continuous poll loop, keeps a latest-wins cache of the
//! most recent snapshot, and exchanges strictly half-duplex request/response
//! messages with a single consumer. Decoded snapshots cross the boundary
//! through a single-slot, latest-wins handoff (a watch channel), so the
//! reader's final send can never block a shutdown.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::detector::ChangeDetector;
use crate::schema::Region;
use crate::source::RegionSource;
use crate::types::TelemetrySnapshot;

/// How long the poll loop pauses to check for an incoming command.
///
/// This is the loop's only blocking point; it doubles as the pacing between
/// polls so an idle reader does not spin a core.
const COMMAND_POLL_WINDOW: std::time::Duration = std::time::Duration::from_millis(1);

/// Consumer-to-reader commands. One outstanding exchange at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Ask for a deep copy of the current cache via the handoff slot.
    RequestSnapshot,
    /// Finish the in-flight iteration, release the region handles, terminate.
    Stop,
}

/// Reader-to-consumer responses, delivered in request order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// One-time probe reply: the physics region holds live data.
    ReadingSuccess,
    /// One-time probe reply: the game has not initialized its pages.
    ReadingFailure,
    /// A snapshot (or the empty sentinel) was pushed into the handoff slot.
    DataOk,
    /// Termination handshake complete; the region handles are released.
    ProcessTerminated,
}

impl Response {
    pub fn name(&self) -> &'static str {
        match self {
            Response::ReadingSuccess => "ReadingSuccess",
            Response::ReadingFailure => "ReadingFailure",
            Response::DataOk => "DataOk",
            Response::ProcessTerminated => "ProcessTerminated",
        }
    }
}

/// Channel bundle returned by [`Reader::spawn`].
pub(crate) struct ReaderChannels {
    pub commands: mpsc::Sender<Command>,
    pub responses: mpsc::Receiver<Response>,
    pub handoff: watch::Receiver<Option<TelemetrySnapshot>>,
    pub cancel: CancellationToken,
    pub handle: JoinHandle<()>,
}

/// Spawns and runs the reader task.
pub(crate) struct Reader;

impl Reader {
    pub(crate) fn spawn<S: RegionSource>(source: S) -> ReaderChannels {
        let (command_tx, command_rx) = mpsc::channel(4);
        let (response_tx, response_rx) = mpsc::channel(4);
        let (handoff_tx, handoff_rx) = watch::channel(None);
        let cancel = CancellationToken::new();

        let cancel_task = cancel.clone();
        let handle = tokio::spawn(async move {
            Self::run(source, command_rx, response_tx, handoff_tx, cancel_task).await;
        });

        ReaderChannels {
            commands: command_tx,
            responses: response_rx,
            handoff: handoff_rx,
            cancel,
            handle,
        }
    }

    async fn run<S: RegionSource>(
        mut source: S,
        mut commands: mpsc::Receiver<Command>,
        responses: mpsc::Sender<Response>,
        handoff: watch::Sender<Option<TelemetrySnapshot>>,
        cancel: CancellationToken,
    ) {
        info!("Reader task started");

        // Liveness probe: an all-zero physics region means the game has not
        // initialized its pages yet. The protocol shape stays uniform either
        // way, so the consumer's shutdown path does not depend on the
        // outcome.
        if !Self::probe(&mut source) {
            warn!("Liveness probe failed: physics region is all zero");
            respond(&responses, Response::ReadingFailure);
            Self::await_stop(&mut commands, &responses, &handoff, &cancel).await;
            drop(source);
            respond(&responses, Response::ProcessTerminated);
            info!("Reader task ended (probe failed)");
            return;
        }

        respond(&responses, Response::ReadingSuccess);
        debug!("Liveness probe succeeded, entering poll loop");

        let mut detector = ChangeDetector::new();
        let mut cache: Option<TelemetrySnapshot> = None;
        let mut poll_count = 0u64;
        let mut decode_errors = 0u64;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Reader cancelled");
                    break;
                }
                command = commands.recv() => match command {
                    Some(Command::RequestSnapshot) => {
                        // Deep copy of the latest-wins cache; None is the
                        // "no data yet" sentinel. Push first, then confirm.
                        handoff.send_replace(cache.clone());
                        respond(&responses, Response::DataOk);
                        trace!(populated = cache.is_some(), "Served snapshot request");
                    }
                    Some(Command::Stop) => {
                        debug!("Stop requested, releasing region handles");
                        drop(source);
                        respond(&responses, Response::ProcessTerminated);
                        info!(
                            poll_count, decode_errors,
                            "Reader task ended (stop requested)"
                        );
                        return;
                    }
                    None => {
                        debug!("Consumer dropped its command channel");
                        break;
                    }
                },
                _ = tokio::time::sleep(COMMAND_POLL_WINDOW) => {
                    poll_count += 1;
                    match detector.poll(&mut source) {
                        Ok(Some(snapshot)) => {
                            trace!(
                                packet_id = snapshot.physics.packet_id,
                                "Cached new snapshot"
                            );
                            cache = Some(snapshot);
                        }
                        Ok(None) => {}
                        Err(e) => {
                            // Drop this cycle's data, keep the previous cache
                            decode_errors += 1;
                            if decode_errors == 1 || decode_errors % 500 == 0 {
                                warn!(decode_errors, "Poll failed: {e}");
                            }
                        }
                    }
                }
            }
        }

        info!(poll_count, decode_errors, "Reader task ended");
    }

    /// Read the full physics region once; any nonzero byte means the game is
    /// writing.
    fn probe<S: RegionSource>(source: &mut S) -> bool {
        let mut buf = vec![0u8; Region::Physics.size()];
        match source.read_physics(&mut buf) {
            Ok(()) => buf.iter().any(|&b| b != 0),
            Err(e) => {
                warn!("Liveness probe could not read the physics region: {e}");
                false
            }
        }
    }

    /// Termination handshake for the probe-failed path: no poll loop, but
    /// commands are still answered so the exchange shape stays uniform.
    async fn await_stop(
        commands: &mut mpsc::Receiver<Command>,
        responses: &mpsc::Sender<Response>,
        handoff: &watch::Sender<Option<TelemetrySnapshot>>,
        cancel: &CancellationToken,
    ) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => return,
                command = commands.recv() => match command {
                    Some(Command::RequestSnapshot) => {
                        handoff.send_replace(None);
                        respond(responses, Response::DataOk);
                    }
                    Some(Command::Stop) | None => return,
                },
            }
        }
    }
}

/// Responses never block the reader: the consumer is strictly half-duplex,
/// so a full channel means it desynchronized or went away.
fn respond(responses: &mpsc::Sender<Response>, response: Response) {
    let name = response.name();
    if let Err(e) = responses.try_send(response) {
        warn!("Could not deliver {name} response: {e}");
    }
}
