//! Batched parameter sweeps over many events.
//!
//! [`Siggen::make_signals`] snapshots the detector once, then hands event
//! indices to a pool of scoped worker threads over a bounded crossbeam
//! channel. Each worker runs [`Siggen::make_signal_with_view`] and sends
//! `(index, result)` back; the caller reassembles the results in input
//! order. Every event therefore sees the same parameter version even if
//! the detector is updated during the sweep.

use std::thread;

use crossbeam_channel::bounded;

use siggen_core::InteractionSite;
use siggen_detector::{Detector, DetectorView};

use crate::engine::Siggen;
use crate::error::SiggenError;
use crate::result::SignalResult;

/// Per-event outcome of a sweep.
pub type EventResult = Result<SignalResult, SiggenError>;

impl Siggen {
    /// Compute the signals of independent `events` on up to `workers`
    /// threads.
    ///
    /// The outer `Result` fails only if the detector cannot provide a
    /// field grid or a worker dies. Per-event failures (an invalid site,
    /// say) are reported in that event's slot. Results are in input order.
    /// `workers == 0` is treated as 1.
    pub fn make_signals<E>(
        &self,
        detector: &Detector,
        events: &[E],
        workers: usize,
    ) -> Result<Vec<EventResult>, SiggenError>
    where
        E: AsRef<[InteractionSite]> + Sync,
    {
        let view = detector.view()?;
        self.make_signals_with_view(&view, events, workers)
    }

    /// Like [`make_signals`](Self::make_signals) against an existing
    /// detector snapshot.
    pub fn make_signals_with_view<E>(
        &self,
        view: &DetectorView,
        events: &[E],
        workers: usize,
    ) -> Result<Vec<EventResult>, SiggenError>
    where
        E: AsRef<[InteractionSite]> + Sync,
    {
        if events.is_empty() {
            return Ok(Vec::new());
        }
        let workers = workers.clamp(1, events.len());
        tracing::debug!(events = events.len(), workers, "starting sweep");

        let (task_tx, task_rx) = bounded::<usize>(workers * 4);
        let (result_tx, result_rx) = bounded::<(usize, EventResult)>(workers * 4);

        let mut slots: Vec<Option<EventResult>> = Vec::with_capacity(events.len());
        slots.resize_with(events.len(), || None);

        let panicked = thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    let task_rx = task_rx.clone();
                    let result_tx = result_tx.clone();
                    scope.spawn(move || {
                        while let Ok(index) = task_rx.recv() {
                            let result = self.make_signal_with_view(view, events[index].as_ref());
                            if result_tx.send((index, result)).is_err() {
                                break;
                            }
                        }
                    })
                })
                .collect();
            drop(task_rx);
            drop(result_tx);

            let feeder = scope.spawn(move || {
                for index in 0..events.len() {
                    if task_tx.send(index).is_err() {
                        break;
                    }
                }
            });

            for (index, result) in result_rx.iter() {
                slots[index] = Some(result);
            }

            let mut panicked = feeder.join().is_err();
            for handle in handles {
                panicked |= handle.join().is_err();
            }
            panicked
        });

        if panicked {
            return Err(SiggenError::WorkerFailed {
                reason: "a sweep worker panicked".into(),
            });
        }
        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| SiggenError::WorkerFailed {
                    reason: format!("no result for event {index}"),
                })
            })
            .collect()
    }
}
