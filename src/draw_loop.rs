use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded, unbounded};
use log::error;

use crate::draw_engine::DrawState;
use crate::game::{DrawOutcome, Game};

/// Periodic draw driver. Owns the game on a background thread, draws one
/// number per tick and publishes each outcome. The loop ends on a win, an
/// exhausted pool, or cancellation; `stop` cancels the pending tick and only
/// returns once the thread is gone, so no draw can land afterwards.
pub struct DrawLoop {
    cancel: Sender<()>,
    events: Receiver<DrawOutcome>,
    handle: JoinHandle<Game>,
}

impl DrawLoop {
    /// Spawn the tick thread. The game should already be started; an
    /// inactive game makes the loop finish on its first tick.
    pub fn spawn(mut game: Game, interval: Duration) -> Self {
        let (cancel_tx, cancel_rx) = bounded::<()>(1);
        let (event_tx, event_rx) = unbounded();

        let handle = thread::spawn(move || {
            loop {
                // The cancel channel doubles as the tick clock: a timeout is
                // the next tick, a message (or a dropped sender) ends the run.
                match cancel_rx.recv_timeout(interval) {
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    Err(RecvTimeoutError::Timeout) => {}
                }
                if game.state() != DrawState::Active {
                    break;
                }
                match game.draw_next() {
                    Ok(Some(outcome)) => {
                        let finished = game.state() != DrawState::Active;
                        if event_tx.send(outcome).is_err() {
                            break;
                        }
                        if finished {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(err) => {
                        error!("draw loop aborting: {err}");
                        break;
                    }
                }
            }
            game
        });

        Self {
            cancel: cancel_tx,
            events: event_rx,
            handle,
        }
    }

    /// Outcomes in draw order; disconnects once the loop ends.
    pub fn events(&self) -> &Receiver<DrawOutcome> {
        &self.events
    }

    /// Cancel the pending tick and hand the game back. Synchronous: after
    /// this returns the loop thread has exited and no further draw runs.
    pub fn stop(self) -> Game {
        let Self {
            cancel,
            events,
            handle,
        } = self;
        let _ = cancel.send(());
        drop(events);
        handle.join().expect("draw loop thread panicked")
    }

    /// Wait for the loop to finish on its own (win or exhausted pool) and
    /// hand the game back.
    pub fn wait(self) -> Game {
        let Self {
            cancel,
            events,
            handle,
        } = self;
        let game = handle.join().expect("draw loop thread panicked");
        drop(cancel);
        drop(events);
        game
    }
}
