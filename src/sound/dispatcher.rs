//! Fire-and-forget sound playback.
//!
//! Playing a sound blocks for its whole length, so every request runs on a
//! short-lived background thread. At most one playback runs at a time: a
//! request arriving while another is in flight is dropped, never queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use super::source::SoundSource;
use super::SoundPlayer;

/// Outcome of a playback request.
#[derive(Debug)]
pub enum Dispatch {
    /// A background thread is playing the sound.
    Spawned(JoinHandle<()>),
    /// Another playback was in flight; the request was dropped.
    Dropped,
    /// Sound is disabled.
    Disabled,
}

impl Dispatch {
    /// Returns true if a playback thread was started.
    pub fn is_spawned(&self) -> bool {
        matches!(self, Dispatch::Spawned(_))
    }

    /// Waits for the playback thread, if any.
    pub fn join(self) {
        if let Dispatch::Spawned(handle) = self {
            if handle.join().is_err() {
                warn!("サウンド再生スレッドがパニックしました");
            }
        }
    }
}

/// Releases the busy flag when the playback thread ends.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs sound playback off the event thread with a non-blocking guard.
#[derive(Clone)]
pub struct SoundDispatcher {
    player: Arc<dyn SoundPlayer>,
    busy: Arc<AtomicBool>,
}

impl SoundDispatcher {
    /// Creates a dispatcher around the given player.
    pub fn new(player: Arc<dyn SoundPlayer>) -> Self {
        Self {
            player,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Requests playback of `source` without blocking the caller.
    ///
    /// If the player fails (e.g., no audio device), the background thread
    /// rings the generic bell instead.
    pub fn request(&self, source: &SoundSource) -> Dispatch {
        if self.player.is_disabled() {
            return Dispatch::Disabled;
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Sound still playing, dropping request");
            return Dispatch::Dropped;
        }

        let guard = BusyGuard(Arc::clone(&self.busy));
        let player = Arc::clone(&self.player);
        let source = source.clone();

        let spawned = thread::Builder::new()
            .name("alert-sound".to_string())
            .spawn(move || {
                let _guard = guard;
                if let Err(e) = player.play(&source) {
                    debug!("Sound playback failed ({}), ringing bell: {}", e.suggestion(), e);
                    player.bell();
                }
            });

        match spawned {
            Ok(handle) => Dispatch::Spawned(handle),
            Err(e) => {
                // The closure, and with it the guard, is dropped on failure.
                warn!("サウンド再生スレッドを起動できません: {}", e);
                Dispatch::Dropped
            }
        }
    }

    /// Returns true while a playback thread is running.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Returns the underlying player.
    pub fn player(&self) -> &Arc<dyn SoundPlayer> {
        &self.player
    }
}

impl std::fmt::Debug for SoundDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundDispatcher")
            .field("busy", &self.is_busy())
            .finish_non_exhaustive()
    }
}
