//! Real-time playback driver.
//!
//! Owns a shared [`EditorSession`] and, while playing, one timer thread that
//! ticks it every `tick_interval_ms`. The thread locks the session for the
//! whole tick, so ticks never overlap each other or edits made through
//! [`PlaybackDriver::with_session`].
//!
//! Cancellation is layered: the driver sets a flag and joins the thread, and
//! the thread only ticks its own generation, so a tick that fires after a
//! pause, reset or restart is a no-op. Dropping the driver cancels the timer
//! and pauses the session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, error};

use crate::clock::ClockTick;
use crate::session::EditorSession;

pub type SharedSession = Arc<Mutex<EditorSession>>;

// A panic while holding the lock leaves the session usable; keep going.
fn lock(session: &Mutex<EditorSession>) -> MutexGuard<'_, EditorSession> {
    session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct Worker {
    cancel: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl Worker {
    fn spawn(session: SharedSession, generation: u64, interval: Duration) -> std::io::Result<Self> {
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let handle = thread::Builder::new()
            .name(format!("playback-tick-{generation}"))
            .spawn(move || run(session, generation, interval, flag))?;
        Ok(Self { cancel, handle })
    }

    fn cancel(self) {
        self.cancel.store(true, Ordering::SeqCst);
        self.handle.thread().unpark();
        if self.handle.join().is_err() {
            error!("playback timer thread panicked");
        }
    }
}

fn run(session: SharedSession, generation: u64, interval: Duration, cancel: Arc<AtomicBool>) {
    debug!("playback timer started (generation {generation})");
    let mut deadline = Instant::now() + interval;
    loop {
        // park_timeout can wake early; wait out the full interval unless cancelled.
        loop {
            if cancel.load(Ordering::SeqCst) {
                debug!("playback timer cancelled (generation {generation})");
                return;
            }
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            thread::park_timeout(deadline - now);
        }

        match lock(&session).tick_generation(generation) {
            Some(ClockTick::Advanced(_)) => {}
            Some(ClockTick::Finished) | None => break,
        }

        // Missed deadlines are skipped, not replayed as a burst.
        deadline = next_deadline(deadline, interval, Instant::now());
    }
    debug!("playback timer finished (generation {generation})");
}

fn next_deadline(previous: Instant, interval: Duration, now: Instant) -> Instant {
    let next = previous + interval;
    if next <= now {
        now + interval
    } else {
        next
    }
}

/// Drives an [`EditorSession`] in real time.
pub struct PlaybackDriver {
    session: SharedSession,
    worker: Option<Worker>,
}

impl PlaybackDriver {
    pub fn new(session: EditorSession) -> Self {
        Self::from_shared(Arc::new(Mutex::new(session)))
    }

    pub fn from_shared(session: SharedSession) -> Self {
        Self {
            session,
            worker: None,
        }
    }

    /// Handle to the shared session, e.g. for a render loop.
    pub fn session(&self) -> SharedSession {
        Arc::clone(&self.session)
    }

    /// Run `f` with the session locked.
    pub fn with_session<R>(&self, f: impl FnOnce(&mut EditorSession) -> R) -> R {
        f(&mut lock(&self.session))
    }

    /// Start playback and its timer. A session already put into `Playing`
    /// through [`with_session`](Self::with_session) gets its missing timer.
    /// Returns `false` if a timer is already running or could not be started.
    pub fn play(&mut self) -> bool {
        let ticking = self.is_ticking();
        let started = {
            let mut session = lock(&self.session);
            let interval = session.config().tick_interval();
            match session.play() {
                Some(generation) => Some((generation, interval)),
                None if !ticking => {
                    debug!(
                        "playback driver: adopting run (generation {})",
                        session.generation()
                    );
                    Some((session.generation(), interval))
                }
                None => None,
            }
        };
        let Some((generation, interval)) = started else {
            return false;
        };
        self.cancel_worker();
        match Worker::spawn(Arc::clone(&self.session), generation, interval) {
            Ok(worker) => {
                self.worker = Some(worker);
                true
            }
            Err(err) => {
                error!("failed to start playback timer: {err}");
                lock(&self.session).pause();
                false
            }
        }
    }

    pub fn pause(&mut self) {
        lock(&self.session).pause();
        self.cancel_worker();
    }

    pub fn reset(&mut self) {
        lock(&self.session).reset();
        self.cancel_worker();
    }

    /// Whether a timer thread is still ticking.
    pub fn is_ticking(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|w| !w.handle.is_finished())
    }

    fn cancel_worker(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.cancel();
        }
    }
}

impl Drop for PlaybackDriver {
    fn drop(&mut self) {
        self.cancel_worker();
        lock(&self.session).pause();
    }
}
