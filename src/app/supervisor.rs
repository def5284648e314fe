//! Identify animation supervisor.
//!
//! Identify requests are fire-and-forget from the protocol's point of
//! view, but the spawning side is explicit here: each animation runs on
//! its own thread, the supervisor counts outstanding instances, and a cap
//! bounds how many can run at once. Concurrent animations below the cap
//! are allowed — they all drive the same pin and last-writer-wins, which
//! is the accepted outcome.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::thread::JoinHandle;

use log::{info, warn};

use crate::app::identify::run_animation;
use crate::app::lamp::LampController;
use crate::app::ports::Delay;

/// Outstanding-animation cap. Requests beyond this are logged and dropped.
pub const MAX_CONCURRENT_ANIMATIONS: usize = 4;

/// Handle to a spawned animation. Dropping it detaches the thread (the
/// normal fire-and-forget path); tests join it.
pub struct AnimationHandle {
    thread: JoinHandle<()>,
}

impl AnimationHandle {
    /// Block until the animation has run to completion.
    pub fn join(self) {
        // An animation thread only panics if the test harness does.
        let _ = self.thread.join();
    }
}

/// Spawns and tracks identify animation tasks.
pub struct IdentifySupervisor {
    delay: Arc<dyn Delay>,
    active: Arc<AtomicUsize>,
    total: AtomicU32,
    limit: usize,
}

impl IdentifySupervisor {
    pub fn new(delay: Arc<dyn Delay>) -> Self {
        Self::with_limit(delay, MAX_CONCURRENT_ANIMATIONS)
    }

    pub fn with_limit(delay: Arc<dyn Delay>, limit: usize) -> Self {
        Self {
            delay,
            active: Arc::new(AtomicUsize::new(0)),
            total: AtomicU32::new(0),
            limit,
        }
    }

    /// Handle an identify request: spawn one animation task and return
    /// immediately. `None` when the concurrency cap is hit.
    pub fn request(&self, lamp: Arc<LampController>) -> Option<AnimationHandle> {
        let prev = self.active.fetch_add(1, Ordering::AcqRel);
        if prev >= self.limit {
            self.active.fetch_sub(1, Ordering::AcqRel);
            warn!("identify: request dropped, {prev} animations already running");
            return None;
        }

        let seq = self.total.fetch_add(1, Ordering::Relaxed);
        info!("identify: animation #{seq} starting ({} active)", prev + 1);

        let active = Arc::clone(&self.active);
        let delay = Arc::clone(&self.delay);
        let thread = std::thread::spawn(move || {
            run_animation(&lamp, delay.as_ref());
            active.fetch_sub(1, Ordering::AcqRel);
        });
        Some(AnimationHandle { thread })
    }

    /// Number of animations currently running.
    pub fn active_count(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    /// Total animations spawned since boot.
    pub fn total_spawned(&self) -> u32 {
        self.total.load(Ordering::Relaxed)
    }
}
