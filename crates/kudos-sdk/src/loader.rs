//! Staggered avatar loading for review cards.
//!
//! Card `i` waits `i * stagger` before its single load attempt, keeping the
//! image host from seeing every avatar request at once. Failures are
//! swallowed here and only ever show up as a placeholder.

use kudos_domain::{AvatarRef, ImageLoadEvent, ImageLoadState, ImageSource};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Delay between consecutive cards' load attempts
pub const DEFAULT_STAGGER: Duration = Duration::from_millis(200);

/// Per-card avatar loader
///
/// Owns a timer task for its whole lifetime. Dropping the loader aborts the
/// task, so no state change is published after the card goes away, and a
/// load still in flight at that point is ignored.
#[derive(Debug)]
pub struct StaggeredImageLoader {
    state: watch::Receiver<ImageLoadState>,
    attempts_load: bool,
    task: JoinHandle<()>,
}

impl StaggeredImageLoader {
    /// Schedule the load for the card at `position`
    ///
    /// Must be called inside a tokio runtime.
    pub fn spawn<S: ImageSource>(
        position: usize,
        avatar: &AvatarRef,
        source: Arc<S>,
        stagger: Duration,
    ) -> Self {
        let (tx, rx) = watch::channel(ImageLoadState::Pending);
        let delay = stagger.saturating_mul(u32::try_from(position).unwrap_or(u32::MAX));
        let attempts_load = avatar.is_image();
        let reference = avatar.as_str().to_string();

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if !attempts_load {
                return;
            }

            advance(&tx, ImageLoadEvent::TimerFired);
            let event = match source.load(&reference).await {
                Ok(()) => {
                    debug!("Avatar {} loaded", position);
                    ImageLoadEvent::LoadSucceeded
                }
                Err(e) => {
                    debug!("Avatar {} failed to load, using fallback: {}", position, e);
                    ImageLoadEvent::LoadFailed
                }
            };
            advance(&tx, event);
        });

        Self {
            state: rx,
            attempts_load,
            task,
        }
    }

    /// Latest state
    pub fn state(&self) -> ImageLoadState {
        *self.state.borrow()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<ImageLoadState> {
        self.state.clone()
    }

    /// Whether this loader will ever try to load an image
    pub fn attempts_load(&self) -> bool {
        self.attempts_load
    }

    /// Wait until the load has finished one way or the other
    ///
    /// Returns right away for avatars that are never loaded.
    pub async fn settled(&mut self) -> ImageLoadState {
        if !self.attempts_load {
            return self.state();
        }
        let settled = self
            .state
            .wait_for(ImageLoadState::is_terminal)
            .await
            .map(|state| *state);
        settled.unwrap_or_else(|_| self.state())
    }
}

impl Drop for StaggeredImageLoader {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn advance(tx: &watch::Sender<ImageLoadState>, event: ImageLoadEvent) {
    tx.send_modify(|state| *state = state.apply(event));
}
