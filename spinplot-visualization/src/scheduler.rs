//! Frame scheduling
//!
//! The repaint-loop subscription. The host's display-synchronized callback
//! drives the actual ticks; the scheduler only decides whether a given
//! tick is still current. Tokens are issued from a monotonic counter, so a
//! rebuilt loop can never be raced by ticks from its predecessor: the old
//! token simply stops being accepted.

/// Identifies one subscription to the repaint loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

/// Start/stop lifecycle for the repaint loop. At most one subscription is
/// live at a time.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    active: Option<SubscriptionToken>,
    issued: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin (or continue) the loop. Starting while already running
    /// returns the existing token; no second loop is created.
    pub fn start(&mut self) -> SubscriptionToken {
        if let Some(token) = self.active {
            return token;
        }
        let token = self.issue();
        self.active = Some(token);
        log::debug!("frame loop started ({token:?})");
        token
    }

    /// Stop the loop and release the subscription. Idempotent: stopping an
    /// already-stopped scheduler is a no-op.
    pub fn stop(&mut self) {
        if let Some(token) = self.active.take() {
            log::debug!("frame loop stopped ({token:?})");
        }
    }

    /// Replace the current subscription with a fresh one, starting the
    /// loop if it was stopped. Ticks carrying the previous token become
    /// stale and are ignored.
    pub fn restart(&mut self) -> SubscriptionToken {
        self.active = None;
        let token = self.issue();
        self.active = Some(token);
        log::debug!("frame loop rebuilt ({token:?})");
        token
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Whether a tick carrying this token should still be processed.
    pub fn accepts(&self, token: SubscriptionToken) -> bool {
        self.active == Some(token)
    }

    fn issue(&mut self) -> SubscriptionToken {
        self.issued += 1;
        SubscriptionToken(self.issued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_is_idempotent() {
        let mut scheduler = FrameScheduler::new();
        let first = scheduler.start();
        let second = scheduler.start();
        assert_eq!(first, second);
        assert!(scheduler.is_running());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut scheduler = FrameScheduler::new();
        scheduler.stop();
        let token = scheduler.start();
        scheduler.stop();
        scheduler.stop();
        assert!(!scheduler.is_running());
        assert!(!scheduler.accepts(token));
    }

    #[test]
    fn test_restart_retires_old_token() {
        let mut scheduler = FrameScheduler::new();
        let old = scheduler.start();
        let new = scheduler.restart();
        assert_ne!(old, new);
        assert!(!scheduler.accepts(old));
        assert!(scheduler.accepts(new));
        assert!(scheduler.is_running());
    }

    #[test]
    fn test_restart_while_stopped_starts() {
        let mut scheduler = FrameScheduler::new();
        let token = scheduler.restart();
        assert!(scheduler.is_running());
        assert!(scheduler.accepts(token));
    }

    #[test]
    fn test_tokens_never_repeat() {
        let mut scheduler = FrameScheduler::new();
        let a = scheduler.start();
        scheduler.stop();
        let b = scheduler.start();
        scheduler.stop();
        assert_ne!(a, b);
    }
}
