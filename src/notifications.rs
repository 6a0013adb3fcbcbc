//! Transient toast notifications
//!
//! Each notification is a small scheduled task: it auto-dismisses once its
//! duration elapses, or earlier when the user dismisses it. Dismissal starts a
//! short exit transition before the entry is removed. Time is always passed
//! in by the caller, so tests can drive the clock deterministically.

use crate::types::Severity;
use std::time::{Duration, Instant};

pub const DEFAULT_DURATION: Duration = Duration::from_millis(5000);

/// Length of the fade-out before a dismissed notification disappears
pub const EXIT_TRANSITION: Duration = Duration::from_millis(300);

/// Handle returned by `show`, used to dismiss a specific notification
pub type NotificationId = u64;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    /// When the auto-dismiss fires
    pub expires_at: Instant,
    /// Set once dismissal started; the entry is removed after `EXIT_TRANSITION`
    pub exiting_since: Option<Instant>,
}

impl Notification {
    pub fn is_exiting(&self) -> bool {
        self.exiting_since.is_some()
    }
}

/// Stack of visible notifications, oldest first
#[derive(Debug, Clone)]
pub struct Notifications {
    items: Vec<Notification>,
    next_id: NotificationId,
    default_duration: Duration,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

impl Notifications {
    pub fn new(default_duration: Duration) -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            default_duration,
        }
    }

    /// Append a notification that expires after `duration`
    pub fn show(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        duration: Duration,
        now: Instant,
    ) -> NotificationId {
        let id = self.next_id;
        self.next_id += 1;

        self.items.push(Notification {
            id,
            message: message.into(),
            severity,
            expires_at: now + duration,
            exiting_since: None,
        });

        id
    }

    /// `show` with the configured default duration
    pub fn push(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now: Instant,
    ) -> NotificationId {
        self.show(message, severity, self.default_duration, now)
    }

    /// Start the exit transition of one notification.
    /// Returns false when it is unknown or already leaving.
    pub fn dismiss(&mut self, id: NotificationId, now: Instant) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(n) if n.exiting_since.is_none() => {
                n.exiting_since = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Dismiss the most recent notification that is not already leaving
    pub fn dismiss_latest(&mut self, now: Instant) -> Option<NotificationId> {
        let id = self
            .items
            .iter()
            .rev()
            .find(|n| !n.is_exiting())
            .map(|n| n.id)?;
        self.dismiss(id, now);
        Some(id)
    }

    /// Advance the clock: expire due notifications and drop finished exits
    pub fn tick(&mut self, now: Instant) {
        for n in self.items.iter_mut() {
            if n.exiting_since.is_none() && now >= n.expires_at {
                n.exiting_since = Some(n.expires_at);
            }
        }

        self.items.retain(|n| match n.exiting_since {
            Some(since) => now < since + EXIT_TRANSITION,
            None => true,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.items.iter().find(|n| n.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_show_stacks_without_dedup() {
        let now = Instant::now();
        let mut center = Notifications::default();

        let a = center.push("Saved", Severity::Success, now);
        let b = center.push("Saved", Severity::Success, now);

        assert_ne!(a, b);
        assert_eq!(center.len(), 2);
        let messages: Vec<_> = center.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["Saved", "Saved"]);
    }

    #[test]
    fn test_auto_dismiss_after_duration() {
        let start = Instant::now();
        let mut center = Notifications::default();
        let id = center.show("hello", Severity::Success, ms(5000), start);

        center.tick(start + ms(4999));
        assert!(!center.get(id).unwrap().is_exiting());

        center.tick(start + ms(5000));
        assert!(center.get(id).unwrap().is_exiting());

        center.tick(start + ms(5299));
        assert!(center.get(id).is_some());

        center.tick(start + ms(5300));
        assert!(center.get(id).is_none());
        assert!(center.is_empty());
    }

    #[test]
    fn test_late_tick_removes_in_one_step() {
        let start = Instant::now();
        let mut center = Notifications::default();
        center.show("hello", Severity::Error, ms(1000), start);

        center.tick(start + ms(10_000));
        assert!(center.is_empty());
    }

    #[test]
    fn test_manual_dismiss_cancels_timer() {
        let start = Instant::now();
        let mut center = Notifications::default();
        let id = center.show("hello", Severity::Error, ms(5000), start);

        assert!(center.dismiss(id, start + ms(100)));
        assert!(!center.dismiss(id, start + ms(150)));

        center.tick(start + ms(399));
        assert!(center.get(id).is_some());

        center.tick(start + ms(400));
        assert!(center.get(id).is_none());
    }

    #[test]
    fn test_dismiss_unknown_id() {
        let mut center = Notifications::default();
        assert!(!center.dismiss(42, Instant::now()));
    }

    #[test]
    fn test_dismiss_latest_skips_exiting() {
        let now = Instant::now();
        let mut center = Notifications::default();
        let first = center.push("first", Severity::Success, now);
        let second = center.push("second", Severity::Error, now);

        assert_eq!(center.dismiss_latest(now), Some(second));
        assert_eq!(center.dismiss_latest(now), Some(first));
        assert_eq!(center.dismiss_latest(now), None);
    }

    #[test]
    fn test_independent_timers() {
        let start = Instant::now();
        let mut center = Notifications::default();
        let short = center.show("short", Severity::Success, ms(1000), start);
        let long = center.show("long", Severity::Success, ms(3000), start);

        center.tick(start + ms(1500));
        assert!(center.get(short).is_none());
        assert!(center.get(long).is_some());
        assert!(!center.get(long).unwrap().is_exiting());
    }

    #[test]
    fn test_push_uses_configured_duration() {
        let start = Instant::now();
        let mut center = Notifications::new(ms(200));
        let id = center.push("quick", Severity::Warning, start);
        assert_eq!(center.get(id).unwrap().expires_at, start + ms(200));
    }
}
