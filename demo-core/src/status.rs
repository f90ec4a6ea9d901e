use std::collections::VecDeque;
use std::time::Duration;

use instant::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

impl StatusKind {
    fn lifetime(self) -> Duration {
        match self {
            StatusKind::Info => Duration::from_millis(3000),
            StatusKind::Success => Duration::from_millis(3500),
            StatusKind::Error => Duration::from_millis(4000),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusMsg {
    pub kind: StatusKind,
    pub text: String,
    expires: Instant,
}

/// Transient notifications shown in the status bar, newest last.
#[derive(Default)]
pub struct StatusQueue {
    q: VecDeque<StatusMsg>,
}

impl StatusQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: StatusKind, text: impl Into<String>, now: Instant) {
        self.q.push_back(StatusMsg {
            kind,
            text: text.into(),
            expires: now + kind.lifetime(),
        });
    }

    pub fn push_info(&mut self, text: impl Into<String>) {
        self.push(StatusKind::Info, text, Instant::now());
    }

    pub fn push_success(&mut self, text: impl Into<String>) {
        self.push(StatusKind::Success, text, Instant::now());
    }

    pub fn push_error(&mut self, text: impl Into<String>) {
        self.push(StatusKind::Error, text, Instant::now());
    }

    /// Drops messages whose lifetime is over.
    pub fn retain_active(&mut self) {
        self.expire(Instant::now());
    }

    fn expire(&mut self, now: Instant) {
        self.q.retain(|m| m.expires >= now);
    }

    pub fn latest(&self) -> Option<&StatusMsg> {
        self.q.back()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate_notice(id: &str) -> String {
        format!("Mapping validation initiated for {id}")
    }

    #[test]
    fn newest_notice_is_shown() {
        let mut sq = StatusQueue::new();
        sq.push_info(validate_notice("AAA-1"));
        sq.push_info("Export prepared for mapping AAA-1");

        let latest = sq.latest().unwrap();
        assert_eq!(latest.kind, StatusKind::Info);
        assert_eq!(latest.text, "Export prepared for mapping AAA-1");
    }

    #[test]
    fn notices_disappear_after_their_lifetime() {
        let mut sq = StatusQueue::new();
        let t0 = Instant::now();
        sq.push(StatusKind::Info, validate_notice("SM12"), t0);

        sq.expire(t0 + Duration::from_millis(2900));
        assert_eq!(sq.latest().unwrap().text, validate_notice("SM12"));

        sq.expire(t0 + Duration::from_millis(3100));
        assert!(sq.is_empty());
        assert!(sq.latest().is_none());
    }

    #[test]
    fn load_errors_outlive_notices() {
        let mut sq = StatusQueue::new();
        let t0 = Instant::now();
        sq.push(StatusKind::Error, "Could not load statistics", t0);
        sq.push(StatusKind::Info, validate_notice("AAA-2"), t0);

        sq.expire(t0 + Duration::from_millis(3200));
        let latest = sq.latest().unwrap();
        assert_eq!(latest.kind, StatusKind::Error);
        assert_eq!(latest.text, "Could not load statistics");
    }
}
