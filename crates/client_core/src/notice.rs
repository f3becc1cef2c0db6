use std::time::{Duration, Instant};

pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Notice {
    message: String,
    expires_at: Instant,
}

/// The single error line under the form. Each message carries its own expiry,
/// so a newer message is never cut short by an older one's timer.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    current: Option<Notice>,
}

impl NoticeBoard {
    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        self.current = Some(Notice {
            message: message.into(),
            expires_at: now + NOTICE_TTL,
        });
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn visible(&self, now: Instant) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|notice| now < notice.expires_at)
            .map(|notice| notice.message.as_str())
    }

    /// Drops an expired message. Returns true when something was removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|notice| now >= notice.expires_at);
        if expired {
            self.current = None;
        }
        expired
    }
}
