//! Transient notifications (toasts).

/// How many notifications stay on screen at once.
pub const MAX_VISIBLE: usize = 5;
/// Milliseconds before a notification dismisses itself.
pub const AUTO_DISMISS_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Error,
    Success,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    next_id: u64,
    items: Vec<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a notification, evicting the oldest beyond [`MAX_VISIBLE`].
    pub fn push(&mut self, kind: NotificationKind, content: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.items.push(Notification {
            id: self.next_id,
            kind,
            content: content.into(),
        });
        if self.items.len() > MAX_VISIBLE {
            let excess = self.items.len() - MAX_VISIBLE;
            self.items.drain(..excess);
        }
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut q = NotificationQueue::new();
        let a = q.push(NotificationKind::Error, "a");
        let b = q.push(NotificationKind::Info, "b");
        assert_ne!(a, b);
        assert!(q.dismiss(a));
        assert!(!q.dismiss(a));
        assert_eq!(q.items().len(), 1);
        assert_eq!(q.items()[0].content, "b");
    }

    #[test]
    fn test_oldest_evicted() {
        let mut q = NotificationQueue::new();
        for i in 0..(MAX_VISIBLE + 2) {
            q.push(NotificationKind::Error, format!("n{i}"));
        }
        assert_eq!(q.items().len(), MAX_VISIBLE);
        assert_eq!(q.items()[0].content, "n2");
    }
}
