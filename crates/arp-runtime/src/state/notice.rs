//! Short-lived status messages

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub expires_at: f64,
}

/// Messages that disappear after a fixed lifetime
#[derive(Debug, Clone)]
pub struct Notices {
    lifetime: f64,
    items: Vec<Notice>,
}

impl Notices {
    pub fn new(lifetime: f64) -> Self {
        Self {
            lifetime: lifetime.max(0.0),
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, level: NoticeLevel, text: impl Into<String>, now: f64) {
        self.items.push(Notice {
            level,
            text: text.into(),
            expires_at: now + self.lifetime,
        });
    }

    /// Drop notices whose lifetime is over
    pub fn expire(&mut self, now: f64) {
        self.items.retain(|n| now < n.expires_at);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.items.last()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
