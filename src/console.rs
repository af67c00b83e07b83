//! The in-app console: a scrollback of `> message` lines shown under the
//! command line. Every line is mirrored to `tracing`.

use std::collections::VecDeque;

pub struct Console {
    lines: VecDeque<String>,
    capacity: usize,
}

impl Console {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an informational line.
    pub fn log(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        tracing::info!(target: "console", "{msg}");
        self.push(msg);
    }

    /// Append a diagnostic line.
    pub fn warn(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        tracing::warn!(target: "console", "{msg}");
        self.push(msg);
    }

    fn push(&mut self, msg: String) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(format!("> {msg}"));
    }

    pub fn lines(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }
}
