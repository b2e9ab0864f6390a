//! Typewriter title: reveals one character every 100 ms, then stays put.

pub const CHAR_INTERVAL_MS: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct Typewriter {
    chars: Vec<char>,
    started_ms: f64,
}

impl Typewriter {
    pub fn new(text: &str, started_ms: f64) -> Self {
        Self {
            chars: text.chars().collect(),
            started_ms,
        }
    }

    /// Characters revealed at `now_ms`.
    pub fn revealed(&self, now_ms: f64) -> usize {
        let elapsed = (now_ms - self.started_ms).max(0.0);
        ((elapsed / CHAR_INTERVAL_MS).floor() as usize).min(self.chars.len())
    }

    pub fn visible(&self, now_ms: f64) -> String {
        self.chars[..self.revealed(now_ms)].iter().collect()
    }
}
