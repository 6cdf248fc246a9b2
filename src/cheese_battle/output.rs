/// Where player-facing narration and board snapshots go.
///
/// Output is best effort; nothing in the game depends on it being shown.
pub trait DisplaySink {
    fn line(&mut self, text: &str);
}

/// Discards everything, for silent simulations.
#[derive(Debug, Default)]
pub struct NullDisplay;

impl DisplaySink for NullDisplay {
    fn line(&mut self, _text: &str) {}
}

/// Keeps every line in memory.
#[derive(Debug, Default)]
pub struct Transcript {
    pub lines: Vec<String>,
}

impl Transcript {
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

impl DisplaySink for Transcript {
    fn line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}
