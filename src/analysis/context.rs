//! Local layout signals around a line.

/// Signals computed from the neighbourhood of a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineContext {
    /// Number of short non-blank lines within the window
    pub short_lines_nearby: usize,
}

impl LineContext {
    /// Context with no neighbours, used when a line is judged in isolation.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the neighbourhood looks like a form or address block.
    pub fn is_dense(&self, threshold: usize) -> bool {
        self.short_lines_nearby >= threshold
    }
}

/// Counts short lines around a position on a page.
#[derive(Debug, Clone, Copy)]
pub struct ContextAnalyzer {
    radius: usize,
    short_line_max_words: usize,
}

impl ContextAnalyzer {
    /// Create an analyzer with a window radius and a short-line word limit.
    pub fn new(radius: usize, short_line_max_words: usize) -> Self {
        Self {
            radius,
            short_line_max_words,
        }
    }

    /// Analyze the window `[index - radius, index + radius]` of a page.
    pub fn analyze<S: AsRef<str>>(&self, lines: &[S], index: usize) -> LineContext {
        let start = index.saturating_sub(self.radius);
        let end = (index + self.radius + 1).min(lines.len());

        let short_lines_nearby = (start..end)
            .filter(|&i| i != index)
            .map(|i| lines[i].as_ref())
            .filter(|line| !line.trim().is_empty())
            .filter(|line| line.split_whitespace().count() <= self.short_line_max_words)
            .count();

        LineContext { short_lines_nearby }
    }
}

impl Default for ContextAnalyzer {
    fn default() -> Self {
        Self::new(3, 6)
    }
}
