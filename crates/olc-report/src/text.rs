use std::fmt::Display;

/// Line-oriented report builder. Output always ends with a newline.
#[derive(Debug, Clone)]
pub struct ReportText {
    width: usize,
    buf: String,
}

impl ReportText {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            buf: String::new(),
        }
    }

    pub fn line(&mut self, s: impl Display) -> &mut Self {
        self.buf.push_str(&s.to_string());
        self.buf.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    pub fn banner(&mut self) -> &mut Self {
        let bar = "=".repeat(self.width);
        self.line(bar)
    }

    pub fn rule(&mut self) -> &mut Self {
        let bar = "-".repeat(self.width);
        self.line(bar)
    }

    /// Banner, title, banner.
    pub fn section(&mut self, title: &str) -> &mut Self {
        self.banner().line(title).banner()
    }

    /// `... and N more` when a preview hides entries.
    pub fn remainder(&mut self, indent: &str, hidden: usize) -> &mut Self {
        if hidden > 0 {
            self.line(format!("{indent}... and {hidden} more"));
        }
        self
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// Truncate to `max` characters (not bytes).
pub(crate) fn clip(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

pub(crate) fn or_na<T: Display>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_else(|| "N/A".to_string())
}
