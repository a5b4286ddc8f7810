use std::io::{self, Write};

use indicatif::{ProgressBar, ProgressStyle};

/// Console lines for the user. A quiet reporter swallows everything.
pub struct Reporter<W: Write> {
    out: W,
    quiet: bool,
}

impl Reporter<io::Stdout> {
    pub fn stdout(quiet: bool) -> Self {
        Reporter::new(io::stdout(), quiet)
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, quiet: bool) -> Self {
        Reporter { out, quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn set_quiet(&mut self, quiet: bool) {
        self.quiet = quiet;
    }

    pub fn info(&mut self, msg: impl AsRef<str>) {
        self.line(format!("[INFO] {}", msg.as_ref()));
    }

    pub fn warning(&mut self, msg: impl AsRef<str>) {
        self.line(format!("[WARNING] {}", msg.as_ref()));
    }

    /// Color set that made it into the palette.
    pub fn accepted(&mut self, set: &str) {
        self.line(format!("\t {} \u{2713}", set));
    }

    /// Color set of the palette that was left out.
    pub fn rejected(&mut self, set: &str) {
        self.line(format!("\t {} \u{2718}", set));
    }

    pub fn line(&mut self, line: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        // Losing a console line is not worth aborting a conversion for.
        let _ = writeln!(self.out, "{}", line.as_ref());
    }

    /// Progress bar for a conversion of `rows` image rows, hidden when quiet.
    pub fn progress_bar(&self, rows: u64) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(rows);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% ({eta}) {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}
