#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    /// Output verbosity.
    ///
    /// `0` prints headers and trees, `1` drops headers, `2` prints summaries only.
    pub quiet: u8,
    /// Disables ANSI colours in terminal output.
    pub no_color: bool,
}
