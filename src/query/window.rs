/// Relative time window appended to every query as a `start:-Nm` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    minutes: u32,
}

impl TimeWindow {
    /// Builds a window from the CLI flags. Days take precedence over minutes;
    /// at most one clause is ever produced.
    pub fn from_args(days: Option<u32>, minutes: Option<u32>) -> Option<Self> {
        match (days, minutes) {
            (Some(days), _) => Some(Self {
                minutes: days * 1440,
            }),
            (None, Some(minutes)) => Some(Self { minutes }),
            (None, None) => None,
        }
    }

    /// The clause appended verbatim to a query string, leading space included.
    pub fn clause(&self) -> String {
        format!(" start:-{}m", self.minutes)
    }
}
