use std::fmt;

/// Lookback window of an open-interest change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    M5,
    M15,
    M30,
    H1,
    H2,
    H4,
    H6,
    H12,
}

impl Interval {
    pub const ALL: [Interval; 8] = [
        Interval::M5,
        Interval::M15,
        Interval::M30,
        Interval::H1,
        Interval::H2,
        Interval::H4,
        Interval::H6,
        Interval::H12,
    ];

    /// Baseline interval, never shown as a column.
    pub const BASELINE: Interval = Interval::M5;

    pub fn label(&self) -> &'static str {
        match self {
            Interval::M5 => "5m",
            Interval::M15 => "15m",
            Interval::M30 => "30m",
            Interval::H1 => "1h",
            Interval::H2 => "2h",
            Interval::H4 => "4h",
            Interval::H6 => "6h",
            Interval::H12 => "12h",
        }
    }

    /// Intervals rendered as table columns, in column order.
    pub fn displayed() -> impl Iterator<Item = Interval> {
        Self::ALL
            .into_iter()
            .filter(|interval| *interval != Self::BASELINE)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
