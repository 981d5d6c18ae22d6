use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Excellent,
    Good,
    Poor,
    Neutral,
    NonNumeric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
    BandedPercentage,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Higher-is-better: `>= excellent_min` is excellent, `>= good_min` is good.
    pub higher_excellent_min: f64,
    pub higher_good_min: f64,
    /// Lower-is-better: `<= excellent_max` is excellent, `<= good_max` is good.
    pub lower_excellent_max: f64,
    pub lower_good_max: f64,
    /// Banded: inside `band_excellent` is excellent; `[good_floor, band_excellent.0)`
    /// or `(band_excellent.1, good_ceiling]` is good.
    pub band_excellent: (f64, f64),
    pub band_good_floor: f64,
    pub band_good_ceiling: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            higher_excellent_min: 80.0,
            higher_good_min: 60.0,
            lower_excellent_max: 2.0,
            lower_good_max: 4.0,
            band_excellent: (70.0, 90.0),
            band_good_floor: 50.0,
            band_good_ceiling: 95.0,
        }
    }
}

const HIGHER_IS_BETTER: &[&str] = &[
    "K%", "K", "Whiff%", "Plus%", "TPLUS%", "FPS%", "IP", "K:BB", "K:F$", "k/9", "Ahead%", "E+A%",
];

const LOWER_IS_BETTER: &[&str] = &[
    "ERA", "WHIP", "FWHIP", "BB%", "BAA", "BACON", "ER", "BB", "HBP", "H", "bb/9", "h/9",
];

const BANDED_PERCENTAGE: &[&str] = &[
    "S%",
    "FB S%",
    "OS S%",
    "FB CSW",
    "OS CSW",
    "SL CSW",
    "CH/SPL CSW",
    "CB CSW",
    "CT CSW",
    "FB%",
    "Out%",
    "Out% RHB",
    "Out% LHB",
    "ZONE%",
    "Swing%",
    "FRB%",
    "Early%",
];

/// Which columns are classified and how. Immutable once built; callers hold it by value
/// and pass references into [`classify`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationPolicy {
    higher_is_better: HashSet<String>,
    lower_is_better: HashSet<String>,
    banded_percentage: HashSet<String>,
    thresholds: Thresholds,
}

impl Default for ClassificationPolicy {
    fn default() -> Self {
        Self::new(
            HIGHER_IS_BETTER,
            LOWER_IS_BETTER,
            BANDED_PERCENTAGE,
            Thresholds::default(),
        )
    }
}

impl ClassificationPolicy {
    pub fn new(
        higher_is_better: &[&str],
        lower_is_better: &[&str],
        banded_percentage: &[&str],
        thresholds: Thresholds,
    ) -> Self {
        Self {
            higher_is_better: to_set(higher_is_better),
            lower_is_better: to_set(lower_is_better),
            banded_percentage: to_set(banded_percentage),
            thresholds,
        }
    }

    /// Direction for a column; higher-is-better wins if a label sits in several sets.
    pub fn direction(&self, label: &str) -> Option<Direction> {
        if self.higher_is_better.contains(label) {
            Some(Direction::HigherIsBetter)
        } else if self.lower_is_better.contains(label) {
            Some(Direction::LowerIsBetter)
        } else if self.banded_percentage.contains(label) {
            Some(Direction::BandedPercentage)
        } else {
            None
        }
    }
}

/// Parses a stat cell: surrounding whitespace and one trailing `%` are ignored.
/// Non-finite values are treated as unparseable.
pub fn parse_stat_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let body = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    body.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn classify(policy: &ClassificationPolicy, label: &str, value: &str) -> Tier {
    let Some(v) = parse_stat_value(value) else {
        return Tier::NonNumeric;
    };
    let t = &policy.thresholds;
    match policy.direction(label) {
        Some(Direction::HigherIsBetter) => {
            if v >= t.higher_excellent_min {
                Tier::Excellent
            } else if v >= t.higher_good_min {
                Tier::Good
            } else {
                Tier::Poor
            }
        }
        Some(Direction::LowerIsBetter) => {
            if v <= t.lower_excellent_max {
                Tier::Excellent
            } else if v <= t.lower_good_max {
                Tier::Good
            } else {
                Tier::Poor
            }
        }
        Some(Direction::BandedPercentage) => {
            let (lo, hi) = t.band_excellent;
            if (lo..=hi).contains(&v) {
                Tier::Excellent
            } else if (t.band_good_floor..lo).contains(&v)
                || (v > hi && v <= t.band_good_ceiling)
            {
                Tier::Good
            } else {
                Tier::Poor
            }
        }
        None => Tier::Neutral,
    }
}

fn to_set(labels: &[&str]) -> HashSet<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

pub fn tier_label(tier: Tier) -> &'static str {
    match tier {
        Tier::Excellent => "Excellent",
        Tier::Good => "Good",
        Tier::Poor => "Needs work",
        Tier::Neutral => "Other stat",
        Tier::NonNumeric => "Info",
    }
}
