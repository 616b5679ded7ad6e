use serde::Serialize;

const MAX_STARS: u8 = 5;

/// How an average rating renders: full, half and empty star slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarDisplay {
    pub full: u8,
    pub half: u8,
    pub empty: u8,
}

impl StarDisplay {
    pub fn total(&self) -> u8 {
        self.full + self.half + self.empty
    }
}

/// Splits an average rating into star slots that always sum to five.
///
/// Input is clamped to `[0, 5]`; NaN renders as no stars.
pub fn stars_for(average_rating: f64) -> StarDisplay {
    let rating = if average_rating.is_nan() {
        0.0
    } else {
        average_rating.clamp(0.0, MAX_STARS as f64)
    };

    let full = rating.floor() as u8;
    let half = if full < MAX_STARS && rating.fract() >= 0.5 {
        1
    } else {
        0
    };

    StarDisplay {
        full,
        half,
        empty: MAX_STARS - full - half,
    }
}
