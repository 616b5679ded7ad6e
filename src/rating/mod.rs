// Star ratings: the five review labels and how averages render as stars

pub use label::{label_to_value, value_to_label, RatingLabel};
pub use stars::{stars_for, StarDisplay};

mod label;
mod stars;
