pub mod aggregate;
pub mod display;

pub use aggregate::{aggregate_vitals, PairRule, PAIR_RULES};
pub use display::display_name;
