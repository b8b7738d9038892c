pub mod time_utils;
pub mod validation;

pub use time_utils::{now_naive, Clock, FixedClock, SystemClock};
