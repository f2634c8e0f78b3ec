pub mod time_utils;
pub mod validation;

pub use time_utils::{Clock, FixedClock, SystemClock};
pub use validation::{validate_goal_ref, validate_title};
