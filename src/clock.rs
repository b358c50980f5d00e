use std::fmt::Debug;

use chrono::prelude::*;

pub type Timestamp = DateTime<Local>;

pub trait Clock: Debug {
    fn now(&self) -> Timestamp;
}

#[derive(Debug, Default)]
pub struct RealClock;

impl RealClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for RealClock {
    fn now(&self) -> Timestamp {
        Local::now()
    }
}

#[cfg(test)]
pub use fake::*;

#[cfg(test)]
mod fake {
    use super::{Clock, Timestamp};

    /// Fake clock that always returns the instant it was created with.
    #[derive(Clone, Debug)]
    pub struct FixedClock(pub Timestamp);

    impl Clock for FixedClock {
        fn now(&self) -> Timestamp {
            self.0
        }
    }
}
