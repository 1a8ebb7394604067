// Wall-clock source for message timestamps

use chrono::NaiveTime;

pub trait Clock: Send + Sync {
    /// Current local time of day
    fn local_time(&self) -> NaiveTime;
}

/// The machine's local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn local_time(&self) -> NaiveTime {
        chrono::Local::now().time()
    }
}

/// Always reports the same time
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveTime);

impl FixedClock {
    /// `None` when `hour`/`minute` are out of range
    pub fn at(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }
}

impl Clock for FixedClock {
    fn local_time(&self) -> NaiveTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::at(23, 59).unwrap();
        assert_eq!(clock.local_time().format("%H:%M").to_string(), "23:59");
        assert!(FixedClock::at(24, 0).is_none());
        assert!(FixedClock::at(12, 60).is_none());
    }
}
