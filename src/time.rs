/*!
Reading the local time of day.

The clock only cares about the wall-clock time in the viewer's time zone, at second precision. [`WallTime`] is that reading, and [`LocalClock`] is the source of it.
*/

use core::{fmt, time::Duration};

use crate::face::Face;

/**
A local time of day, at second precision.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WallTime {
    hour: u8,
    minute: u8,
    second: u8,
}

impl WallTime {
    /**
    The first second of the day.
    */
    pub const MIDNIGHT: WallTime = WallTime {
        hour: 0,
        minute: 0,
        second: 0,
    };

    /**
    Create a time of day from its components.

    This method returns `None` if `hour` isn't in `0..=23`, or `minute` or `second` aren't in `0..=59`.
    */
    pub const fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }

        Some(WallTime {
            hour,
            minute,
            second,
        })
    }

    /**
    Create a time of day from a number of seconds since midnight.

    Values past the end of the day wrap around.
    */
    pub const fn from_secs_of_day(secs: u64) -> Self {
        let secs = secs % 86_400;

        WallTime {
            hour: (secs / 3_600) as u8,
            minute: ((secs / 60) % 60) as u8,
            second: (secs % 60) as u8,
        }
    }

    /**
    The hour of the day, in `0..=23`.
    */
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /**
    The minute of the hour, in `0..=59`.
    */
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /**
    The second of the minute, in `0..=59`.
    */
    pub const fn second(&self) -> u8 {
        self.second
    }

    /**
    The clock face showing this time.
    */
    pub const fn face(&self) -> Face {
        Face::new_unchecked(self.hour, self.minute)
    }

    /**
    How long until the next minute boundary.

    This is always between 1 and 60 seconds. Sub-second precision is ignored, so a reading taken at the very top of a minute waits a full minute.
    */
    pub const fn until_next_minute(&self) -> Duration {
        Duration::from_millis((60 - self.second as u64) * 1_000)
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/**
A source of the current local time of day.
*/
pub trait LocalClock {
    /**
    Read the current local time of day.
    */
    fn now(&self) -> WallTime;
}

impl<'a, T: LocalClock + ?Sized> LocalClock for &'a T {
    fn now(&self) -> WallTime {
        (**self).now()
    }
}

impl<T: LocalClock + ?Sized> LocalClock for Box<T> {
    fn now(&self) -> WallTime {
        (**self).now()
    }
}

/**
Create a [`LocalClock`] from a function.
*/
pub fn from_fn<F: Fn() -> WallTime>(f: F) -> FromFn<F> {
    FromFn(f)
}

/**
A [`LocalClock`] created from a function.
*/
pub struct FromFn<F = fn() -> WallTime>(F);

impl<F: Fn() -> WallTime> LocalClock for FromFn<F> {
    fn now(&self) -> WallTime {
        (self.0)()
    }
}
