/*!
Running callbacks on timers.

The clock needs two kinds of timer: a one-shot [`Timer::Align`] that fires at the top of the next minute, and a recurring [`Timer::Tick`] that fires every minute after that. A [`Scheduler`] runs them and hands each firing back to the owner of the [`crate::Ticker`], which passes it to [`crate::Ticker::fire`].
*/

use core::time::Duration;

use crate::Error;

/**
What a timer should do when it fires.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    /**
    Switch from calibrating to ticking on the minute boundary.
    */
    Align,
    /**
    Re-render the clock face.
    */
    Tick,
}

/**
An identifier for a scheduled timer.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    id: i32,
    repeating: bool,
}

impl TimerHandle {
    /**
    A handle for a timer that fires once.
    */
    pub const fn once(id: i32) -> Self {
        TimerHandle {
            id,
            repeating: false,
        }
    }

    /**
    A handle for a timer that fires repeatedly until cancelled.
    */
    pub const fn repeating(id: i32) -> Self {
        TimerHandle {
            id,
            repeating: true,
        }
    }

    /**
    The scheduler-assigned identifier.
    */
    pub const fn id(&self) -> i32 {
        self.id
    }

    /**
    Whether the timer fires repeatedly.
    */
    pub const fn is_repeating(&self) -> bool {
        self.repeating
    }
}

/**
A source of one-shot and recurring timers.

Implementations deliver firings one at a time and never while another call into the [`crate::Ticker`] is running.
*/
pub trait Scheduler {
    /**
    Fire `timer` once after `delay`.
    */
    fn schedule_once(&mut self, delay: Duration, timer: Timer) -> Result<TimerHandle, Error>;

    /**
    Fire `timer` every `period` until cancelled.
    */
    fn schedule_repeating(&mut self, period: Duration, timer: Timer)
        -> Result<TimerHandle, Error>;

    /**
    Cancel a timer.

    Cancelling a timer that has already fired or been cancelled does nothing.
    */
    fn cancel(&mut self, handle: TimerHandle);
}

impl<'a, T: Scheduler + ?Sized> Scheduler for &'a mut T {
    fn schedule_once(&mut self, delay: Duration, timer: Timer) -> Result<TimerHandle, Error> {
        (**self).schedule_once(delay, timer)
    }

    fn schedule_repeating(
        &mut self,
        period: Duration,
        timer: Timer,
    ) -> Result<TimerHandle, Error> {
        (**self).schedule_repeating(period, timer)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        (**self).cancel(handle)
    }
}

impl<T: Scheduler + ?Sized> Scheduler for Box<T> {
    fn schedule_once(&mut self, delay: Duration, timer: Timer) -> Result<TimerHandle, Error> {
        (**self).schedule_once(delay, timer)
    }

    fn schedule_repeating(
        &mut self,
        period: Duration,
        timer: Timer,
    ) -> Result<TimerHandle, Error> {
        (**self).schedule_repeating(period, timer)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        (**self).cancel(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::test_support::FakeScheduler;

    #[test]
    fn handles_remember_their_kind() {
        assert!(!TimerHandle::once(1).is_repeating());
        assert!(TimerHandle::repeating(1).is_repeating());

        assert_ne!(TimerHandle::once(1), TimerHandle::repeating(1));
    }

    #[test]
    fn boxed_scheduler_forwards() {
        let scheduler = FakeScheduler::new();
        let mut boxed: Box<dyn Scheduler> = Box::new(scheduler.clone());

        let once = boxed
            .schedule_once(Duration::from_secs(15), Timer::Align)
            .unwrap();
        let repeating = boxed
            .schedule_repeating(Duration::from_secs(60), Timer::Tick)
            .unwrap();

        assert_eq!(2, scheduler.active());

        boxed.cancel(once);
        boxed.cancel(once);

        assert_eq!(1, scheduler.active());
        assert_eq!(1, scheduler.active_repeating());

        boxed.cancel(repeating);

        assert_eq!(0, scheduler.active());
    }
}
