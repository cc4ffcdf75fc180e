use std::{
    cell::{Cell, RefCell},
    cmp,
    collections::BTreeMap,
    rc::Rc,
    time::Duration,
};

use crate::{
    schedule::{Scheduler, Timer, TimerHandle},
    surface::{Document, Element, DATA_ATTRIBUTE},
    ticker::Ticker,
    time::{LocalClock, WallTime},
    Error,
};

/**
A clock that only moves when told to.

Time is kept in milliseconds since midnight of the first day; readings wrap each day.
*/
#[derive(Clone, Default)]
pub(crate) struct FakeClock {
    millis: Rc<Cell<u64>>,
}

impl FakeClock {
    pub fn new() -> Self {
        FakeClock::default()
    }

    pub fn at(time: WallTime) -> Self {
        let clock = FakeClock::new();
        clock.set_millis(
            (time.hour() as u64 * 3_600 + time.minute() as u64 * 60 + time.second() as u64)
                * 1_000,
        );

        clock
    }

    pub fn millis(&self) -> u64 {
        self.millis.get()
    }

    pub fn set_millis(&self, millis: u64) {
        self.millis.set(millis);
    }

    pub fn advance(&self, by: Duration) {
        self.millis.set(self.millis.get() + by.as_millis() as u64);
    }
}

impl LocalClock for FakeClock {
    fn now(&self) -> WallTime {
        WallTime::from_secs_of_day(self.millis.get() / 1_000)
    }
}

struct Scheduled {
    handle: TimerHandle,
    timer: Timer,
    delay: Duration,
    due: u64,
}

#[derive(Default)]
struct SchedulerState {
    next_id: i32,
    scheduled: Vec<Scheduled>,
    fail: bool,
}

/**
A scheduler that records timers instead of running them.

Timers are fired by [`advance`].
*/
#[derive(Clone, Default)]
pub(crate) struct FakeScheduler {
    clock: FakeClock,
    state: Rc<RefCell<SchedulerState>>,
}

impl FakeScheduler {
    pub fn new() -> Self {
        FakeScheduler::default()
    }

    pub fn with_clock(clock: FakeClock) -> Self {
        FakeScheduler {
            clock,
            state: Default::default(),
        }
    }

    pub fn fail_schedules(&self, fail: bool) {
        self.state.borrow_mut().fail = fail;
    }

    pub fn active(&self) -> usize {
        self.state.borrow().scheduled.len()
    }

    pub fn active_once(&self) -> usize {
        self.active() - self.active_repeating()
    }

    pub fn active_repeating(&self) -> usize {
        self.state
            .borrow()
            .scheduled
            .iter()
            .filter(|scheduled| scheduled.handle.is_repeating())
            .count()
    }

    /**
    The delay the earliest pending timer was scheduled with.
    */
    pub fn next_delay(&self) -> Option<Duration> {
        self.state
            .borrow()
            .scheduled
            .iter()
            .min_by_key(|scheduled| scheduled.due)
            .map(|scheduled| scheduled.delay)
    }

    /**
    Take the earliest timer due at or before `until`.

    Repeating timers are rescheduled for their next period.
    */
    fn take_due(&self, until: u64) -> Option<(u64, Timer)> {
        let mut state = self.state.borrow_mut();

        let (idx, due) = state
            .scheduled
            .iter()
            .enumerate()
            .filter(|(_, scheduled)| scheduled.due <= until)
            .min_by_key(|(_, scheduled)| scheduled.due)
            .map(|(idx, scheduled)| (idx, scheduled.due))?;

        let scheduled = &mut state.scheduled[idx];
        let timer = scheduled.timer;

        if scheduled.handle.is_repeating() {
            scheduled.due += scheduled.delay.as_millis() as u64;
        } else {
            state.scheduled.remove(idx);
        }

        Some((due, timer))
    }

    fn schedule(
        &mut self,
        delay: Duration,
        timer: Timer,
        repeating: bool,
    ) -> Result<TimerHandle, Error> {
        let mut state = self.state.borrow_mut();

        if state.fail {
            return Err(Error::new("scheduling is unavailable"));
        }

        state.next_id += 1;
        let handle = if repeating {
            TimerHandle::repeating(state.next_id)
        } else {
            TimerHandle::once(state.next_id)
        };

        state.scheduled.push(Scheduled {
            handle,
            timer,
            delay,
            due: self.clock.millis() + delay.as_millis() as u64,
        });

        Ok(handle)
    }
}

impl Scheduler for FakeScheduler {
    fn schedule_once(&mut self, delay: Duration, timer: Timer) -> Result<TimerHandle, Error> {
        self.schedule(delay, timer, false)
    }

    fn schedule_repeating(
        &mut self,
        period: Duration,
        timer: Timer,
    ) -> Result<TimerHandle, Error> {
        self.schedule(period, timer, true)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.state
            .borrow_mut()
            .scheduled
            .retain(|scheduled| scheduled.handle != handle);
    }
}

/**
Move `clock` forward by `by`, firing every timer that comes due along the way.

Overdue timers fire at the current time rather than moving the clock backwards.
*/
pub(crate) fn advance(
    ticker: &mut Ticker<FakeDocument, FakeClock, FakeScheduler>,
    clock: &FakeClock,
    scheduler: &FakeScheduler,
    by: Duration,
) {
    let until = clock.millis() + by.as_millis() as u64;

    while let Some((due, timer)) = scheduler.take_due(until) {
        clock.set_millis(cmp::max(clock.millis(), due));

        ticker.fire(timer).expect("failed to fire timer");
    }

    clock.set_millis(until);
}

#[derive(Default)]
struct ElementState {
    attributes: BTreeMap<String, String>,
    writes: Vec<(String, String)>,
    fail: bool,
}

/**
An element that records attribute writes.
*/
#[derive(Clone, Default)]
pub(crate) struct FakeElement {
    state: Rc<RefCell<ElementState>>,
}

impl FakeElement {
    pub fn new() -> Self {
        FakeElement::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.state.borrow_mut().fail = fail;
    }

    pub fn data(&self) -> Option<String> {
        self.attribute(DATA_ATTRIBUTE)
    }

    pub fn writes(&self) -> Vec<(String, String)> {
        self.state.borrow().writes.clone()
    }
}

impl Element for FakeElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.state.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), Error> {
        let mut state = self.state.borrow_mut();

        if state.fail {
            return Err(Error::new("the element is read-only"));
        }

        state.attributes.insert(name.to_owned(), value.to_owned());
        state.writes.push((name.to_owned(), value.to_owned()));

        Ok(())
    }
}

/**
A page containing any number of [`FakeElement`]s.
*/
#[derive(Clone, Default)]
pub(crate) struct FakeDocument {
    elements: Rc<RefCell<BTreeMap<String, FakeElement>>>,
}

impl FakeDocument {
    pub fn new() -> Self {
        FakeDocument::default()
    }

    pub fn with_element(id: &str, element: FakeElement) -> Self {
        let document = FakeDocument::new();
        document.insert(id, element);

        document
    }

    pub fn insert(&self, id: &str, element: FakeElement) {
        self.elements.borrow_mut().insert(id.to_owned(), element);
    }

    pub fn remove(&self, id: &str) {
        self.elements.borrow_mut().remove(id);
    }
}

impl Document for FakeDocument {
    type Element = FakeElement;

    fn find(&self, id: &str) -> Option<FakeElement> {
        self.elements.borrow().get(id).cloned()
    }
}
