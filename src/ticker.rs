/*!
The [`Ticker`] type.

A ticker moves between three phases:

```text
                 calibrate()                 Timer::Align
Uninitialized ──────────────► Calibrating ──────────────────► Ticking
                                   ▲                             │
                                   └─────────────────────────────┘
                                     on_focus() with a stale face
```

While calibrating, the correct face is already displayed and a one-shot [`Timer::Align`] is pending for the top of the next minute. When it fires, [`Ticker::start_clock`] replaces it with a recurring [`Timer::Tick`] every 60 seconds.
*/

use core::time::Duration;
use std::sync::Arc;

use crate::{
    face::DEFAULT_ASSET_DIR,
    internal_metrics::InternalMetrics,
    schedule::{Scheduler, Timer, TimerHandle},
    setup::DEFAULT_ELEMENT_ID,
    surface::{Document, Surface},
    time::LocalClock,
    ClockMetrics, Error,
};

/**
How often the clock ticks once aligned to the minute boundary.
*/
pub const TICK_PERIOD: Duration = Duration::from_secs(60);

/**
The lifecycle phase of a [`Ticker`].
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /**
    The ticker hasn't been calibrated yet.
    */
    Uninitialized,
    /**
    The ticker is waiting for the top of the next minute.
    */
    Calibrating,
    /**
    The ticker is re-rendering the face every minute.
    */
    Ticking,
    /**
    The ticker has been disposed and won't do anything else.
    */
    Disposed,
}

/**
Keeps a clock element showing the face for the current local time.

The ticker owns all of the clock's state. It doesn't run any timers itself; it asks its [`Scheduler`] for them, and expects each firing to be passed back to [`Ticker::fire`]. Focus changes of the page are passed to [`Ticker::on_blur`] and [`Ticker::on_focus`].
*/
pub struct Ticker<TDocument: Document, TClock, TScheduler> {
    element_id: String,
    asset_dir: String,
    document: TDocument,
    clock: TClock,
    scheduler: TScheduler,
    surface: Option<Surface<TDocument::Element>>,
    tick_handle: Option<TimerHandle>,
    calibrate_handle: Option<TimerHandle>,
    background_count: usize,
    phase: Phase,
    metrics: Arc<InternalMetrics>,
}

impl<TDocument: Document, TClock: LocalClock, TScheduler: Scheduler>
    Ticker<TDocument, TClock, TScheduler>
{
    /**
    Create a ticker for the default element and asset directory.

    The ticker does nothing until [`Ticker::calibrate`] is called. Use [`crate::setup`] to configure the element and asset directory.
    */
    pub fn new(document: TDocument, clock: TClock, scheduler: TScheduler) -> Self {
        Self::with_config(
            DEFAULT_ELEMENT_ID.into(),
            DEFAULT_ASSET_DIR.into(),
            document,
            clock,
            scheduler,
        )
    }

    pub(crate) fn with_config(
        element_id: String,
        asset_dir: String,
        document: TDocument,
        clock: TClock,
        scheduler: TScheduler,
    ) -> Self {
        Ticker {
            element_id,
            asset_dir,
            document,
            clock,
            scheduler,
            surface: None,
            tick_handle: None,
            calibrate_handle: None,
            background_count: 0,
            phase: Phase::Uninitialized,
            metrics: Default::default(),
        }
    }

    /**
    Find the clock element, display the current face, and schedule alignment to the top of the next minute.

    If the element can't be found, a diagnostic is emitted and the clock displays nothing until it's re-calibrated.

    This method fails if the alignment timer can't be scheduled. The current face is still displayed in that case.
    */
    pub fn calibrate(&mut self) -> Result<(), Error> {
        if self.phase == Phase::Disposed {
            return Ok(());
        }

        let element_id = &*self.element_id;
        emit::debug!("calibrating the clock on {element_id}", element_id);

        self.metrics.calibrate.increment();

        self.surface = self.document.find(element_id).map(Surface::new);
        if self.surface.is_none() {
            self.metrics.element_missing.increment();

            emit::warn!(
                "clock element {element_id} wasn't found; the clock won't display until it's re-calibrated",
                element_id,
            );
        }

        if let Some(pending) = self.calibrate_handle.take() {
            self.scheduler.cancel(pending);
        }

        let delay = self.clock.now().until_next_minute();
        let scheduled = match self.scheduler.schedule_once(delay, Timer::Align) {
            Ok(handle) => {
                let delay_ms = delay.as_millis() as u64;
                emit::debug!("aligning the clock in {delay_ms}ms", delay_ms);

                self.calibrate_handle = Some(handle);
                self.phase = Phase::Calibrating;

                Ok(())
            }
            Err(err) => {
                self.metrics.schedule_failed.increment();

                emit::warn!("failed to schedule clock alignment: {err}", err);

                Err(err)
            }
        };

        self.tick();

        scheduled
    }

    /**
    Start ticking every minute.

    Any recurring tick or pending alignment is cancelled first, so only a single recurring tick is ever active. The current face is displayed immediately.
    */
    pub fn start_clock(&mut self) -> Result<(), Error> {
        if self.phase == Phase::Disposed {
            return Ok(());
        }

        self.stop_clock();

        if let Some(pending) = self.calibrate_handle.take() {
            self.scheduler.cancel(pending);
        }

        self.tick();

        match self.scheduler.schedule_repeating(TICK_PERIOD, Timer::Tick) {
            Ok(handle) => {
                self.tick_handle = Some(handle);
                self.phase = Phase::Ticking;

                Ok(())
            }
            Err(err) => {
                self.metrics.schedule_failed.increment();

                emit::warn!("failed to schedule clock ticks: {err}", err);

                Err(err)
            }
        }
    }

    /**
    Cancel the recurring tick.

    This method returns `true` if a tick was active.
    */
    pub fn stop_clock(&mut self) -> bool {
        match self.tick_handle.take() {
            Some(handle) => {
                self.scheduler.cancel(handle);
                true
            }
            None => false,
        }
    }

    /**
    Display the face for the current time.

    Failures are reported as diagnostics instead of being returned; a broken face is fixed by the next tick or re-calibration.
    */
    pub fn tick(&mut self) {
        if self.phase == Phase::Disposed {
            return;
        }

        let path = self.clock.now().face().path(&self.asset_dir);

        let Some(surface) = self.surface.as_mut() else {
            emit::warn!(
                "clock element is missing; not changing clock to {path}",
                #[emit::as_display]
                path,
            );

            return;
        };

        emit::debug!("changing clock to {path}", #[emit::as_display] path);

        match surface.render(&path.to_string()) {
            Ok(()) => self.metrics.tick.increment(),
            Err(err) => {
                self.metrics.render_failed.increment();

                emit::warn!(
                    "failed to change clock to {path}: {err}",
                    #[emit::as_display]
                    path,
                    err,
                );
            }
        }
    }

    /**
    Whether the displayed face matches the current time.

    This method returns `false` if the clock element is missing or doesn't display anything.
    */
    pub fn validate_clock(&self) -> bool {
        let Some(displayed) = self.surface.as_ref().and_then(|surface| surface.source()) else {
            return false;
        };

        self.clock
            .now()
            .face()
            .path(&self.asset_dir)
            .matches(&displayed)
    }

    /**
    The page lost focus.
    */
    pub fn on_blur(&mut self) {
        if self.phase == Phase::Disposed {
            return;
        }

        self.background_count = self.background_count.saturating_add(1);
    }

    /**
    The page gained focus.

    If the page lost focus since the last check, the displayed face is validated and the clock is re-calibrated if it's stale. Timers are commonly suspended for pages in the background, so the clock may have stopped ticking.
    */
    pub fn on_focus(&mut self) -> Result<(), Error> {
        if self.phase == Phase::Disposed || self.background_count == 0 {
            return Ok(());
        }

        self.background_count = 0;
        self.metrics.focus_regained.increment();

        emit::debug!("focus regained; validating that the clock didn't fall out of sync in the background");

        if self.validate_clock() {
            emit::debug!("the clock is in sync");

            return Ok(());
        }

        self.metrics.resync.increment();

        emit::info!("the clock fell out of sync in the background; re-calibrating");

        self.calibrate()
    }

    /**
    Run a timer that was scheduled through this ticker's [`Scheduler`].
    */
    pub fn fire(&mut self, timer: Timer) -> Result<(), Error> {
        match timer {
            Timer::Align => self.start_clock(),
            Timer::Tick => {
                self.tick();

                Ok(())
            }
        }
    }

    /**
    Cancel all timers and release the clock element.

    After this call, every other method does nothing.
    */
    pub fn dispose(&mut self) {
        if self.phase == Phase::Disposed {
            return;
        }

        self.stop_clock();

        if let Some(pending) = self.calibrate_handle.take() {
            self.scheduler.cancel(pending);
        }

        self.surface = None;
        self.background_count = 0;
        self.phase = Phase::Disposed;

        emit::debug!("disposed the clock");
    }

    /**
    The path of the face for the current time.
    */
    pub fn expected_path(&self) -> String {
        self.clock
            .now()
            .face()
            .path(&self.asset_dir)
            .to_string()
    }

    /**
    The current lifecycle phase.
    */
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /**
    How many times the page lost focus since it was last validated.
    */
    pub fn background_count(&self) -> usize {
        self.background_count
    }

    /**
    Whether a recurring tick is active.
    */
    pub fn is_ticking(&self) -> bool {
        self.tick_handle.is_some()
    }

    /**
    Whether an alignment timer is pending.
    */
    pub fn is_calibrating(&self) -> bool {
        self.calibrate_handle.is_some()
    }

    /**
    Whether the clock element was found during the last calibration.
    */
    pub fn has_element(&self) -> bool {
        self.surface.is_some()
    }

    /**
    The id of the clock element.
    */
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /**
    The directory faces are loaded from.
    */
    pub fn asset_dir(&self) -> &str {
        &self.asset_dir
    }

    /**
    Get a [`emit::metric::Source`] for instrumentation produced by the clock.
    */
    pub fn metric_source(&self) -> ClockMetrics {
        ClockMetrics {
            metrics: self.metrics.clone(),
        }
    }
}
