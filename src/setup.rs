/*!
The [`Setup`] type.

Configure a clock with [`crate::setup()`]:

```
# use sandial::{surface::{Document, Element}, Error, Scheduler, Timer, TimerHandle, WallTime};
# struct Page;
# struct Object;
# impl Element for Object {
#     fn attribute(&self, _: &str) -> Option<String> { None }
#     fn set_attribute(&mut self, _: &str, _: &str) -> Result<(), Error> { Ok(()) }
# }
# impl Document for Page {
#     type Element = Object;
#     fn find(&self, _: &str) -> Option<Object> { Some(Object) }
# }
# struct Timers;
# impl Scheduler for Timers {
#     fn schedule_once(&mut self, _: std::time::Duration, _: Timer) -> Result<TimerHandle, Error> { Ok(TimerHandle::once(1)) }
#     fn schedule_repeating(&mut self, _: std::time::Duration, _: Timer) -> Result<TimerHandle, Error> { Ok(TimerHandle::repeating(2)) }
#     fn cancel(&mut self, _: TimerHandle) {}
# }
let mut ticker = sandial::setup()
    .element_id("lobby-clock")
    .asset_dir("static/clocks")
    .build(Page, sandial::time::from_fn(|| WallTime::MIDNIGHT), Timers);

ticker.calibrate()?;

assert_eq!("static/clocks/clock_00_00.svg", ticker.expected_path());
# Ok::<(), sandial::Error>(())
```

In a browser, call `Setup::install` instead of [`Setup::build`] to run the clock on the page's own timers and focus events.
*/

use crate::{
    face::DEFAULT_ASSET_DIR, schedule::Scheduler, surface::Document, ticker::Ticker,
    time::LocalClock,
};

/**
The id of the clock element when none is configured.
*/
pub const DEFAULT_ELEMENT_ID: &str = "sandial-clock-img";

/**
Configure a clock.

This function returns a [`Setup`] builder that, once configured, can be finished with a call to [`Setup::build`], or `Setup::install` in a browser.
*/
pub fn setup() -> Setup {
    Setup::default()
}

/**
A configuration builder for a clock.
*/
#[must_use = "call `.build()` or `.install()` to finish setup"]
#[derive(Debug, Clone)]
pub struct Setup {
    pub(crate) element_id: String,
    pub(crate) asset_dir: String,
}

impl Default for Setup {
    fn default() -> Self {
        Self::new()
    }
}

impl Setup {
    /**
    Create a new builder with the default element id and asset directory.
    */
    pub fn new() -> Self {
        Setup {
            element_id: DEFAULT_ELEMENT_ID.into(),
            asset_dir: DEFAULT_ASSET_DIR.into(),
        }
    }

    /**
    Set the id of the `<object>` element that displays the clock.

    The default is `sandial-clock-img`.
    */
    pub fn element_id(mut self, element_id: impl Into<String>) -> Self {
        self.element_id = element_id.into();
        self
    }

    /**
    Set the directory clock faces are loaded from, relative to the page.

    The default is `clocks`. Trailing `/`s are ignored, so `""` and `"/"` both load faces from the page's own directory.
    */
    pub fn asset_dir(mut self, asset_dir: impl Into<String>) -> Self {
        let mut asset_dir = asset_dir.into();

        while asset_dir.ends_with('/') {
            asset_dir.pop();
        }

        self.asset_dir = asset_dir;
        self
    }

    /**
    Finish the builder, returning an uncalibrated [`Ticker`].

    Call [`Ticker::calibrate`] to start the clock.
    */
    pub fn build<TDocument: Document, TClock: LocalClock, TScheduler: Scheduler>(
        self,
        document: TDocument,
        clock: TClock,
        scheduler: TScheduler,
    ) -> Ticker<TDocument, TClock, TScheduler> {
        Ticker::with_config(self.element_id, self.asset_dir, document, clock, scheduler)
    }
}
