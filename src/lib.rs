/*!
A minute-accurate analog clock face for web pages.

`sandial` keeps one `<object>` element in a page showing a pre-rendered SVG clock face for the current local time. There are 1,440 faces, one per hour and minute, addressed as `clocks/clock_<HH>_<MM>.svg`. The clock:

- **Calibrates:** renders the current face right away, then schedules a one-shot timer for the top of the next minute.
- **Ticks:** once aligned, re-renders the face every 60 seconds.
- **Re-synchronizes:** browsers throttle timers in background tabs. When the page regains focus after losing it, the displayed face is checked against the current time and the clock re-calibrates if it fell behind.

# Getting started

Add `sandial` to your `Cargo.toml` and build for `wasm32-unknown-unknown`:

```toml
[dependencies.sandial]
version = "0.1.0"
```

Install the clock when your module starts:

```ignore
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    sandial::setup()
        .element_id("sandial-clock-img")
        .install()
        .map_err(|err| JsValue::from_str(&err.to_string()))?
        .forget();

    Ok(())
}
```

The page is expected to contain the element before the clock is installed:

```html
<object id="sandial-clock-img" type="image/svg+xml" data="clocks/clock_00_00.svg"></object>
```

# Diagnostics

`sandial` emits diagnostics through `emit`. Configure an emitter with [`emit::setup`] to see them. Metrics describing the clock's own behavior are available through [`Ticker::metric_source`].

# Testing

The [`Ticker`] is independent of the browser. It's generic over a [`Document`] that locates the element, a [`LocalClock`] that reads the time of day, and a [`Scheduler`] that runs timers, so it can be driven by fakes outside of a browser.
*/

#![deny(missing_docs)]

mod error;
mod internal_metrics;

pub mod face;
pub mod platform;
pub mod schedule;
pub mod setup;
pub mod surface;
pub mod ticker;
pub mod time;

#[cfg(test)]
mod test_support;

pub use self::{
    error::Error,
    face::{face_path, Face, FacePath},
    internal_metrics::*,
    schedule::{Scheduler, Timer, TimerHandle},
    setup::{setup, Setup},
    surface::{Document, Element, Surface},
    ticker::{Phase, Ticker},
    time::{LocalClock, WallTime},
};
