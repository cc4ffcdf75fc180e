/*!
Components provided by the JavaScript web platform.

[`Setup::install`] wires a [`Ticker`] into the current page:

- Faces are drawn on the element found through the page's `document`.
- The time of day is read from `Date`.
- Timers run on `window.setTimeout` and `window.setInterval`.
- The window's `blur` and `focus` events are passed to [`Ticker::on_blur`] and [`Ticker::on_focus`].
*/

use std::{
    cell::{Ref, RefCell},
    mem,
    rc::{Rc, Weak},
};

use wasm_bindgen::{prelude::*, JsCast};
use web_sys::Window;

use crate::{setup::Setup, ticker::Ticker, ClockMetrics, Error};

pub mod date_clock;
pub mod dom;
pub mod window_scheduler;

pub use self::{
    date_clock::DateClock,
    dom::{WebDocument, WebElement},
    window_scheduler::WindowScheduler,
};

/**
A [`Ticker`] running in a browser.
*/
pub type WebTicker = Ticker<WebDocument, DateClock, WindowScheduler>;

const BLUR_EVENT: &str = "blur";
const FOCUS_EVENT: &str = "focus";

impl Setup {
    /**
    Finish the builder, running the clock on the current page.

    The clock is calibrated before this method returns. The returned [`ClockHandle`] stops the clock when it's dropped; call [`ClockHandle::forget`] to keep it running for the lifetime of the page.

    This method fails if there's no `window` or `document`, or if timers or event listeners can't be registered. A missing clock element isn't an error; it's reported as a diagnostic and looked up again when the page regains focus.
    */
    pub fn install(self) -> Result<ClockHandle, Error> {
        let window = web_sys::window().ok_or_else(|| Error::new("no global `window` exists"))?;
        let document = window
            .document()
            .ok_or_else(|| Error::new("the window has no `document`"))?;

        let ticker = Rc::new_cyclic(|ticker: &Weak<RefCell<WebTicker>>| {
            let scheduler = WindowScheduler::new(window.clone(), {
                let ticker = ticker.clone();
                move |timer| with_ticker(&ticker, |ticker| ticker.fire(timer))
            });

            RefCell::new(self.build(WebDocument::new(document), DateClock::new(), scheduler))
        });

        let on_blur = Closure::<dyn Fn()>::new({
            let ticker = Rc::downgrade(&ticker);
            move || {
                with_ticker(&ticker, |ticker| {
                    ticker.on_blur();

                    Ok(())
                })
            }
        });

        let on_focus = Closure::<dyn Fn()>::new({
            let ticker = Rc::downgrade(&ticker);
            move || with_ticker(&ticker, |ticker| ticker.on_focus())
        });

        let handle = ClockHandle {
            window,
            ticker,
            on_blur,
            on_focus,
        };

        handle.listen(BLUR_EVENT, &handle.on_blur)?;
        handle.listen(FOCUS_EVENT, &handle.on_focus)?;

        handle.ticker.borrow_mut().calibrate()?;

        Ok(handle)
    }
}

fn with_ticker(
    ticker: &Weak<RefCell<WebTicker>>,
    f: impl FnOnce(&mut WebTicker) -> Result<(), Error>,
) {
    let Some(ticker) = ticker.upgrade() else {
        return;
    };

    // The event loop never runs two callbacks at once, so this only fails if a callback is invoked synchronously from the ticker
    let Ok(mut ticker) = ticker.try_borrow_mut() else {
        emit::warn!("the clock was re-entered while it was already running; ignoring the event");

        return;
    };

    if let Err(err) = f(&mut ticker) {
        emit::warn!("failed to update the clock: {err}", err);
    }
}

/**
A clock running on the current page.

Dropping the handle removes its event listeners and cancels its timers.
*/
pub struct ClockHandle {
    window: Window,
    ticker: Rc<RefCell<WebTicker>>,
    on_blur: Closure<dyn Fn()>,
    on_focus: Closure<dyn Fn()>,
}

impl ClockHandle {
    /**
    Get a reference to the running [`Ticker`].
    */
    pub fn ticker(&self) -> Ref<'_, WebTicker> {
        self.ticker.borrow()
    }

    /**
    Get a [`emit::metric::Source`] for instrumentation produced by the clock.
    */
    pub fn metric_source(&self) -> ClockMetrics {
        self.ticker.borrow().metric_source()
    }

    /**
    Keep the clock running for the lifetime of the page.
    */
    pub fn forget(self) {
        mem::forget(self);
    }

    /**
    Stop the clock.

    This is the same as dropping the handle.
    */
    pub fn dispose(self) {
        drop(self);
    }

    fn listen(&self, event: &str, listener: &Closure<dyn Fn()>) -> Result<(), Error> {
        self.window
            .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
            .map_err(|err| Error::from_js("failed to add an event listener", err))
    }

    fn unlisten(&self, event: &str, listener: &Closure<dyn Fn()>) {
        if let Err(err) = self
            .window
            .remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
        {
            let err = Error::from_js("failed to remove an event listener", err);

            emit::warn!("failed to stop listening for {event}: {err}", event, err);
        }
    }
}

impl Drop for ClockHandle {
    fn drop(&mut self) {
        self.unlisten(BLUR_EVENT, &self.on_blur);
        self.unlisten(FOCUS_EVENT, &self.on_focus);

        if let Ok(mut ticker) = self.ticker.try_borrow_mut() {
            ticker.dispose();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{ticker::Phase, LocalClock};

    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn add_clock(id: &str) -> web_sys::Element {
        let document = web_sys::window().unwrap().document().unwrap();

        let object = document.create_element("object").unwrap();
        object.set_id(id);
        document.body().unwrap().append_child(&object).unwrap();

        object
    }

    fn dispatch(event: &str) {
        let window = web_sys::window().unwrap();

        window
            .dispatch_event(&web_sys::Event::new(event).unwrap())
            .unwrap();
    }

    #[wasm_bindgen_test]
    fn install_displays_the_current_face() {
        let object = add_clock("install-test-clock");

        let handle = crate::setup()
            .element_id("install-test-clock")
            .install()
            .unwrap();

        {
            let ticker = handle.ticker();

            assert_eq!(Phase::Calibrating, ticker.phase());
            assert_eq!(Some(ticker.expected_path()), object.get_attribute("data"));
            assert_eq!(
                DateClock::new().now().face().path("clocks").to_string(),
                ticker.expected_path()
            );
        }

        handle.dispose();
        object.remove();
    }

    #[wasm_bindgen_test]
    fn install_tolerates_a_missing_element() {
        let handle = crate::setup()
            .element_id("install-test-missing-clock")
            .install()
            .unwrap();

        assert_eq!(1, handle.metric_source().element_missing());
        assert!(!handle.ticker().has_element());
    }

    #[wasm_bindgen_test]
    fn window_focus_events_reach_the_ticker() {
        let object = add_clock("focus-test-clock");

        let handle = crate::setup()
            .element_id("focus-test-clock")
            .install()
            .unwrap();

        dispatch("blur");
        dispatch("blur");
        assert_eq!(2, handle.ticker().background_count());

        dispatch("focus");
        assert_eq!(0, handle.ticker().background_count());
        assert_eq!(1, handle.metric_source().focus_regained());

        handle.dispose();

        // Listeners are removed with the handle
        dispatch("blur");

        object.remove();
    }
}
