/*!
The [`WindowScheduler`] type.
*/

use core::time::Duration;

use wasm_bindgen::{prelude::*, JsCast};
use web_sys::Window;

use crate::{
    schedule::{Scheduler, Timer, TimerHandle},
    Error,
};

/**
A scheduler based on [`setTimeout`](https://developer.mozilla.org/en-US/docs/Web/API/Window/setTimeout) and [`setInterval`](https://developer.mozilla.org/en-US/docs/Web/API/Window/setInterval).

Every firing is passed to a single dispatch function. The closures handed to the browser live as long as the scheduler, so a timer can be cancelled from inside its own firing.
*/
pub struct WindowScheduler {
    window: Window,
    align: Closure<dyn Fn()>,
    tick: Closure<dyn Fn()>,
}

impl WindowScheduler {
    /**
    Create a scheduler on `window` that calls `dispatch` whenever a timer fires.
    */
    pub fn new(window: Window, dispatch: impl Fn(Timer) + 'static) -> Self {
        let dispatch = std::rc::Rc::new(dispatch);

        let align = Closure::<dyn Fn()>::new({
            let dispatch = dispatch.clone();
            move || dispatch(Timer::Align)
        });

        let tick = Closure::<dyn Fn()>::new(move || dispatch(Timer::Tick));

        WindowScheduler {
            window,
            align,
            tick,
        }
    }

    fn callback(&self, timer: Timer) -> &js_sys::Function {
        match timer {
            Timer::Align => self.align.as_ref().unchecked_ref(),
            Timer::Tick => self.tick.as_ref().unchecked_ref(),
        }
    }
}

impl Scheduler for WindowScheduler {
    fn schedule_once(&mut self, delay: Duration, timer: Timer) -> Result<TimerHandle, Error> {
        let id = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                self.callback(timer),
                millis(delay),
            )
            .map_err(|err| Error::from_js("failed to call setTimeout", err))?;

        Ok(TimerHandle::once(id))
    }

    fn schedule_repeating(
        &mut self,
        period: Duration,
        timer: Timer,
    ) -> Result<TimerHandle, Error> {
        let id = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                self.callback(timer),
                millis(period),
            )
            .map_err(|err| Error::from_js("failed to call setInterval", err))?;

        Ok(TimerHandle::repeating(id))
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if handle.is_repeating() {
            self.window.clear_interval_with_handle(handle.id());
        } else {
            self.window.clear_timeout_with_handle(handle.id());
        }
    }
}

fn millis(delay: Duration) -> i32 {
    delay.as_millis().clamp(1, i32::MAX as u128) as i32
}
