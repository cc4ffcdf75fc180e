/*!
The [`DateClock`] type.
*/

use js_sys::Date;

use crate::time::{LocalClock, WallTime};

/**
A clock based on the [Date type](https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Date).

Readings are in the time zone of the device viewing the page.
*/
#[derive(Default, Debug, Clone, Copy)]
pub struct DateClock {}

impl DateClock {
    /**
    Create a new instance of the date clock.
    */
    pub const fn new() -> Self {
        DateClock {}
    }
}

impl LocalClock for DateClock {
    fn now(&self) -> WallTime {
        date_now()
    }
}

fn date_now() -> WallTime {
    let date = Date::new_0();

    let hour = date.get_hours() as u64;
    let minute = date.get_minutes() as u64;
    let second = date.get_seconds() as u64;

    WallTime::from_secs_of_day(hour * 3_600 + minute * 60 + second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn date_clock_matches_date() {
        let before = Date::new_0();
        let now = DateClock::new().now();

        assert_eq!(before.get_hours() as u8, now.hour());
    }
}
