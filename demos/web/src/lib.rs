#![cfg(all(
    target_arch = "wasm32",
    target_vendor = "unknown",
    target_os = "unknown"
))]

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

thread_local! {
    static REPORTER: RefCell<emit::metric::Reporter> = RefCell::new(emit::metric::Reporter::new());
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));

    let _ = emit::setup()
        .emit_to(emit::emitter::from_fn(|evt| {
            web_sys::console::log_1(&JsValue::from_str(&evt.msg().to_string()))
        }))
        .try_init();

    let clock = sandial::setup()
        .install()
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    REPORTER.with(|reporter| reporter.borrow_mut().add_source(clock.metric_source()));

    clock.forget();

    Ok(())
}

#[wasm_bindgen]
pub fn report() {
    REPORTER.with(|reporter| {
        reporter
            .borrow()
            .emit_metrics(&emit::runtime::shared().emitter())
    });
}
