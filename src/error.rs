use std::fmt;

/**
An error encountered running the clock.
*/
pub struct Error(Box<dyn std::error::Error + Send + Sync>);

impl Error {
    #[cfg_attr(
        not(all(
            feature = "web",
            target_arch = "wasm32",
            target_vendor = "unknown",
            target_os = "unknown"
        )),
        allow(dead_code)
    )]
    pub(crate) fn new(e: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error(e.into())
    }

    #[cfg(all(
        feature = "web",
        target_arch = "wasm32",
        target_vendor = "unknown",
        target_os = "unknown"
    ))]
    pub(crate) fn from_js(msg: &str, err: wasm_bindgen::JsValue) -> Self {
        // `JsValue` isn't `Send`, so only its rendered form is kept
        Error::new(format!("{msg}: {err:?}"))
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}
