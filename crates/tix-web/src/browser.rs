#![forbid(unsafe_code)]

//! Address-bar capability for browser hosts.

use tix_widgets::location::{NoLocation, QueryLocation};

#[cfg(target_arch = "wasm32")]
pub use imp::BrowserLocation;

#[cfg(target_arch = "wasm32")]
mod imp {
    use tix_widgets::location::{QueryLocation, query_param, set_query_param};
    use url::Url;
    use wasm_bindgen::JsValue;

    /// `window.location` for reads, `history.replaceState` for writes.
    #[derive(Debug, Clone)]
    pub struct BrowserLocation {
        window: web_sys::Window,
    }

    impl BrowserLocation {
        /// The page's location, when running inside a window.
        #[must_use]
        pub fn detect() -> Option<Self> {
            web_sys::window().map(|window| Self { window })
        }

        fn current_url(&self) -> Option<Url> {
            let href = self.window.location().href().ok()?;
            Url::parse(&href).ok()
        }
    }

    impl QueryLocation for BrowserLocation {
        fn query_param(&self, name: &str) -> Option<String> {
            query_param(&self.current_url()?, name)
        }

        fn replace_query_param(&mut self, name: &str, value: Option<&str>) {
            let Some(mut url) = self.current_url() else {
                return;
            };
            set_query_param(&mut url, name, value);
            let Ok(history) = self.window.history() else {
                return;
            };
            if history
                .replace_state_with_url(&JsValue::NULL, "", Some(url.as_str()))
                .is_err()
            {
                tix_core::warn!(param = name, "history.replaceState failed");
            }
        }
    }
}

/// Native builds have no address bar; [`BrowserLocation::detect`] always
/// returns `None`.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct BrowserLocation {
    _private: (),
}

#[cfg(not(target_arch = "wasm32"))]
impl BrowserLocation {
    #[must_use]
    pub fn detect() -> Option<Self> {
        None
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl QueryLocation for BrowserLocation {
    fn query_param(&self, _name: &str) -> Option<String> {
        None
    }

    fn replace_query_param(&mut self, _name: &str, _value: Option<&str>) {}

    fn is_addressable(&self) -> bool {
        false
    }
}

/// The browser's address bar when there is one, [`NoLocation`] otherwise.
#[must_use]
pub fn detect_location() -> Box<dyn QueryLocation> {
    match BrowserLocation::detect() {
        Some(browser) => Box::new(browser),
        None => Box::new(NoLocation),
    }
}
