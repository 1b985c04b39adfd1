#![forbid(unsafe_code)]

use js_sys::Function;
use tix_core::{Clock, WallClock, normalize_json};
use tix_widgets::blocks::RenderContext;
use tix_widgets::node::Node;
use tix_widgets::search::{SearchConfig, SearchEvent, SearchInput};
use wasm_bindgen::prelude::*;

use crate::browser::detect_location;
use crate::page::{Page, render_page};

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Render a page description (JSON text) to an HTML document.
///
/// `search` filters ticket lists on the page.
#[wasm_bindgen(js_name = renderPage)]
pub fn render_page_js(page_json: &str, search: Option<String>) -> Result<String, JsValue> {
    let page = Page::from_json(page_json).map_err(js_error)?;
    let ctx = RenderContext::new().with_search(search.unwrap_or_default());
    Ok(render_page(&page, &ctx))
}

/// Normalize raw ticket records (JSON text) and return them as JSON text.
#[wasm_bindgen(js_name = normalizeTickets)]
pub fn normalize_tickets_js(tickets_json: &str) -> Result<String, JsValue> {
    let tickets = normalize_json(tickets_json).map_err(js_error)?;
    serde_json::to_string(&tickets).map_err(js_error)
}

/// Search input driven from JS.
///
/// The host forwards DOM events and calls `tick()` from
/// `requestAnimationFrame` or a timer; `onChange` receives each committed
/// value.
#[wasm_bindgen]
pub struct TixSearch {
    input: SearchInput,
    clock: WallClock,
}

#[wasm_bindgen]
impl TixSearch {
    /// `config_json` uses the `search` block props; `on_change` is called
    /// with one string argument.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, on_change: Function) -> Result<TixSearch, JsValue> {
        let config: SearchConfig = serde_json::from_str(config_json).map_err(js_error)?;
        let input = SearchInput::new(config)
            .with_location(detect_location())
            .on_change(move |value: &str| {
                if on_change.call1(&JsValue::NULL, &JsValue::from_str(value)).is_err() {
                    tix_core::warn!("search onChange callback threw");
                }
            });
        Ok(Self {
            input,
            clock: WallClock::new(),
        })
    }

    pub fn mount(&mut self) {
        self.input.mount();
    }

    pub fn unmount(&mut self) {
        self.input.unmount();
    }

    /// Replace the text (DOM `input` event).
    #[wasm_bindgen(js_name = setText)]
    pub fn set_text(&mut self, text: String) -> bool {
        let now = self.clock.now();
        self.input.handle_event(SearchEvent::Input(text), now)
    }

    /// Clear button or Escape.
    pub fn clear(&mut self) -> bool {
        let now = self.clock.now();
        self.input.handle_event(SearchEvent::ClearClicked, now)
    }

    /// Enter.
    pub fn submit(&mut self) -> bool {
        let now = self.clock.now();
        self.input.handle_event(SearchEvent::Submit, now)
    }

    /// Commit if the debounce window has expired.
    pub fn tick(&mut self) -> bool {
        self.input.tick_with(&self.clock)
    }

    #[wasm_bindgen(getter)]
    pub fn value(&self) -> String {
        self.input.value().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn committed(&self) -> String {
        self.input.committed().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn pending(&self) -> bool {
        self.input.is_pending()
    }

    /// Current markup of the input.
    pub fn html(&self) -> String {
        Node::from(self.input.view()).to_html()
    }
}
