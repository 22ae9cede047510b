//! Browser entry point
//!
//! The page owns the markup. It calls into `WebGame` on clicks and
//! re-renders from `squares()`, `status()` and `moves()`.

use wasm_bindgen::prelude::*;

use crate::session::{GameSession, MoveOutcome, SessionKeys};
use crate::storage::LocalStorage;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    log::info!("Squares starting...");
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct WebGame {
    session: GameSession<std::rc::Rc<LocalStorage>>,
}

#[wasm_bindgen]
impl WebGame {
    /// Open the session stored in LocalStorage, optionally under a namespace
    #[wasm_bindgen(constructor)]
    pub fn new(namespace: Option<String>) -> Result<WebGame, JsValue> {
        let store = LocalStorage::open().map_err(to_js)?;
        let keys = SessionKeys::namespaced(namespace.as_deref());
        let session = GameSession::open(std::rc::Rc::new(store), keys).map_err(to_js)?;
        Ok(WebGame { session })
    }

    /// Cell labels for the shown board: `""`, `"X"` or `"O"`
    pub fn squares(&self) -> Vec<String> {
        self.session
            .board()
            .labels()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn status(&self) -> String {
        self.session.status()
    }

    /// History button labels
    pub fn moves(&self) -> Vec<String> {
        self.session.moves()
    }

    pub fn step(&self) -> usize {
        self.session.step()
    }

    /// Returns false when the click was ignored
    #[wasm_bindgen(js_name = selectSquare)]
    pub fn select_square(&mut self, index: usize) -> Result<bool, JsValue> {
        let outcome = self.session.select_square(index).map_err(to_js)?;
        Ok(matches!(outcome, MoveOutcome::Played { .. }))
    }

    pub fn restart(&mut self) -> Result<(), JsValue> {
        self.session.restart().map_err(to_js)
    }

    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&mut self, step: usize) -> Result<(), JsValue> {
        self.session.go_to(step).map_err(to_js)
    }

    #[wasm_bindgen(js_name = setNamespace)]
    pub fn set_namespace(&mut self, namespace: Option<String>) -> Result<(), JsValue> {
        self.session
            .set_namespace(namespace.as_deref())
            .map_err(to_js)
    }
}
