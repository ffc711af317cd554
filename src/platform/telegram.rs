//! Telegram Web App integration
//!
//! When the page runs inside Telegram, game events are reported to the bot
//! through `Telegram.WebApp.sendData` as small JSON messages tagged by
//! `action`. The message shapes are plain serde types so they can be checked
//! without a browser.

use serde::Serialize;

use super::notify::GameNotifier;
use crate::consts::{GAME_ID, SIM_HZ};
use crate::game::RunSummary;

/// A message for the bot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TelegramMessage {
    GameEvent {
        event: String,
        game: String,
        timestamp: f64,
    },
    GameScore {
        score: u64,
        game: String,
        timestamp: f64,
        obstacles_avoided: u32,
        /// Milliseconds from start to game over
        game_duration: f64,
    },
    ShareResult {
        score: u64,
        game: String,
    },
    ShowLeaderboard {
        game: String,
    },
}

impl TelegramMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Page styling that follows the Telegram client's theme
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// `telegram-dark` or `telegram-light`, added to `<body>`
    pub body_class: &'static str,
    /// CSS custom properties for the document root
    pub variables: Vec<(&'static str, String)>,
}

/// CSS variable, `themeParams` key, fallback colour
const THEME_VARIABLES: [(&str, &str, &str); 4] = [
    ("--tg-bg-color", "bg_color", "#000000"),
    ("--tg-text-color", "text_color", "#00ff41"),
    ("--tg-button-color", "button_color", "#00ff41"),
    ("--tg-button-text-color", "button_text_color", "#000000"),
];

impl Theme {
    /// Build from `WebApp.colorScheme` and `WebApp.themeParams`. Variables
    /// are only set when the client sent theme params; missing or empty
    /// colours use the neon defaults.
    pub fn resolve(color_scheme: Option<&str>, params: Option<&serde_json::Value>) -> Self {
        let body_class = if color_scheme == Some("dark") {
            "telegram-dark"
        } else {
            "telegram-light"
        };

        let variables = params
            .map(|params| {
                THEME_VARIABLES
                    .iter()
                    .map(|&(var, key, fallback)| {
                        let value = params
                            .get(key)
                            .and_then(|v| v.as_str())
                            .filter(|v| !v.is_empty())
                            .unwrap_or(fallback);
                        (var, value.to_string())
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            body_class,
            variables,
        }
    }
}

/// Where serialized messages go
pub trait WebAppSink {
    fn send_data(&mut self, json: &str);
}

/// `GameNotifier` that reports to a Telegram bot
pub struct TelegramNotifier<S: WebAppSink> {
    sink: S,
    clock: Box<dyn Fn() -> f64>,
    started_at: Option<f64>,
}

impl<S: WebAppSink> TelegramNotifier<S> {
    pub fn new(sink: S) -> Self {
        Self::with_clock(sink, Box::new(super::now_ms))
    }

    /// Use a custom millisecond clock for timestamps
    pub fn with_clock(sink: S, clock: Box<dyn Fn() -> f64>) -> Self {
        Self {
            sink,
            clock,
            started_at: None,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn send(&mut self, message: TelegramMessage) {
        match message.to_json() {
            Ok(json) => {
                log::debug!("Telegram sendData: {}", json);
                self.sink.send_data(&json);
            }
            Err(e) => log::warn!("Failed to encode Telegram message: {}", e),
        }
    }
}

impl<S: WebAppSink> GameNotifier for TelegramNotifier<S> {
    fn on_game_start(&mut self) {
        let now = (self.clock)();
        self.started_at = Some(now);
        self.send(TelegramMessage::GameEvent {
            event: "game_started".to_string(),
            game: GAME_ID.to_string(),
            timestamp: now,
        });
    }

    fn on_game_over(&mut self, summary: &RunSummary) {
        let now = (self.clock)();
        // Fall back to simulated time if the start was never seen
        let game_duration = match self.started_at.take() {
            Some(start) => (now - start).max(0.0),
            None => summary.ticks as f64 * 1000.0 / SIM_HZ as f64,
        };
        self.send(TelegramMessage::GameScore {
            score: summary.score,
            game: GAME_ID.to_string(),
            timestamp: now,
            obstacles_avoided: summary.obstacles_cleared,
            game_duration,
        });
    }

    fn on_share_requested(&mut self, summary: &RunSummary) {
        self.send(TelegramMessage::ShareResult {
            score: summary.score,
            game: GAME_ID.to_string(),
        });
    }

    fn on_leaderboard_requested(&mut self) {
        self.send(TelegramMessage::ShowLeaderboard {
            game: GAME_ID.to_string(),
        });
    }
}

/// Handle on `window.Telegram.WebApp`
#[cfg(target_arch = "wasm32")]
pub mod bridge {
    use js_sys::{Function, JSON, Reflect};
    use wasm_bindgen::prelude::*;

    use super::{Theme, WebAppSink};

    #[derive(Clone)]
    pub struct WebAppBridge {
        web_app: JsValue,
    }

    fn call0(target: &JsValue, name: &str) -> Result<JsValue, JsValue> {
        let func: Function = Reflect::get(target, &JsValue::from_str(name))?.dyn_into()?;
        func.call0(target)
    }

    fn call1(target: &JsValue, name: &str, arg: &JsValue) -> Result<JsValue, JsValue> {
        let func: Function = Reflect::get(target, &JsValue::from_str(name))?.dyn_into()?;
        func.call1(target, arg)
    }

    fn call2(target: &JsValue, name: &str, a: &JsValue, b: &JsValue) -> Result<JsValue, JsValue> {
        let func: Function = Reflect::get(target, &JsValue::from_str(name))?.dyn_into()?;
        func.call2(target, a, b)
    }

    fn get(target: &JsValue, name: &str) -> Option<JsValue> {
        Reflect::get(target, &JsValue::from_str(name))
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
    }

    impl WebAppBridge {
        /// The Web App object, if the page runs inside Telegram
        pub fn detect() -> Option<Self> {
            let window = web_sys::window()?;
            let telegram = Reflect::get(&window, &JsValue::from_str("Telegram")).ok()?;
            if telegram.is_undefined() || telegram.is_null() {
                return None;
            }
            let web_app = Reflect::get(&telegram, &JsValue::from_str("WebApp")).ok()?;
            if web_app.is_undefined() || web_app.is_null() {
                return None;
            }
            Some(Self { web_app })
        }

        /// Ready, expand, theme the page, stay expanded on viewport
        /// changes and close on the back button
        pub fn init(&self) -> Result<(), JsValue> {
            call0(&self.web_app, "ready")?;
            call0(&self.web_app, "expand")?;
            self.apply_theme()?;
            self.keep_expanded()?;
            self.close_on_back_button()?;
            log::info!("Telegram Web App integration initialized");
            Ok(())
        }

        /// Current client theme
        pub fn theme(&self) -> Theme {
            let color_scheme = get(&self.web_app, "colorScheme").and_then(|v| v.as_string());
            let params = get(&self.web_app, "themeParams")
                .and_then(|p| JSON::stringify(&p).ok())
                .and_then(|json| serde_json::from_str(&String::from(json)).ok());
            Theme::resolve(color_scheme.as_deref(), params.as_ref())
        }

        fn apply_theme(&self) -> Result<(), JsValue> {
            let theme = self.theme();
            let document = crate::platform::web::document()?;

            if let Some(body) = document.body() {
                body.class_list().add_1(theme.body_class)?;
            }
            if let Some(root) = document.document_element() {
                let style = root.dyn_into::<web_sys::HtmlElement>()?.style();
                for (name, value) in &theme.variables {
                    style.set_property(name, value)?;
                }
            }
            log::debug!("Applied Telegram theme ({})", theme.body_class);
            Ok(())
        }

        fn keep_expanded(&self) -> Result<(), JsValue> {
            let web_app = self.web_app.clone();
            let on_change = Closure::<dyn FnMut()>::new(move || {
                if let Err(e) = call0(&web_app, "expand") {
                    log::warn!("Telegram expand failed: {:?}", e);
                }
            });
            call2(
                &self.web_app,
                "onEvent",
                &JsValue::from_str("viewportChanged"),
                on_change.as_ref(),
            )?;
            on_change.forget();
            Ok(())
        }

        fn close_on_back_button(&self) -> Result<(), JsValue> {
            let Some(back_button) = get(&self.web_app, "BackButton") else {
                return Ok(());
            };
            let web_app = self.web_app.clone();
            let on_click = Closure::<dyn FnMut()>::new(move || {
                if let Err(e) = call0(&web_app, "close") {
                    log::warn!("Telegram close failed: {:?}", e);
                }
            });
            call1(&back_button, "onClick", on_click.as_ref())?;
            on_click.forget();
            Ok(())
        }

        fn main_button(&self) -> Result<JsValue, JsValue> {
            Reflect::get(&self.web_app, &JsValue::from_str("MainButton"))
        }

        /// Attach the main button click handler and show the button
        pub fn on_main_button(&self, on_click: &Closure<dyn FnMut()>) -> Result<(), JsValue> {
            let button = self.main_button()?;
            call1(&button, "onClick", on_click.as_ref())?;
            call0(&button, "show")?;
            Ok(())
        }

        pub fn set_main_button_text(&self, text: &str) -> Result<(), JsValue> {
            call1(&self.main_button()?, "setText", &JsValue::from_str(text))?;
            Ok(())
        }
    }

    impl WebAppSink for WebAppBridge {
        fn send_data(&mut self, json: &str) {
            if let Err(e) = call1(&self.web_app, "sendData", &JsValue::from_str(json)) {
                log::warn!("Telegram sendData failed: {:?}", e);
            }
        }
    }
}
