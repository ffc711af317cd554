//! Dog Skate entry point
//!
//! On the web this wires the page (canvas, HUD, buttons, Telegram) to a
//! `Game` and drives it from `requestAnimationFrame`. Natively it plays one
//! headless run on autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use dog_skate::persistence::LocalStorageStore;
    use dog_skate::platform::audio::AudioManager;
    use dog_skate::platform::telegram::bridge::WebAppBridge;
    use dog_skate::platform::web::{self, AnimationLoop};
    use dog_skate::platform::{SoundEffect, TelegramNotifier};
    use dog_skate::renderer::{RenderState, VertexBatch, draw_scene};
    use dog_skate::sim::GamePhase;
    use dog_skate::{Game, Settings, Tuning};

    const LEADERBOARD_LABEL: &str = "🏆 Leaderboard";
    const SHARE_LABEL: &str = "📤 Share result";

    fn js_err(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    /// Page elements; any of them may be missing
    struct Hud {
        score: Option<Element>,
        high_score: Option<Element>,
        final_score: Option<Element>,
        game_over: Option<Element>,
        start_button: Option<Element>,
        pause_button: Option<Element>,
        jump_button: Option<Element>,
    }

    impl Hud {
        fn find(document: &Document) -> Self {
            Self {
                score: document.get_element_by_id("score"),
                high_score: document.get_element_by_id("highScore"),
                final_score: document.get_element_by_id("finalScore"),
                game_over: document.get_element_by_id("gameOver"),
                start_button: document.get_element_by_id("startButton"),
                pause_button: document.get_element_by_id("pauseButton"),
                jump_button: None,
            }
        }

        fn update(&self, game: &Game) {
            set_text(&self.score, &game.score().to_string());
            set_text(&self.high_score, &game.best_score().to_string());

            let phase = game.phase();
            if phase == GamePhase::Over {
                set_text(&self.final_score, &game.score().to_string());
            }
            if let Some(el) = &self.game_over {
                web::set_hidden(el, phase != GamePhase::Over);
            }
            if let Some(el) = &self.start_button {
                web::set_hidden(el, phase != GamePhase::Idle);
            }
            if let Some(el) = &self.pause_button {
                web::set_hidden(el, !matches!(phase, GamePhase::Running | GamePhase::Paused));
            }
            let label = if phase == GamePhase::Paused {
                "▶ Resume"
            } else {
                "⏸ Pause"
            };
            set_text(&self.pause_button, label);
            if let Some(el) = &self.jump_button {
                web::set_hidden(el, phase != GamePhase::Running);
            }
        }
    }

    fn set_text(el: &Option<Element>, text: &str) {
        if let Some(el) = el
            && el.text_content().as_deref() != Some(text)
        {
            el.set_text_content(Some(text));
        }
    }

    /// Everything the page callbacks share
    struct App {
        game: Game,
        render_state: Option<RenderState>,
        batch: VertexBatch,
        audio: AudioManager,
        hud: Hud,
        telegram: Option<WebAppBridge>,
        last_phase: GamePhase,
    }

    impl App {
        fn render(&mut self) {
            self.batch.clear();
            draw_scene(&mut self.batch, self.game.state());

            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            match render_state.render(self.batch.vertices()) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = render_state.size;
                    render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => log::error!("Out of memory!"),
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        fn play_sounds(&mut self) {
            for event in self.game.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
            }
        }

        /// Bring sounds, HUD and the Telegram button up to date
        fn sync(&mut self) {
            self.play_sounds();
            self.hud.update(&self.game);

            let phase = self.game.phase();
            if phase == self.last_phase {
                return;
            }
            self.last_phase = phase;
            if let Some(bridge) = &self.telegram {
                let label = if phase == GamePhase::Over {
                    SHARE_LABEL
                } else {
                    LEADERBOARD_LABEL
                };
                if let Err(e) = bridge.set_main_button_text(label) {
                    log::warn!("Telegram main button: {:?}", e);
                }
            }
        }

        fn jump(&mut self) {
            if self.game.jump() {
                self.play_sounds();
            }
        }

        fn toggle_sound(&mut self) {
            let mut settings = self.game.settings().clone();
            settings.sound = !settings.sound;
            self.audio.set_volume(settings.effective_volume());
            settings.save();
            log::info!("Sound {}", if settings.sound { "on" } else { "off" });
            self.game.set_settings(settings);
        }

        /// Share after a finished run, leaderboard otherwise
        fn main_button(&mut self) {
            if !self.game.share_result() {
                self.game.show_leaderboard();
            }
        }

        fn resize(&mut self, canvas: &HtmlCanvasElement) {
            let (width, height) = fit_canvas(canvas);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(width, height);
            }
            self.render();
        }
    }

    type Shared = Rc<RefCell<App>>;

    /// Match the backing store to the CSS size
    fn fit_canvas(canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        let width = ((canvas.client_width().max(1) as f64) * dpr) as u32;
        let height = ((canvas.client_height().max(1) as f64) * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    async fn init_gpu(
        canvas: HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<RenderState, JsValue> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(js_err)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_err)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(js_err)
    }

    fn schedule(frames: &AnimationLoop) {
        if let Err(e) = frames.request() {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;

        log::info!("Dog Skate starting...");

        let window = web::window()?;
        let document = web::document()?;

        let canvas: HtmlCanvasElement = web::element_by_ids(&document, &["gameCanvas", "canvas"])
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;
        let (width, height) = fit_canvas(&canvas);

        let settings = Settings::load();
        let audio = AudioManager::new(settings.effective_volume());

        let telegram = WebAppBridge::detect();
        let mut game = Game::new(Tuning::default(), settings, Box::new(LocalStorageStore));
        if let Some(bridge) = &telegram {
            if let Err(e) = bridge.init() {
                log::warn!("Telegram init failed: {:?}", e);
            }
            game = game.with_notifier(Box::new(TelegramNotifier::new(bridge.clone())));
        }

        let render_state = match init_gpu(canvas.clone(), width, height).await {
            Ok(render_state) => Some(render_state),
            Err(e) => {
                log::error!("WebGPU unavailable, nothing will be drawn: {:?}", e);
                None
            }
        };

        let mut hud = Hud::find(&document);
        if window.navigator().max_touch_points() > 0 {
            hud.jump_button = create_jump_button(&document)?;
        }

        let app: Shared = Rc::new(RefCell::new(App {
            last_phase: game.phase(),
            game,
            render_state,
            batch: VertexBatch::new(),
            audio,
            hud,
            telegram,
        }));

        let frames = AnimationLoop::new({
            let app = app.clone();
            move |now| {
                let mut app = app.borrow_mut();
                let keep_going = app.game.frame(now);
                app.render();
                app.sync();
                keep_going
            }
        });

        setup_controls(&document, &app, &frames)?;
        setup_input(&window, &canvas, &app)?;
        setup_auto_pause(&document, &app, &frames)?;
        setup_telegram(&app)?;

        {
            let app = app.clone();
            let canvas = canvas.clone();
            web::listen(&window, "resize", move |_: web_sys::Event| {
                app.borrow_mut().resize(&canvas);
            })?;
        }

        if let Some(loading) = document.get_element_by_id("loading") {
            web::set_hidden(&loading, true);
        }

        // Idle board until the player presses start
        {
            let mut app = app.borrow_mut();
            app.render();
            app.sync();
        }

        log::info!("Dog Skate ready");
        Ok(())
    }

    fn create_jump_button(document: &Document) -> Result<Option<Element>, JsValue> {
        let Some(body) = document.body() else {
            return Ok(None);
        };
        let button = document.create_element("button")?;
        button.set_id("jumpButton");
        button.set_class_name("jump-button hidden");
        button.set_text_content(Some("JUMP"));
        body.append_child(&button)?;
        Ok(Some(button))
    }

    fn setup_controls(
        document: &Document,
        app: &Shared,
        frames: &Rc<AnimationLoop>,
    ) -> Result<(), JsValue> {
        if let Some(btn) = document.get_element_by_id("startButton") {
            let app = app.clone();
            let frames = frames.clone();
            web::listen(&btn, "click", move |_: MouseEvent| {
                let started = {
                    let mut app = app.borrow_mut();
                    let started = app.game.start_game();
                    if started {
                        app.audio.resume();
                        app.sync();
                    }
                    started
                };
                if started {
                    schedule(&frames);
                }
            })?;
        }

        if let Some(btn) = document.get_element_by_id("pauseButton") {
            let app = app.clone();
            let frames = frames.clone();
            web::listen(&btn, "click", move |_: MouseEvent| {
                let mut app = app.borrow_mut();
                if app.game.toggle_pause() == GamePhase::Running {
                    schedule(&frames);
                } else {
                    frames.cancel();
                }
                app.sync();
            })?;
        }

        if let Some(btn) = document.get_element_by_id("restartButton") {
            let app = app.clone();
            let frames = frames.clone();
            web::listen(&btn, "click", move |_: MouseEvent| {
                frames.cancel();
                let mut app = app.borrow_mut();
                app.game.restart_game();
                app.render();
                app.sync();
            })?;
        }

        Ok(())
    }

    fn setup_input(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        app: &Shared,
    ) -> Result<(), JsValue> {
        {
            let app = app.clone();
            web::listen(window, "keydown", move |event: KeyboardEvent| {
                match event.code().as_str() {
                    "Space" | "ArrowUp" => {
                        event.prevent_default();
                        app.borrow_mut().jump();
                    }
                    "KeyM" => app.borrow_mut().toggle_sound(),
                    _ => {}
                }
            })?;
        }

        {
            let app = app.clone();
            web::listen(canvas, "mousedown", move |_: MouseEvent| {
                app.borrow_mut().jump();
            })?;
        }

        {
            let app = app.clone();
            web::listen(canvas, "touchstart", move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().jump();
            })?;
        }

        let jump_button = app.borrow().hud.jump_button.clone();
        if let Some(btn) = jump_button {
            let app = app.clone();
            web::listen(&btn, "touchstart", move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().jump();
            })?;
        }

        Ok(())
    }

    fn setup_auto_pause(
        document: &Document,
        app: &Shared,
        frames: &Rc<AnimationLoop>,
    ) -> Result<(), JsValue> {
        let app = app.clone();
        let frames = frames.clone();
        let doc = document.clone();
        web::listen(document, "visibilitychange", move |_: web_sys::Event| {
            if doc.visibility_state() != web_sys::VisibilityState::Hidden {
                return;
            }
            let mut app = app.borrow_mut();
            if app.game.phase() == GamePhase::Running {
                app.game.toggle_pause();
                frames.cancel();
                app.sync();
                log::info!("Auto-paused (tab hidden)");
            }
        })
    }

    fn setup_telegram(app: &Shared) -> Result<(), JsValue> {
        let Some(bridge) = app.borrow().telegram.clone() else {
            return Ok(());
        };
        bridge.set_main_button_text(LEADERBOARD_LABEL)?;

        let app = app.clone();
        let on_click = Closure::<dyn FnMut()>::new(move || {
            app.borrow_mut().main_button();
        });
        bridge.on_main_button(&on_click)?;
        on_click.forget();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        web_sys::console::error_1(&e);
        log::error!("Startup failed: {:?}", e);
    }
}

/// Headless run with a simple look-ahead jumper
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use dog_skate::Game;
    use dog_skate::sim::player_hitbox;

    /// Jump when the nearest barrier ahead is between 4 and 10 ticks away
    pub fn should_jump(game: &Game) -> bool {
        let state = game.state();
        if state.player.jumping || state.is_crashing() {
            return false;
        }
        let hitbox = player_hitbox(&state.player, &game.tuning().hitbox_insets);
        let near = state.speed * 4.0;
        let far = state.speed * 10.0;
        state
            .obstacles
            .iter()
            .map(|o| o.pos.x - hitbox.max.x)
            .filter(|gap| *gap > 0.0)
            .fold(None, |nearest: Option<f32>, gap| {
                Some(nearest.map_or(gap, |n| n.min(gap)))
            })
            .is_some_and(|gap| gap > near && gap <= far)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dog_skate::persistence::MemoryStore;
    use dog_skate::platform;
    use dog_skate::renderer::{VertexBatch, draw_scene};
    use dog_skate::sim::{GameEvent, GamePhase};
    use dog_skate::{Game, Settings, Tuning};

    /// Five minutes of play at 60 Hz
    const MAX_TICKS: u32 = 60 * 60 * 5;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(platform::entropy_seed);
    log::info!("Dog Skate (native) autopilot, seed {}", seed);

    let mut game = Game::new(
        Tuning::default(),
        Settings::default(),
        Box::new(MemoryStore::new()),
    )
    .with_seed_source(move || seed);
    game.start_game();

    let mut batch = VertexBatch::new();
    let mut jumps = 0;
    for t in 1..=MAX_TICKS {
        if autopilot::should_jump(&game) && game.jump() {
            jumps += 1;
        }
        game.tick();

        for event in game.drain_events() {
            if let GameEvent::Crashed { obstacle_id } = event {
                log::info!("Crashed into obstacle {} at score {}", obstacle_id, game.score());
            }
        }

        if t % 600 == 0 || game.phase() != GamePhase::Running {
            batch.clear();
            draw_scene(&mut batch, game.state());
            log::info!(
                "tick {:>5}  score {:>5}  speed {:.2}  obstacles {}  vertices {}",
                t,
                game.score(),
                game.state().speed,
                game.state().obstacles.len(),
                batch.len()
            );
        }
        if game.phase() != GamePhase::Running {
            break;
        }
    }

    match game.last_summary() {
        Some(summary) => log::info!(
            "Game over: score {}, {} barriers cleared, {} jumps",
            summary.score,
            summary.obstacles_cleared,
            jumps
        ),
        None => log::info!(
            "Autopilot survived {} ticks: score {}, {} jumps",
            MAX_TICKS,
            game.score(),
            jumps
        ),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
