//! Ball Burst entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement, KeyboardEvent, TouchEvent};

    use ball_burst::audio::{AudioHook, AudioManager};
    use ball_burst::effects::ParticleSystem;
    use ball_burst::highscores::HighScoreHook;
    use ball_burst::hooks::HookChain;
    use ball_burst::persistence::{KeyValueStore, default_store};
    use ball_burst::platform::{InputAction, map_key_down, map_key_up};
    use ball_burst::renderer::CanvasRenderer;
    use ball_burst::sim::GameSession;
    use ball_burst::{Difficulty, FrameDriver, GameConfig, Settings};

    /// Persistent animation frame callback, installed once and rescheduled
    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// Game instance holding all state
    struct Game {
        driver: FrameDriver,
        renderer: CanvasRenderer,
        settings: Settings,
        store: Box<dyn KeyValueStore>,
        /// Pending animation frame, if the loop is scheduled
        raf_id: Option<i32>,
    }

    impl Game {
        fn draw(&mut self) {
            self.driver.render(&mut self.renderer);
            self.update_hud();
        }

        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let hud = self.driver.hud();
            set_text(&document, "steps", &hud.steps);
            set_text(&document, "burst", &hud.burst);
            set_text(&document, "escaped", &hud.escaped);
            set_text(&document, "score", &hud.score);
            set_text(&document, "high-score", &hud.high_score);
            set_text(&document, "output", hud.result.as_deref().unwrap_or(""));
        }

        fn remember_difficulty(&mut self, difficulty: Difficulty) {
            self.settings.difficulty = difficulty;
            if let Err(e) = self.settings.save(self.store.as_mut()) {
                log::warn!("Failed to save settings: {}", e);
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Shared handle used by every event listener
    #[derive(Clone)]
    struct Runtime {
        game: Rc<RefCell<Game>>,
        frame: FrameCallback,
    }

    impl Runtime {
        fn apply(&self, action: InputAction) {
            {
                let mut g = self.game.borrow_mut();
                g.driver.apply(action);
                if let InputAction::SelectDifficulty(difficulty) = action {
                    g.remember_difficulty(difficulty);
                }
                g.draw();
            }
            self.sync_loop();
        }

        fn on_frame(&self, time: f64) {
            {
                let mut g = self.game.borrow_mut();
                g.raf_id = None;
                g.driver.frame(time);
                g.draw();
            }
            self.sync_loop();
        }

        /// Schedule a frame while playing, cancel the pending one otherwise
        fn sync_loop(&self) {
            let Some(window) = web_sys::window() else { return };
            let mut g = self.game.borrow_mut();

            if g.driver.is_running() {
                if g.raf_id.is_none() {
                    let callback = self.frame.borrow();
                    if let Some(callback) = callback.as_ref() {
                        g.raf_id = window
                            .request_animation_frame(callback.as_ref().unchecked_ref())
                            .ok();
                    }
                }
            } else if let Some(id) = g.raf_id.take() {
                if let Err(e) = window.cancel_animation_frame(id) {
                    log::warn!("Failed to cancel animation frame: {:?}", e);
                }
            }
        }
    }

    fn build_hooks(settings: &Settings, seed: u64) -> HookChain {
        let mut hooks = HookChain::new();
        if settings.audio {
            let mut audio = AudioManager::new();
            audio.set_volumes(
                settings.master_volume,
                settings.sfx_volume,
                settings.music_volume,
            );
            hooks.push(AudioHook::new(audio));
        }
        if settings.particles {
            hooks.push(ParticleSystem::new(seed ^ 0x9e37_79b9));
        }
        hooks.push(HighScoreHook::new(default_store()));
        hooks
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Ball Burst starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let config = GameConfig::default();
        canvas.set_width(config.field_width as u32);
        canvas.set_height(config.field_height as u32);
        let renderer = CanvasRenderer::new(&canvas).ok_or("no 2d context")?;

        let store = default_store();
        let settings = Settings::load(store.as_ref());

        let seed = js_sys::Date::now() as u64;
        let session = GameSession::new(config, settings.difficulty, seed);
        let driver = FrameDriver::new(session, build_hooks(&settings, seed));
        log::info!("Game initialized with seed: {}", seed);

        check_difficulty(&document, settings.difficulty);

        let runtime = Runtime {
            game: Rc::new(RefCell::new(Game {
                driver,
                renderer,
                settings,
                store,
                raf_id: None,
            })),
            frame: Rc::new(RefCell::new(None)),
        };
        {
            let rt = runtime.clone();
            *runtime.frame.borrow_mut() =
                Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| rt.on_frame(time)));
        }

        setup_keyboard(&document, &runtime);
        setup_touch(&canvas, &runtime);
        setup_buttons(&document, &runtime);
        setup_difficulty_selector(&document, &runtime);
        setup_auto_pause(&document, &runtime);

        // Draw the menu screen; the loop starts with the first Start action
        runtime.game.borrow_mut().draw();

        log::info!("Ball Burst ready - press Space or Start to play");
        Ok(())
    }

    fn check_difficulty(document: &Document, difficulty: Difficulty) {
        let id = format!("difficulty-{}", difficulty.as_str());
        if let Some(input) = document
            .get_element_by_id(&id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_checked(true);
        }
    }

    fn setup_keyboard(document: &Document, runtime: &Runtime) {
        {
            let rt = runtime.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                if let Some(action) = map_key_down(&event.key()) {
                    event.prevent_default();
                    rt.apply(action);
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let rt = runtime.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = map_key_up(&event.key()) {
                    rt.apply(action);
                }
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn first_touch_x(event: &TouchEvent) -> Option<f32> {
        event.touches().get(0).map(|t| t.client_x() as f32)
    }

    fn setup_touch(canvas: &HtmlCanvasElement, runtime: &Runtime) {
        // Touch start
        {
            let rt = runtime.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(x) = first_touch_x(&event) {
                    rt.game.borrow_mut().driver.touch.begin(x);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let rt = runtime.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let Some(x) = first_touch_x(&event) else { return };
                let action = rt.game.borrow_mut().driver.touch.move_to(x);
                if let Some(action) = action {
                    rt.apply(action);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let rt = runtime.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                rt.game.borrow_mut().driver.touch.end();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Click buttons, plus press-and-hold for the on-screen arrows
    fn setup_buttons(document: &Document, runtime: &Runtime) {
        let clicks = [
            ("start-btn", InputAction::Start),
            ("pause-btn", InputAction::TogglePause),
            ("reset-btn", InputAction::Reset),
        ];
        for (id, action) in clicks {
            bind(document, id, "click", runtime, action);
        }

        for (id, action) in [
            ("left-btn", InputAction::MoveLeft),
            ("right-btn", InputAction::MoveRight),
        ] {
            bind(document, id, "mousedown", runtime, action);
            bind(document, id, "touchstart", runtime, action);
            bind(document, id, "mouseup", runtime, InputAction::StopMove);
            bind(document, id, "mouseleave", runtime, InputAction::StopMove);
            bind(document, id, "touchend", runtime, InputAction::StopMove);
        }
    }

    fn bind(document: &Document, id: &str, event: &str, runtime: &Runtime, action: InputAction) {
        let Some(el) = document.get_element_by_id(id) else {
            log::debug!("No #{} element, skipping {} binding", id, event);
            return;
        };
        let rt = runtime.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            rt.apply(action);
        });
        let _ = el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_difficulty_selector(document: &Document, runtime: &Runtime) {
        for difficulty in Difficulty::ALL {
            let id = format!("difficulty-{}", difficulty.as_str());
            bind(
                document,
                &id,
                "change",
                runtime,
                InputAction::SelectDifficulty(difficulty),
            );
        }
    }

    fn setup_auto_pause(document: &Document, runtime: &Runtime) {
        let rt = runtime.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if document.visibility_state() != web_sys::VisibilityState::Hidden {
                return;
            }
            let should_pause = {
                let g = rt.game.borrow();
                g.settings.pause_on_hide && g.driver.is_running()
            };
            if should_pause {
                rt.apply(InputAction::TogglePause);
                log::info!("Auto-paused (tab hidden)");
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use ball_burst::audio::{AudioHook, SilentAudio};
    use ball_burst::effects::ParticleSystem;
    use ball_burst::highscores::HighScoreHook;
    use ball_burst::hooks::HookChain;
    use ball_burst::persistence::MemoryStore;
    use ball_burst::platform::InputAction;
    use ball_burst::renderer::DrawList;
    use ball_burst::sim::GameSession;
    use ball_burst::{ConfigError, Difficulty, FrameDriver, GameConfig};

    /// Fixed timestep for simulated frames (ms)
    const FRAME_MS: f64 = 16.0;
    /// Give up on rounds that somehow never finish
    const MAX_FRAMES: u64 = 1_000_000;

    /// Usage: `ball-burst [difficulty] [config.json]`
    pub fn run(args: &[String]) -> Result<(), ConfigError> {
        let difficulty = match args.first() {
            Some(name) => name.parse::<Difficulty>()?,
            None => Difficulty::default(),
        };
        let config = match args.get(1) {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                GameConfig::from_json(&json)?
            }
            None => GameConfig::default(),
        };

        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        log::info!("Headless round: {} (seed {})", difficulty, seed);

        let hooks = HookChain::new()
            .with(AudioHook::new(SilentAudio))
            .with(ParticleSystem::new(seed))
            .with(HighScoreHook::new(Box::new(MemoryStore::new())));
        let mut driver = FrameDriver::new(GameSession::new(config, difficulty, seed), hooks);
        driver.apply(InputAction::Start);
        driver.set_autopilot(true);

        let mut frames = 0u64;
        let mut draw_list = DrawList::default();
        while driver.frame(frames as f64 * FRAME_MS) {
            driver.render(&mut draw_list);
            frames += 1;
            if frames >= MAX_FRAMES {
                log::warn!("Round did not finish after {} frames", frames);
                break;
            }
        }

        let hud = driver.hud();
        log::info!("{} | {} | {} | {}", hud.steps, hud.burst, hud.escaped, hud.score);
        match hud.result {
            Some(result) => println!("{}", result),
            None => println!("Round unfinished: {}", hud.steps),
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Ball Burst (native) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = headless::run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
