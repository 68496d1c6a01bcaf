//! Stick Hero entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use stick_hero::Settings;
    use stick_hero::consts::PERFECT_INDICATOR_MS;
    use stick_hero::persistence::LocalStore;
    use stick_hero::platform::InputEvent;
    use stick_hero::renderer::{RenderInitError, RenderState, SceneStyle, tessellate};
    use stick_hero::session::Session;
    use stick_hero::settings::Palette;
    use stick_hero::sim::GameEvent;

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStore>,
        settings: Settings,
        palette: Palette,
        render_state: Option<RenderState>,
        /// An animation frame is pending
        loop_active: bool,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let session = Session::new(LocalStore::new(), seed);
            let settings = Settings::load(session.store());
            // Write back so the theme table can be edited in storage
            settings.save(session.store());
            let palette = settings.palette();
            Self {
                session,
                settings,
                palette,
                render_state: None,
                loop_active: false,
            }
        }

        /// Render the current frame
        fn draw(&mut self) {
            let style = SceneStyle {
                palette: &self.palette,
                grid: self.settings.grid(),
                scanlines: self.settings.scanlines,
            };
            let vertices = tessellate(&self.session.scene(style));

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let Some(document) = window.document() else {
                return;
            };
            let now = window.performance().map(|p| p.now()).unwrap_or(0.0);
            let hud = self.session.hud(now);

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&format!("SCORE: {}", hud.score)));
            }
            if let Some(el) = document.get_element_by_id("highestScore") {
                el.set_text_content(Some(&format!("HIGH SCORE: {}", hud.best)));
            }

            let toggles = [
                ("perfect", hud.perfect),
                ("introduction", hud.introduction),
                ("game-over", hud.game_over),
            ];
            for (id, visible) in toggles {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
                }
            }
        }

        fn resize_to(&mut self, canvas: &HtmlCanvasElement) {
            let width = canvas.client_width().max(1) as u32;
            let height = canvas.client_height().max(1) as u32;
            canvas.set_width(width);
            canvas.set_height(height);
            self.session.resize(width as f32, height as f32);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height);
            }
        }
    }

    async fn init_renderer(
        canvas: HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<RenderState, RenderInitError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height).await
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Stick Hero starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        ensure_game_over_overlay(&document);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        game.borrow_mut().resize_to(&canvas);

        let (width, height) = (canvas.width(), canvas.height());
        match init_renderer(canvas.clone(), width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Rendering disabled: {}", e),
        }

        setup_input_handlers(game.clone());
        setup_resize_handler(&canvas, game.clone());

        {
            let mut g = game.borrow_mut();
            g.draw();
            g.update_hud();
        }

        log::info!("Stick Hero running!");
    }

    /// Overlay shown when a fall ends the run
    fn ensure_game_over_overlay(document: &web_sys::Document) {
        if document.get_element_by_id("game-over").is_some() {
            return;
        }
        let Ok(el) = document.create_element("div") else {
            return;
        };
        el.set_id("game-over");
        let _ = el.set_attribute("class", "hidden");
        el.set_inner_html(
            "<div>GAME OVER</div><div class=\"hint\">Press SPACE to restart</div>",
        );
        if let Some(body) = document.body() {
            let _ = body.append_child(&el);
        }
    }

    /// Feed an input event to the session and start the loop if needed
    fn dispatch(game: &Rc<RefCell<Game>>, event: InputEvent) {
        let start_loop = {
            let mut g = game.borrow_mut();
            let wants_loop = g.session.handle_input(&event);
            g.draw();
            g.update_hud();
            let start = wants_loop && !g.loop_active;
            if start {
                g.loop_active = true;
            }
            start
        };
        if start_loop {
            request_animation_frame(game.clone());
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                dispatch(&game, InputEvent::PointerDown);
            });
            let _ = window
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                dispatch(&game, InputEvent::PointerUp);
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start/end (prevent the tap highlight and emulated mouse events)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                dispatch(&game, InputEvent::TouchStart);
            });
            let _ = window
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                dispatch(&game, InputEvent::TouchEnd);
            });
            let _ = window
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if key == stick_hero::platform::input::RESTART_KEY {
                    event.prevent_default();
                }
                dispatch(&game, InputEvent::Key(key));
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            g.resize_to(&canvas);
            g.draw();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Re-evaluate the HUD once the perfect indicator has expired
    fn schedule_hud_refresh(game: Rc<RefCell<Game>>, delay_ms: f64) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move || {
            game.borrow().update_hud();
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay_ms as i32,
        );
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let (keep_running, perfect) = {
            let mut g = game.borrow_mut();

            let (keep_running, perfect) = match g.session.on_frame(time) {
                Ok(outcome) => {
                    let perfect = outcome
                        .events
                        .iter()
                        .any(|e| matches!(e, GameEvent::Scored { perfect: true, .. }));
                    (outcome.keep_running, perfect)
                }
                Err(e) => {
                    log::error!("Game loop stopped: {}", e);
                    (false, false)
                }
            };

            g.draw();
            g.update_hud();
            g.loop_active = keep_running;
            (keep_running, perfect)
        };

        if perfect {
            schedule_hud_refresh(game.clone(), PERFECT_INDICATOR_MS);
        }
        if keep_running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Stick Hero (native) starting...");
    log::info!("Native mode runs a headless autoplay demo");
    log::info!("Run with `trunk serve` for the web version");

    if let Err(e) = autoplay::run() {
        log::error!("Autoplay aborted: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: a bot aims each stick at the next platform with some jitter
#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use rand::Rng;

    use stick_hero::Settings;
    use stick_hero::persistence::MemoryStore;
    use stick_hero::renderer::{SceneStyle, tessellate};
    use stick_hero::session::Session;
    use stick_hero::sim::{Command, SimError};

    /// Frame spacing of a 60 Hz display
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_ROUNDS: u32 = 50;
    /// Bot aiming error in world units
    const AIM_JITTER: f32 = 15.0;

    pub fn run() -> Result<(), SimError> {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let mut session = Session::new(MemoryStore::new(), seed);
        let settings = Settings::default();
        let palette = settings.palette();
        let mut rng = rand::rng();
        let mut time = 0.0;

        for round in 1..=MAX_ROUNDS {
            let state = session.state();
            let stick = *state.active_stick();
            let Some(target) = state.platforms.iter().find(|p| p.x > stick.x).copied() else {
                break;
            };
            let aim = target.center() - stick.x + rng.random_range(-AIM_JITTER..AIM_JITTER);

            session.handle_command(Command::BeginStretch);
            while session.state().active_stick().length < aim {
                time += FRAME_MS;
                session.on_frame(time)?;
            }
            session.handle_command(Command::ReleaseStretch);

            loop {
                time += FRAME_MS;
                if !session.on_frame(time)?.keep_running {
                    break;
                }
            }

            let style = SceneStyle {
                palette: &palette,
                grid: settings.grid(),
                scanlines: settings.scanlines,
            };
            let vertices = tessellate(&session.scene(style));
            let hud = session.hud(time);
            log::info!(
                "Round {}: score {} best {} ({} vertices)",
                round,
                hud.score,
                hud.best,
                vertices.len()
            );

            if hud.game_over {
                println!(
                    "Game over after {} rounds with score {} (seed {})",
                    round,
                    hud.score,
                    session.state().seed
                );
                return Ok(());
            }
        }

        println!("Bot survived {} rounds, score {}", MAX_ROUNDS, session.state().score);
        Ok(())
    }
}
