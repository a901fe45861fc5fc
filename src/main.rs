//! Freefall entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use freefall::BestDistance;
    use freefall::consts::*;
    use freefall::render::CanvasRenderer;
    use freefall::sim::{GamePhase, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        best: BestDistance,
        input: TickInput,
        accumulator: f32,
        last_time: f64,
        debug_overlay: bool,
        // Track phase for best-distance submission
        last_phase: GamePhase,
    }

    impl Game {
        fn new(seed: u64, renderer: CanvasRenderer, best: BestDistance) -> Self {
            Self {
                state: GameState::new(seed),
                renderer,
                best,
                input: TickInput::default(),
                accumulator: 0.0,
                last_time: 0.0,
                debug_overlay: false,
                last_phase: GamePhase::Intro,
            }
        }

        /// Run simulation ticks for the elapsed frame time
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.start = false;
            }

            let phase = self.state.phase;
            if phase != self.last_phase {
                if phase == GamePhase::GameOver {
                    let now = js_sys::Date::now();
                    if self.best.submit(self.state.fallen, self.state.seed, now) {
                        log::info!("New best distance: {:.0}", self.best.distance);
                        self.best.save();
                    }
                }
                self.last_phase = phase;
            }
        }

        fn render(&self) {
            self.renderer.render(&self.state, self.debug_overlay);
        }

        /// Update HUD elements in the DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            if let Some(el) = document.get_element_by_id("hud-altitude") {
                el.set_text_content(Some(&format!("{:.0}", self.state.altitude())));
            }
            if let Some(el) = document.get_element_by_id("hud-best") {
                el.set_text_content(Some(&format!("{:.0}", self.best.distance)));
            }
            if let Some(el) = document.get_element_by_id("hud-speed") {
                el.set_text_content(Some(&format!("{:.0}", self.state.speed())));
            }
            if let Some(el) = document.get_element_by_id("hud-wind") {
                let arrow = if self.state.wind < -0.1 {
                    "<"
                } else if self.state.wind > 0.1 {
                    ">"
                } else {
                    "-"
                };
                el.set_text_content(Some(&format!("{} {:.1}", arrow, self.state.wind.abs())));
            }

            // Intro panel shown until the first start
            if let Some(el) = document.get_element_by_id("intro") {
                if self.state.phase == GamePhase::Intro {
                    let _ = el.set_attribute("class", "panel");
                } else {
                    let _ = el.set_attribute("class", "panel hidden");
                }
            }

            // Game-over panel with final and best distance
            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.phase == GamePhase::GameOver {
                    let _ = el.set_attribute("class", "panel");
                    if let Some(final_el) = document.get_element_by_id("final-distance") {
                        final_el.set_text_content(Some(&format!("{:.0}", self.state.fallen)));
                    }
                    if let Some(best_el) = document.get_element_by_id("best-distance") {
                        best_el.set_text_content(Some(&format!("{:.0}", self.best.distance)));
                    }
                } else {
                    let _ = el.set_attribute("class", "panel hidden");
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Freefall starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Match backing store to the displayed size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let renderer = CanvasRenderer::new(&canvas).expect("no 2d canvas context");
        let best = BestDistance::load();

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, renderer, best)));

        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone());
        setup_resize(game.clone(), canvas);

        request_animation_frame(game);

        log::info!("Freefall running!");
    }

    /// Keyboard listeners only set/clear flags; the frame loop samples them
    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().to_lowercase().as_str() {
                    "w" => g.input.up = true,
                    "a" => g.input.left = true,
                    "s" => g.input.down = true,
                    "d" => g.input.right = true,
                    " " => {
                        if !event.repeat() {
                            g.input.start = true;
                        }
                        event.prevent_default();
                    }
                    "f" => {
                        if !event.repeat() {
                            g.debug_overlay = !g.debug_overlay;
                            log::info!("Debug overlay: {}", g.debug_overlay);
                        }
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().to_lowercase().as_str() {
                    "w" => g.input.up = false,
                    "a" => g.input.left = false,
                    "s" => g.input.down = false,
                    "d" => g.input.right = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Keep the canvas backing store matched to the displayed size
    fn setup_resize(game: Rc<RefCell<Game>>, canvas: HtmlCanvasElement) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let window = web_sys::window().unwrap();
            let dpr = window.device_pixel_ratio();
            let width = (canvas.client_width() as f64 * dpr) as u32;
            let height = (canvas.client_height() as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);
            game.borrow_mut().renderer.resize(width, height);
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

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use freefall::consts::SIM_DT;
    use freefall::sim::{GamePhase, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Freefall (native) starting headless demo run...");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0xF00D);

    let mut state = GameState::new(seed);
    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
    );

    // Hands-off autopilot: fall until something hits us
    let mut ticks = 0u32;
    while state.phase == GamePhase::Falling && ticks < 36_000 {
        tick(&mut state, &TickInput::default());
        ticks += 1;
    }

    println!(
        "Run over: {:.0} units fallen in {:.1}s of simulated time (seed {})",
        state.fallen,
        ticks as f32 * SIM_DT,
        seed
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
