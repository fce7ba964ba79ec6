//! Tower Stack entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent, TouchEvent};

    use tower_stack::audio::AudioManager;
    use tower_stack::consts::DEFAULT_VIEWPORT;
    use tower_stack::renderer::{RenderState, scene_vertices};
    use tower_stack::sim::{GameEvent, GamePhase, Simulation, TickInput};
    use tower_stack::{Settings, Tuning};

    struct Game {
        sim: Simulation,
        render_state: Option<RenderState>,
        audio: AudioManager,
        input: TickInput,
        last_phase: GamePhase,
        overlay_shown: bool,
    }

    impl Game {
        fn new(settings: &Settings, seed: u64, width: f32, height: f32) -> Self {
            Self {
                sim: Simulation::new(Tuning::default(), width, height, seed),
                render_state: None,
                audio: AudioManager::new(settings),
                input: TickInput::default(),
                last_phase: GamePhase::Menu,
                overlay_shown: false,
            }
        }

        fn update(&mut self) {
            let input = std::mem::take(&mut self.input);
            self.sim.step(&input);

            for event in self.sim.drain_events() {
                if let Some(cue) = event.cue() {
                    self.audio.play(cue);
                }
                match event {
                    GameEvent::Placed { .. } => bump_score(),
                    GameEvent::Started => self.overlay_shown = false,
                    _ => {}
                }
            }
        }

        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = scene_vertices(self.sim.state());
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let logical = render_state.logical_size;
                        render_state.resize(render_state.size.0, render_state.size.1, logical);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = self.sim.state();

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&state.score.to_string()));
            }

            if state.phase != self.last_phase {
                if state.phase == GamePhase::Playing {
                    set_active(&document, "start-screen", false);
                    set_active(&document, "game-over-screen", false);
                }
                if state.phase == GamePhase::GameOver {
                    if let Some(el) = document.get_element_by_id("final-score") {
                        el.set_text_content(Some(&state.score.to_string()));
                    }
                }
                self.last_phase = state.phase;
            }

            // End overlay appears after a short delay so the last debris is visible
            if state.game_over_overlay_visible() && !self.overlay_shown {
                set_active(&document, "game-over-screen", true);
                self.overlay_shown = true;
            }
        }
    }

    fn set_active(document: &Document, id: &str, active: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let result = if active {
                classes.add_1("active")
            } else {
                classes.remove_1("active")
            };
            if result.is_err() {
                log::warn!("Could not toggle overlay `{}`", id);
            }
        }
    }

    /// Restart the score pop animation
    fn bump_score() {
        let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("score"))
        else {
            return;
        };
        let classes = el.class_list();
        let _ = classes.remove_1("bump");
        // Force reflow so the animation restarts
        let _ = el.get_bounding_client_rect();
        let _ = classes.add_1("bump");
    }

    fn viewport(window: &web_sys::Window) -> (f32, f32) {
        let w = window.inner_width().ok().and_then(|v| v.as_f64());
        let h = window.inner_height().ok().and_then(|v| v.as_f64());
        match (w, h) {
            (Some(w), Some(h)) => (w as f32, h as f32),
            _ => DEFAULT_VIEWPORT,
        }
    }

    fn size_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32, f32, f32) {
        let (w, h) = viewport(window);
        let dpr = window.device_pixel_ratio();
        let width = (w as f64 * dpr) as u32;
        let height = (h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height, w, h)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Tower Stack starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #gameCanvas element");
            return;
        };

        let (width, height, logical_w, logical_h) = size_canvas(&window, &canvas);

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(&settings, seed, logical_w, logical_h)));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::default(),
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        match RenderState::new(surface, &adapter, width, height, (logical_w, logical_h)).await {
                            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Failed to create device: {}", e),
                        }
                    }
                    Err(e) => log::error!("Failed to get adapter: {}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {}", e),
        }

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());
        setup_resize(canvas, game.clone());

        set_active(&document, "start-screen", true);

        request_animation_frame(game);

        log::info!("Tower Stack running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse down - place block
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.place = true;
                g.audio.resume();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - place block (and keep the page from scrolling)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.input.place = true;
                g.audio.resume();
            });
            let options = web_sys::AddEventListenerOptions::new();
            options.set_passive(false);
            let _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for id in ["start-btn", "restart-btn"] {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("No #{} button", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.start = true;
                g.audio.resume();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height, logical_w, logical_h) = size_canvas(&window_clone, &canvas);
            let mut g = game.borrow_mut();
            g.input.resize = Some((logical_w, logical_h));
            if let Some(ref mut render_state) = g.render_state {
                render_state.resize(width, height, (logical_w, logical_h));
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use tower_stack::autoplay;
    use tower_stack::consts::DEFAULT_VIEWPORT;
    use tower_stack::sim::Simulation;
    use tower_stack::{Settings, Tuning};

    env_logger::init();
    log::info!("Tower Stack (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    // Optional tuning file as the first argument
    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Could not load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let seed = Settings::load().seed.unwrap_or(42);
    let (width, height) = DEFAULT_VIEWPORT;
    let mut sim = Simulation::new(tuning, width, height, seed);

    println!("\nRunning autoplay demo...");
    let report = autoplay::run(&mut sim, 6.0, 200_000);
    println!(
        "Score {} after {} ticks (tower height {}, {})",
        report.score,
        report.ticks,
        report.tower_height,
        if report.finished { "game over" } else { "still standing" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
