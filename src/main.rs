//! Meteor Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlInputElement, KeyboardEvent,
    };

    use meteor_dash::Game;
    use meteor_dash::audio::AudioMixer;
    use meteor_dash::audio::web::WebAudio;
    use meteor_dash::consts::{LOGICAL_H, LOGICAL_W};
    use meteor_dash::platform::web::{CanvasSink, DomHud, LocalStore};
    use meteor_dash::sim::Tuning;

    struct App {
        game: Game,
        ctx: CanvasRenderingContext2d,
        last_time: Option<f64>,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            let elapsed = self.last_time.map_or(0.0, |last| time - last);
            self.last_time = Some(time);
            self.game.update(elapsed);
            self.game.render(&mut CanvasSink::new(&self.ctx));
        }
    }

    fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
        canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Meteor Dash starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("Missing #gameCanvas");
            return;
        };
        canvas.set_width(LOGICAL_W as u32);
        canvas.set_height(LOGICAL_H as u32);
        let Some(ctx) = context_2d(&canvas) else {
            log::error!("Canvas 2D context unavailable");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(
            seed,
            Tuning::default(),
            Box::new(LocalStore::new()),
            AudioMixer::new(Box::new(WebAudio::new())),
            Box::new(DomHud::new()),
        );
        let app = Rc::new(RefCell::new(App {
            game,
            ctx,
            last_time: None,
        }));

        setup_input_handlers(app.clone());
        setup_sound_controls(&document, app.clone());
        setup_restart_button(&document, app.clone());
        request_animation_frame(app);

        log::info!("Meteor Dash running!");
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                // Keep the page from scrolling
                if matches!(key.as_str(), " " | "ArrowLeft" | "ArrowRight") {
                    event.prevent_default();
                }
                app.borrow_mut().game.key_down(&key);
            });
            let _ =
                window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().game.key_up(&event.key());
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keys released while unfocused never fire keyup
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().game.release_keys();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        let Some(el) = document.get_element_by_id(id) else {
            log::info!("No #{} element", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| handler());
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_slider(document: &Document, id: &str, mut handler: impl FnMut(f32) + 'static) {
        let Some(input) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            log::info!("No #{} slider", id);
            return;
        };
        let target = input.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            match target.value().parse::<f32>() {
                Ok(value) => handler(value),
                Err(e) => log::warn!("Bad slider value {:?}: {}", target.value(), e),
            }
        });
        let _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn music_label(on: bool) -> &'static str {
        if on { "🔊 Music: On" } else { "🔇 Music: Off" }
    }

    fn setup_sound_controls(document: &Document, app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            on_slider(document, "musicVolume", move |v| {
                app.borrow_mut().game.set_music_volume(v)
            });
        }
        {
            let app = app.clone();
            on_slider(document, "fxVolume", move |v| {
                app.borrow_mut().game.set_sfx_volume(v)
            });
        }

        let settings = app.borrow().game.settings().clone();
        for (id, value) in [
            ("musicVolume", settings.music_volume),
            ("fxVolume", settings.sfx_volume),
        ] {
            if let Some(input) = document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            {
                input.set_value(&value.to_string());
            }
        }

        if let Some(btn) = document.get_element_by_id("toggleMusicBtn") {
            btn.set_text_content(Some(music_label(settings.music)));
            on_click(document, "toggleMusicBtn", move || {
                let on = app.borrow_mut().game.toggle_music();
                btn.set_text_content(Some(music_label(on)));
            });
        }
    }

    fn setup_restart_button(document: &Document, app: Rc<RefCell<App>>) {
        on_click(document, "restartBtn", move || {
            app.borrow_mut().game.reset();
            log::info!("Restarted from button");
        });
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            app.borrow_mut().frame(time);
            request_animation_frame(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::Path;
    use std::time::{SystemTime, UNIX_EPOCH};

    use meteor_dash::Game;
    use meteor_dash::audio::AudioMixer;
    use meteor_dash::persistence::{JsonFileStore, KeyValueStore, MemoryStore};
    use meteor_dash::renderer::{DrawCommand, shapes};
    use meteor_dash::sim::{GameState, Tuning};
    use meteor_dash::ui::LogHud;

    /// Frame length fed to the simulation
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after five minutes of play
    const MAX_FRAMES: u32 = 60 * 60 * 5;
    const STORE_PATH: &str = "meteor_dash.json";

    fn load_tuning(path: Option<String>) -> Tuning {
        let Some(path) = path else {
            return Tuning::default();
        };
        match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|text| Tuning::from_json(&text).map_err(|e| e.to_string()))
        {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                Tuning::default()
            }
        }
    }

    fn open_store() -> Box<dyn KeyValueStore> {
        match JsonFileStore::open(Path::new(STORE_PATH)) {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("Records will not persist: {}", e);
                Box::new(MemoryStore::new())
            }
        }
    }

    /// Steer away from the closest meteor above the player and shoot at it
    fn autopilot(state: &GameState) -> (bool, bool, bool) {
        let player = state.player.bounds();
        let center = state.player.center();
        let threat = state
            .meteors
            .iter()
            .filter(|m| m.pos.y < player.max().y && m.pos.y + m.size > player.min().y - 160.0)
            .min_by(|a, b| (center.x - a.center().x).abs().total_cmp(&(center.x - b.center().x).abs()));

        match threat {
            Some(m) => {
                let dx = m.center().x - center.x;
                let close = dx.abs() < (m.size + player.size.x) * 0.5 + 8.0;
                let go_left = (dx > 0.0 && center.x > 40.0) || center.x > 360.0;
                (close && go_left, close && !go_left, close)
            }
            None => (false, false, false),
        }
    }

    fn hold(game: &mut Game, key: &str, down: bool) {
        if down {
            game.key_down(key);
        } else {
            game.key_up(key);
        }
    }

    pub fn run() {
        let tuning = load_tuning(std::env::args().nth(1));
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let mut game = Game::new(
            seed,
            tuning,
            open_store(),
            AudioMixer::default(),
            Box::new(LogHud),
        );

        let mut frames = 0;
        while frames < MAX_FRAMES && !game.state().is_game_over() {
            let (left, right, fire) = autopilot(game.state());
            hold(&mut game, "ArrowLeft", left);
            hold(&mut game, "ArrowRight", right);
            hold(&mut game, " ", fire);
            game.update(FRAME_MS);
            frames += 1;
        }
        // Let the deferred notice fire
        game.update(FRAME_MS * 15.0);

        let mut frame: Vec<DrawCommand> = Vec::new();
        game.render(&mut frame);
        let vertices = shapes::tessellate(&frame);
        log::info!(
            "Finished after {} frames: score {}, best {}, zone {}, last frame {} commands / {} vertices",
            frames,
            game.state().score,
            game.state().records.best_score,
            game.state().zone,
            frame.len(),
            vertices.len()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Meteor Dash (native) starting headless autopilot run...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
