//! Flappy Kiro entry point
//!
//! Browser: loads the sprite, then runs the game on `requestAnimationFrame`.
//! Native: headless autopilot session with a file-backed high score.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlImageElement, KeyboardEvent};

    use flappy_kiro::assets::Sprite;
    use flappy_kiro::persistence::{KeyValueStore, LocalStorageStore, MemoryStore};
    use flappy_kiro::platform::{FpsCounter, FrameClock, InputEvent, hud_class, map_input};
    use flappy_kiro::renderer::{Overlay, RenderState, Scene};
    use flappy_kiro::sim::GameEvent;
    use flappy_kiro::{GameController, ScoreStore, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        controller: GameController,
        render_state: Option<RenderState>,
        settings: Settings,
        clock: FrameClock,
        fps: FpsCounter,
        /// Last overlay pushed to the DOM
        shown_overlay: Option<Overlay>,
    }

    impl Game {
        fn new(controller: GameController, settings: Settings) -> Self {
            Self {
                controller,
                render_state: None,
                settings,
                clock: FrameClock::new(),
                fps: FpsCounter::new(),
                shown_overlay: None,
            }
        }

        fn handle_input(&mut self, event: InputEvent) {
            if let Some(action) = map_input(&event) {
                action.apply(&mut self.controller);
            }
        }

        /// One frame: simulate, report, render
        fn frame(&mut self, time: f64) {
            let elapsed = self.clock.frame(time);
            self.fps.record(time);

            self.controller.frame(elapsed);

            for event in self.controller.drain_events() {
                match event {
                    GameEvent::Crashed {
                        new_high_score: true,
                        score,
                    } => log::info!("New high score: {}", score),
                    other => log::debug!("{:?}", other),
                }
            }

            self.render();
        }

        fn render(&mut self) {
            let scene = Scene::build(&self.controller, &self.settings);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&scene) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            self.update_hud(scene.overlay);
        }

        /// Sync the DOM text overlays with the current frame
        fn update_hud(&mut self, overlay: Overlay) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if self.settings.show_fps {
                set_text(&document, "fps", &format!("{} FPS", self.fps.fps()));
            }

            if self.shown_overlay == Some(overlay) {
                return;
            }
            self.shown_overlay = Some(overlay);

            let start = matches!(overlay, Overlay::Start { .. });
            let playing = matches!(overlay, Overlay::Score(_));
            let game_over = matches!(overlay, Overlay::GameOver { .. });
            set_visible(&document, "start-screen", "overlay", start);
            set_visible(&document, "score", "", playing);
            set_visible(&document, "game-over", "overlay", game_over);

            match overlay {
                Overlay::Start { high_score } => {
                    set_visible(&document, "start-high-score", "purple", high_score > 0);
                    let text = format!("High Score: {}", high_score);
                    set_text(&document, "start-high-score", &text);
                }
                Overlay::Score(score) => set_text(&document, "score", &score.to_string()),
                Overlay::GameOver {
                    score,
                    high_score,
                    new_high_score,
                } => {
                    set_visible(&document, "new-high-score", "purple", new_high_score);
                    set_text(&document, "final-score", &format!("Score: {}", score));
                    set_visible(&document, "final-high-score", "purple", high_score > 0);
                    let text = format!("High Score: {}", high_score);
                    set_text(&document, "final-high-score", &text);
                }
                Overlay::None => {}
            }
        }
    }

    fn set_visible(document: &Document, id: &str, base_class: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", &hud_class(base_class, visible));
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Browser storage, or a throwaway map when LocalStorage is blocked
    fn open_store() -> Box<dyn KeyValueStore> {
        match LocalStorageStore::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("{}; scores will not persist", e);
                Box::new(MemoryStore::new())
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy Kiro starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Nothing runs until the sprite is decoded
        let img = HtmlImageElement::new().expect("failed to create image");
        {
            let img_clone = img.clone();
            let onload = Closure::once(move |_event: web_sys::Event| {
                wasm_bindgen_futures::spawn_local(start(canvas, img_clone));
            });
            img.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();
        }
        {
            let onerror = Closure::once(move |_event: web_sys::Event| {
                log::error!("Failed to load sprite {}", Sprite::DEFAULT_PATH);
                if let Some(el) = web_sys::window()
                    .and_then(|w| w.document())
                    .and_then(|d| d.get_element_by_id("loading"))
                {
                    el.set_text_content(Some("Failed to load game assets"));
                }
            });
            img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onerror.forget();
        }
        img.set_src(Sprite::DEFAULT_PATH);
    }

    async fn start(canvas: HtmlCanvasElement, img: HtmlImageElement) {
        let sprite = match Sprite::from_image_element(&img) {
            Ok(sprite) => sprite,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };
        log::info!("Sprite loaded ({}x{})", sprite.width, sprite.height);

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", &hud_class("overlay", false));
        }

        let settings = Settings::load(&*open_store());
        let scores = ScoreStore::load(open_store());
        let tuning = Tuning::default();
        let field = tuning.field_size();

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(
            GameController::new(tuning, scores, seed),
            settings,
        )));
        log::info!("Game initialized with seed: {}", seed);

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        match init_renderer(&canvas, width, height, field, &sprite).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Rendering disabled: {}", e),
        }

        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);

        log::info!("Flappy Kiro running!");
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
        field: glam::Vec2,
        sprite: &Sprite,
    ) -> Result<RenderState, flappy_kiro::renderer::RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, field, sprite).await
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let input = InputEvent::KeyDown(event.code());
                if map_input(&input).is_some() {
                    // Keep Space from scrolling the page
                    event.prevent_default();
                }
                game.borrow_mut().handle_input(input);
            });
            if let Some(window) = web_sys::window() {
                let _ = window
                    .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().handle_input(InputEvent::PointerDown);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::TouchEvent| {
                // Suppress the synthetic mousedown that would jump twice
                event.prevent_default();
                game.borrow_mut().handle_input(InputEvent::TouchStart);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::Duration;

    use flappy_kiro::assets::Sprite;
    use flappy_kiro::persistence::{FileStore, KeyValueStore, MemoryStore};
    use flappy_kiro::platform::Autopilot;
    use flappy_kiro::sim::GameEvent;
    use flappy_kiro::{GameController, ScoreStore, Tuning};

    /// Nominal frame time of the headless loop
    const FRAME: Duration = Duration::from_millis(16);

    #[derive(Debug)]
    pub struct Options {
        pub sprite: PathBuf,
        pub tuning: Option<PathBuf>,
        pub store: PathBuf,
        pub ticks: u64,
        pub seed: u64,
    }

    impl Default for Options {
        fn default() -> Self {
            Self {
                sprite: PathBuf::from(Sprite::DEFAULT_PATH),
                tuning: None,
                store: PathBuf::from("flappy-kiro-save.json"),
                ticks: 3600,
                seed: 1,
            }
        }
    }

    impl Options {
        pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
            let mut options = Self::default();
            let mut args = args.into_iter();
            while let Some(flag) = args.next() {
                let mut value = || args.next().ok_or_else(|| format!("{} needs a value", flag));
                match flag.as_str() {
                    "--sprite" => options.sprite = value()?.into(),
                    "--tuning" => options.tuning = Some(value()?.into()),
                    "--store" => options.store = value()?.into(),
                    "--ticks" => {
                        options.ticks = value()?
                            .parse::<u64>()
                            .map_err(|e| format!("--ticks: {}", e))?
                    }
                    "--seed" => {
                        options.seed = value()?
                            .parse::<u64>()
                            .map_err(|e| format!("--seed: {}", e))?
                    }
                    other => return Err(format!("unknown argument {}", other)),
                }
            }
            Ok(options)
        }
    }

    pub fn run(options: Options) -> Result<(), Box<dyn std::error::Error>> {
        // The controller only exists once the sprite has loaded
        let sprite = Sprite::load(&options.sprite)?;
        log::debug!("Sprite aspect {:.2}", sprite.aspect());

        let tuning = match &options.tuning {
            Some(path) => {
                let tuning = Tuning::from_json(&std::fs::read_to_string(path)?)?;
                log::info!("Tuning loaded from {}", path.display());
                tuning
            }
            None => Tuning::default(),
        };

        let store: Box<dyn KeyValueStore> = match FileStore::open(&options.store) {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("{}; scores will not persist", e);
                Box::new(MemoryStore::new())
            }
        };

        let mut game = GameController::new(tuning, ScoreStore::load(store), options.seed);
        let pilot = Autopilot::new();
        let mut runs = 0u32;
        let mut best = 0u32;

        for _ in 0..options.ticks {
            if pilot.wants_jump(&game) {
                game.on_jump();
            }
            game.frame(FRAME);

            for event in game.drain_events() {
                match event {
                    GameEvent::GameOver { score, high_score } => {
                        runs += 1;
                        best = best.max(score);
                        log::info!("Run {} over: score {} (high {})", runs, score, high_score);
                    }
                    other => log::debug!("{:?}", other),
                }
            }
        }

        log::info!(
            "Session done: {} ticks, {} runs, best {}, high score {}",
            options.ticks,
            runs,
            best,
            game.high_score()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Flappy Kiro (native, headless) starting...");

    let options = match native::Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = native::run(options) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
