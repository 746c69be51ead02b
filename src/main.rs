//! Neon Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, MouseEvent, Window};

    use neon_dash::platform::{FrameLoop, FrameRequest, FrameScheduler};
    use neon_dash::sim::GameEvent;
    use neon_dash::{Game, Settings, Tuning};

    // Presentation hook: the page's renderer receives each frame as plain JSON
    #[wasm_bindgen(inline_js = "
        export function render_frame(json) {
            if (typeof window.neonDashRender === 'function') {
                window.neonDashRender(JSON.parse(json));
            }
        }

        export function show_overlay(kind, score) {
            if (typeof window.neonDashOverlay === 'function') {
                window.neonDashOverlay(kind, score);
            }
        }
    ")]
    extern "C" {
        fn render_frame(json: &str);
        fn show_overlay(kind: &str, score: f64);
    }

    /// `requestAnimationFrame` behind the scheduler trait
    struct BrowserScheduler {
        window: Window,
        callback: Option<Closure<dyn FnMut(f64)>>,
    }

    impl FrameScheduler for BrowserScheduler {
        fn request_frame(&mut self) -> Option<FrameRequest> {
            let callback = self.callback.as_ref()?;
            match self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())
            {
                Ok(id) => Some(FrameRequest(i64::from(id))),
                Err(e) => {
                    log::error!("requestAnimationFrame failed: {:?}", e);
                    None
                }
            }
        }

        fn cancel_frame(&mut self, request: FrameRequest) {
            if let Err(e) = self.window.cancel_animation_frame(request.0 as i32) {
                log::warn!("cancelAnimationFrame failed: {:?}", e);
            }
        }
    }

    /// Mounted game plus its loop
    struct Host {
        game: Game,
        frames: FrameLoop<BrowserScheduler>,
    }

    impl Host {
        fn on_frame(&mut self) {
            let Host { game, frames } = self;
            frames.on_frame(|| {
                for event in game.frame() {
                    // UI overlays only change on transitions
                    match event {
                        GameEvent::Started => show_overlay("playing", 0.0),
                        GameEvent::Crashed { score } => show_overlay("crashed", score as f64),
                    }
                }
                match serde_json::to_string(&game.snapshot()) {
                    Ok(json) => render_frame(&json),
                    Err(e) => log::warn!("Frame serialization failed: {}", e),
                }
            });
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Neon Dash starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;

        let game = Game::new(seed, Tuning::default(), &settings)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let host = Rc::new(RefCell::new(Host {
            game,
            frames: FrameLoop::new(BrowserScheduler {
                window: window.clone(),
                callback: None,
            }),
        }));

        // The frame callback only holds a weak reference so teardown can drop the host
        let weak: Weak<RefCell<Host>> = Rc::downgrade(&host);
        let callback = Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
            if let Some(host) = weak.upgrade() {
                host.borrow_mut().on_frame();
            }
        });
        host.borrow_mut().frames.scheduler_mut().callback = Some(callback);

        let trigger = host.borrow().game.trigger_handle();
        setup_input_handlers(&window, trigger)?;
        setup_teardown(&window, host.clone())?;

        show_overlay("menu", 0.0);
        host.borrow_mut().frames.start();

        log::info!("Neon Dash running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &Window,
        trigger: neon_dash::platform::TriggerSlot,
    ) -> Result<(), JsValue> {
        // Keyboard
        {
            let trigger = trigger.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if matches!(event.code().as_str(), "Space" | "ArrowUp") {
                    event.prevent_default();
                    trigger.press();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse / tap
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
                trigger.press();
            });
            window
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Stop on `pagehide`, resume on `pageshow` (back/forward cache restore)
    fn setup_teardown(window: &Window, host: Rc<RefCell<Host>>) -> Result<(), JsValue> {
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                host.borrow_mut().frames.stop();
            });
            window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                // No-op on the initial load, the loop is already running
                if host.borrow_mut().frames.start() {
                    log::info!("Frame loop resumed");
                }
            });
            window
                .add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result};
    use clap::Parser;

    use neon_dash::platform::{FrameLoop, HeadlessScheduler};
    use neon_dash::sim::{GameEvent, GamePhase};
    use neon_dash::{Game, QualityPreset, Settings, Tuning};

    fn parse_quality(s: &str) -> Result<QualityPreset, String> {
        QualityPreset::parse(s)
            .ok_or_else(|| format!("unknown quality preset `{s}` (low, medium, high)"))
    }

    /// Run Neon Dash headless and report how far the run got
    #[derive(Debug, Parser)]
    #[command(name = "neon-dash", version, about)]
    pub struct Cli {
        /// RNG seed for the course (defaults to the current time)
        #[arg(long)]
        pub seed: Option<u64>,
        /// Frames to simulate before stopping
        #[arg(long, default_value_t = 3600)]
        pub frames: u64,
        /// JSON file overriding the default balance
        #[arg(long)]
        pub tuning: Option<PathBuf>,
        /// Quality preset capping the death burst (low, medium, high)
        #[arg(long, value_parser = parse_quality)]
        pub quality: Option<QualityPreset>,
        /// Do not let the autopilot jump
        #[arg(long)]
        pub no_autopilot: bool,
        /// Enable debug logging
        #[arg(short, long)]
        pub verbose: bool,
    }

    fn init_logging(verbose: bool) {
        let level = if verbose { "debug" } else { "info" };
        let env = env_logger::Env::default().default_filter_or(level);
        let _ = env_logger::Builder::from_env(env).try_init();
    }

    fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading tuning file {}", path.display()))?;
        Tuning::from_json(&json).with_context(|| format!("loading tuning file {}", path.display()))
    }

    pub fn run(cli: Cli) -> Result<()> {
        init_logging(cli.verbose);

        let tuning = load_tuning(cli.tuning.as_ref())?;
        let seed = match cli.seed {
            Some(seed) => seed,
            None => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .context("system clock is before the epoch")?
                .as_millis() as u64,
        };
        let base = cli.quality.map_or_else(Settings::load, Settings::from_preset);
        let settings = Settings {
            demo_mode: !cli.no_autopilot,
            ..base
        };

        log::info!("Neon Dash (native) starting...");
        let mut game = Game::new(seed, tuning, &settings).context("building the game")?;
        let mut frames = FrameLoop::new(HeadlessScheduler::default());
        frames.start();
        game.trigger();

        let mut crash = None;
        while frames.frames() < cli.frames && crash.is_none() {
            frames.on_frame(|| {
                for event in game.frame() {
                    if let GameEvent::Crashed { score } = event {
                        crash = Some(score);
                    }
                }
            });
        }
        frames.stop();

        match (crash, game.phase()) {
            (Some(score), _) => {
                log::info!("Crashed after {} frames with score {}", frames.frames(), score)
            }
            (None, GamePhase::Playing) => log::info!(
                "Still running after {} frames, score {}",
                frames.frames(),
                game.snapshot().score
            ),
            (None, phase) => log::warn!("Run ended in unexpected phase {:?}", phase),
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;
    native::run(native::Cli::parse())
}
