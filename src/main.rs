//! Maze Runner entry point
//!
//! The browser build runs the game loop on a canvas. The native build is a
//! headless CLI for validating level files and running deterministic sessions.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use maze_runner::input::ControllerInput;
    use maze_runner::renderer::{
        MeshKind, RenderState, SurfaceSize, TextureKind, checkerboard, ground_texture, placeholder,
    };
    use maze_runner::sim::{FrameInput, LevelSet, Notification};
    use maze_runner::ui::Hud;
    use maze_runner::{Session, Settings};

    const LEVELS_JSON: &str = include_str!("../data/levels.json");
    const LEVEL_NAME: &str = "Level1";
    /// Text the page's countdown shows once it runs out
    const TIMER_FINISHED: &str = "Finished";

    /// Score/health paragraphs plus a blocking alert for the outcome
    struct DomHud {
        document: Document,
    }

    impl DomHud {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }
    }

    impl Hud for DomHud {
        fn set_score(&mut self, text: &str) {
            self.set_text("Score_p", text);
        }

        fn set_health(&mut self, text: &str) {
            self.set_text("Health_p", text);
        }

        fn notify(&mut self, notification: &Notification) {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(notification.message());
            }
        }
    }

    struct Game {
        session: Session,
        render_state: Option<RenderState>,
        hud: DomHud,
        surface: SurfaceSize,
        /// Held keys; look deltas accumulate between frames
        input: ControllerInput,
        mouse_down: bool,
        last_time: f64,
    }

    impl Game {
        fn timer_finished(&self) -> bool {
            self.hud
                .document
                .get_element_by_id("Timer_p")
                .and_then(|el| el.text_content())
                .is_some_and(|text| text.trim() == TIMER_FINISHED)
        }

        fn update(&mut self, dt_ms: f64) {
            let frame = FrameInput {
                dt_ms,
                timer_finished: self.timer_finished(),
            };
            let report = self.session.frame(&frame, &self.input);
            self.input.look_dx = 0.0;
            self.input.look_dy = 0.0;
            self.hud.apply(&report);
        }

        fn render(&mut self) {
            let plan = self.session.plan(self.surface);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&plan) {
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

        fn set_key(&mut self, key: &str, pressed: bool) {
            match key {
                "w" | "W" | "ArrowUp" => self.input.forward = pressed,
                "s" | "S" | "ArrowDown" => self.input.back = pressed,
                "a" | "A" | "ArrowLeft" => self.input.left = pressed,
                "d" | "D" | "ArrowRight" => self.input.right = pressed,
                _ => {}
            }
        }
    }

    fn upload_assets(render_state: &mut RenderState) {
        for kind in MeshKind::ALL {
            let mesh = placeholder(kind);
            if mesh.indices.is_empty() {
                continue;
            }
            if let Err(e) = render_state.upload_mesh(kind, &mesh.vertices, &mesh.indices) {
                log::warn!("Mesh {:?} rejected: {}", kind, e);
            }
        }

        let ground = ground_texture();
        let solids = [
            (TextureKind::Key, [212, 175, 55]),
            (TextureKind::Coin, [255, 215, 0]),
            (TextureKind::Health, [220, 40, 40]),
            (TextureKind::Beast, [90, 30, 120]),
            (TextureKind::Maze, [120, 120, 120]),
        ];
        let uploads = std::iter::once((TextureKind::Ground, ground)).chain(
            solids
                .into_iter()
                .map(|(kind, c)| (kind, checkerboard(1, 1, 1, 1, c, c))),
        );
        for (kind, board) in uploads {
            if let Err(e) = render_state.upload_texture(kind, board.width, board.height, &board.pixels) {
                log::warn!("Texture {:?} rejected: {}", kind, e);
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Maze Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let dpr = window.device_pixel_ratio();
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);
        let surface_size = SurfaceSize::new(width, height);

        let level = LevelSet::from_json(LEVELS_JSON)
            .and_then(|set| set.level(LEVEL_NAME))
            .expect("bundled level data");
        let mut session =
            Session::new(level, Settings::default(), surface_size.aspect_ratio()).expect("default settings");
        session.resize(surface_size);
        session.start();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let mut render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .expect("Failed to create device");
        upload_assets(&mut render_state);

        let game = Rc::new(RefCell::new(Game {
            session,
            render_state: Some(render_state),
            hud: DomHud { document },
            surface: surface_size,
            input: ControllerInput::default(),
            mouse_down: false,
            last_time: 0.0,
        }));

        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);

        log::info!("Maze Runner running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Keyboard
        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().set_key(&event.key(), pressed);
            });
            let _ = window.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse look: drag, or free movement under pointer lock
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let locked = g.hud.document.pointer_lock_element().is_some();
                if locked || g.mouse_down {
                    g.input.look_dx += event.movement_x() as f32;
                    g.input.look_dy += event.movement_y() as f32;
                }
            });
            let _ = canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for (event_name, down) in [("mousedown", true), ("mouseup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().mouse_down = down;
            });
            let _ = canvas.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Double click grabs the pointer
        {
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let _ = target.request_pointer_lock();
            });
            let _ = canvas.add_event_listener_with_callback("dblclick", closure.as_ref().unchecked_ref());
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
        {
            let mut g = game.borrow_mut();

            // First frame has no previous timestamp
            let dt_ms = if g.last_time > 0.0 { time - g.last_time } else { 0.0 };
            g.last_time = time;

            g.update(dt_ms);
            g.render();
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
mod cli {
    use std::path::PathBuf;

    use anyhow::Context;
    use clap::{Parser, Subcommand};

    use maze_runner::input::{Autopilot, ControllerInput, FlyController};
    use maze_runner::renderer::SurfaceSize;
    use maze_runner::sim::{EntityKind, FrameInput, LevelSet};
    use maze_runner::ui::{Hud, LogHud, NoControls};
    use maze_runner::settings::MinimapAnchor;
    use maze_runner::{Session, Settings};

    #[derive(Parser)]
    #[command(name = "maze-runner", about = "Headless maze runner sessions and level checks")]
    pub struct Cli {
        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,

        #[command(subcommand)]
        command: Commands,
    }

    #[derive(Subcommand)]
    enum Commands {
        /// Run a deterministic session driven by the autopilot
        Run {
            /// Level set JSON file
            #[arg(short, long)]
            level: PathBuf,
            /// Level name inside the set
            #[arg(short, long, default_value = "Level1")]
            name: String,
            /// Number of frames to simulate
            #[arg(short, long, default_value = "600")]
            frames: u64,
            /// Autopilot RNG seed
            #[arg(short, long, default_value = "42")]
            seed: u64,
            /// Settings JSON file (defaults when omitted)
            #[arg(long)]
            settings: Option<PathBuf>,
            /// Frame time in milliseconds
            #[arg(long, default_value = "16")]
            dt_ms: f64,
            /// Report the level timer as finished after this many milliseconds
            #[arg(long)]
            time_limit_ms: Option<f64>,
            /// Minimap corner: tl, tr, bl, br (overrides settings)
            #[arg(long, value_parser = parse_anchor)]
            minimap_anchor: Option<MinimapAnchor>,
        },
        /// Validate every level in a level set
        Check {
            #[arg(short, long)]
            level: PathBuf,
        },
    }

    fn parse_anchor(s: &str) -> Result<MinimapAnchor, String> {
        MinimapAnchor::from_str(s).ok_or_else(|| format!("unknown minimap corner '{s}'"))
    }

    pub fn main() -> anyhow::Result<()> {
        let cli = Cli::parse();

        let filter = if cli.verbose { "debug" } else { "info" };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

        match cli.command {
            Commands::Run {
                level,
                name,
                frames,
                seed,
                settings,
                dt_ms,
                time_limit_ms,
                minimap_anchor,
            } => {
                let mut settings = match settings {
                    Some(path) => Settings::load(&path)
                        .with_context(|| format!("loading settings from {}", path.display()))?,
                    None => Settings::default(),
                };
                if let Some(anchor) = minimap_anchor {
                    settings.minimap.anchor = anchor;
                }
                let set = LevelSet::load(&level)
                    .with_context(|| format!("loading levels from {}", level.display()))?;
                let level = set.level(&name)?;
                let initial_coins = level.len(EntityKind::Coin);

                let surface = SurfaceSize::new(1280, 720);
                let pilot = Autopilot::new(seed, FlyController::from_settings(&settings.player));
                let mut session = Session::with_collaborators(
                    level,
                    settings,
                    surface.aspect_ratio(),
                    Box::new(pilot),
                    Box::new(NoControls),
                )?;
                session.resize(surface);
                session.start();

                println!("Run: level={name}, seed={seed}, frames={frames}, dt={dt_ms}ms");
                println!("Minimap: {}", session.settings().minimap.anchor.as_str());

                let mut hud = LogHud::default();
                let mut draws = 0;
                for _ in 0..frames {
                    let time_ms = session.state().time_ms + dt_ms;
                    let input = FrameInput {
                        dt_ms,
                        timer_finished: time_limit_ms.is_some_and(|limit| time_ms >= limit),
                    };
                    let report = session.frame(&input, &ControllerInput::default());
                    hud.apply(&report);
                    draws = session.plan(surface).passes.iter().map(|p| p.draws.len()).sum();
                }

                let state = session.state();
                println!("Frames: {}, time: {:.0}ms", state.frame, state.time_ms);
                println!(
                    "Score: {} (coins left {} of {})",
                    state.counters.score,
                    state.level.coins().len(),
                    initial_coins
                );
                println!("Health: {}", state.counters.health);
                println!("Result: {:?}", session.result());
                for message in &hud.messages {
                    println!("Message: {message}");
                }
                println!("Last frame draws: {draws}");
                session.end();
            }
            Commands::Check { level } => {
                let set = LevelSet::load(&level)
                    .with_context(|| format!("loading levels from {}", level.display()))?;
                let names: Vec<String> = set.names().map(str::to_owned).collect();
                for name in &names {
                    let level = set.level(name)?;
                    let counts: Vec<String> = EntityKind::ALL
                        .iter()
                        .map(|&kind| format!("{} {}", level.len(kind), kind.as_str()))
                        .collect();
                    println!("{name}: {}", counts.join(", "));
                }
                println!("{} level(s) OK", names.len());
            }
        }

        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    cli::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
