use std::collections::HashSet;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::assets::Assets;
use crate::config::{FB_HEIGHT, FRAME_BUDGET_MS, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::map::Map;
use crate::movement::MoveIntent;
use crate::player::Player;
use crate::scaler::ScaleLut;
use crate::surface::Frame;

mod assets;
mod config;
mod map;
mod minimap;
mod movement;
mod player;
mod projection;
mod ray;
mod renderer;
mod scaler;
mod surface;
mod texture;

const DEFAULT_MAP: &str = "maps/demo.map";

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,

    map: Map,
    player: Player,
    assets: Assets,
    show_map: bool,
    current_weapon: usize,

    // Internal framebuffer; width tracks the window aspect
    fb_small: Vec<u32>,
    fb_w: usize,
    fb_h: usize,
    scale_lut: ScaleLut,

    // Input and timing
    keys_down: HashSet<KeyCode>,
    last_tick: Instant,
    frame_counter: u32,
    last_fps_print: Instant,
}

impl App {
    fn new(map: Map) -> Self {
        Self {
            window: None,
            surface: None,
            player: Player::spawn(),
            map,
            assets: Assets::load(),
            show_map: false,
            current_weapon: 0,

            fb_small: vec![0; 640 * FB_HEIGHT],
            fb_w: 640,
            fb_h: FB_HEIGHT,
            scale_lut: ScaleLut::empty(),

            keys_down: HashSet::new(),
            last_tick: Instant::now(),
            frame_counter: 0,
            last_fps_print: Instant::now(),
        }
    }

    fn tick(&mut self) {
        // Cap dt to avoid a huge jump if the app was paused
        let now = Instant::now();
        let mut dt = now.duration_since(self.last_tick);
        self.last_tick = now;
        if dt > Duration::from_millis(100) {
            dt = Duration::from_millis(100);
        }

        let intent = MoveIntent {
            forward: self.keys_down.contains(&KeyCode::KeyW),
            back: self.keys_down.contains(&KeyCode::KeyS),
            strafe_left: self.keys_down.contains(&KeyCode::KeyA),
            strafe_right: self.keys_down.contains(&KeyCode::KeyD),
            turn_left: self.keys_down.contains(&KeyCode::ArrowLeft),
            turn_right: self.keys_down.contains(&KeyCode::ArrowRight),
        };
        self.player = movement::resolve(&self.player, &self.map, &intent, dt.as_secs_f32());
    }

    fn render(&mut self) {
        let mut frame = Frame::new(&mut self.fb_small, self.fb_w, self.fb_h);
        renderer::render_frame(&mut frame, &self.map, &self.player, &self.assets.wall);
        if self.show_map {
            minimap::draw_minimap(&mut frame, &self.map, &self.player);
        }
        if let Some(weapon) = self.assets.weapons.get(self.current_weapon) {
            renderer::draw_weapon(&mut frame, weapon);
        }
    }

    fn on_key_pressed(&mut self, event_loop: &ActiveEventLoop, code: KeyCode) {
        match code {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::KeyM => self.show_map = !self.show_map,
            KeyCode::KeyP => {
                if !self.assets.weapons.is_empty() {
                    self.current_weapon = (self.current_weapon + 1) % self.assets.weapons.len();
                }
            }
            _ => {}
        }
    }

    fn rebuild_internal_fb_and_lut(&mut self, dst_w: usize, dst_h: usize) {
        // Keep internal height fixed; derive width from the window aspect
        let target_h = FB_HEIGHT;
        let aspect = if dst_h > 0 {
            dst_w as f32 / dst_h as f32
        } else {
            1.0
        };

        let mut target_w = (target_h as f32 * aspect).round() as usize;
        if target_w < 160 {
            target_w = 160;
        }
        if target_w % 2 != 0 {
            target_w += 1;
        }

        if target_w != self.fb_w || target_h != self.fb_h {
            self.fb_w = target_w;
            self.fb_h = target_h;
            self.fb_small = vec![0u32; self.fb_w * self.fb_h];
        }

        self.scale_lut = ScaleLut::build(dst_w, dst_h, self.fb_w, self.fb_h);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let attributes = Window::default_attributes()
            .with_title("mazecast")
            .with_inner_size(LogicalSize::new(WINDOW_WIDTH as f64, WINDOW_HEIGHT as f64));

        let window = Rc::new(event_loop.create_window(attributes).expect("create window"));

        let context = softbuffer::Context::new(window.clone()).expect("softbuffer context");
        let surface =
            softbuffer::Surface::new(&context, window.clone()).expect("softbuffer surface");

        let size = window.inner_size();
        self.rebuild_internal_fb_and_lut(size.width as usize, size.height as usize);

        self.surface = Some(surface);
        self.window = Some(window);

        self.last_tick = Instant::now();
        self.window.as_ref().unwrap().request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                if let PhysicalKey::Code(code) = physical_key {
                    match state {
                        ElementState::Pressed => {
                            self.keys_down.insert(code);
                            if !repeat {
                                self.on_key_pressed(event_loop, code);
                            }
                        }
                        ElementState::Released => {
                            self.keys_down.remove(&code);
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                let frame_start = Instant::now();
                self.tick();
                self.render();

                let (window, surface) = match (&self.window, &mut self.surface) {
                    (Some(w), Some(s)) if w.id() == id => (w, s),
                    _ => return,
                };

                let size = window.inner_size();
                let (dw, dh) = (size.width as usize, size.height as usize);
                if dw == 0 || dh == 0 {
                    return; // Minimized window, skip drawing
                }

                surface
                    .resize(
                        NonZeroU32::new(dw as u32).unwrap(),
                        NonZeroU32::new(dh as u32).unwrap(),
                    )
                    .unwrap();

                let mut buf = surface.buffer_mut().expect("buffer_mut");
                scaler::blit_stretched(&mut buf, dw, &self.fb_small, self.fb_w, &self.scale_lut);
                buf.present().unwrap();

                // Print FPS once a second
                self.frame_counter += 1;
                let now = Instant::now();
                if now.duration_since(self.last_fps_print).as_secs_f32() >= 1.0 {
                    let fps = self.frame_counter as f32
                        / now.duration_since(self.last_fps_print).as_secs_f32();
                    println!("FPS: {fps:.1}");
                    self.frame_counter = 0;
                    self.last_fps_print = now;
                }

                // Fixed frame-rate cap: sleep out the rest of the budget
                let budget = Duration::from_millis(FRAME_BUDGET_MS);
                let spent = frame_start.elapsed();
                if spent < budget {
                    std::thread::sleep(budget - spent);
                }

                self.window.as_ref().unwrap().request_redraw();
            }

            WindowEvent::Resized(new_size) => {
                let (dw, dh) = (new_size.width as usize, new_size.height as usize);
                self.rebuild_internal_fb_and_lut(dw, dh);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let map_path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MAP));

    // Map problems are fatal before the first frame
    let map = Map::load(&map_path)?;
    println!(
        "loaded {} ({}x{} tiles)",
        map_path.display(),
        map.width(),
        map.height()
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(map);
    event_loop.run_app(&mut app)?;
    Ok(())
}
