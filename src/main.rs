use anyhow::Result;
use input_mapper::engine::input::keycode;
use input_mapper::engine::input::{
    FileStore, Host, InputMapper, KeyEventHub, LogicalInputEvent, MapperConfig,
};
use input_mapper::overlay::Overlay;
use log::info;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;
use winit::{
    event::{ElementState, Event, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};

/// Demo host: logs logical input and focuses the window for remaps
struct WindowHost {
    window: Rc<Window>,
}

impl Host for WindowHost {
    fn on_input(&mut self, event: LogicalInputEvent) {
        let state = if event.pressed { "pressed" } else { "released" };
        info!("{} {}", event.button, state);
    }

    fn request_focus(&mut self) {
        self.window.focus_window();
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let diagram_source = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("Usage: input-mapper <controller.svg>"))?;
    let config = MapperConfig::new(diagram_source);

    let document = std::fs::read_to_string(&config.diagram_source)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", config.diagram_source, e))?;

    let mut overlay = Overlay::new();
    overlay
        .initialize(&document)
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", config.diagram_source, e))?;

    let store_path = FileStore::default_path()
        .ok_or_else(|| anyhow::anyhow!("No data directory available for key map storage"))?;
    let store = FileStore::open(&store_path)?;
    info!("Key maps stored in {}", store_path.display());

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Rc::new(
        WindowBuilder::new()
            .with_title("Input Mapper")
            .with_inner_size(winit::dpi::LogicalSize::new(800, 300))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    let host = WindowHost {
        window: Rc::clone(&window),
    };
    let mapper = Rc::new(RefCell::new(InputMapper::new(config, store, host)));

    let hub = KeyEventHub::new();
    let subscription = InputMapper::attach(&mapper, &hub);

    for row in overlay.rows(mapper.borrow().keymap()) {
        info!("{}", row);
    }

    // Regions are laid out as equal-width columns across the window
    let mut cursor_x = 0.0_f64;
    let mut title = String::new();

    event_loop
        .run(move |event, elwt| {
            match event {
                Event::WindowEvent {
                    event: WindowEvent::CloseRequested,
                    ..
                } => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                Event::WindowEvent {
                    event: WindowEvent::KeyboardInput { event, .. },
                    ..
                } => {
                    if let Some(raw) = keycode::raw_event(&event) {
                        hub.publish(raw);
                    }
                }
                Event::WindowEvent {
                    event: WindowEvent::CursorMoved { position, .. },
                    ..
                } => {
                    cursor_x = position.x;
                }
                Event::WindowEvent {
                    event:
                        WindowEvent::MouseInput {
                            state: ElementState::Pressed,
                            button: MouseButton::Left,
                            ..
                        },
                    ..
                } => {
                    let regions = overlay.key_order().len();
                    let width = f64::from(window.inner_size().width.max(1));
                    if regions > 0 {
                        let index = ((cursor_x / width) * regions as f64) as usize;
                        let mut mapper = mapper.borrow_mut();
                        overlay.click_region(index.min(regions - 1), &mut *mapper);
                    }
                }
                Event::WindowEvent {
                    event:
                        WindowEvent::MouseInput {
                            state: ElementState::Pressed,
                            button: MouseButton::Right,
                            ..
                        },
                    ..
                } => {
                    overlay.toggle_map();
                    if overlay.is_map_visible() {
                        for row in overlay.rows(mapper.borrow().keymap()) {
                            info!("{}", row);
                        }
                    }
                }
                Event::AboutToWait => {
                    let mut mapper = mapper.borrow_mut();
                    mapper.tick(Instant::now());

                    let status = overlay.status_line(mapper.banner());
                    if status != title {
                        title = status.to_string();
                        window.set_title(&format!("Input Mapper - {}", title));
                    }

                    match mapper.next_deadline() {
                        Some(deadline) => elwt.set_control_flow(ControlFlow::WaitUntil(deadline)),
                        None => elwt.set_control_flow(ControlFlow::Wait),
                    }
                }
                _ => {}
            }
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    drop(subscription);
    info!("Key listener detached");

    Ok(())
}
