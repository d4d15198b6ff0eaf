#[macro_use]
extern crate slog;

extern crate nalgebra_glm as glm;

use clap::clap_app;
use meshview_rs::common::mesh::Mesh;
use meshview_rs::common::trackball;
use meshview_rs::viewer::LightMode;
use meshview_rs::*;
use slog::Drain;
use std::path::Path;
use winit::{
    dpi::{LogicalSize, PhysicalPosition, PhysicalSize, Size},
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

const TRANSLATE_SPEED: f32 = 0.05;

/// All mutable viewer-side state, owned by the event loop and passed to the
/// handlers explicitly: the model registry, the active selection, the light
/// mode and the in-flight drag.
struct App {
    models: Vec<Mesh>,
    current: usize,
    light_mode: LightMode,
    cursor: PhysicalPosition<f64>,
    rotating: bool,
    translating: bool,
    last_point: Option<glm::Vec3>,
}

impl App {
    fn new(models: Vec<Mesh>) -> Self {
        App {
            models,
            current: 0,
            light_mode: LightMode::Directional,
            cursor: PhysicalPosition::new(0.0, 0.0),
            rotating: false,
            translating: false,
            last_point: None,
        }
    }

    fn current_model(&mut self) -> &mut Mesh {
        &mut self.models[self.current]
    }

    fn select_next(&mut self) {
        self.current = (self.current + 1) % self.models.len();
    }

    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
        size: PhysicalSize<u32>,
    ) {
        let pressed = state == ElementState::Pressed;
        match button {
            MouseButton::Left => {
                self.rotating = pressed;
                self.last_point = if pressed {
                    Some(trackball::project(
                        self.cursor.x,
                        self.cursor.y,
                        size.width,
                        size.height,
                    ))
                } else {
                    None
                };
            }
            MouseButton::Right => {
                self.translating = pressed;
            }
            _ => {}
        }
    }

    fn handle_cursor_moved(&mut self, position: PhysicalPosition<f64>, size: PhysicalSize<u32>) {
        if self.rotating {
            let cur_point = trackball::project(position.x, position.y, size.width, size.height);
            if let Some(last_point) = self.last_point {
                if let Some((angle, axis)) = trackball::rotation_between(&last_point, &cur_point) {
                    self.current_model().rotate(angle, &axis);
                }
            }
            self.last_point = Some(cur_point);
        }

        if self.translating {
            let dx = (position.x - self.cursor.x) as f32;
            let dy = (position.y - self.cursor.y) as f32;
            let model = self.current_model();
            model.translate_x(-TRANSLATE_SPEED * dx);
            model.translate_y(-TRANSLATE_SPEED * dy);
        }

        self.cursor = position;
    }

    fn handle_scroll(&mut self, delta: &MouseScrollDelta) {
        let amount = match delta {
            MouseScrollDelta::LineDelta(_, scroll) => *scroll,
            // A line is about 100 pixels.
            MouseScrollDelta::PixelDelta(position) => position.y as f32 / 100.0,
        };
        self.current_model().translate_z(amount);
    }
}

fn new_drain(level: slog::Level) -> slog::Fuse<slog::LevelFilter<slog::Fuse<slog_async::Async>>> {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    drain.filter_level(level).fuse()
}

fn main() {
    let info_drain = new_drain(slog::Level::Info);
    let drain = slog_atomic::AtomicSwitch::new(info_drain);
    let ctrl = drain.ctrl();
    let log = slog::Logger::root(drain.fuse(), o!());
    let mut trace_mode = false;

    let matches = clap_app!(meshview_rs =>
        (version: "1.0")
        (about: "Interactive 3D model viewer")
        (@arg MODEL: +required +multiple "Geometry file(s) to load; Tab cycles between them")
    )
    .get_matches();

    let mut models = Vec::new();
    for path in matches.values_of("MODEL").unwrap() {
        match Mesh::load(&log, Path::new(path)) {
            Ok(mesh) => models.push(mesh),
            Err(err) => {
                crit!(log, "error loading model"; "path" => path, "error" => format!("{:#}", err));
                std::process::exit(1);
            }
        }
    }

    let mut camera = common::Camera::default();

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("meshview")
        .with_inner_size(Size::Logical(LogicalSize::new(
            common::DEFAULT_RESOLUTION.x as f64,
            common::DEFAULT_RESOLUTION.y as f64,
        )))
        .build(&event_loop)
        .unwrap();
    let mut viewer =
        futures::executor::block_on(viewer::Viewer::new(&log, &window, &models, &camera));

    let mut app = App::new(models);
    viewer.set_light_mode(app.light_mode);

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;
        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                WindowEvent::KeyboardInput { input, .. } => {
                    if let KeyboardInput {
                        state: ElementState::Pressed,
                        virtual_keycode: Some(keycode),
                        ..
                    } = input
                    {
                        match keycode {
                            VirtualKeyCode::Escape => *control_flow = ControlFlow::Exit,
                            VirtualKeyCode::Key0 => {
                                app.light_mode = LightMode::Off;
                                viewer.set_light_mode(app.light_mode);
                            }
                            VirtualKeyCode::Key1 => {
                                app.light_mode = LightMode::Directional;
                                viewer.set_light_mode(app.light_mode);
                            }
                            VirtualKeyCode::Key2 => {
                                app.light_mode = LightMode::Point;
                                viewer.set_light_mode(app.light_mode);
                            }
                            VirtualKeyCode::Key3 => {
                                app.light_mode = LightMode::Spot;
                                viewer.set_light_mode(app.light_mode);
                            }
                            VirtualKeyCode::R => {
                                info!(log, "resetting model transform"; "index" => app.current);
                                app.current_model().reset();
                            }
                            VirtualKeyCode::Tab => {
                                app.select_next();
                                info!(log, "selected model"; "index" => app.current);
                            }
                            VirtualKeyCode::T => {
                                if trace_mode {
                                    info!(log, "setting log level to info");
                                    ctrl.set(new_drain(slog::Level::Info));
                                } else {
                                    info!(log, "setting log level to trace");
                                    ctrl.set(new_drain(slog::Level::Trace));
                                }
                                trace_mode = !trace_mode;
                            }
                            _ => {}
                        }
                    }
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    app.handle_mouse_button(*button, *state, viewer.size);
                }
                WindowEvent::CursorMoved { position, .. } => {
                    app.handle_cursor_moved(*position, viewer.size);
                }
                WindowEvent::MouseWheel { delta, .. } => {
                    app.handle_scroll(delta);
                }
                WindowEvent::Resized(physical_size) => {
                    viewer.resize(*physical_size, &mut camera);
                }
                WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                    // new_inner_size is &mut so w have to dereference it twice
                    viewer.resize(**new_inner_size, &mut camera);
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                viewer.update_model(&app.models[app.current], &camera);
                viewer.render(app.current);
            }
            Event::MainEventsCleared => {
                // RedrawRequested will only trigger once, unless we manually
                // request it.
                window.request_redraw();
            }
            _ => {}
        }
    });
}
