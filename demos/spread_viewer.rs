//! Interactive viewer
//!
//! Left drag orbits (shift+left or right drag pans), the wheel zooms, and
//! the up/down arrow keys move the spread slider between flat and full.

use anyhow::Result;
use spreadcloud_algorithms::{default_grid, FrameBatch};
use spreadcloud_core::Drawable;
use spreadcloud_demos::clustered_embedding;
use spreadcloud_gpu::{RenderConfig, SpreadRenderer};
use spreadcloud_visualization::ViewerConfig;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, ModifiersState, NamedKey};
use winit::window::WindowBuilder;

const SPREAD_STEP: f32 = 0.05;

fn main() -> Result<()> {
    env_logger::init();

    let config = ViewerConfig::load().unwrap_or_else(|e| {
        log::warn!("{}. Using defaults.", e);
        ViewerConfig::default()
    });
    let mut state = config.viewport_state();

    let cloud = clustered_embedding(100_000, 1);
    state.camera.view.pivot = cloud.center();

    let mut batch = FrameBatch::from_points(cloud.points);
    if config.render.show_grid {
        batch.append(&FrameBatch::from_lines(default_grid()));
    }

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("spreadcloud")
        .with_inner_size(LogicalSize::new(1280.0, 720.0))
        .build(&event_loop)?;

    let render_config = RenderConfig {
        background_color: config.render.background_color,
        enable_depth_test: config.render.enable_depth_test,
    };
    let window = &window;
    let mut renderer = pollster::block_on(SpreadRenderer::new(window, render_config))?;
    renderer.upload(&batch)?;

    let mut cursor: Option<PhysicalPosition<f64>> = None;
    let mut left_down = false;
    let mut right_down = false;
    let mut modifiers = ModifiersState::empty();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => {
                renderer.resize(size);
                window.request_redraw();
            }
            WindowEvent::ModifiersChanged(new) => modifiers = new.state(),
            WindowEvent::MouseInput { state: button_state, button, .. } => {
                let pressed = button_state == ElementState::Pressed;
                match button {
                    MouseButton::Left => left_down = pressed,
                    MouseButton::Right => right_down = pressed,
                    _ => {}
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(last) = cursor {
                    let dx = (position.x - last.x) as f32;
                    let dy = (position.y - last.y) as f32;
                    if right_down || (left_down && modifiers.shift_key()) {
                        state.pan(dx, dy);
                    } else if left_down {
                        state.orbit(dx, dy);
                    }
                }
                cursor = Some(position);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 50.0,
                };
                state.zoom(scroll);
            }
            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    logical_key: Key::Named(key),
                    state: ElementState::Pressed,
                    ..
                },
                ..
            } => match key {
                NamedKey::ArrowUp => state.spread += SPREAD_STEP,
                NamedKey::ArrowDown => state.spread = (state.spread - SPREAD_STEP).max(0.0),
                NamedKey::Escape => elwt.exit(),
                _ => {}
            },
            WindowEvent::RedrawRequested => {
                let [width, height] = renderer.viewport();
                renderer.update_frame(&state.frame_params(width, height));
                if let Err(e) = renderer.render() {
                    log::warn!("Surface error: {}", e);
                }
            }
            _ => {}
        },
        Event::AboutToWait => window.request_redraw(),
        _ => {}
    })?;

    Ok(())
}
