use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use airframe::prelude::*;

/// Part geometry: the OBJ named by the first argument, or the built-in cube.
fn load_mesh() -> Result<Mesh> {
    match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            Mesh::from_obj(&path).with_context(|| format!("failed to load {}", path.display()))
        }
        None => Ok(Mesh::cube()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let scene = demo::airplane_scene(load_mesh()?)?;
    let mut window =
        Window::new("Airframe", WINDOW_WIDTH, WINDOW_HEIGHT).map_err(anyhow::Error::msg)?;
    let mut engine = Engine::with_anchor(scene, demo::ANCHOR, window.width(), window.height())?;
    let mut frame_limiter = FrameLimiter::new(&window);
    let mut screenshots = 0u32;

    info!("A/D roll, Q/E yaw, W/S pitch, Space thrust");
    info!("0/1/2 depth/wireframe/solid, 3/4/5 first/third/rooted camera");
    info!("Z/X distance, H/Y height, Tab fill algorithm, F12 screenshot");

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Resize(w, h) if w > 0 && h > 0 => {
                window.resize(w, h).map_err(anyhow::Error::msg)?;
                engine.resize(w, h);
            }
            WindowEvent::Screenshot => {
                let path = format!("airframe_{screenshots:03}.png");
                engine
                    .frame_buffer()
                    .to_image()
                    .save(&path)
                    .with_context(|| format!("failed to save {path}"))?;
                screenshots += 1;
                info!("saved {path}");
            }
            WindowEvent::ToggleRasterizer => {
                let next = match engine.rasterizer() {
                    RasterizerType::EdgeFunction => RasterizerType::Scanline,
                    RasterizerType::Scanline => RasterizerType::EdgeFunction,
                };
                engine.set_rasterizer(next);
            }
            WindowEvent::Resize(..) | WindowEvent::None => {}
        }

        let input = window.input_state();
        engine.frame(&input);
        window
            .present(engine.frame_buffer().as_bytes())
            .map_err(anyhow::Error::msg)?;

        frame_limiter.wait_and_get_delta(&window);
    }

    Ok(())
}
