use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::WindowContext;

use crate::camera::CameraMode;
use crate::engine::DrawMode;
use crate::input::InputState;
use crate::render::framebuffer::CHANNELS;

pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 960;
pub const FPS: u64 = 60;
pub const FRAME_TARGET_TIME: f64 = 1000.0 / FPS as f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    Resize(u32, u32),
    /// F12: save the current frame.
    Screenshot,
    /// Tab: switch fill algorithm.
    ToggleRasterizer,
}

pub struct FrameLimiter {
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Waits if necessary to maintain frame rate and returns the delta time in milliseconds.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time.saturating_sub(self.previous_frame_time);

        if delta_time < FRAME_TARGET_TIME as u64 {
            let time_to_wait = (FRAME_TARGET_TIME as u64) - delta_time;
            std::thread::sleep(std::time::Duration::from_millis(time_to_wait));
            current_time = window.timer().ticks64();
            delta_time = current_time.saturating_sub(self.previous_frame_time);
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

/// SDL2 window showing an RGB24 frame through a streaming texture.
pub struct Window {
    // Field order is drop order: the texture must go before its creator.
    texture: Texture<'static>,
    texture_creator: Box<TextureCreator<WindowContext>>,
    canvas: Canvas<sdl2::video::Window>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;
        let texture = Self::create_texture(&texture_creator, width, height)?;

        Ok(Self {
            texture,
            texture_creator,
            canvas,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    fn create_texture(
        texture_creator: &TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Texture<'static>, String> {
        // SAFETY: the creator is boxed, so its address is stable, and it is
        // owned by the same Window as the texture, which drops first.
        let creator: &'static TextureCreator<WindowContext> =
            unsafe { &*(texture_creator as *const _) };
        creator
            .create_texture_streaming(PixelFormatEnum::RGB24, width, height)
            .map_err(|e| e.to_string())
    }

    pub fn poll_events(&mut self) -> WindowEvent {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return WindowEvent::Quit,
                Event::KeyDown {
                    keycode: Some(Keycode::F12),
                    repeat: false,
                    ..
                } => return WindowEvent::Screenshot,
                Event::KeyDown {
                    keycode: Some(Keycode::Tab),
                    repeat: false,
                    ..
                } => return WindowEvent::ToggleRasterizer,
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => return WindowEvent::Resize(w as u32, h as u32),
                _ => {}
            }
        }
        WindowEvent::None
    }

    /// Samples which keys are held right now.
    ///
    /// A/D roll, Q/E yaw, W/S pitch, Space thrust, 0/1/2 depth/wireframe/solid,
    /// 3/4/5 first-person/third-person/rooted camera, Z/X trail distance,
    /// H/Y trail height.
    pub fn input_state(&self) -> InputState {
        let keys = self.event_pump.keyboard_state();
        let held = |scancode| keys.is_scancode_pressed(scancode);

        let draw_mode = if held(Scancode::Num0) {
            Some(DrawMode::DepthBuffer)
        } else if held(Scancode::Num1) {
            Some(DrawMode::Wireframe)
        } else if held(Scancode::Num2) {
            Some(DrawMode::Solid)
        } else {
            None
        };

        let camera_mode = if held(Scancode::Num3) {
            Some(CameraMode::FirstPerson)
        } else if held(Scancode::Num4) {
            Some(CameraMode::ThirdPerson)
        } else if held(Scancode::Num5) {
            Some(CameraMode::Rooted)
        } else {
            None
        };

        InputState {
            roll_left: held(Scancode::A),
            roll_right: held(Scancode::D),
            yaw_left: held(Scancode::Q),
            yaw_right: held(Scancode::E),
            pitch_up: held(Scancode::W),
            pitch_down: held(Scancode::S),
            thrust: held(Scancode::Space),
            draw_mode,
            camera_mode,
            distance_closer: held(Scancode::Z),
            distance_farther: held(Scancode::X),
            height_lower: held(Scancode::H),
            height_higher: held(Scancode::Y),
        }
    }

    /// Uploads an RGB24 frame (`width * 3` bytes per row) and shows it.
    pub fn present(&mut self, buffer: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, buffer, self.width as usize * CHANNELS)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        self.width = width;
        self.height = height;
        self.texture = Self::create_texture(&self.texture_creator, width, height)?;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}
