//! Pixel-level rendering: the frame buffer and the rasterizers that draw into it.

pub mod framebuffer;
pub mod rasterizer;

pub use framebuffer::{FrameBuffer, Pixel};
pub use rasterizer::{
    draw_line, draw_triangle_wireframe, EdgeFunctionRasterizer, Rasterizer, RasterizerDispatcher,
    RasterizerType, ScanlineRasterizer, Triangle, Vertex,
};
