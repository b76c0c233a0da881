//! Frame orchestration.
//!
//! The [`Engine`] owns the scene, camera, projection and frame buffer. Each
//! frame runs as a closed sequence:
//!
//! 1. apply the input snapshot (anchor rotation and thrust, mode switches,
//!    camera trail adjustments)
//! 2. resolve every object's model-to-world matrix, ancestors first
//! 3. recompute the camera
//! 4. project every face of every object, culling at the near plane
//! 5. clear the frame buffer and draw the surviving triangles

use std::fmt;

use log::{debug, info, trace};

use crate::camera::{Camera, CameraMode};
use crate::colors;
use crate::input::{Controls, InputState};
use crate::math::vec3::Vec3;
use crate::projection::Projection;
use crate::render::{
    draw_triangle_wireframe, FrameBuffer, Rasterizer, RasterizerDispatcher, Triangle,
};
use crate::scene::{ObjectId, Scene, SceneError};

pub use crate::render::RasterizerType;

/// How triangles are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    /// Edges only, no depth test (key: 1)
    Wireframe,
    /// Color-interpolated, depth-tested fill (key: 2)
    #[default]
    Solid,
    /// Solid fill with depth mapped to gray (key: 0)
    DepthBuffer,
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawMode::Wireframe => write!(f, "Wireframe"),
            DrawMode::Solid => write!(f, "Solid"),
            DrawMode::DepthBuffer => write!(f, "DepthBuffer"),
        }
    }
}

/// Triangle counts from the last [`Engine::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub drawn: usize,
    pub culled: usize,
}

pub struct Engine {
    scene: Scene,
    camera: Camera,
    projection: Projection,
    frame_buffer: FrameBuffer,
    rasterizer: RasterizerDispatcher,
    triangles_to_render: Vec<Triangle>,
    anchor: Option<ObjectId>,
    controls: Controls,
    draw_mode: DrawMode,
    stats: FrameStats,
}

impl Engine {
    /// Creates an engine rendering `scene` at `width` x `height`.
    ///
    /// `anchor` names the object the player flies and the anchored cameras
    /// follow. A missing anchor is allowed: input rotation and thrust are
    /// then ignored and anchored cameras hold still.
    pub fn new(scene: Scene, anchor: &str, width: u32, height: u32) -> Self {
        let anchor_id = scene.find(anchor);
        if anchor_id.is_none() {
            debug!("no anchor object {anchor:?}; player input will be ignored");
        }
        let camera = Camera::new(scene.params());
        let projection = Projection::from_params(scene.params(), width, height);

        Self {
            scene,
            camera,
            projection,
            frame_buffer: FrameBuffer::new(width, height),
            rasterizer: RasterizerDispatcher::new(RasterizerType::default()),
            triangles_to_render: Vec::new(),
            anchor: anchor_id,
            controls: Controls::default(),
            draw_mode: DrawMode::default(),
            stats: FrameStats::default(),
        }
    }

    /// Like [`Engine::new`], but the anchor must exist.
    pub fn with_anchor(scene: Scene, anchor: &str, width: u32, height: u32) -> Result<Self, SceneError> {
        if scene.find(anchor).is_none() {
            return Err(SceneError::UnknownAnchor(anchor.to_string()));
        }
        Ok(Self::new(scene, anchor, width, height))
    }

    pub fn set_controls(&mut self, controls: Controls) {
        self.controls = controls;
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn set_draw_mode(&mut self, mode: DrawMode) {
        if mode != self.draw_mode {
            info!("draw mode: {} -> {}", self.draw_mode, mode);
        }
        self.draw_mode = mode;
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        self.camera.select_mode(mode, self.scene.params());
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn set_rasterizer(&mut self, rasterizer_type: RasterizerType) {
        if rasterizer_type != self.rasterizer.active_type() {
            info!("rasterizer: {rasterizer_type}");
        }
        self.rasterizer.set_type(rasterizer_type);
    }

    pub fn rasterizer(&self) -> RasterizerType {
        self.rasterizer.active_type()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn anchor(&self) -> Option<ObjectId> {
        self.anchor
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Rebuilds the frame buffer and the projection for a new output size.
    pub fn resize(&mut self, width: u32, height: u32) {
        info!("resize to {width}x{height}");
        self.frame_buffer.resize(width, height);
        self.projection.resize(width, height);
    }

    /// The frame drawn by the last [`Engine::render`].
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    /// Triangles that survived culling in the last [`Engine::update`].
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles_to_render
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    fn apply_input(&mut self, input: &InputState) {
        if let Some(mode) = input.draw_mode {
            self.set_draw_mode(mode);
        }
        if let Some(mode) = input.camera_mode {
            self.camera.select_mode(mode, self.scene.params());
        }

        let step = self.controls.camera_step;
        self.camera.adjust_distance(input.distance_delta(step));
        self.camera.adjust_height(input.height_delta(step));

        let Some(body) = self.anchor.and_then(|id| self.scene.object_mut(id)) else {
            return;
        };
        body.set_rotation(input.rotation_deltas(self.controls.rotation_step));
        if input.thrust {
            let forward = body.basis().forward;
            body.translate(forward * self.controls.thrust_speed);
        }
    }

    /// Advances the scene one frame and rebuilds the triangle list.
    pub fn update(&mut self, input: &InputState) {
        self.apply_input(input);

        let model_to_world = self.scene.resolve_all(true);
        self.camera.update(&self.scene, self.anchor);
        let world_to_camera = self.camera.world_to_camera();

        let mesh = self.scene.mesh();
        let vertices = mesh.vertices();
        let mut stats = FrameStats::default();
        self.triangles_to_render.clear();

        for m2w in &model_to_world {
            let model_view = world_to_camera * *m2w;
            for (face, &color) in mesh.faces().iter().zip(mesh.colors()) {
                let [a, b, c] = face.indices();
                let positions: [Vec3; 3] = [vertices[a], vertices[b], vertices[c]];

                match self.projection.project_triangle(&model_view, positions, color) {
                    Some(triangle) => self.triangles_to_render.push(triangle),
                    None => stats.culled += 1,
                }
            }
        }

        stats.drawn = self.triangles_to_render.len();
        self.stats = stats;
        trace!("frame: {} triangles, {} culled", stats.drawn, stats.culled);
    }

    /// Clears the frame buffer and draws the current triangle list.
    pub fn render(&mut self) {
        self.frame_buffer.clear(colors::BACKGROUND);

        match self.draw_mode {
            DrawMode::Wireframe => {
                for triangle in &self.triangles_to_render {
                    draw_triangle_wireframe(triangle, &mut self.frame_buffer);
                }
            }
            DrawMode::Solid => {
                for triangle in &self.triangles_to_render {
                    self.rasterizer.fill_triangle(triangle, &mut self.frame_buffer);
                }
            }
            DrawMode::DepthBuffer => {
                for triangle in &self.triangles_to_render {
                    self.rasterizer
                        .fill_triangle(&triangle.with_depth_colors(), &mut self.frame_buffer);
                }
            }
        }
    }

    /// One complete frame: [`Engine::update`] then [`Engine::render`].
    pub fn frame(&mut self, input: &InputState) {
        self.update(input);
        self.render();
    }
}
