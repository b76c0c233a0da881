//! Scene context: the object arena, shared geometry and camera parameters.
//!
//! Objects live in a flat arena addressed by [`ObjectId`]. Parents are stored
//! as ids, resolved once from names when the scene is built. Each frame every
//! object is resolved ancestors-first so a parent's cached rigid matrix is
//! current before any child composes with it.

use std::collections::HashMap;

use log::{info, trace, warn};
use thiserror::Error;

use crate::math::{mat4::Mat4, vec3::Vec3};
use crate::mesh::Mesh;
use crate::transform::{Basis, Transform};

/// Parent name meaning "this object is a root".
pub const NO_PARENT: &str = "None";

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("object name {0:?} is used more than once")]
    DuplicateName(String),
    #[error("anchor object {0:?} does not exist")]
    UnknownAnchor(String),
}

/// Stable index of an object in a [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Scene-level parameters: view volume, clip planes and camera defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneParams {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub focal: f32,
    pub near: f32,
    pub far: f32,
    /// Rooted camera position.
    pub camera_position: Vec3,
    /// Rooted camera view direction.
    pub camera_view: Vec3,
    /// Rooted camera up vector.
    pub camera_up: Vec3,
    /// Third-person trail distance behind the anchor.
    pub distance: f32,
    /// Third-person height above the anchor.
    pub height: f32,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            left: -50.0,
            right: 50.0,
            top: 37.5,
            bottom: -37.5,
            focal: 80.0,
            near: 1.0,
            far: 5000.0,
            camera_position: Vec3::new(0.0, 50.0, 250.0),
            camera_view: Vec3::new(0.0, -0.2, -1.0).normalize(),
            camera_up: Vec3::new(0.0, 1.0, -0.2).normalize(),
            distance: 150.0,
            height: 40.0,
        }
    }
}

impl SceneParams {
    /// Half of the horizontal view-volume extent.
    pub fn half_width(&self) -> f32 {
        (self.right - self.left) * 0.5
    }
}

/// One object as described by a scene file, before ids are assigned.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectDesc {
    pub name: String,
    pub position: Vec3,
    /// Per-frame rotation deltas (x=pitch, y=yaw, z=roll).
    pub rotation: Vec3,
    pub scale: Vec3,
    pub basis: Basis,
    /// Parent name, or [`NO_PARENT`].
    pub parent: String,
}

impl ObjectDesc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            basis: Basis::default(),
            parent: NO_PARENT.to_string(),
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_basis(mut self, basis: Basis) -> Self {
        self.basis = basis;
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = parent.into();
        self
    }
}

/// Explicitly owned scene context.
#[derive(Debug, Clone)]
pub struct Scene {
    params: SceneParams,
    mesh: Mesh,
    objects: Vec<Transform>,
    names: HashMap<String, usize>,
    order: Vec<ObjectId>,
}

impl Scene {
    /// Builds the arena from object descriptions.
    ///
    /// Parent names are resolved to ids here. A name that matches no object
    /// leaves the object without a parent and logs a warning.
    pub fn new(params: SceneParams, mesh: Mesh, descs: Vec<ObjectDesc>) -> Result<Self, SceneError> {
        let mut names = HashMap::with_capacity(descs.len());
        for (index, desc) in descs.iter().enumerate() {
            if names.insert(desc.name.clone(), index).is_some() {
                return Err(SceneError::DuplicateName(desc.name.clone()));
            }
        }

        let objects = descs
            .into_iter()
            .map(|desc| {
                let parent = if desc.parent == NO_PARENT {
                    None
                } else {
                    match names.get(&desc.parent) {
                        Some(&index) => Some(ObjectId(index)),
                        None => {
                            warn!(
                                "object {:?} names unknown parent {:?}; treating it as a root",
                                desc.name, desc.parent
                            );
                            None
                        }
                    }
                };

                let mut transform = Transform::new(desc.name);
                transform
                    .set_position(desc.position)
                    .set_rotation(desc.rotation)
                    .set_scale(desc.scale)
                    .set_basis(desc.basis);
                transform.set_parent(parent);
                transform
            })
            .collect::<Vec<_>>();

        let mut scene = Self {
            params,
            mesh,
            objects,
            names,
            order: Vec::new(),
        };
        scene.order = scene.resolve_order();

        info!(
            "scene: {} objects, {} vertices, {} faces",
            scene.objects.len(),
            scene.mesh.vertices().len(),
            scene.mesh.faces().len()
        );
        Ok(scene)
    }

    /// Number of parent hops from `id` to its root, bounded by the object
    /// count. `None` when the bound is hit, meaning the chain loops.
    fn depth(&self, id: ObjectId) -> Option<usize> {
        let mut depth = 0;
        let mut current = self.objects[id.0].parent();
        while let Some(parent) = current {
            depth += 1;
            if depth > self.objects.len() {
                return None;
            }
            current = self.objects[parent.0].parent();
        }
        Some(depth)
    }

    /// Object ids sorted so every ancestor precedes its descendants.
    fn resolve_order(&self) -> Vec<ObjectId> {
        let mut keyed = self
            .ids()
            .map(|id| {
                let depth = self.depth(id).unwrap_or_else(|| {
                    warn!(
                        "parent chain of {:?} does not terminate; resolving it last",
                        self.objects[id.0].name()
                    );
                    usize::MAX
                });
                (depth, id)
            })
            .collect::<Vec<_>>();
        keyed.sort_by_key(|&(depth, _)| depth);
        keyed.into_iter().map(|(_, id)| id).collect()
    }

    pub fn params(&self) -> &SceneParams {
        &self.params
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn objects(&self) -> &[Transform] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ObjectId> {
        (0..self.objects.len()).map(ObjectId)
    }

    /// Looks an object up by name.
    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.names.get(name).copied().map(ObjectId)
    }

    pub fn object(&self, id: ObjectId) -> Option<&Transform> {
        self.objects.get(id.0)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Transform> {
        self.objects.get_mut(id.0)
    }

    /// Left-multiplies `local` by the cached rigid matrix of every ancestor.
    ///
    /// The walk stops after as many hops as there are objects, so a looping
    /// chain cannot hang the frame.
    fn compose_with_ancestors(&self, id: ObjectId, local: Mat4) -> Mat4 {
        let mut world = local;
        let mut current = self.objects[id.0].parent();
        let mut hops = 0;
        while let Some(parent) = current {
            if hops == self.objects.len() {
                trace!("parent walk of {:?} hit the depth bound", self.objects[id.0].name());
                break;
            }
            let ancestor = &self.objects[parent.0];
            world = ancestor.rigid_matrix() * world;
            current = ancestor.parent();
            hops += 1;
        }
        world
    }

    /// Advances one object by a frame and returns its model-to-world matrix.
    ///
    /// Ancestors are read from their cached rigid matrices, so they must be
    /// resolved earlier in the same frame. Returns `None` for a stale id.
    pub fn resolve_model_to_world(&mut self, id: ObjectId, apply_scale: bool) -> Option<Mat4> {
        let local = self.objects.get_mut(id.0)?.update(apply_scale);
        Some(self.compose_with_ancestors(id, local))
    }

    /// Resolves every object once, ancestors first.
    ///
    /// The result is indexed by [`ObjectId::index`].
    pub fn resolve_all(&mut self, apply_scale: bool) -> Vec<Mat4> {
        let mut matrices = vec![Mat4::identity(); self.objects.len()];
        for i in 0..self.order.len() {
            let id = self.order[i];
            let local = self.objects[id.0].update(apply_scale);
            matrices[id.0] = self.compose_with_ancestors(id, local);
        }
        matrices
    }

    /// World-space rigid matrix (no scale anywhere in the chain) of an object,
    /// as of its last update.
    pub fn world_rigid(&self, id: ObjectId) -> Option<Mat4> {
        let object = self.objects.get(id.0)?;
        Some(self.compose_with_ancestors(id, object.rigid_matrix()))
    }

    /// World position and orientation of an object, as of its last update.
    pub fn world_frame(&self, id: ObjectId) -> Option<(Vec3, Basis)> {
        let rigid = self.world_rigid(id)?;
        Some((rigid.column(3), Basis::from_matrix(&rigid)))
    }
}
