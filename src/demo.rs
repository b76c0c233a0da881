//! Built-in airplane scene.
//!
//! Every part is the shared mesh scaled into shape. The stabilizer hangs off
//! the tail fin, so it exercises a two-level parent chain, and the propeller
//! carries a constant roll so it spins on its own.

use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::scene::{ObjectDesc, Scene, SceneError, SceneParams};

/// Name of the object the player flies and the anchored cameras follow.
pub const ANCHOR: &str = "body";

/// Object descriptions for the airplane, parents listed by name.
pub fn airplane_objects() -> Vec<ObjectDesc> {
    vec![
        ObjectDesc::new(ANCHOR).with_scale(Vec3::new(20.0, 12.0, 80.0)),
        ObjectDesc::new("wings")
            .with_position(Vec3::new(0.0, 0.0, -5.0))
            .with_scale(Vec3::new(140.0, 3.0, 25.0))
            .with_parent(ANCHOR),
        ObjectDesc::new("tail")
            .with_position(Vec3::new(0.0, 14.0, 32.0))
            .with_scale(Vec3::new(3.0, 20.0, 14.0))
            .with_parent(ANCHOR),
        ObjectDesc::new("stabilizer")
            .with_position(Vec3::new(0.0, 8.0, 0.0))
            .with_scale(Vec3::new(50.0, 2.0, 10.0))
            .with_parent("tail"),
        ObjectDesc::new("propeller")
            .with_position(Vec3::new(0.0, 0.0, -42.0))
            .with_rotation(Vec3::new(0.0, 0.0, 0.15))
            .with_scale(Vec3::new(60.0, 4.0, 2.0))
            .with_parent(ANCHOR),
    ]
}

/// The airplane built from `mesh` with the default scene parameters.
pub fn airplane_scene(mesh: Mesh) -> Result<Scene, SceneError> {
    Scene::new(SceneParams::default(), mesh, airplane_objects())
}
