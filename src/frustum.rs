use crate::transform::Transform;
use nalgebra as na;

/// View volume for one frame: the view transform it was built from, the
/// projection, and the composed view-projection handed to the scene.
pub struct Frustum {
    pub transform: Transform,

    pub projection: na::Matrix4<f32>,
    pub view_projection: na::Matrix4<f32>,
}

impl Frustum {
    pub fn new(transform: Transform, projection: na::Matrix4<f32>) -> Frustum {
        let view = na::convert::<na::Matrix4<f64>, na::Matrix4<f32>>(transform.to_homogeneous());
        Frustum {
            transform,
            projection,
            view_projection: projection * view,
        }
    }
}
