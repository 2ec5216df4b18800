use super::motion::{self, OrbitConfiguration, SpinConfiguration};
use super::node::{BasisRenderer, RenderNode};
use super::BodyId;
use nalgebra::{Matrix4, Vector2, Vector3};

/// Flat ring rigidly attached to a body. It is drawn at the body's own
/// placement with its own scale and carries no motion state.
struct Ring<N> {
    node: N,
    scale: Vector2<f32>,
}

/// A body of the scene graph: one spin, one orbit, a scale, an optional
/// ring and the render node its geometry is drawn through.
///
/// Bodies live inside a `SolarSystem` registry and refer to their children
/// by id.
pub struct CelestialBody<N> {
    spin: SpinConfiguration,
    orbit: OrbitConfiguration,
    scale: Vector3<f32>,
    ring: Option<Ring<N>>,
    children: Vec<BodyId>,
    node: N,
}

impl<N: RenderNode> CelestialBody<N> {
    pub fn new(node: N) -> CelestialBody<N> {
        CelestialBody {
            spin: SpinConfiguration::default(),
            orbit: OrbitConfiguration::default(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            ring: None,
            children: Vec::new(),
            node,
        }
    }

    /// Replaces the spin parameters. The accumulated spin angle restarts
    /// from zero.
    pub fn configure_spin(&mut self, axial_tilt: f32, speed: f32) {
        self.spin = SpinConfiguration::new(axial_tilt, speed);
    }

    /// Replaces the orbit parameters. The accumulated orbital angle
    /// restarts from zero.
    pub fn configure_orbit(&mut self, radius: f32, inclination: f32, speed: f32) {
        self.orbit = OrbitConfiguration::new(radius, inclination, speed);
    }

    /// Scale applied to the body's own geometry; never propagated to
    /// children.
    pub fn set_scale(&mut self, scale: Vector3<f32>) {
        self.scale = scale;
    }

    /// Attaches a ring drawn at the body's placement, scaled by `scale` in
    /// the orbital plane.
    pub fn set_ring(&mut self, node: N, scale: Vector2<f32>) {
        self.ring = Some(Ring { node, scale });
    }

    pub fn spin(&self) -> &SpinConfiguration {
        &self.spin
    }

    pub fn orbit(&self) -> &OrbitConfiguration {
        &self.orbit
    }

    /// The body's children in insertion order.
    pub fn children(&self) -> &[BodyId] {
        &self.children
    }

    pub(crate) fn link_child(&mut self, child: BodyId) {
        self.children.push(child);
    }

    /// Advances both accumulated angles by one frame, draws the body and
    /// its ring, and returns the placement to hand to the body's children.
    ///
    /// Besides the two accumulated angles the call leaves no state behind;
    /// a call with `dt = 0` changes nothing but still issues the draw
    /// requests.
    pub fn update_and_render(
        &mut self,
        dt: f32,
        view_projection: &Matrix4<f32>,
        parent_placement: &Matrix4<f32>,
        basis: Option<&BasisRenderer>,
    ) -> Matrix4<f32> {
        self.spin.advance(dt);
        self.orbit.advance(dt);

        let placements = motion::compose(&self.spin, &self.orbit, parent_placement);

        if let Some(basis) = basis {
            basis.draw_basis(1.0, 2.0, view_projection, &placements.world);
        }

        self.node.draw(
            view_projection,
            &(placements.world * Matrix4::new_nonuniform_scaling(&self.scale)),
        );

        if let Some(ref ring) = self.ring {
            let ring_scale = Vector3::new(ring.scale.x, 1.0, ring.scale.y);
            ring.node.draw(
                view_projection,
                &(placements.world * Matrix4::new_nonuniform_scaling(&ring_scale)),
            );
        }

        placements.children
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{DrawLog, RecordingNode};
    use super::*;
    use crate::scene::motion::{forward_rotation, lateral_translation, vertical_rotation};

    fn assert_matrix_eq(actual: &Matrix4<f32>, expected: &Matrix4<f32>) {
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!(
                (a - e).abs() < 1e-5,
                "matrices differ:\n{}\n{}",
                actual,
                expected
            );
        }
    }

    #[test]
    fn update_advances_angles_once_per_call() {
        let log = DrawLog::default();
        let mut body = CelestialBody::new(RecordingNode::new("body", &log));
        body.configure_spin(0.0, 2.0);
        body.configure_orbit(1.0, 0.0, -1.0);

        let identity = Matrix4::identity();
        body.update_and_render(0.5, &identity, &identity, None);
        assert!((body.spin().rotation_angle() - 1.0).abs() < 1e-6);
        assert!((body.orbit().rotation_angle() + 0.5).abs() < 1e-6);

        // Neither the parent placement nor the view influence the state.
        let parent = lateral_translation(7.0) * vertical_rotation(0.4);
        let view = forward_rotation(1.0);
        body.update_and_render(0.25, &view, &parent, None);
        assert!((body.spin().rotation_angle() - 1.5).abs() < 1e-6);
        assert!((body.orbit().rotation_angle() + 0.75).abs() < 1e-6);
    }

    #[test]
    fn update_with_zero_dt_still_draws() {
        let log = DrawLog::default();
        let mut body = CelestialBody::new(RecordingNode::new("body", &log));
        body.configure_spin(0.1, 3.0);

        let identity = Matrix4::identity();
        body.update_and_render(1.0, &identity, &identity, None);
        let spin_angle = body.spin().rotation_angle();

        body.update_and_render(0.0, &identity, &identity, None);
        assert_eq!(body.spin().rotation_angle(), spin_angle);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn reconfiguration_resets_the_accumulated_angle() {
        let log = DrawLog::default();
        let mut body = CelestialBody::new(RecordingNode::new("body", &log));
        body.configure_spin(0.0, 4.0);
        body.configure_orbit(1.0, 0.0, 2.0);

        let identity = Matrix4::identity();
        body.update_and_render(3.0, &identity, &identity, None);
        assert!(body.spin().rotation_angle() != 0.0);
        assert!(body.orbit().rotation_angle() != 0.0);

        body.configure_spin(0.0, 4.0);
        assert_eq!(body.spin().rotation_angle(), 0.0);

        body.configure_orbit(1.0, 0.0, 2.0);
        assert_eq!(body.orbit().rotation_angle(), 0.0);
    }

    #[test]
    fn body_scale_applies_to_the_drawn_geometry_only() {
        let log = DrawLog::default();
        let mut body = CelestialBody::new(RecordingNode::new("body", &log));
        body.set_scale(Vector3::new(2.0, 2.0, 2.0));

        let identity = Matrix4::identity();
        let children = body.update_and_render(0.0, &identity, &identity, None);

        let drawn = log.borrow()[0].1;
        assert_matrix_eq(
            &drawn,
            &Matrix4::new_nonuniform_scaling(&Vector3::new(2.0, 2.0, 2.0)),
        );
        assert_matrix_eq(&children, &identity);
    }

    #[test]
    fn ring_is_drawn_at_the_body_placement_with_its_own_scale() {
        let log = DrawLog::default();
        let mut body = CelestialBody::new(RecordingNode::new("body", &log));
        body.set_ring(RecordingNode::new("ring", &log), Vector2::new(2.0, 3.0));
        body.configure_orbit(4.0, 0.3, 0.0);

        let identity = Matrix4::identity();
        body.update_and_render(0.0, &identity, &identity, None);

        let log = log.borrow();
        assert_eq!(log.len(), 2);
        let (ref body_label, body_placement) = log[0];
        let (ref ring_label, ring_placement) = log[1];
        assert_eq!(body_label, "body");
        assert_eq!(ring_label, "ring");

        let ring_scale = Matrix4::new_nonuniform_scaling(&Vector3::new(2.0, 1.0, 3.0));
        assert_matrix_eq(&ring_placement, &(body_placement * ring_scale));
    }
}
