use nalgebra::{Matrix4, Vector3};

/// Rotation of a body about its own tilted vertical axis.
///
/// The accumulated angle is unbounded; it only ever changes through
/// `advance` and restarts from zero when the spin is reconfigured.
#[derive(Clone, Copy, Debug)]
pub struct SpinConfiguration {
    /// Constant tilt of the spin axis away from the orbit normal, in radians.
    pub axial_tilt: f32,
    /// Angular speed in radians per second; the sign selects the direction.
    pub speed: f32,

    rotation_angle: f32,
}

impl SpinConfiguration {
    pub fn new(axial_tilt: f32, speed: f32) -> SpinConfiguration {
        SpinConfiguration {
            axial_tilt,
            speed,
            rotation_angle: 0.0,
        }
    }

    /// Accumulates the rotation performed during `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.rotation_angle += self.speed * dt;
    }

    pub fn rotation_angle(&self) -> f32 {
        self.rotation_angle
    }
}

impl Default for SpinConfiguration {
    fn default() -> SpinConfiguration {
        SpinConfiguration::new(0.0, 0.0)
    }
}

/// Circular motion of a body around its parent, on an orbit plane that may
/// itself be inclined.
#[derive(Clone, Copy, Debug)]
pub struct OrbitConfiguration {
    /// Distance from the orbit center along the lateral axis. A negative
    /// radius mirrors the position through the orbit center.
    pub radius: f32,
    /// Tilt of the orbit plane about the forward axis, in radians.
    pub inclination: f32,
    /// Angular speed in radians per second; the sign selects the direction.
    pub speed: f32,

    rotation_angle: f32,
}

impl OrbitConfiguration {
    pub fn new(radius: f32, inclination: f32, speed: f32) -> OrbitConfiguration {
        OrbitConfiguration {
            radius,
            inclination,
            speed,
            rotation_angle: 0.0,
        }
    }

    /// Accumulates the rotation performed during `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.rotation_angle += self.speed * dt;
    }

    pub fn rotation_angle(&self) -> f32 {
        self.rotation_angle
    }
}

impl Default for OrbitConfiguration {
    fn default() -> OrbitConfiguration {
        OrbitConfiguration::new(0.0, 0.0, 0.0)
    }
}

/// Placement matrices derived from a body's motion state for one frame.
pub struct Placements {
    /// Maps the body's local frame into the world; the body is drawn with
    /// this placement.
    pub world: Matrix4<f32>,
    /// Handed to the body's children: the orbital frame and the axial tilt,
    /// without the body's own spin angle.
    pub children: Matrix4<f32>,
}

/// Derives a body's placements from its motion state and the placement
/// received from its parent.
///
/// The spin matrix composes the constant axial tilt outside the spin
/// rotation, so the body turns about its own tilted axis. The orbital frame
/// rotates about the vertical axis by the orbital angle, tilts the orbit
/// plane about the forward axis and then translates by the orbital radius
/// along the lateral axis.
pub fn compose(
    spin: &SpinConfiguration,
    orbit: &OrbitConfiguration,
    parent_placement: &Matrix4<f32>,
) -> Placements {
    let tilt_only = forward_rotation(spin.axial_tilt);
    let spin_matrix = tilt_only * vertical_rotation(spin.rotation_angle);

    let orbital_rotation = vertical_rotation(orbit.rotation_angle);
    let orbital_tilt = forward_rotation(orbit.inclination) * lateral_translation(orbit.radius);
    let orbital_frame = parent_placement * orbital_rotation * orbital_tilt;

    Placements {
        world: orbital_frame * spin_matrix,
        children: orbital_frame * tilt_only,
    }
}

/// Rotation about the orbit-normal (vertical) axis.
pub fn vertical_rotation(angle: f32) -> Matrix4<f32> {
    Matrix4::from_euler_angles(0.0, angle, 0.0)
}

/// Rotation about the reference forward axis.
pub fn forward_rotation(angle: f32) -> Matrix4<f32> {
    Matrix4::from_euler_angles(0.0, 0.0, angle)
}

/// Translation along the reference lateral axis.
pub fn lateral_translation(distance: f32) -> Matrix4<f32> {
    Matrix4::new_translation(&Vector3::new(distance, 0.0, 0.0))
}
