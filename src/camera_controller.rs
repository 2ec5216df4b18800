use crate::transform::{Rotation, Transformable};
use glium::glutin::KeyboardInput;
use nalgebra::Vector3;

const MOVEMENT_SPEED: f64 = 4.0;
const MOUSE_SENSITIVITY: f64 = 0.003;

pub struct CameraController {
    movement_vector: Vector3<f64>,
    yaw: f64,
    pitch: f64,
}

impl CameraController {
    pub fn new() -> CameraController {
        CameraController {
            movement_vector: Vector3::new(0.0, 0.0, 0.0),
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn key_event(&mut self, input: &KeyboardInput) {
        use glium::glutin::ElementState::{Pressed, Released};
        use glium::glutin::VirtualKeyCode::*;

        match *input {
            KeyboardInput {
                state: Pressed,
                virtual_keycode: Some(key),
                ..
            } => match key {
                W => self.movement_vector.z = 1.0,
                S => self.movement_vector.z = -1.0,
                A => self.movement_vector.x = 1.0,
                D => self.movement_vector.x = -1.0,
                _ => {}
            },
            KeyboardInput {
                state: Released,
                virtual_keycode: Some(key),
                ..
            } => match key {
                W | S => self.movement_vector.z = 0.0,
                A | D => self.movement_vector.x = 0.0,
                _ => {}
            },
            _ => {}
        }
    }

    /// Accumulates a mouse drag, in physical pixels, to be applied as a
    /// view rotation on the next tick.
    pub fn mouse_moved(&mut self, delta: (f64, f64)) {
        self.yaw += delta.0 * MOUSE_SENSITIVITY;
        self.pitch += delta.1 * MOUSE_SENSITIVITY;
    }

    pub fn tick<T: Transformable>(&mut self, time_since_last_frame: f32, transform: &mut T) {
        let translation =
            self.movement_vector * f64::from(time_since_last_frame) * MOVEMENT_SPEED;
        transform.translate_by(&translation);

        if self.yaw != 0.0 || self.pitch != 0.0 {
            transform.rotate_by(&Rotation::from_euler_angles(self.pitch, self.yaw, 0.0));
            self.yaw = 0.0;
            self.pitch = 0.0;
        }
    }
}
