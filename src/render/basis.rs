use super::FrameSink;
use crate::scene::BasisRenderer;
use glium::backend::Facade;
use glium::index::{NoIndices, PrimitiveType};
use glium::{Program, Surface, VertexBuffer};
use nalgebra::{Matrix4, Vector3};
use std::rc::Rc;

#[derive(Copy, Clone)]
struct BasisVertex {
    position: [f32; 3],
    color: [f32; 3],
}

implement_vertex!(BasisVertex, position, color);

lazy_static! {
    static ref AXES: [(Vector3<f32>, [f32; 3]); 3] = [
        (Vector3::x(), [1.0, 0.0, 0.0]),
        (Vector3::y(), [0.0, 1.0, 0.0]),
        (Vector3::z(), [0.0, 0.0, 1.0]),
    ];
}

const VERTEX_SHADER: &str = r#"
    #version 330 core

    in vec3 position;
    in vec3 color;

    out vec3 vs_color;

    uniform mat4 viewProjection;
    uniform mat4 model;

    void main() {
        gl_Position = viewProjection*(model*vec4(position, 1.0));
        vs_color = color;
    }
"#;

const FRAGMENT_SHADER: &str = r#"
    #version 330 core

    in vec3 vs_color;

    out vec4 color;

    void main() {
        color = vec4(vs_color, 1.0);
    }
"#;

/// Draws a red/green/blue line basis at a body's placement.
pub struct AxisBasis {
    sink: Rc<FrameSink>,
    vertices: VertexBuffer<BasisVertex>,
    program: Program,
}

impl AxisBasis {
    pub fn new<F: ?Sized + Facade>(
        facade: &F,
        sink: &Rc<FrameSink>,
    ) -> Result<AxisBasis, Box<std::error::Error>> {
        let mut shape = Vec::with_capacity(6);
        for &(direction, color) in AXES.iter() {
            shape.push(BasisVertex {
                position: [0.0, 0.0, 0.0],
                color,
            });
            shape.push(BasisVertex {
                position: [direction.x, direction.y, direction.z],
                color,
            });
        }

        Ok(AxisBasis {
            sink: Rc::clone(sink),
            vertices: VertexBuffer::new(facade, &shape)?,
            program: Program::from_source(facade, VERTEX_SHADER, FRAGMENT_SHADER, None)?,
        })
    }
}

impl BasisRenderer for AxisBasis {
    fn draw_basis(
        &self,
        thickness: f32,
        length: f32,
        view_projection: &Matrix4<f32>,
        world_placement: &Matrix4<f32>,
    ) {
        let view_projection: [[f32; 4]; 4] = (*view_projection).into();
        let model: [[f32; 4]; 4] = (world_placement * Matrix4::new_scaling(length)).into();

        let parameters = glium::DrawParameters {
            depth: glium::Depth {
                test: glium::draw_parameters::DepthTest::IfLess,
                write: false,
                ..Default::default()
            },
            line_width: Some(thickness),
            ..Default::default()
        };

        self.sink.with_frame(|frame| {
            let result = frame.draw(
                &self.vertices,
                &NoIndices(PrimitiveType::LinesList),
                &self.program,
                &uniform! {
                    viewProjection: view_projection,
                    model: model,
                },
                &parameters,
            );
            if let Err(err) = result {
                error!("basis draw request failed: {}", err);
            }
        });
    }
}
