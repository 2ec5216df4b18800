use super::shapes::MeshData;
use super::FrameSink;
use crate::scene::RenderNode;
use glium::backend::Facade;
use glium::index::PrimitiveType;
use glium::texture::SrgbTexture2d;
use glium::uniforms::{MagnifySamplerFilter, MinifySamplerFilter, SamplerWrapFunction};
use glium::{IndexBuffer, Program, Surface, VertexBuffer};
use nalgebra::Matrix4;
use std::rc::Rc;

/// Geometry resident on the GPU, shared between the nodes that draw it.
pub struct GpuMesh {
    pub vertices: VertexBuffer<super::Vertex>,
    pub indices: IndexBuffer<u16>,
}

impl GpuMesh {
    pub fn new<F: ?Sized + Facade>(
        facade: &F,
        mesh: &MeshData,
    ) -> Result<GpuMesh, Box<std::error::Error>> {
        Ok(GpuMesh {
            vertices: VertexBuffer::new(facade, &mesh.vertices)?,
            indices: IndexBuffer::new(facade, PrimitiveType::TrianglesList, &mesh.indices)?,
        })
    }
}

/// Fixed-function state applied to a node's draw requests.
#[derive(Copy, Clone)]
pub struct DrawOptions {
    pub backface_culling: bool,
    pub blending: bool,
}

impl Default for DrawOptions {
    fn default() -> DrawOptions {
        DrawOptions {
            backface_culling: true,
            blending: false,
        }
    }
}

/// glium-backed implementation of the renderable-node boundary.
///
/// Every draw request binds its own program, geometry and textures; nothing
/// is assumed to persist on the context between requests.
pub struct SceneNode {
    sink: Rc<FrameSink>,
    geometry: Option<Rc<GpuMesh>>,
    program: Option<Rc<Program>>,
    textures: Vec<(String, Rc<SrgbTexture2d>)>,
    options: DrawOptions,
}

impl SceneNode {
    pub fn new(sink: &Rc<FrameSink>) -> SceneNode {
        SceneNode::with_options(sink, DrawOptions::default())
    }

    pub fn with_options(sink: &Rc<FrameSink>, options: DrawOptions) -> SceneNode {
        SceneNode {
            sink: Rc::clone(sink),
            geometry: None,
            program: None,
            textures: Vec::new(),
            options,
        }
    }

    fn draw_parameters(&self) -> glium::DrawParameters<'static> {
        glium::DrawParameters {
            depth: glium::Depth {
                test: glium::draw_parameters::DepthTest::IfLess,
                write: true,
                ..Default::default()
            },
            backface_culling: if self.options.backface_culling {
                glium::BackfaceCullingMode::CullCounterClockwise
            } else {
                glium::BackfaceCullingMode::CullingDisabled
            },
            blend: if self.options.blending {
                glium::Blend::alpha_blending()
            } else {
                Default::default()
            },
            ..Default::default()
        }
    }
}

impl RenderNode for SceneNode {
    type Geometry = Rc<GpuMesh>;
    type Texture = Rc<SrgbTexture2d>;
    type Program = Rc<Program>;

    fn set_geometry(&mut self, geometry: Rc<GpuMesh>) {
        self.geometry = Some(geometry);
    }

    fn attach_texture(&mut self, name: &str, texture: Rc<SrgbTexture2d>) {
        self.textures.push((name.to_owned(), texture));
    }

    fn set_program(&mut self, program: Rc<Program>) {
        self.program = Some(program);
    }

    fn draw(&self, view_projection: &Matrix4<f32>, world_placement: &Matrix4<f32>) {
        let geometry = match self.geometry {
            Some(ref geometry) => geometry,
            None => {
                warn!("draw request on a node without geometry");
                return;
            }
        };
        let program = match self.program {
            Some(ref program) => program,
            None => {
                warn!("draw request on a node without a shader program");
                return;
            }
        };

        let view_projection: [[f32; 4]; 4] = (*view_projection).into();
        let model: [[f32; 4]; 4] = (*world_placement).into();
        let parameters = self.draw_parameters();

        self.sink.with_frame(|frame| {
            let result = match self.textures.first() {
                Some(&(_, ref texture)) => frame.draw(
                    &geometry.vertices,
                    &geometry.indices,
                    program,
                    &uniform! {
                        viewProjection: view_projection,
                        model: model,
                        diffuse_texture: texture
                            .sampled()
                            .magnify_filter(MagnifySamplerFilter::Linear)
                            .minify_filter(MinifySamplerFilter::Linear)
                            .wrap_function(SamplerWrapFunction::Repeat),
                    },
                    &parameters,
                ),
                None => frame.draw(
                    &geometry.vertices,
                    &geometry.indices,
                    program,
                    &uniform! {
                        viewProjection: view_projection,
                        model: model,
                    },
                    &parameters,
                ),
            };
            if let Err(err) = result {
                error!("draw request failed: {}", err);
            }
        });
    }
}
