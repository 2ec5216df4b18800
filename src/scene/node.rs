use nalgebra::Matrix4;

/// Opaque handle to geometry and material state owned outside the scene
/// core, typically resident on the GPU.
///
/// The scene only ever issues draw requests through this boundary; it does
/// not inspect or depend on any renderer state.
pub trait RenderNode {
    type Geometry;
    type Texture;
    type Program;

    fn set_geometry(&mut self, geometry: Self::Geometry);

    /// Binds a texture under the name the node's shader program samples it
    /// by.
    fn attach_texture(&mut self, name: &str, texture: Self::Texture);

    fn set_program(&mut self, program: Self::Program);

    /// Issues one self-contained draw request. Implementations must not
    /// rely on bindings persisting from earlier requests.
    fn draw(&self, view_projection: &Matrix4<f32>, world_placement: &Matrix4<f32>);
}

/// Debug collaborator that renders a coordinate basis widget at a given
/// placement.
pub trait BasisRenderer {
    fn draw_basis(
        &self,
        thickness: f32,
        length: f32,
        view_projection: &Matrix4<f32>,
        world_placement: &Matrix4<f32>,
    );
}
