use nalgebra::Matrix4;
use std::error::Error;
use std::fmt;

mod body;
mod description;
mod motion;
mod node;

pub use self::body::CelestialBody;
pub use self::description::{
    BodyDescription, OrbitDescription, RingDescription, SpinDescription, SystemDescription,
};
pub use self::motion::{compose, OrbitConfiguration, Placements, SpinConfiguration};
pub use self::node::{BasisRenderer, RenderNode};

/// Stable identifier of a body inside a `SolarSystem` registry.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct BodyId(usize);

/// Violation of the scene-graph shape, detected when the tree is assembled.
#[derive(Debug, PartialEq)]
pub enum SceneGraphError {
    /// The body is already linked under a parent; bodies have at most one.
    AlreadyLinked(BodyId),
    /// Linking the body would close a cycle through its own subtree.
    CyclicLink { parent: BodyId, child: BodyId },
}

impl fmt::Display for SceneGraphError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SceneGraphError::AlreadyLinked(child) => {
                write!(f, "body {:?} is already linked under a parent", child)
            }
            SceneGraphError::CyclicLink { parent, child } => {
                write!(f, "linking {:?} under {:?} would create a cycle", child, parent)
            }
        }
    }
}

impl Error for SceneGraphError {}

/// Registry owning every body of one scene graph.
///
/// Bodies are created into the registry and wired up by id. Child links are
/// id lists into the same registry, which keeps the graph free of dangling
/// references and lets `add_child` reject shapes that would break the
/// per-frame traversal.
pub struct SolarSystem<N> {
    bodies: Vec<CelestialBody<N>>,
    parents: Vec<Option<BodyId>>,
    basis_renderer: Option<Box<BasisRenderer>>,
}

impl<N: RenderNode> SolarSystem<N> {
    pub fn new() -> SolarSystem<N> {
        SolarSystem {
            bodies: Vec::new(),
            parents: Vec::new(),
            basis_renderer: None,
        }
    }

    /// Adds a body backed by the given render node and returns its id.
    pub fn add_body(&mut self, node: N) -> BodyId {
        let id = BodyId(self.bodies.len());
        self.bodies.push(CelestialBody::new(node));
        self.parents.push(None);
        id
    }

    pub fn body(&self, id: BodyId) -> &CelestialBody<N> {
        &self.bodies[id.0]
    }

    pub fn body_mut(&mut self, id: BodyId) -> &mut CelestialBody<N> {
        &mut self.bodies[id.0]
    }

    /// Number of bodies in the registry, linked or not.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Installs the collaborator used to draw debug bases.
    pub fn set_basis_renderer(&mut self, renderer: Box<BasisRenderer>) {
        self.basis_renderer = Some(renderer);
    }

    /// Links `child` into `parent`'s child list.
    ///
    /// The graph must stay a forest: a body that already has a parent, or a
    /// link that would close a cycle through the child's own subtree, is
    /// rejected.
    pub fn add_child(&mut self, parent: BodyId, child: BodyId) -> Result<(), SceneGraphError> {
        if self.parents[child.0].is_some() {
            return Err(SceneGraphError::AlreadyLinked(child));
        }

        let mut ancestor = Some(parent);
        while let Some(id) = ancestor {
            if id == child {
                return Err(SceneGraphError::CyclicLink { parent, child });
            }
            ancestor = self.parents[id.0];
        }

        self.parents[child.0] = Some(parent);
        self.bodies[parent.0].link_child(child);
        Ok(())
    }

    /// Walks the tree below `root` once, visiting every reachable body
    /// exactly once with each parent strictly before its children, and
    /// issues the draw requests for this frame.
    ///
    /// The root is placed with the externally supplied `root_placement`;
    /// every other body receives the placement its parent produced earlier
    /// in the same call. All bodies observe the same `dt`.
    pub fn update_and_render(
        &mut self,
        root: BodyId,
        dt: f32,
        view_projection: &Matrix4<f32>,
        root_placement: &Matrix4<f32>,
        show_basis: bool,
    ) {
        let basis = if show_basis {
            self.basis_renderer.as_ref().map(|renderer| &**renderer)
        } else {
            None
        };

        let mut work_list = vec![(root, *root_placement)];
        while let Some((id, inbound_placement)) = work_list.pop() {
            let child_placement = self.bodies[id.0].update_and_render(
                dt,
                view_projection,
                &inbound_placement,
                basis,
            );
            for &child in self.bodies[id.0].children() {
                work_list.push((child, child_placement));
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::node::RenderNode;
    use nalgebra::Matrix4;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Draw requests observed by `RecordingNode`s, in issue order.
    pub type DrawLog = Rc<RefCell<Vec<(String, Matrix4<f32>)>>>;

    /// Render node that records every draw request it receives.
    pub struct RecordingNode {
        label: String,
        log: DrawLog,
    }

    impl RecordingNode {
        pub fn new(label: &str, log: &DrawLog) -> RecordingNode {
            RecordingNode {
                label: label.to_owned(),
                log: Rc::clone(log),
            }
        }
    }

    impl RenderNode for RecordingNode {
        type Geometry = ();
        type Texture = ();
        type Program = ();

        fn set_geometry(&mut self, _geometry: ()) {}

        fn attach_texture(&mut self, _name: &str, _texture: ()) {}

        fn set_program(&mut self, _program: ()) {}

        fn draw(&self, _view_projection: &Matrix4<f32>, world_placement: &Matrix4<f32>) {
            self.log
                .borrow_mut()
                .push((self.label.clone(), *world_placement));
        }
    }
}
