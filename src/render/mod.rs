use glium::{Frame, SwapBuffersError};
use std::cell::RefCell;
use std::rc::Rc;

mod basis;
mod node;
pub mod shapes;
mod textures;
mod vertex;

pub use self::basis::AxisBasis;
pub use self::node::{DrawOptions, GpuMesh, SceneNode};
pub use self::textures::{load_texture, surface_texture};
pub use self::vertex::Vertex;

/// Shared handle to the frame currently being drawn.
///
/// Render nodes draw through the sink, which keeps a draw request a
/// self-contained `(view_projection, world_placement)` pair; the
/// application owns the begin/finish cycle around each frame.
pub struct FrameSink {
    frame: RefCell<Option<Frame>>,
}

impl FrameSink {
    pub fn new() -> Rc<FrameSink> {
        Rc::new(FrameSink {
            frame: RefCell::new(None),
        })
    }

    /// Makes `frame` the target of subsequent draw requests.
    pub fn begin(&self, frame: Frame) {
        let previous = self.frame.borrow_mut().replace(frame);
        if let Some(previous) = previous {
            warn!("frame sink rebound without finishing the previous frame");
            if let Err(err) = previous.finish() {
                error!("could not finish the abandoned frame: {}", err);
            }
        }
    }

    /// Runs `draw` against the active frame. Requests issued outside a
    /// begin/finish cycle are dropped with a warning.
    pub fn with_frame<F: FnOnce(&mut Frame)>(&self, draw: F) {
        match *self.frame.borrow_mut() {
            Some(ref mut frame) => draw(frame),
            None => warn!("draw request outside of an active frame"),
        }
    }

    /// Finishes the active frame and queues it for display.
    pub fn finish(&self) -> Result<(), SwapBuffersError> {
        match self.frame.borrow_mut().take() {
            Some(frame) => frame.finish(),
            None => Ok(()),
        }
    }
}
