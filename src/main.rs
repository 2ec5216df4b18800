extern crate glium;
extern crate nalgebra;
extern crate orrery;
#[macro_use]
extern crate log;
extern crate pretty_env_logger;

use glium::glutin;
use glium::Surface;
use nalgebra::{Matrix4, Vector3};
use orrery::camera::Camera;
use orrery::camera_controller::CameraController;
use orrery::render::{self, AxisBasis, DrawOptions, FrameSink, GpuMesh, SceneNode};
use orrery::scene::{
    BodyDescription, BodyId, RenderNode, RingDescription, SolarSystem, SystemDescription,
};
use orrery::timeline::Timeline;
use orrery::transform::Transformable;
use orrery::ui::{SceneControls, UI};
use std::path::Path;
use std::rc::Rc;

const BODY_VERTEX_SHADER: &str = r#"
    #version 330 core

    in vec3 position;
    in vec3 normal;
    in vec2 texcoord;

    out vec3 vs_normal;
    out vec2 vs_texcoord;

    uniform mat4 viewProjection;
    uniform mat4 model;

    void main() {
        gl_Position = viewProjection*(model*vec4(position, 1.0));
        vs_normal = normalize(mat3(model)*normal);
        vs_texcoord = texcoord;
    }
"#;

const BODY_FRAGMENT_SHADER: &str = r#"
    #version 330 core

    in vec3 vs_normal;
    in vec2 vs_texcoord;

    out vec4 color;

    uniform sampler2D diffuse_texture;

    void main() {
        float ambient = 0.35;
        float nDotL = max(0.0, dot(normalize(vs_normal), normalize(vec3(1.0, 0.3, 0.5))));
        color = texture(diffuse_texture, vs_texcoord)*(ambient + (1.0 - ambient)*nDotL);
    }
"#;

const RING_FRAGMENT_SHADER: &str = r#"
    #version 330 core

    in vec3 vs_normal;
    in vec2 vs_texcoord;

    out vec4 color;

    uniform sampler2D diffuse_texture;

    void main() {
        vec4 texel = texture(diffuse_texture, vs_texcoord);
        // Fade the annulus out towards its edges.
        float band = smoothstep(0.0, 0.15, vs_texcoord.x)*(1.0 - smoothstep(0.85, 1.0, vs_texcoord.x));
        color = vec4(texel.rgb, texel.a*band);
    }
"#;

fn main() {
    pretty_env_logger::init();

    let mut events_loop = glutin::EventsLoop::new();
    let window = glutin::WindowBuilder::new()
        .with_title("Orrery")
        .with_dimensions(glutin::dpi::LogicalSize::new(1280.0, 800.0));
    let context = glutin::ContextBuilder::new()
        .with_vsync(true)
        .with_depth_buffer(24);
    let display =
        glium::Display::new(window, context, &events_loop).expect("Could not create the display");

    let scene_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "scenes/solar_system.json".to_owned());
    let description = SystemDescription::from_path(Path::new(&scene_path))
        .expect("Could not load the scene description");

    let sink = FrameSink::new();
    let (mut system, roots) = build_system(&display, &sink, &description);
    info!("assembled {} bodies from {}", system.len(), scene_path);

    let mut camera = Camera::new();
    camera
        .set_field_of_view(std::f32::consts::FRAC_PI_3)
        .set_far(500.0);
    camera.translate_by(&Vector3::new(0.0, -2.0, -24.0));

    let mut camera_controller = CameraController::new();
    let mut ui = UI::new(13.0, &display);
    let mut controls = SceneControls::new();
    let mut timeline = Timeline::new();

    let system_placement = Matrix4::identity();

    let mut closed = false;
    let mut left_mouse_pressed = false;
    let mut last_mouse_position = glutin::dpi::PhysicalPosition::new(0.0, 0.0);

    while !closed {
        let frame_delta = timeline.next_frame();
        let animation_delta = controls.animation_delta(frame_delta);

        camera_controller.tick(frame_delta, &mut camera);

        let frame = display.draw();
        let frame_size = frame.get_dimensions();
        let aspect_ratio = frame_size.0 as f32 / frame_size.1 as f32;
        let frustum = camera.frustum(aspect_ratio);
        let dpi = display.gl_window().get_hidpi_factor();

        sink.begin(frame);
        sink.with_frame(|frame| frame.clear_color_and_depth((0.01, 0.01, 0.02, 1.0), 1.0));

        for &root in roots.iter() {
            system.update_and_render(
                root,
                animation_delta,
                &frustum.view_projection,
                &system_placement,
                controls.show_basis,
            );
        }

        sink.with_frame(|frame| {
            ui.draw(frame, &display.gl_window(), frame_delta, |ui| {
                controls.build(ui)
            });
        });

        if let Err(err) = sink.finish() {
            error!("could not queue the frame for display: {}", err);
        }

        events_loop.poll_events(|event| {
            ui.handle_event(&event);
            match event {
                glutin::Event::WindowEvent { event, .. } => match event {
                    glutin::WindowEvent::CloseRequested => closed = true,
                    glutin::WindowEvent::KeyboardInput { input, .. } => {
                        camera_controller.key_event(&input);
                    }
                    glutin::WindowEvent::MouseInput {
                        state,
                        button: glutin::MouseButton::Left,
                        ..
                    } => {
                        left_mouse_pressed = state == glutin::ElementState::Pressed;
                    }
                    glutin::WindowEvent::CursorMoved { position, .. } => {
                        let physical_position = position.to_physical(dpi);
                        let delta = (
                            physical_position.x - last_mouse_position.x,
                            physical_position.y - last_mouse_position.y,
                        );
                        last_mouse_position = physical_position;

                        if left_mouse_pressed {
                            camera_controller.mouse_moved(delta);
                        }
                    }
                    _ => (),
                },
                _ => (),
            }
        });
    }
}

fn build_system(
    display: &glium::Display,
    sink: &Rc<FrameSink>,
    description: &SystemDescription,
) -> (SolarSystem<SceneNode>, Vec<BodyId>) {
    let sphere = Rc::new(
        GpuMesh::new(display, &render::shapes::sphere(64, 32))
            .expect("Could not upload the sphere mesh"),
    );
    let annulus = Rc::new(
        GpuMesh::new(display, &render::shapes::ring(0.45, 0.675, 80))
            .expect("Could not upload the ring mesh"),
    );

    let body_program = Rc::new(
        glium::Program::from_source(display, BODY_VERTEX_SHADER, BODY_FRAGMENT_SHADER, None)
            .expect("Could not compile the body program"),
    );
    let ring_program = Rc::new(
        glium::Program::from_source(display, BODY_VERTEX_SHADER, RING_FRAGMENT_SHADER, None)
            .expect("Could not compile the ring program"),
    );

    let mut system = SolarSystem::new();
    system.set_basis_renderer(Box::new(
        AxisBasis::new(display, sink).expect("Could not create the basis renderer"),
    ));

    let mut next_seed = 0.0_f32;
    let roots = {
        let mut make_body = |body: &BodyDescription| {
            let mut node = SceneNode::new(sink);
            node.set_geometry(Rc::clone(&sphere));
            node.set_program(Rc::clone(&body_program));

            next_seed += 3.7;
            let texture = match body.texture {
                Some(ref path) => render::load_texture(display, Path::new(path)),
                None => render::surface_texture(display, body.color, next_seed),
            };
            match texture {
                Ok(texture) => node.attach_texture("diffuse_texture", Rc::new(texture)),
                Err(err) => warn!("no texture for '{}': {}", body.name, err),
            }
            node
        };
        let mut make_ring = |ring: &RingDescription| {
            let mut node = SceneNode::with_options(
                sink,
                DrawOptions {
                    backface_culling: false,
                    blending: true,
                },
            );
            node.set_geometry(Rc::clone(&annulus));
            node.set_program(Rc::clone(&ring_program));
            match render::surface_texture(display, ring.color, 0.0) {
                Ok(texture) => node.attach_texture("diffuse_texture", Rc::new(texture)),
                Err(err) => warn!("no texture for a ring: {}", err),
            }
            node
        };

        description
            .assemble(&mut system, &mut make_body, &mut make_ring)
            .expect("The scene description is not a tree")
    };

    (system, roots)
}
