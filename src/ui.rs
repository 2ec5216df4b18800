use glium::glutin;

/// Dear ImGui overlay plumbing: context, glium renderer and per-frame
/// drawing.
pub struct UI {
    imgui: imgui::ImGui,
    renderer: imgui_glium_renderer::Renderer,
}

impl UI {
    /// Create the imgui context and renderer for the given display.
    pub fn new(font_size: f64, display: &glium::Display) -> UI {
        let mut imgui = imgui::ImGui::init();
        imgui.set_ini_filename(None);

        let dpi_factor = display.gl_window().get_hidpi_factor();
        let font_size = (font_size * dpi_factor) as f32;

        imgui.fonts().add_default_font_with_config(
            imgui::ImFontConfig::new()
                .oversample_h(1)
                .pixel_snap_h(true)
                .size_pixels(font_size),
        );
        imgui.set_font_global_scale((1.0 / dpi_factor) as f32);

        let renderer = imgui_glium_renderer::Renderer::init(&mut imgui, display)
            .expect("Could not create imgui renderer");

        imgui_glutin_support::configure_keys(&mut imgui);

        UI { imgui, renderer }
    }

    /// Draw the UI built by `run_ui` on top of the frame.
    pub fn draw<F: FnOnce(&imgui::Ui)>(
        &mut self,
        frame: &mut glium::Frame,
        window: &glutin::Window,
        previous_frame_time: f32,
        run_ui: F,
    ) {
        imgui_glutin_support::update_mouse_cursor(&self.imgui, window);

        let frame_size = match get_frame_size(window) {
            Some(frame_size) => frame_size,
            None => return,
        };
        let ui = self.imgui.frame(frame_size, previous_frame_time);

        run_ui(&ui);
        if let Err(err) = self.renderer.render(frame, ui) {
            error!("Could not draw UI: {}", err);
        }
    }

    /// Handle window events
    pub fn handle_event(&mut self, event: &glutin::Event) {
        imgui_glutin_support::handle_event(&mut self.imgui, event);
    }
}

/// Animation controls exposed in the overlay. The animation delta derived
/// here is computed once per frame and handed uniformly to every body.
pub struct SceneControls {
    pub pause_animation: bool,
    pub time_scale: f32,
    pub show_basis: bool,
}

impl SceneControls {
    pub fn new() -> SceneControls {
        SceneControls {
            pause_animation: false,
            time_scale: 1.0,
            show_basis: false,
        }
    }

    /// The animation delta for this frame: zero while paused, otherwise the
    /// wall-clock delta scaled by the time-scale factor.
    pub fn animation_delta(&self, frame_delta: f32) -> f32 {
        if self.pause_animation {
            0.0
        } else {
            frame_delta * self.time_scale
        }
    }

    /// Draw the scene-controls window.
    pub fn build(&mut self, ui: &imgui::Ui) {
        ui.window(im_str!("Scene controls"))
            .size((300.0, 120.0), imgui::ImGuiCond::FirstUseEver)
            .build(|| {
                ui.checkbox(im_str!("Pause the animation"), &mut self.pause_animation);
                ui.slider_float(im_str!("Time scale"), &mut self.time_scale, 0.1, 10.0)
                    .build();
                ui.separator();
                ui.checkbox(im_str!("Show basis"), &mut self.show_basis);
            });
    }
}

/// Get the logical size + dpi factor for the window
pub fn get_frame_size(window: &glutin::Window) -> Option<imgui::FrameSize> {
    window.get_inner_size().map(|logical_size| imgui::FrameSize {
        logical_size: logical_size.into(),
        hidpi_factor: window.get_hidpi_factor(),
    })
}
