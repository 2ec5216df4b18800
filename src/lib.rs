#[macro_use]
extern crate imgui;

#[macro_use] extern crate glium;
#[macro_use] extern crate lazy_static;
#[macro_use] extern crate log;
#[macro_use] extern crate serde_derive;
extern crate pretty_env_logger;

extern crate image;
extern crate nalgebra;
extern crate serde_json;
extern crate simdnoise;

pub mod camera;
pub mod camera_controller;
pub mod frustum;
pub mod render;
pub mod scene;
pub mod timeline;
pub mod transform;
pub mod ui;
