use wasm_bindgen::prelude::*;

pub mod controller;
pub mod game;
pub mod outcome;
pub mod settings;
pub mod spawner;

pub use game::CubeRunner;

box_web::export_game!(CubeRunner, "cube-runner");
