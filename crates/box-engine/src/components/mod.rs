pub mod entity;
pub mod mesh;
