// src/components/mod.rs
pub mod chapter_end_modal;
pub mod continuous_view;
pub mod grid_view;
pub mod reader_view;
pub mod toolbar;
