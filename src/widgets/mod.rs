pub mod controls;
pub mod debug;
pub mod text_input;
