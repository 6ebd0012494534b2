pub mod input;
pub mod secondary;
pub mod selection;
pub mod state;
pub mod text;
