pub mod field;
pub mod typer_view;
