pub mod optimize;
pub mod setup;
pub mod ui;
