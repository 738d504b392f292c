pub mod menu_bar;
pub mod overview;
pub mod status;
pub mod viewport;
