pub mod info_panel;
pub mod legend;
