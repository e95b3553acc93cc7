pub mod layer_group;
pub mod map_view;
