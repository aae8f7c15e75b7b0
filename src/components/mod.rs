pub mod artist_panel;
pub mod controls;
pub mod force_graph;
