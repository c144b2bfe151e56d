pub mod force_graph;
pub mod hero_detail;
pub mod heroes_list;
pub mod planet_tooltip;
