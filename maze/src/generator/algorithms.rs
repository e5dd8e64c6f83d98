pub mod backtrack;
pub mod wall_carve;
