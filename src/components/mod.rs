pub mod features;
pub mod mind_map;
