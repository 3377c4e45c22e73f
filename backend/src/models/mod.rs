pub mod forge;
pub mod tree;
