pub mod audit;
pub mod normalize;
