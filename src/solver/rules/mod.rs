pub mod collinear;
pub mod column;
pub mod diagonal;
