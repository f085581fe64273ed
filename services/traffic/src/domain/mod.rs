pub mod detection;
pub mod warning;
