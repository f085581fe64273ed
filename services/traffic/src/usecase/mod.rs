pub mod analysis;
pub mod speed_warning;
