pub mod display;
pub mod lookup;
