pub mod painter;
pub mod script;
pub mod shaper;
pub mod wrapper;
