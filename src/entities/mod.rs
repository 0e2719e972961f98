//! Configuration records loaded from design files

pub mod bound;
pub mod design;
pub mod target;

pub use bound::BoundSet;
pub use design::DesignFile;
pub use target::Target;
