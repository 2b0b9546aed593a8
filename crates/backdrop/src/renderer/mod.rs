pub mod surface;
#[cfg(feature = "vectors")]
pub mod vector;
