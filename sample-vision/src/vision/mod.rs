pub mod contours;
pub mod hue;
pub mod mask;
pub mod orientation;
pub mod recognition;
