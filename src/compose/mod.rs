//! Compositing stages.
//!
//! Each stage is a pure function over pixmaps: mask generation clips a
//! screenshot's corners, the frame compositor layers it behind the device
//! bezel, the background compositor places the framed result on the output
//! canvas, and the caption renderer draws centered text above it.

pub mod background;
pub mod caption;
pub mod frame;
pub mod mask;

pub use background::place_on_background;
pub use caption::draw_caption;
pub use frame::overlay_screenshot;
pub use mask::rounded_mask;
