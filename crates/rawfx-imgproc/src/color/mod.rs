mod hsv;

pub use hsv::{hsv_from_rgb, hsv_to_rgb, rgb_from_hsv, rgb_to_hsv};
