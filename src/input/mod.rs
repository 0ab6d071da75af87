mod image;

pub use image::{MAX_IMAGE_SIZE, image_mime, read_image};
