use std::path::Path;

use image;

/// Decode an image file to RGBA8. Only the formats the picker accepts
/// (png/jpg/jpeg) are allowed; anything else is rejected up front.
pub fn load_rgba(path: &Path) -> Result<image::RgbaImage, String> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "png" | "jpg" | "jpeg" => {
            let img = image::open(path).map_err(|e| e.to_string())?;
            Ok(img.to_rgba8())
        }
        _ => Err(format!("unsupported image extension: {ext:?}")),
    }
}

/// Bounds-checked pixel read, RGB only (alpha dropped).
pub fn pixel_rgb(img: &image::RgbaImage, x: i32, y: i32) -> Option<[u8; 3]> {
    if x < 0 || y < 0 {
        return None;
    }
    let (x, y) = (x as u32, y as u32);
    if x >= img.width() || y >= img.height() {
        return None;
    }
    let px = img.get_pixel(x, y);
    Some([px[0], px[1], px[2]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_read_is_bounds_checked() {
        let mut img = image::RgbaImage::new(2, 2);
        img.put_pixel(1, 0, image::Rgba([10, 20, 30, 255]));
        assert_eq!(pixel_rgb(&img, 1, 0), Some([10, 20, 30]));
        assert_eq!(pixel_rgb(&img, -1, 0), None);
        assert_eq!(pixel_rgb(&img, 0, -1), None);
        assert_eq!(pixel_rgb(&img, 2, 0), None);
        assert_eq!(pixel_rgb(&img, 0, 2), None);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_rgba(Path::new("anim.gif")).unwrap_err();
        assert!(err.contains("unsupported"));
    }
}
