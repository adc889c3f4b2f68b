//! Per-user depth mask: owned pixel buffer plus derived RGBA texture.

use ndarray::Array2;

/// Value written into the mask where a pixel belongs to the user.
pub(crate) const MASK_ON: u8 = 255;

/// CPU-side RGBA image derived from the mask pixels, ready for upload to
/// whatever texture object the host renderer uses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaskTexture {
    width: usize,
    height: usize,
    rgba: Vec<u8>,
}

impl MaskTexture {
    /// Build a white-on-transparent RGBA image from a 0/255 mask.
    pub(crate) fn from_mask(pixels: &Array2<u8>) -> Self {
        let (height, width) = pixels.dim();
        let mut rgba = Vec::with_capacity(width * height * 4);
        for &p in pixels.iter() {
            rgba.extend_from_slice(&[MASK_ON, MASK_ON, MASK_ON, p]);
        }
        Self {
            width,
            height,
            rgba,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major RGBA bytes, `width * height * 4` long.
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}

/// Extract one user's 0/255 mask from the sensor's scene-label map.
pub(crate) fn mask_from_labels(labels: &Array2<u16>, user_id: u16) -> Array2<u8> {
    labels.map(|&label| if label == user_id { MASK_ON } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_mask_from_labels() {
        let labels = array![[0u16, 1, 2], [1, 1, 0]];
        let mask = mask_from_labels(&labels, 1);
        assert_eq!(mask, array![[0u8, MASK_ON, 0], [MASK_ON, MASK_ON, 0]]);
    }

    #[test]
    fn test_texture_dimensions_and_alpha() {
        let mask = array![[MASK_ON, 0u8]];
        let texture = MaskTexture::from_mask(&mask);
        assert_eq!(texture.width(), 2);
        assert_eq!(texture.height(), 1);
        assert_eq!(texture.rgba().len(), 8);
        assert_eq!(texture.rgba()[3], MASK_ON);
        assert_eq!(texture.rgba()[7], 0);
    }
}
