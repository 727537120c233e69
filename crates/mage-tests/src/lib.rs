//! Integration tests for mage crates.
//!
//! End-to-end checks that exercise mage-core together with mage-io.

#[cfg(test)]
mod tests {
    use mage_core::prims::{circle, extend_periodically, thicken};
    use mage_core::{ApplyOptions, Domain, Image, LayeredImage, Paint, Rgba, Shape};
    use tempfile::tempdir;

    /// Build, edit, negate, save and reload.
    #[test]
    fn test_edit_negate_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("neg.png");

        let mut img = Image::new(4, 4, [0, 0, 0, 255]);
        img.set((2, 1), [10, 20, 30]).unwrap();
        assert_eq!(img.get((2, 1)).unwrap().as_pixel(), Some(Rgba::new(10, 20, 30, 255)));

        let neg = -&img;
        assert_eq!(neg.get((2, 1)).unwrap().as_pixel(), Some(Rgba::new(245, 235, 225, 255)));

        mage_io::write(&path, &neg).expect("Failed to write PNG");
        let loaded = mage_io::read(&path).expect("Failed to read PNG");
        assert_eq!(loaded.as_array(), neg.as_array());
    }

    /// Every freshly built pixel equals the widened background.
    #[test]
    fn test_fresh_image_is_uniform() {
        for (w, h, bg) in [(1, 1, Rgba::BLACK), (7, 3, Rgba::opaque(1, 2, 3)), (3, 9, Rgba::new(9, 8, 7, 6))] {
            let img = Image::new(w, h, bg);
            assert_eq!(img.dimensions(), (w, h));
            for y in 0..h {
                for x in 0..w {
                    assert_eq!(img.pixel(x, y), Some(bg));
                }
            }
        }
    }

    /// A drawn disc composited onto a stack layer, then masks combined.
    #[test]
    fn test_draw_into_layers_and_combine() {
        let square = Domain::cartesian([-1.0, 1.0], [-1.0, 1.0]);
        let left = Shape::new(square.clone(), |x, y| circle(-0.5, 0.0)(x, y) <= 0.1, Rgba::WHITE);
        let right = Shape::new(square, |x, y| circle(0.5, 0.0)(x, y) <= 0.1, Rgba::WHITE);

        let mut stack = LayeredImage::from_images(vec![
            Image::new(21, 21, Rgba::BLACK),
            Image::new(21, 21, Rgba::BLACK),
        ])
        .unwrap();
        stack[0].apply(&left, ApplyOptions::default()).unwrap();
        stack[1].apply(&right, ApplyOptions::default()).unwrap();

        let both = (&stack[0] & &stack[1]).unwrap();
        let (lx, ly) = stack[0].resolve(-0.5, 0.0).unwrap();
        let (rx, ry) = stack[1].resolve(0.5, 0.0).unwrap();
        assert_eq!(both.pixel(lx, ly), Some(Rgba::WHITE));
        assert_eq!(both.pixel(rx, ry), Some(Rgba::WHITE));
        assert_eq!(both.pixel(10, 0), Some(Rgba::BLACK));
        assert!(both.domain().is_none());
    }

    /// Math crop of a drawn band equals the manual pixel crop.
    #[test]
    fn test_math_crop_of_drawing() {
        let domain = Domain::centered();
        let band = Shape::new(
            domain.clone(),
            thicken(|x| x, 1.0),
            Paint::shader(|x, _| if x < 0.0 { Rgba::opaque(255, 0, 0) } else { Rgba::opaque(0, 0, 255) }),
        );
        let mut img = Image::new(10, 10, Rgba::BLACK);
        img.apply(&band, ApplyOptions::default()).unwrap();

        // columns map to i - 5, rows to 5 - j
        let math = img.get((-3.0..2.0, -1.0..4.0)).unwrap().into_image().unwrap();
        let manual = img.get((2..7, 1..6)).unwrap().into_image().unwrap();
        assert_eq!(math.as_array(), manual.as_array());

        // (0, 0) is on the band and painted by the right half of the shader
        let (i, j) = img.resolve(0.0, 0.0).unwrap();
        assert_eq!(img.pixel(i, j), Some(Rgba::opaque(0, 0, 255)));
    }

    /// Tiled pattern drawn on a host domain keeps that domain.
    #[test]
    fn test_periodic_pattern_on_host_domain() {
        // 13 samples over [0, 3] puts a pixel every 0.25
        let host = Domain::cartesian([0.0, 3.0], [0.0, 3.0]);
        let tile = extend_periodically([0.0, 1.0], [0.0, 1.0], |x, y| x < 0.5 && y < 0.5);
        let checker = Shape::new(Domain::centered(), tile, Rgba::WHITE);

        let mut img = Image::new(13, 13, Rgba::BLACK).with_domain(host);
        img.apply(&checker, ApplyOptions::host_domain()).unwrap();

        let lit = |x: f64, y: f64| {
            let (i, j) = img.resolve(x, y).unwrap();
            img.pixel(i, j) == Some(Rgba::WHITE)
        };
        assert!(lit(0.0, 0.0));
        assert!(lit(2.25, 1.25));
        assert!(!lit(1.75, 2.25));
        assert!(!lit(2.75, 0.0));
        assert_eq!(img.resolve(3.0, 0.0).unwrap(), (12, 12));
    }
}
