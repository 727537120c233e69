use mage_core::index::{Address, Bound, Component};
use mage_core::{Domain, Error, Image, Rgba, Selection};

fn numbered(width: usize, height: usize) -> Image {
    let mut img = Image::new(width, height, Rgba::BLACK);
    for y in 0..height {
        for x in 0..width {
            img.set_pixel(x, y, [x as u8, y as u8, (x * y) as u8]).unwrap();
        }
    }
    img
}

#[test]
fn write_read_every_pixel() {
    let mut img = Image::new(5, 4, Rgba::TRANSPARENT);
    for y in 0..4 {
        for x in 0..5 {
            let color = [x as u8 * 40, y as u8 * 50, 7];
            img.set((x, y), color).unwrap();
            assert_eq!(img.get((x, y)).unwrap().as_pixel(), Some(Rgba::from(color)));
        }
    }
}

#[test]
fn centered_slices_match_manual_snapping() {
    let img = numbered(8, 6).with_domain(Domain::centered());
    // columns: i - 4, rows: 3 - j
    let cases = [
        ((-4.0, 3.0), (-2.0, 3.0), (0, 7), (0, 5)),
        ((-1.4, 0.6), (0.4, 1.6), (3, 5), (1, 3)),
        ((0.0, 0.0), (0.0, 0.0), (4, 4), (3, 3)),
    ];
    for ((x0, x1), (y0, y1), (i0, i1), (j0, j1)) in cases {
        let math = img.get((x0..x1, y0..y1)).unwrap().into_image().unwrap();
        let manual = img.get((i0..i1, j0..j1)).unwrap().into_image().unwrap();
        assert_eq!(math.as_array(), manual.as_array(), "x {x0}..{x1}, y {y0}..{y1}");
    }
}

#[test]
fn mixed_component_spans() {
    let img = numbered(8, 6).with_domain(Domain::centered());
    // one float bound is enough to make the whole address mathematical
    let x = Component::Span {
        start: Some(Bound::Pixel(-2)),
        stop: Some(Bound::Coord(1.2)),
    };
    let sub = img.get(Address::new(x, ..)).unwrap().into_image().unwrap();
    // -2 is read as a coordinate too: column 2 up to column 5
    assert_eq!(sub.dimensions(), (3, 6));
    assert_eq!(sub.pixel(0, 0), img.pixel(2, 0));
}

#[test]
fn reads_alias_the_parent() {
    let img = numbered(4, 4);
    let Selection::Image(view) = img.get((1..3, 1..3)).unwrap() else {
        panic!("expected a sub-image");
    };
    let ptr = view.as_array().as_ptr();
    assert_eq!(ptr, img.as_array().slice(ndarray::s![1, 1, ..]).as_ptr());
}

#[test]
fn error_classes() {
    let img = Image::new(3, 3, Rgba::BLACK);
    assert!(img.get((3, 0)).unwrap_err().is_validation_error());
    assert!(img.get((0.0..1.0, 0.0..1.0)).unwrap_err().is_precondition_error());
    let err = Image::builder().width(3).build().unwrap_err();
    assert!(matches!(err, Error::MissingDimensions));
    assert!(err.to_string().contains("specify a width and height"));
}
