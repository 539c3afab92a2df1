use geo::{polygon, MultiPolygon, Polygon};

/// The square with corners (0, 0) and (10, 10).
pub(crate) fn square() -> Polygon {
    polygon![
        (x: 0., y: 0.),
        (x: 10., y: 0.),
        (x: 10., y: 10.),
        (x: 0., y: 10.),
        (x: 0., y: 0.),
    ]
}

/// The square with corners (20, 20) and (30, 30).
pub(crate) fn far_square() -> Polygon {
    polygon![
        (x: 20., y: 20.),
        (x: 30., y: 20.),
        (x: 30., y: 30.),
        (x: 20., y: 30.),
        (x: 20., y: 20.),
    ]
}

pub(crate) fn two_squares() -> MultiPolygon {
    MultiPolygon::new(vec![square(), far_square()])
}
