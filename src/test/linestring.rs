use geo::{line_string, LineString};

use crate::crs::Crs;
use crate::table::FeatureTable;
use crate::test::properties;

pub(crate) fn ls0() -> LineString {
    line_string![
        (x: 0., y: 1.),
        (x: 1., y: 2.)
    ]
}

pub(crate) fn ls1() -> LineString {
    line_string![
        (x: 3., y: 4.),
        (x: 5., y: 6.)
    ]
}

/// A horizontal branch of length 10 along y = 0.
pub(crate) fn branch_a() -> LineString {
    line_string![
        (x: 0., y: 0.),
        (x: 4., y: 0.),
        (x: 10., y: 0.)
    ]
}

/// A vertical branch of length 20 along x = 20.
pub(crate) fn branch_b() -> LineString {
    line_string![
        (x: 20., y: 0.),
        (x: 20., y: 20.)
    ]
}

/// A right-angled branch: 3 east, then 4 north.
pub(crate) fn branch_c() -> LineString {
    line_string![
        (x: 0., y: 10.),
        (x: 3., y: 10.),
        (x: 3., y: 14.)
    ]
}

/// Branches a, b and c with the `code`, `name` and `depth` attributes, indexed by `code`.
pub(crate) fn branches() -> FeatureTable {
    let mut attributes = properties::table();
    attributes.set_index("code").unwrap();
    FeatureTable::try_new(
        attributes,
        vec![
            Some(branch_a().into()),
            Some(branch_b().into()),
            Some(branch_c().into()),
        ],
        Some(Crs::from(28992)),
    )
    .unwrap()
}
