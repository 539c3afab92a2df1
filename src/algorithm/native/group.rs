use std::borrow::Cow;

use geo::{Coord, Geometry, LineString};
use indexmap::IndexMap;

use crate::error::{GeoFrameError, Result};
use crate::table::FeatureTable;
use crate::value::Value;

/// The outcome of [`group_points_to_lines`].
#[derive(Debug, Clone, PartialEq)]
pub struct PointGrouping {
    /// One LineString row per branch.
    pub table: FeatureTable,
    /// Branches with duplicate order numbers. Their duplicate points were dropped.
    pub malformed: Vec<Value>,
    /// Branches that did not yield at least two points and were left out.
    pub skipped: Vec<Value>,
}

struct Member {
    order: f64,
    row: usize,
    coord: Coord,
}

/// Assemble points into one LineString per branch.
///
/// Points are grouped by the value of `groupby_column` and ordered by the numeric value of
/// `order_column`. The order numbers need not start at one nor be contiguous. Each line takes
/// its attributes from the first row carrying the lowest order number of its branch, and lines
/// are returned in the input order of those rows.
///
/// Branches with a single point are skipped. Branches with repeated order numbers are flagged as
/// malformed: only the first point per order number is used.
///
/// Integral floats in `groupby_column` fall in the same branch as the equal integer, so `1` and
/// `1.0` name one branch. Order values must be finite numbers.
pub fn group_points_to_lines(
    table: &FeatureTable,
    groupby_column: &str,
    order_column: &str,
) -> Result<PointGrouping> {
    let groups = table.try_column(groupby_column)?;
    let orders = table.try_column(order_column)?;

    let mut branches: IndexMap<Cow<Value>, Vec<Member>> = IndexMap::new();
    for (row, geom) in table.geometry().iter().enumerate() {
        let point = match geom {
            Some(Geometry::Point(point)) => point,
            _ => {
                return Err(GeoFrameError::IncorrectType(
                    "Can only group Points to LineString".into(),
                ))
            }
        };
        let order = orders[row]
            .as_f64()
            .filter(|order| order.is_finite())
            .ok_or_else(|| {
                GeoFrameError::IncorrectType(
                    format!(
                        "order column \"{order_column}\" must be a finite number, got {} in row {row}",
                        orders[row]
                    )
                    .into(),
                )
            })?;
        branches.entry(group_key(&groups[row])).or_default().push(Member {
            order,
            row,
            coord: point.0,
        });
    }

    let mut malformed = Vec::new();
    let mut skipped = Vec::new();
    let mut lines: Vec<(usize, LineString)> = Vec::with_capacity(branches.len());
    for (branch, mut members) in branches {
        if members.len() < 2 {
            tracing::debug!("branch \"{branch}\" has a single point and is not loaded");
            skipped.push(branch.into_owned());
            continue;
        }

        // Stable, so the first row of equal order numbers stays first.
        members.sort_by(|a, b| a.order.total_cmp(&b.order));
        let count = members.len();
        members.dedup_by(|later, earlier| later.order == earlier.order);
        if members.len() != count {
            tracing::warn!(
                "Points are not properly assigned for branch \"{branch}\". Check the input file."
            );
            malformed.push(branch.as_ref().clone());
        }
        if members.len() < 2 {
            skipped.push(branch.into_owned());
            continue;
        }

        let first_row = members[0].row;
        let line: LineString = members.iter().map(|member| member.coord).collect();
        lines.push((first_row, line));
    }

    lines.sort_by_key(|(row, _)| *row);
    let rows: Vec<usize> = lines.iter().map(|(row, _)| *row).collect();
    let mut grouped = table.take(&rows);
    grouped.set_geometry(
        lines
            .into_iter()
            .map(|(_, line)| Some(Geometry::LineString(line)))
            .collect(),
    )?;

    Ok(PointGrouping {
        table: grouped,
        malformed,
        skipped,
    })
}

fn group_key(value: &Value) -> Cow<'_, Value> {
    match value {
        Value::Float(float)
            if float.fract() == 0.0 && float.abs() < i64::MAX as f64 =>
        {
            Cow::Owned(Value::Int(*float as i64))
        }
        _ => Cow::Borrowed(value),
    }
}
