use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{TagtrackError, TagtrackResult};
use crate::foundation::math::approx_eq;
use crate::model::region::{Region, new_region_id};

/// Canvas a batch of regions is placed onto.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementCanvas {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    /// Grid step between candidate anchors.
    pub margin: f64,
}

struct Occupancy {
    anchors: Vec<Point>,
}

impl Occupancy {
    fn is_free(&self, p: Point) -> bool {
        !self
            .anchors
            .iter()
            .any(|a| approx_eq(a.x, p.x) && approx_eq(a.y, p.y))
    }
}

/// Place `to_place` onto a target that already carries `existing`.
///
/// Regions whose id is not on the target pass through untouched. A region pasted back onto its
/// own asset is moved to the first free diagonal grid anchor and given a fresh id; its points
/// move with its box. Anchors taken by earlier regions of the same call count as occupied.
#[tracing::instrument(skip(to_place, existing), fields(count = to_place.len()))]
pub fn duplicate_regions_and_move(
    to_place: &[Region],
    existing: &[Region],
    canvas: PlacementCanvas,
) -> TagtrackResult<Vec<Region>> {
    if !canvas.margin.is_finite() || canvas.margin <= 0.0 {
        return Err(TagtrackError::validation("placement margin must be > 0"));
    }
    let mut occupied = Occupancy {
        anchors: existing.iter().map(|r| r.bounding_box.origin()).collect(),
    };

    let mut out = Vec::with_capacity(to_place.len());
    for region in to_place {
        if !existing.iter().any(|e| e.id == region.id) {
            out.push(region.clone());
            continue;
        }

        let bbox = region.bounding_box;
        if bbox.width > canvas.width || bbox.height > canvas.height {
            return Err(TagtrackError::PasteRegionTooBig {
                region_id: region.id.clone(),
                width: canvas.width,
                height: canvas.height,
            });
        }

        let anchor = find_anchor(region, &occupied, canvas)?;
        let mut placed = region.clone().with_id(new_region_id());
        placed.translate(anchor - bbox.origin());
        occupied.anchors.push(anchor);
        tracing::debug!(from = %region.id, to = %placed.id, x = anchor.x, y = anchor.y, "placed region");
        out.push(placed);
    }
    Ok(out)
}

fn find_anchor(
    region: &Region,
    occupied: &Occupancy,
    canvas: PlacementCanvas,
) -> TagtrackResult<Point> {
    let bbox = region.bounding_box;
    let fits = |p: Point| bbox.with_origin(p).fits_within(canvas.width, canvas.height);
    let step = Vec2::new(canvas.margin, canvas.margin);

    // Diagonal walk from the region's own corner, re-anchored at the origin once it leaves
    // the canvas.
    let mut natural = Some(bbox.origin());
    let mut fallback = Point::ZERO;
    loop {
        let candidate = match natural {
            Some(p) if fits(p) => p,
            _ => {
                natural = None;
                fallback
            }
        };
        if !fits(candidate) {
            break;
        }
        if occupied.is_free(candidate) {
            return Ok(candidate);
        }
        match natural.as_mut() {
            Some(p) => *p += step,
            None => fallback += step,
        }
    }

    // Diagonal exhausted: scan the whole grid row by row.
    let mut y = 0.0;
    while y + bbox.height <= canvas.height {
        let mut x = 0.0;
        while x + bbox.width <= canvas.width {
            let p = Point::new(x, y);
            if occupied.is_free(p) {
                return Ok(p);
            }
            x += canvas.margin;
        }
        y += canvas.margin;
    }

    Err(TagtrackError::placement_exhausted(format!(
        "no free anchor for region '{}' on a {}x{} canvas",
        region.id, canvas.width, canvas.height
    )))
}

#[cfg(test)]
#[path = "../../tests/unit/placement/engine.rs"]
mod tests;
