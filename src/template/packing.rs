//! Shelf packing of zone rectangles into the room
//!
//! First-fit decreasing length: zones are sorted by length (stable, longest
//! first) and dropped left to right onto shelves. A zone goes on the first
//! shelf with enough width left, otherwise it opens a new shelf above the
//! previous ones. Packed rectangles touch but never overlap.

use crate::geometry::{Extent, Point, EPSILON};
use crate::layout::error::LayoutError;
use crate::layout::types::RoomDimensions;

#[derive(Debug)]
struct Shelf {
    z: f64,
    length: f64,
    used_width: f64,
}

/// Min corner of each zone, in input order
///
/// Fails with `TemplateOverflow` naming the first zone that cannot be placed:
/// a zone wider than the room, then the zone whose area exceeds the floor,
/// then the zone whose shelf runs past the far wall.
pub fn pack(zones: &[(&str, Extent)], room: &RoomDimensions) -> Result<Vec<Point>, LayoutError> {
    for (id, extent) in zones {
        if extent.width > room.width + EPSILON {
            return Err(LayoutError::overflow(
                *id,
                format!(
                    "needs {:.2} m of width, room is {:.2} m wide",
                    extent.width, room.width
                ),
            ));
        }
    }

    let floor_area = room.floor_area();
    let mut total_area = 0.0;
    for (id, extent) in zones {
        total_area += extent.area();
        if total_area > floor_area + EPSILON {
            return Err(LayoutError::overflow(
                *id,
                format!(
                    "zones need {:.2} m² of floor, room has {:.2} m²",
                    total_area, floor_area
                ),
            ));
        }
    }

    let mut order: Vec<usize> = (0..zones.len()).collect();
    order.sort_by(|&a, &b| zones[b].1.length.total_cmp(&zones[a].1.length));

    let mut shelves: Vec<Shelf> = Vec::new();
    let mut anchors = vec![Point::origin(); zones.len()];

    for index in order {
        let (id, extent) = zones[index];

        let fits = shelves
            .iter_mut()
            .find(|s| s.used_width + extent.width <= room.width + EPSILON);

        let anchor = match fits {
            Some(shelf) => {
                let anchor = Point::new(shelf.used_width, shelf.z);
                shelf.used_width += extent.width;
                anchor
            }
            None => {
                let z = shelves.last().map(|s| s.z + s.length).unwrap_or(0.0);
                if z + extent.length > room.length + EPSILON {
                    return Err(LayoutError::overflow(
                        id,
                        format!(
                            "needs {:.2} m of length from {:.2} m, room is {:.2} m long",
                            extent.length, z, room.length
                        ),
                    ));
                }
                shelves.push(Shelf {
                    z,
                    length: extent.length,
                    used_width: extent.width,
                });
                Point::new(0.0, z)
            }
        };

        tracing::trace!(zone = id, x = anchor.x, z = anchor.z, "packed zone");
        anchors[index] = anchor;
    }

    Ok(anchors)
}
