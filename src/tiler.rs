//////////////////////////////////////////////////////////////////////
// laying tiles over a rotated, scaled window

use crate::geometry::*;
use crate::raster::{Rect, Scanline, bounding_rect, clip, get_convex_polygon_scanlines};

//////////////////////////////////////////////////////////////////////
// get the locations of tile origins needed to cover a window
//
// rows, cols: window size
// origin: center of rotation, in window coordinates
// tile_width, tile_height: unit cell size after scaling, both > 0
// angle: rotation in degrees
// triangular: odd rows are offset by half a tile

pub fn get_tile_locations(rows: usize,
                          cols: usize,
                          origin: &Point2d,
                          tile_width: f64,
                          tile_height: f64,
                          angle: f64,
                          triangular: bool) -> Vec<Point2d> {

    debug_assert!(tile_width > 0.0 && tile_height > 0.0);

    let (w, h) = (cols as f64, rows as f64);

    let window = vec![Point2d::new(0.0, 0.0),
                      Point2d::new(w, 0.0),
                      Point2d::new(0.0, h),
                      Point2d::new(w, h)];

    // window corners in tile coordinates
    let corners = affine_inverse(&window, origin, angle, tile_width, tile_height);

    let r = bounding_rectf(&corners);

    let odd_offset = if triangular { 0.5 } else { 0.0 };

    // pad by one unit on every side since a tile's polygons don't
    // have to stay inside its own unit cell
    let mut points = vec![];

    let mut i = r.miny.floor() - 1.0;

    while i < r.maxy + 1.0 {

        let is_odd = (i.floor().abs() as i64) & 1 == 1;

        let mut j = r.minx.floor() - 1.0;

        if is_odd {
            j -= odd_offset;
        }

        while j < r.maxx + 1.0 {
            points.push(Point2d::new(j, i));
            j += 1.0;
        }

        i += 1.0;

    }

    // back to window coordinates
    affine_forward(&points, tile_width, tile_height, angle, origin)

}

//////////////////////////////////////////////////////////////////////
// instantiate a tile's polygons at every location, ordered by
// location first and tile polygon second

pub fn get_tiled_polygons(locations: &[Point2d],
                          polys: &[Polygon],
                          tile_scale: f64,
                          angle: f64) -> Vec<Polygon> {

    // same for every location
    let placed: Vec<Polygon> = polys.iter()
        .map(|poly| rotate(&scale(poly, tile_scale), angle))
        .collect();

    let mut all_polys = Vec::with_capacity(locations.len() * polys.len());

    for offset in locations {
        for poly in &placed {
            all_polys.push(translate(poly, offset));
        }
    }

    all_polys

}

//////////////////////////////////////////////////////////////////////
// keep polygons whose bounding rect overlaps the w x h window
//
// never drops a polygon that overlaps, may keep a few that don't.
// those end up with no scanlines after clipping.

pub fn get_overlapping_polygons(w: u32, h: u32, polys: &[Polygon]) -> Vec<Polygon> {

    let window = Rect::new(0, 0, w, h);

    polys.iter()
        .filter(|poly| bounding_rect(poly).intersects(&window))
        .cloned()
        .collect()

}

//////////////////////////////////////////////////////////////////////
// scanlines for each polygon, then clipped to the window. the outer
// list always lines up with the polygon list even when a polygon
// clips away entirely.

pub fn get_polygon_scanlines(polys: &[Polygon]) -> Vec<Vec<Scanline>> {
    polys.iter().map(|poly| get_convex_polygon_scanlines(poly)).collect()
}

pub fn clip_scanlines(w: u32, h: u32, scanlines: &[Vec<Scanline>]) -> Vec<Vec<Scanline>> {

    let window = Rect::new(0, 0, w, h);

    scanlines.iter().map(|s| clip(s, &window)).collect()

}

//////////////////////////////////////////////////////////////////////
