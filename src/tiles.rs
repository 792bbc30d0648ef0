//////////////////////////////////////////////////////////////////////
// the catalog of convex uniform tilings (and a few of their duals)
//
// every tile is a set of polygons forming one translational unit
// cell. repeating the set by (width, 0) and (0, height) tiles the
// plane; triangular tiles additionally shift alternate rows by
// width/2.

use crate::geometry::*;

use phf::phf_map;

//////////////////////////////////////////////////////////////////////
// primitive shapes, all with unit-length long edges

fn square() -> Polygon {
    create_regular_polygon(4, 90.0)
}

fn octagon() -> Polygon {
    create_regular_polygon(8, 45.0)
}

fn triangle60() -> Polygon {
    create_regular_polygon(3, 120.0)
}

fn hexagon() -> Polygon {
    create_regular_polygon(6, 60.0)
}

fn dodecagon() -> Polygon {
    create_regular_polygon(12, 30.0)
}

// right isosceles triangle
fn triangle90() -> Polygon {
    vec![Point2d::new(0.0, 0.0),
         Point2d::new(1.0, 0.0),
         Point2d::new(1.0, 1.0)]
}

// isosceles triangle with a 120 degree apex above the unit base
fn triangle135() -> Polygon {
    vec![Point2d::new(0.0, 0.0),
         Point2d::new(1.0, 0.0),
         Point2d::new(0.5, 3f64.sqrt() / 6.0)]
}

// 30-60-90 triangle with unit hypotenuse
fn triangle30() -> Polygon {
    let c = (30.0 * DEG).cos();
    let s = (30.0 * DEG).sin();
    vec![Point2d::new(0.0, 0.0),
         Point2d::new(c, 0.0),
         Point2d::new(c, s)]
}

// one short bottom side and four long sides
fn cairo_pentagon() -> Polygon {

    let a = 3f64.sqrt() / 3.0;
    let b = 0.5 + 3f64.sqrt() / 6.0;

    let (dx1, dy1) = (b * (60.0 * DEG).cos(), b * (60.0 * DEG).sin());
    let (dx2, dy2) = (b * (30.0 * DEG).cos(), b * (30.0 * DEG).sin());

    vec![Point2d::new(0.0, 0.0),
         Point2d::new(a, 0.0),
         Point2d::new(a + dx1, dy1),
         Point2d::new(-dx1 + dx2, dy1 + dy2),
         Point2d::new(-dx1, dy1)]

}

// mirror-symmetric pentagon with a 60 degree bottom vertex
fn pentagon30() -> Polygon {

    let p1 = Point2d::new((60.0 * DEG).cos(), (60.0 * DEG).sin());
    let p2 = Point2d::new(p1.x - 0.5 * (60.0 * DEG).cos(),
                          p1.y + 0.5 * (60.0 * DEG).sin());

    vec![Point2d::origin(),
         p1,
         p2,
         Point2d::new(-p2.x, p2.y),
         Point2d::new(-p1.x, p1.y)]

}

// 60/120 degree rhombus lying on the x axis
fn rhombus() -> Polygon {

    let dx = (30.0 * DEG).cos();
    let dy = (-30.0 * DEG).sin();

    vec![Point2d::new(0.0, 0.0),
         Point2d::new(dx, dy),
         Point2d::new(dx + dx, 0.0),
         Point2d::new(dx, -dy)]

}

fn kite() -> Polygon {
    vec![Point2d::new(0.0, 0.0),
         Point2d::new((60.0 * DEG).cos(), (60.0 * DEG).sin()),
         Point2d::new(0.0, 2.0 * 3f64.sqrt() / 3.0),
         Point2d::new((120.0 * DEG).cos(), (60.0 * DEG).sin())]
}

// row height of a triangular layout with the given width
fn tri_height(width: f64) -> f64 {
    width * (60.0 * DEG).sin()
}

//////////////////////////////////////////////////////////////////////
// identifiers in catalog order - the discriminant is the index into
// the list returned by create_tile_list()

#[derive(Debug,PartialEq,Eq,Clone,Copy,Hash)]
pub enum TileId {
    Square4,
    TruncatedSquare,
    TetrakisSquare,
    SnubSquare,
    CairoPentagonal,
    Hexagonal,
    Triangular,
    Trihex,
    Rhombile,
    TruncatedHex,
    TriakisTriangular,
    Rhombitrihexagonal,
    DeltoidalTrihexagonal,
    TruncatedTrihexagonal,
    Kisrhombile,
    SnubTrihexagonal,
    FloretPentagonal,
    ElongatedTriangular
}

#[derive(Debug,Clone)]
pub struct Tile {
    pub name: &'static str,
    pub id: TileId,
    pub polygons: Vec<Polygon>,
    pub width: f64,
    pub height: f64,
    pub triangular: bool
}

impl Tile {

    fn new(name: &'static str,
           id: TileId,
           polygons: Vec<Polygon>,
           width: f64,
           height: f64,
           triangular: bool) -> Self {

        debug_assert!(!polygons.is_empty());
        debug_assert!(polygons.iter().all(|p| p.len() >= 3));
        debug_assert!(width > 0.0 && height > 0.0);

        debug_assert!({
            let area: f64 = polygons.iter().map(|p| polygon_area(p)).sum();
            (area - width * height).abs() <= 1e-9 * width * height
        }, "{} does not fill its unit cell", name);

        Tile { name, id, polygons, width, height, triangular }

    }

}

//////////////////////////////////////////////////////////////////////
// builders - each places copies of the primitives so that a vertex
// of the new copy lands on a vertex of a polygon already placed

fn square4() -> Tile {

    let p0 = square();
    let p1 = translate(&p0, &p0[1]);
    let p2 = translate(&p0, &p0[2]);
    let p3 = translate(&p0, &p0[3]);

    Tile::new("square4", TileId::Square4,
              vec![p0, p1, p2, p3], 2.0, 2.0, false)

}

fn truncated_square() -> Tile {

    let p0 = octagon();
    let p1 = translate(&octagon(), &p0[3]);
    let p2 = translate(&square(), &p0[2]);
    let p3 = translate(&square(), &p0[5]);

    let (width, height) = (2.0 * p0[3].x, 2.0 * p0[3].y);

    Tile::new("truncated_square", TileId::TruncatedSquare,
              vec![p0, p1, p2, p3], width, height, false)

}

fn tetrakis_square() -> Tile {

    let p0 = triangle90();
    let p1 = translate(&mirror_y(&mirror_x(&p0)), &p0[2]);
    let p2 = translate(&p0, &p1[1]);
    let p3 = translate(&p1, &p1[1]);
    let p4 = translate(&p0, &p0[1]);
    let p5 = translate(&p1, &p0[1]);
    let p6 = translate(&p2, &p0[1]);
    let p7 = translate(&p3, &p0[1]);

    Tile::new("tetrakis_square", TileId::TetrakisSquare,
              vec![p0, p1, p2, p3, p4, p5, p6, p7], 2.0, 2.0, false)

}

fn snub_square() -> Tile {

    let p0 = triangle60();
    let p1 = rotate(&square(), 60.0);
    let p2 = translate(&rotate(&square(), 30.0), &p0[1]);
    let p3 = translate(&rotate(&triangle60(), 90.0), &p0[2]);
    let p4 = translate(&rotate(&triangle60(), 30.0), &p0[2]);
    let p5 = translate(&rotate(&square(), 30.0), &p1[2]);
    let p6 = translate(&rotate(&square(), 60.0), &p2[2]);
    let p7 = translate(&rotate(&triangle60(), 60.0), &p5[1]);
    let p8 = translate(&rotate(&triangle60(), 60.0), &p1[3]);
    let p9 = translate(&rotate(&triangle60(), 120.0), &p1[2]);
    let p10 = translate(&rotate(&triangle60(), 150.0), &p0[0]);
    let p11 = translate(&rotate(&triangle60(), -30.0), &p0[1]);

    let width = 1.0 + 2.0 * p0[2].y;
    let height = p5[2].y;

    Tile::new("snub_square", TileId::SnubSquare,
              vec![p0, p1, p2, p3, p4, p5, p6, p7, p8, p9, p10, p11],
              width, height, false)

}

fn cairo_pentagonal() -> Tile {

    let p0 = cairo_pentagon();
    let p1 = translate(&rotate(&cairo_pentagon(), 90.0), &p0[3]);
    let p2 = translate(&rotate(&cairo_pentagon(), -90.0), &p1[1]);
    let p3 = translate(&rotate(&translate(&cairo_pentagon(), &negate(&p0[3])), 180.0), &p1[1]);
    let p4 = translate(&p0, &p2[3]);
    let p5 = translate(&p1, &p2[3]);
    let p6 = translate(&p2, &p2[3]);
    let p7 = translate(&p3, &p2[3]);

    let width = p6[3].x;
    let height = p3[0].y;

    Tile::new("cairo_pentagonal", TileId::CairoPentagonal,
              vec![p0, p1, p2, p3, p4, p5, p6, p7], width, height, false)

}

fn hexagonal() -> Tile {

    let p0 = hexagon();
    let p1 = translate(&p0, &p0[4]);
    let p2 = translate(&p0, &p0[2]);

    let width = p2[2].x;

    Tile::new("hexagonal", TileId::Hexagonal,
              vec![p0, p1, p2], width, tri_height(width), true)

}

fn triangular() -> Tile {

    let p0 = triangle60();
    let p1 = rotate(&triangle60(), -60.0);

    let width = p0[1].x;

    Tile::new("triangular", TileId::Triangular,
              vec![p0, p1], width, tri_height(width), true)

}

fn trihex() -> Tile {

    let p0 = triangle60();
    let p1 = translate(&hexagon(), &p0[1]);
    let p2 = translate(&rotate(&triangle60(), 60.0), &p0[2]);

    let width = p1[1].x;

    Tile::new("trihex", TileId::Trihex,
              vec![p0, p1, p2], width, tri_height(width), true)

}

fn rhombile() -> Tile {

    let p0 = rhombus();
    let p1 = rotate(&rhombus(), 60.0);
    let p2 = translate(&rotate(&rhombus(), 120.0), &p0[2]);

    let width = p0[2].x;

    Tile::new("rhombile", TileId::Rhombile,
              vec![p0, p1, p2], width, tri_height(width), true)

}

fn truncated_hex() -> Tile {

    let p0 = rotate(&dodecagon(), -30.0);
    let p1 = translate(&triangle60(), &p0[3]);
    let p2 = translate(&rotate(&triangle60(), 60.0), &p0[5]);

    // three more copies of the (dodecagon, triangle, triangle) group
    let mut polygons = vec![p0.clone(), p1.clone(), p2.clone()];

    let p3 = translate(&p0, &p1[1]);
    let offsets = [p1[1], p0[7], p3[7]];

    for offset in &offsets {
        for poly in &[&p0, &p1, &p2] {
            polygons.push(translate(poly, offset));
        }
    }

    let width = 2.0 * p1[1].x;

    Tile::new("truncated_hex", TileId::TruncatedHex,
              polygons, width, tri_height(width), true)

}

fn triakis_triangular() -> Tile {

    let p0 = triangle135();
    let p1 = translate(&rotate(&triangle135(), 120.0), &p0[1]);
    let p2 = translate(&rotate(&triangle135(), -120.0), &p1[1]);
    let p3 = translate(&rotate(&p0, -60.0), &p1[1]);
    let p4 = translate(&rotate(&p1, -60.0), &p1[1]);
    let p5 = translate(&rotate(&p2, -60.0), &p1[1]);

    let width = p0[1].x;

    Tile::new("triakis_triangular", TileId::TriakisTriangular,
              vec![p0, p1, p2, p3, p4, p5], width, tri_height(width), true)

}

fn rhombitrihexagonal() -> Tile {

    let p0 = triangle60();
    let p1 = translate(&rotate(&square(), 30.0), &p0[1]);
    let p2 = translate(&rotate(&triangle60(), 60.0), &p1[1]);
    let p3 = translate(&rotate(&square(), -30.0), &p2[0]);
    let p4 = translate(&rotate(&hexagon(), 30.0), &p0[2]);
    let p5 = translate(&square(), &p4[1]);

    let width = p3[1].x;

    Tile::new("rhombitrihexagonal", TileId::Rhombitrihexagonal,
              vec![p0, p1, p2, p3, p4, p5], width, tri_height(width), true)

}

fn deltoidal_trihexagonal() -> Tile {

    let polygons = (0..6)
        .map(|i| rotate(&kite(), i as f64 * 60.0))
        .collect();

    Tile::new("deltoidal_trihexagonal", TileId::DeltoidalTrihexagonal,
              polygons, 2.0, tri_height(2.0), true)

}

// one dodecagon, two hexagons and three squares around its lower edges
fn truncated_trihexagonal() -> Tile {

    let p0 = dodecagon();
    let p1 = translate(&rotate(&square(), -60.0), &p0[1]);
    let p2 = translate(&rotate(&hexagon(), -60.0), &p0[2]);
    let p3 = translate(&square(), &p0[3]);
    let p4 = translate(&hexagon(), &p0[4]);
    let p5 = translate(&rotate(&square(), 60.0), &p0[5]);

    // opposite vertex sits two apothems up, plus one square between
    // neighboring dodecagons
    let width = p0[6].y + 1.0;

    Tile::new("truncated_trihexagonal", TileId::TruncatedTrihexagonal,
              vec![p0, p1, p2, p3, p4, p5], width, tri_height(width), true)

}

fn kisrhombile() -> Tile {

    let mut polygons = Vec::with_capacity(12);

    for i in 0..6 {
        let angle = i as f64 * 60.0;
        polygons.push(rotate(&triangle30(), angle));
        polygons.push(rotate(&mirror_x(&triangle30()), angle));
    }

    let width = 2.0 * polygons[0][1].x;

    Tile::new("kisrhombile", TileId::Kisrhombile,
              polygons, width, tri_height(width), true)

}

// one hexagon and eight triangles. the lattice vector from one
// hexagon to the next is (5/2, sqrt(3)/2) so the cell is rotated to
// put it on the x axis.
fn snub_trihexagonal() -> Tile {

    const PLACEMENTS: [(f64, usize); 8] = [
        (180.0, 0), (-120.0, 0), (-60.0, 0), (120.0, 0),
        (-120.0, 1), (-60.0, 1), (0.0, 1), (60.0, 2)
    ];

    let hex = hexagon();

    let mut polygons = vec![hex.clone()];

    for &(angle, vidx) in &PLACEMENTS {
        polygons.push(translate(&rotate(&triangle60(), angle), &hex[vidx]));
    }

    let tilt = -(0.5 * 3f64.sqrt()).atan2(2.5) / DEG;

    let polygons = polygons.iter().map(|p| rotate(p, tilt)).collect();

    let width = 7f64.sqrt();

    Tile::new("snub_trihexagonal", TileId::SnubTrihexagonal,
              polygons, width, tri_height(width), true)

}

fn floret_pentagonal() -> Tile {

    let a = 0.5 * (2.5 / (1.0 + 2.5 * 2.5f64).sqrt()).acos() / DEG;

    let polygons = (0..6)
        .map(|i| rotate(&pentagon30(), a + i as f64 * 60.0))
        .collect();

    let x = 0.5 + 2.0 * (60.0 * DEG).cos();
    let y = 2.0 * (60.0 * DEG).sin();
    let width = (x * x + y * y).sqrt();

    Tile::new("floret_pentagonal", TileId::FloretPentagonal,
              polygons, width, tri_height(width), true)

}

fn elongated_triangular() -> Tile {

    let p0 = square();
    let p1 = translate(&square(), &Point2d::new(1.0, 0.0));
    let p2 = rotate(&triangle60(), -60.0);
    let p3 = translate(&p2, &p1[0]);
    let p4 = translate(&triangle60(), &p2[1]);
    let p5 = translate(&triangle60(), &p3[1]);
    let p6 = translate(&rotate(&square(), -90.0), &p2[1]);
    let p7 = translate(&rotate(&square(), -90.0), &p4[1]);
    let p8 = translate(&p2, &p6[1]);
    let p9 = translate(&p3, &p6[1]);
    let p10 = translate(&p4, &p6[1]);
    let p11 = translate(&p5, &p6[1]);

    let height = 2.0 * (1.0 + (60.0 * DEG).sin());

    Tile::new("elongated_triangular", TileId::ElongatedTriangular,
              vec![p0, p1, p2, p3, p4, p5, p6, p7, p8, p9, p10, p11],
              2.0, height, false)

}

//////////////////////////////////////////////////////////////////////
// catalog table and lookups

type TileFunc = fn() -> Tile;

const TILE_FUNCS: [TileFunc; 18] = [
    square4,
    truncated_square,
    tetrakis_square,
    snub_square,
    cairo_pentagonal,
    hexagonal,
    triangular,
    trihex,
    rhombile,
    truncated_hex,
    triakis_triangular,
    rhombitrihexagonal,
    deltoidal_trihexagonal,
    truncated_trihexagonal,
    kisrhombile,
    snub_trihexagonal,
    floret_pentagonal,
    elongated_triangular
];

// lookup table matching tile names to identifiers
static TILE_LOOKUP: phf::Map<&'static str, TileId> = phf_map! {
    "square4" => TileId::Square4,
    "truncated_square" => TileId::TruncatedSquare,
    "tetrakis_square" => TileId::TetrakisSquare,
    "snub_square" => TileId::SnubSquare,
    "cairo_pentagonal" => TileId::CairoPentagonal,
    "hexagonal" => TileId::Hexagonal,
    "triangular" => TileId::Triangular,
    "trihex" => TileId::Trihex,
    "rhombile" => TileId::Rhombile,
    "truncated_hex" => TileId::TruncatedHex,
    "triakis_triangular" => TileId::TriakisTriangular,
    "rhombitrihexagonal" => TileId::Rhombitrihexagonal,
    "deltoidal_trihexagonal" => TileId::DeltoidalTrihexagonal,
    "truncated_trihexagonal" => TileId::TruncatedTrihexagonal,
    "kisrhombile" => TileId::Kisrhombile,
    "snub_trihexagonal" => TileId::SnubTrihexagonal,
    "floret_pentagonal" => TileId::FloretPentagonal,
    "elongated_triangular" => TileId::ElongatedTriangular,
};

// build every tile in catalog order
pub fn create_tile_list() -> Vec<Tile> {
    TILE_FUNCS.iter().map(|f| f()).collect()
}

// catalog index of a tile name
pub fn find_tile(name: &str) -> Option<usize> {
    TILE_LOOKUP.get(name).map(|&id| id as usize)
}

pub fn tile_names() -> Vec<&'static str> {
    let mut names: Vec<_> = TILE_LOOKUP.entries().collect();
    names.sort_by_key(|&(_, &id)| id as usize);
    names.into_iter().map(|(&name, _)| name).collect()
}

//////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use super::*;
    use approx::assert_relative_eq;

    // Some(true) if p is strictly inside the convex polygon, None if
    // it is too close to an edge to call
    fn convex_contains(poly: &[Point2d], p: &Point2d) -> Option<bool> {

        let n = poly.len();
        let mut side = None;

        for i in 0..n {

            let a = poly[i];
            let b = poly[(i + 1) % n];

            let e = b - a;
            let cross = e.x * (p.y - a.y) - e.y * (p.x - a.x);

            if cross.abs() / e.norm() < 1e-6 {
                return None;
            }

            match side {
                None => side = Some(cross > 0.0),
                Some(s) if s != (cross > 0.0) => return Some(false),
                _ => {}
            }

        }

        Some(true)

    }

    fn replicate(tile: &Tile, reach: i32) -> Vec<Polygon> {

        let mut polys = vec![];

        for i in -reach..=reach {

            let shift = if tile.triangular && i.rem_euclid(2) == 1 {
                0.5 * tile.width
            } else {
                0.0
            };

            for j in -reach..=reach {
                let offset = Point2d::new(j as f64 * tile.width + shift,
                                          i as f64 * tile.height);
                for p in &tile.polygons {
                    polys.push(translate(p, &offset));
                }
            }

        }

        polys

    }

    #[test]
    fn catalog_order_matches_ids() {

        let tiles = create_tile_list();

        assert_eq!(tiles.len(), 18);

        for (idx, tile) in tiles.iter().enumerate() {
            assert_eq!(tile.id as usize, idx);
            assert_eq!(find_tile(tile.name), Some(idx));
        }

        assert_eq!(tile_names()[10], "triakis_triangular");
        assert_eq!(find_tile("penrose"), None);

    }

    #[test]
    fn polygons_are_convex() {

        for tile in create_tile_list() {
            for poly in &tile.polygons {

                let n = poly.len();
                let crosses: Vec<f64> = (0..n).map(|i| {
                    let e0 = poly[(i + 1) % n] - poly[i];
                    let e1 = poly[(i + 2) % n] - poly[(i + 1) % n];
                    e0.x * e1.y - e0.y * e1.x
                }).collect();

                let all_pos = crosses.iter().all(|&c| c > 1e-9);
                let all_neg = crosses.iter().all(|&c| c < -1e-9);

                assert!(all_pos || all_neg, "{} has a non-convex polygon", tile.name);

            }
        }

    }

    #[test]
    fn cell_area_matches_polygons() {

        for tile in create_tile_list() {

            let area: f64 = tile.polygons.iter().map(|p| polygon_area(p)).sum();

            assert_relative_eq!(area, tile.width * tile.height, max_relative = 1e-9);

        }

    }

    #[test]
    fn tiles_cover_plane_exactly_once() {

        const NX: usize = 17;
        const NY: usize = 13;

        for tile in create_tile_list() {

            let polys = replicate(&tile, 4);
            let mut checked = 0;

            for a in 0..NX {
                for b in 0..NY {

                    let p = Point2d::new((a as f64 + 0.37) / NX as f64 * tile.width,
                                         (b as f64 + 0.61) / NY as f64 * tile.height);

                    let hits: Option<Vec<bool>> = polys.iter()
                        .map(|poly| convex_contains(poly, &p))
                        .collect();

                    if let Some(hits) = hits {
                        let count = hits.iter().filter(|&&h| h).count();
                        assert_eq!(count, 1, "{} covers {:?} {} times", tile.name, p, count);
                        checked += 1;
                    }

                }
            }

            assert!(checked > NX * NY / 2, "{}: too few samples", tile.name);

        }

    }

    #[test]
    fn unit_cells() {

        let tiles = create_tile_list();

        let sq = &tiles[TileId::Square4 as usize];
        assert_eq!((sq.width, sq.height, sq.triangular), (2.0, 2.0, false));

        let hex = &tiles[TileId::Hexagonal as usize];
        assert_relative_eq!(hex.width, 3.0, epsilon = 1e-12);
        assert!(hex.triangular);

        let tt = &tiles[TileId::TruncatedTrihexagonal as usize];
        assert_relative_eq!(tt.width, 3.0 + 3f64.sqrt(), epsilon = 1e-9);
        assert_eq!(tt.polygons.len(), 6);

        let snub = &tiles[TileId::SnubTrihexagonal as usize];
        assert_eq!(snub.polygons.len(), 9);

    }

}
