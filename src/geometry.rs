//////////////////////////////////////////////////////////////////////
// points, polygons and the affine operations on them

pub const PI: f64 = std::f64::consts::PI;
pub const DEG: f64 = PI / 180.0;

//////////////////////////////////////////////////////////////////////
// pull in some types from nalgebra

pub type Vec2d = nalgebra::Vector2<f64>;
pub type Point2d = nalgebra::geometry::Point2<f64>;
pub type Point2i = nalgebra::geometry::Point2<i32>;
pub type Rotation2d = nalgebra::Rotation2<f64>;

// a polygon is an ordered list of at least 3 points, the last point
// connects back to the first. tile polygons are always convex.
pub type Polygon = Vec<Point2d>;

//////////////////////////////////////////////////////////////////////
// RectF has float bounds on each axis

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct RectF {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64
}

impl RectF {

    // empty rectangle has min > max
    pub fn empty() -> Self {
        RectF {
            minx: f64::MAX,
            miny: f64::MAX,
            maxx: f64::MIN,
            maxy: f64::MIN
        }
    }

    // expand this rect to include the given point
    pub fn expand(&mut self, p: &Point2d) {
        self.minx = self.minx.min(p.x);
        self.miny = self.miny.min(p.y);
        self.maxx = self.maxx.max(p.x);
        self.maxy = self.maxy.max(p.y);
    }

}

//////////////////////////////////////////////////////////////////////
// get the rectangle that surrounds a set of points
//
// the point set must not be empty

pub fn bounding_rectf(points: &[Point2d]) -> RectF {

    debug_assert!(!points.is_empty(), "bounding rect of empty point set");

    let r = points.iter().fold(RectF::empty(), |mut r, p| {
        r.expand(p);
        r
    });

    debug_assert!(r.minx <= r.maxx);
    debug_assert!(r.miny <= r.maxy);

    r

}

//////////////////////////////////////////////////////////////////////
// point helpers

pub fn negate(p: &Point2d) -> Point2d {
    Point2d::new(-p.x, -p.y)
}

// nearest integer point, halfway cases round away from zero
pub fn round_point(p: &Point2d) -> Point2d {
    Point2d::new(p.x.round(), p.y.round())
}

pub fn to_pixel(p: &Point2d) -> Point2i {
    let r = round_point(p);
    Point2i::new(r.x as i32, r.y as i32)
}

//////////////////////////////////////////////////////////////////////
// polygon operations - each returns a new polygon

pub fn translate(poly: &[Point2d], offset: &Point2d) -> Polygon {
    poly.iter().map(|p| p + offset.coords).collect()
}

// counter-clockwise rotation about the origin, in degrees
pub fn rotate(poly: &[Point2d], deg: f64) -> Polygon {
    let rotation = Rotation2d::new(deg * DEG);
    poly.iter().map(|p| rotation * p).collect()
}

pub fn scale(poly: &[Point2d], s: f64) -> Polygon {
    poly.iter().map(|p| Point2d::from(p.coords * s)).collect()
}

pub fn scale_xy(poly: &[Point2d], sx: f64, sy: f64) -> Polygon {
    poly.iter().map(|p| Point2d::new(p.x * sx, p.y * sy)).collect()
}

// flip across the x axis
pub fn mirror_x(poly: &[Point2d]) -> Polygon {
    poly.iter().map(|p| Point2d::new(p.x, -p.y)).collect()
}

// flip across the y axis
pub fn mirror_y(poly: &[Point2d]) -> Polygon {
    poly.iter().map(|p| Point2d::new(-p.x, p.y)).collect()
}

//////////////////////////////////////////////////////////////////////
// the two affine compositions used by the tiler
//
// forward maps tile space to window space: scale, rotate, translate.
// inverse maps window space to tile space: translate by -origin,
// rotate by -angle, then scale by (1/width, 1/height).

pub fn affine_forward(poly: &[Point2d],
                      sx: f64, sy: f64,
                      deg: f64,
                      offset: &Point2d) -> Polygon {

    let tmp = scale_xy(poly, sx, sy);
    let tmp = rotate(&tmp, deg);

    translate(&tmp, offset)

}

pub fn affine_inverse(poly: &[Point2d],
                      origin: &Point2d,
                      deg: f64,
                      width: f64, height: f64) -> Polygon {

    let tmp = translate(poly, &negate(origin));
    let tmp = rotate(&tmp, -deg);

    scale_xy(&tmp, 1.0 / width, 1.0 / height)

}

//////////////////////////////////////////////////////////////////////
// walk n unit-length edges, turning by outer_angle degrees after each
// step. an outer angle of 360/n gives a regular n-gon with its first
// edge along the positive x axis.

pub fn create_regular_polygon(n: usize, outer_angle: f64) -> Polygon {

    debug_assert!(n != 0);

    let mut poly = Vec::with_capacity(n);
    poly.push(Point2d::origin());

    let mut theta: f64 = 0.0;

    for i in 0..n.saturating_sub(1) {
        let step = Vec2d::new((theta * DEG).cos(), (theta * DEG).sin());
        let next = poly[i] + step;
        poly.push(next);
        theta += outer_angle;
    }

    poly

}

//////////////////////////////////////////////////////////////////////
// unsigned area by the shoelace formula

pub fn polygon_area(poly: &[Point2d]) -> f64 {

    let n = poly.len();

    let twice: f64 = (0..n).map(|i| {
        let a = &poly[i];
        let b = &poly[(i + 1) % n];
        a.x * b.y - b.x * a.y
    }).sum();

    0.5 * twice.abs()

}

//////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Polygon {
        vec![Point2d::new(0.0, 0.0),
             Point2d::new(0.0, 1.0),
             Point2d::new(1.0, 0.0),
             Point2d::new(1.0, 1.0)]
    }

    #[test]
    fn point_arithmetic() {

        let (x, y) = (-1.0, -2.0);
        let p = Point2d::new(x, y);

        let p = Point2d::from(p.coords * 7.0);
        assert_eq!(p, Point2d::new(x * 7.0, y * 7.0));

        let p = p + Vec2d::new(3.0, 2.0);
        assert_eq!(p, Point2d::new(x * 7.0 + 3.0, y * 7.0 + 2.0));

        let p = p - Vec2d::new(3.0, 2.0);
        assert_eq!(p, Point2d::new(x * 7.0, y * 7.0));

        assert_eq!(negate(&p), Point2d::new(7.0, 14.0));

    }

    #[test]
    fn rotate_square_90() {

        let p = rotate(&unit_square(), 90.0);
        let r: Vec<Point2d> = p.iter().map(round_point).collect();

        assert_eq!(r, vec![Point2d::new(0.0, 0.0),
                           Point2d::new(-1.0, 0.0),
                           Point2d::new(0.0, 1.0),
                           Point2d::new(-1.0, 1.0)]);

    }

    #[test]
    fn round_half_away_from_zero() {
        assert_eq!(round_point(&Point2d::new(0.5, -0.5)), Point2d::new(1.0, -1.0));
        assert_eq!(round_point(&Point2d::new(2.49, -2.51)), Point2d::new(2.0, -3.0));
        assert_eq!(to_pixel(&Point2d::new(-3.2, 7.6)), Point2i::new(-3, 8));
    }

    #[test]
    fn scale_composes() {

        let poly = vec![Point2d::new(0.1, 0.2),
                        Point2d::new(20.0, 0.3),
                        Point2d::new(20.3, 10.9),
                        Point2d::new(5.7, 20.3),
                        Point2d::new(-3.2, 7.6)];

        for &(s1, s2) in &[(2.0, 3.0), (0.1, 17.0), (1e-3, 1e4), (1.5, 1.5)] {

            let twice = scale(&scale(&poly, s1), s2);
            let once = scale(&poly, s1 * s2);

            for (a, b) in twice.iter().zip(once.iter()) {
                assert_relative_eq!(a.x, b.x, max_relative = 1e-12);
                assert_relative_eq!(a.y, b.y, max_relative = 1e-12);
            }

        }

    }

    #[test]
    fn mirrors() {

        let tri = vec![Point2d::new(0.0, 0.0),
                       Point2d::new(1.0, 0.0),
                       Point2d::new(1.0, 1.0)];

        assert_eq!(mirror_x(&tri)[2], Point2d::new(1.0, -1.0));
        assert_eq!(mirror_y(&tri)[2], Point2d::new(-1.0, 1.0));
        assert_eq!(mirror_y(&mirror_x(&tri))[1], Point2d::new(-1.0, 0.0));

    }

    #[test]
    fn affine_round_trip() {

        let origin = Point2d::new(200.0, 150.0);
        let poly = vec![Point2d::new(3.0, -2.0), Point2d::new(-7.5, 11.0)];

        let tile = affine_inverse(&poly, &origin, 33.0, 40.0, 25.0);
        let back = affine_forward(&tile, 40.0, 25.0, 33.0, &origin);

        for (a, b) in poly.iter().zip(back.iter()) {
            assert_relative_eq!(a.x, b.x, epsilon = 1e-9);
            assert_relative_eq!(a.y, b.y, epsilon = 1e-9);
        }

        // the origin maps to the tile-space origin
        let o = affine_inverse(&[origin], &origin, 33.0, 40.0, 25.0);
        assert_relative_eq!(o[0].x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(o[0].y, 0.0, epsilon = 1e-12);

    }

    #[test]
    fn bounding_rect() {

        let r = bounding_rectf(&unit_square());

        assert_eq!(r, RectF { minx: 0.0, miny: 0.0, maxx: 1.0, maxy: 1.0 });

    }

    #[test]
    fn regular_polygons() {

        let square = create_regular_polygon(4, 90.0);

        assert_eq!(square.len(), 4);
        assert_relative_eq!(square[2].x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(square[2].y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(polygon_area(&square), 1.0, epsilon = 1e-12);

        let hexagon = create_regular_polygon(6, 60.0);
        assert_relative_eq!(polygon_area(&hexagon), 1.5 * 3f64.sqrt(), epsilon = 1e-12);

        // every edge has unit length, including the closing one
        let dodecagon = create_regular_polygon(12, 30.0);
        for i in 0..12 {
            let d = dodecagon[(i + 1) % 12] - dodecagon[i];
            assert_relative_eq!(d.norm(), 1.0, epsilon = 1e-12);
        }

        assert_eq!(create_regular_polygon(1, 0.0), vec![Point2d::origin()]);

    }

}
