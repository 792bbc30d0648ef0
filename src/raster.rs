//////////////////////////////////////////////////////////////////////
// integer rectangles, scanline rasterization of convex polygons,
// clipping, and reading/writing pixels along scanlines

use crate::geometry::*;

use image::{ImageBuffer, Pixel};

//////////////////////////////////////////////////////////////////////
// integer rect, covers [x, x+width) x [y, y+height)

#[derive(Debug,PartialEq,Eq,Clone,Copy)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32
}

impl Rect {

    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Rect { x, y, width, height }
    }

    fn x2(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    fn y2(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        (self.x as i64) < other.x2() && self.x2() > other.x as i64 &&
            (self.y as i64) < other.y2() && self.y2() > other.y as i64
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y &&
            (x as i64) < self.x2() && (y as i64) < self.y2()
    }

}

// rounded integer bounds of a polygon
pub fn bounding_rect(poly: &[Point2d]) -> Rect {

    let r = bounding_rectf(poly);

    let x0 = r.minx.round();
    let y0 = r.miny.round();
    let x1 = r.maxx.round();
    let y1 = r.maxy.round();

    Rect::new(x0 as i32, y0 as i32, (x1 - x0) as u32, (y1 - y0) as u32)

}

//////////////////////////////////////////////////////////////////////
// a horizontal run of pixels [x, x+len) on row y

#[derive(Debug,PartialEq,Eq,Clone,Copy)]
pub struct Scanline {
    pub y: i32,
    pub x: i32,
    pub len: u32
}

impl Scanline {

    pub fn new(y: i32, x: i32, len: u32) -> Self {
        Scanline { y, x, len }
    }

    fn x2(&self) -> i64 {
        self.x as i64 + self.len as i64
    }

}

//////////////////////////////////////////////////////////////////////
// polygon edge with pixel endpoints

#[derive(Debug,Clone,Copy)]
pub struct Line {
    pub p1: Point2i,
    pub p2: Point2i
}

impl Line {
    pub fn new(p1: Point2i, p2: Point2i) -> Self {
        Line { p1, p2 }
    }
}

// fixed point scale for edge slopes
const SLOPE_PRECISION: i64 = 10000;

// solve for x on the line at row y
//
// slope is kept as a scaled integer so that every edge gives the
// same answer on every platform. lines flatter than 1/SLOPE_PRECISION
// report their first x.
pub fn solve_line_x(y: i32, l: &Line) -> i32 {

    let (x1, y1) = (l.p1.x as i64, l.p1.y as i64);
    let (x2, y2) = (l.p2.x as i64, l.p2.y as i64);

    if x1 == x2 {
        return x1 as i32;
    }

    let m = SLOPE_PRECISION * (y2 - y1) / (x2 - x1);

    if m == 0 {
        return x1 as i32;
    }

    (x1 + SLOPE_PRECISION * (y as i64 - y1) / m) as i32

}

//////////////////////////////////////////////////////////////////////
// given two arbitrary lines, get the scanlines that span between them
// on the rows both of them cross

pub fn get_intersecting_scanlines(l1: &Line, l2: &Line) -> Vec<Scanline> {

    let mut l1 = *l1;
    let mut l2 = *l2;

    // endpoints in ascending y
    if l1.p1.y > l1.p2.y {
        std::mem::swap(&mut l1.p1, &mut l1.p2);
    }

    if l2.p1.y > l2.p2.y {
        std::mem::swap(&mut l2.p1, &mut l2.p2);
    }

    let y1 = l1.p1.y.max(l2.p1.y);
    let y2 = l1.p2.y.min(l2.p2.y);

    if y2 <= y1 {
        return vec![];
    }

    let mut s = Vec::with_capacity((y2 - y1) as usize);

    for y in y1..y2 {

        let xa = solve_line_x(y, &l1);
        let xb = solve_line_x(y, &l2);

        // zero length from rounding
        if xa == xb {
            continue;
        }

        let (x0, x1) = if xa < xb { (xa, xb) } else { (xb, xa) };

        s.push(Scanline::new(y, x0, (x1 - x0) as u32));

    }

    s

}

//////////////////////////////////////////////////////////////////////
// exact pixel coverage of a convex polygon
//
// every row of a convex polygon lies between exactly one left and
// one right edge, so trying every pair of edges finds each of them.

pub fn get_convex_polygon_scanlines(poly: &[Point2d]) -> Vec<Scanline> {

    let n = poly.len();

    let lines: Vec<Line> = (0..n)
        .map(|i| Line::new(to_pixel(&poly[i]), to_pixel(&poly[(i + 1) % n])))
        .collect();

    let mut s = vec![];

    for (i, l1) in lines.iter().enumerate() {
        for l2 in &lines[i+1..] {
            s.extend(get_intersecting_scanlines(l1, l2));
        }
    }

    s

}

//////////////////////////////////////////////////////////////////////
// clip scanlines to a rect, dropping the ones entirely outside

pub fn clip(scanlines: &[Scanline], r: &Rect) -> Vec<Scanline> {

    let mut clipped = Vec::with_capacity(scanlines.len());

    let (rx1, rx2) = (r.x as i64, r.x2());

    for s in scanlines {

        if s.y < r.y || s.y as i64 >= r.y2() {
            continue;
        }

        let (sx1, sx2) = (s.x as i64, s.x2());

        if sx1 >= rx2 || rx1 >= sx2 {
            continue;
        }

        let x1 = sx1.max(rx1);
        let x2 = sx2.min(rx2);

        debug_assert!(x1 < x2);

        clipped.push(Scanline::new(s.y, x1 as i32, (x2 - x1) as u32));

    }

    clipped

}

//////////////////////////////////////////////////////////////////////
// anything we can read and write 8-bit channel values from
// by (row, column, channel)

pub trait PixelBuffer {

    fn rows(&self) -> usize;
    fn cols(&self) -> usize;
    fn channels(&self) -> usize;

    fn get(&self, row: usize, col: usize, channel: usize) -> u8;
    fn set(&mut self, row: usize, col: usize, channel: usize, value: u8);

}

impl<P> PixelBuffer for ImageBuffer<P, Vec<u8>>
where P: Pixel<Subpixel = u8> + 'static {

    fn rows(&self) -> usize {
        self.height() as usize
    }

    fn cols(&self) -> usize {
        self.width() as usize
    }

    fn channels(&self) -> usize {
        P::CHANNEL_COUNT as usize
    }

    fn get(&self, row: usize, col: usize, channel: usize) -> u8 {
        self.get_pixel(col as u32, row as u32).channels()[channel]
    }

    fn set(&mut self, row: usize, col: usize, channel: usize, value: u8) {
        self.get_pixel_mut(col as u32, row as u32).channels_mut()[channel] = value;
    }

}

//////////////////////////////////////////////////////////////////////
// mean value of one channel over the pixels covered by the
// scanlines, which must already be clipped to the buffer

pub fn get_mean<B: PixelBuffer>(img: &B, scanlines: &[Scanline], channel: usize) -> u8 {

    let mut sum: u64 = 0;
    let mut total: u64 = 0;

    for s in scanlines {
        let row = s.y as usize;
        for x in s.x..(s.x + s.len as i32) {
            sum += img.get(row, x as usize, channel) as u64;
            total += 1;
        }
    }

    if total == 0 {
        return 0;
    }

    let mean = (sum as f64 / total as f64).round();

    debug_assert!(mean < 256.0);

    mean as u8

}

// set one channel to value over the scanlines
pub fn fill<B: PixelBuffer>(img: &mut B, scanlines: &[Scanline], value: u8, channel: usize) {

    for s in scanlines {

        debug_assert!(s.x >= 0 && s.y >= 0);
        debug_assert!((s.y as usize) < img.rows());
        debug_assert!(s.x as usize + s.len as usize <= img.cols());

        for x in s.x..(s.x + s.len as i32) {
            img.set(s.y as usize, x as usize, channel, value);
        }

    }

}

//////////////////////////////////////////////////////////////////////
// Bresenham line from p1 to p2, both ends included

pub fn get_line(p1: &Point2d, p2: &Point2d) -> Vec<Point2i> {

    let a = to_pixel(p1);
    let b = to_pixel(p2);

    let dx = (b.x - a.x).abs();
    let dy = (b.y - a.y).abs();

    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };

    let mut err = dx - dy;
    let (mut x, mut y) = (a.x, a.y);

    let mut points = vec![];

    loop {

        points.push(Point2i::new(x, y));

        if x == b.x && y == b.y {
            break;
        }

        let e2 = 2 * err;

        if e2 > -dy {
            err -= dy;
            x += sx;
        }

        if e2 < dx {
            err += dx;
            y += sy;
        }

    }

    points

}

// outline a polygon with the given color, clipped to the buffer
pub fn draw_lines<B: PixelBuffer>(img: &mut B, poly: &[Point2d], color: &[u8]) {

    let bounds = Rect::new(0, 0, img.cols() as u32, img.rows() as u32);
    let n = poly.len();

    for i in 0..n {
        for p in get_line(&poly[i], &poly[(i + 1) % n]) {
            if bounds.contains(p.x, p.y) {
                for (c, &v) in color.iter().enumerate().take(img.channels()) {
                    img.set(p.y as usize, p.x as usize, c, v);
                }
            }
        }
    }

}

//////////////////////////////////////////////////////////////////////
