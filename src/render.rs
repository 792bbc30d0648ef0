//////////////////////////////////////////////////////////////////////
// turn an image into tile elements and write them back out

use std::cmp::Ordering;
use std::io::Write;
use std::path::Path;

use log::{debug, info};
use phf::phf_map;

use crate::errors::*;
use crate::geometry::*;
use crate::raster::{PixelBuffer, Scanline, draw_lines, fill, get_mean};
use crate::tiler::*;
use crate::tiles::Tile;

//////////////////////////////////////////////////////////////////////
// per-render settings coming from the command line

#[derive(Debug,Clone)]
pub struct RenderParams {
    pub scale: f64,   // pixels per unit of tile length
    pub angle: f64,   // tile rotation in degrees
    pub offset: Vec2d // shift of the rotation center from the image center
}

impl Default for RenderParams {
    fn default() -> Self {
        RenderParams {
            scale: 16.0,
            angle: 10.0,
            offset: Vec2d::zeros()
        }
    }
}

impl RenderParams {

    // rotation center for a window of the given size
    pub fn center(&self, rows: usize, cols: usize) -> Point2d {
        Point2d::new(cols as f64 / 2.0, rows as f64 / 2.0) + self.offset
    }

}

// one polygon of the mosaic with the pixels it covers and their
// mean color, one value per image channel
#[derive(Debug,Clone,PartialEq)]
pub struct TileElement {
    pub polygon: Polygon,
    pub scanlines: Vec<Scanline>,
    pub color: Vec<u8>
}

//////////////////////////////////////////////////////////////////////
// polygons of the tiling that might be visible in a rows x cols window

pub fn get_window_polys(rows: usize,
                        cols: usize,
                        tile: &Tile,
                        params: &RenderParams) -> Vec<Polygon> {

    let tw = params.scale * tile.width;
    let th = params.scale * tile.height;

    let locs = get_tile_locations(rows, cols,
                                  &params.center(rows, cols),
                                  tw, th,
                                  params.angle,
                                  tile.triangular);

    info!("{} tile locations", locs.len());

    let all_polys = get_tiled_polygons(&locs, &tile.polygons, params.scale, params.angle);

    info!("{} unclipped polygons", all_polys.len());

    let window_polys = get_overlapping_polygons(cols as u32, rows as u32, &all_polys);

    info!("{} overlapping polygons", window_polys.len());

    window_polys

}

//////////////////////////////////////////////////////////////////////
// the whole pipeline: locate, instantiate, filter, rasterize, clip
// and sample

pub fn get_image_elements<B: PixelBuffer>(img: &B,
                                          tile: &Tile,
                                          params: &RenderParams) -> Vec<TileElement> {

    let (rows, cols) = (img.rows(), img.cols());

    let window_polys = get_window_polys(rows, cols, tile, params);

    let ps = clip_scanlines(cols as u32, rows as u32,
                            &get_polygon_scanlines(&window_polys));

    debug!("{} groups of scanlines", ps.len());

    let elements: Vec<TileElement> = window_polys.into_iter()
        .zip(ps.into_iter())
        .map(|(polygon, scanlines)| {
            let color = (0..img.channels())
                .map(|c| get_mean(img, &scanlines, c))
                .collect();
            TileElement { polygon, scanlines, color }
        })
        .collect();

    info!("{} tile elements", elements.len());

    elements

}

//////////////////////////////////////////////////////////////////////
// presentation order, applied after the pipeline has run
//
// sorting is stable so equal elements keep instantiation order

pub fn sort_elements<F>(elements: &mut [TileElement], compare: F)
where F: FnMut(&TileElement, &TileElement) -> Ordering {
    elements.sort_by(compare);
}

fn centroid(poly: &[Point2d]) -> Point2d {
    let sum = poly.iter().fold(Vec2d::zeros(), |acc, p| acc + p.coords);
    Point2d::from(sum / poly.len() as f64)
}

fn luminance(color: &[u8]) -> f64 {
    match color {
        [r, g, b, ..] => 0.299 * *r as f64 + 0.587 * *g as f64 + 0.114 * *b as f64,
        [v, ..] => *v as f64,
        [] => 0.0
    }
}

// nearest to center first
pub fn by_distance_from(center: Point2d) -> impl Fn(&TileElement, &TileElement) -> Ordering {
    move |a, b| {
        let da = (centroid(&a.polygon) - center).norm_squared();
        let db = (centroid(&b.polygon) - center).norm_squared();
        da.partial_cmp(&db).unwrap_or(Ordering::Equal)
    }
}

// darkest first
pub fn by_luminance(a: &TileElement, b: &TileElement) -> Ordering {
    luminance(&a.color).partial_cmp(&luminance(&b.color)).unwrap_or(Ordering::Equal)
}

#[derive(Debug,PartialEq,Clone,Copy)]
pub enum ElementOrder {
    None,
    Center,
    Luminance
}

// lookup table matching order names to enumeration
pub static ORDER_LOOKUP: phf::Map<&'static str, ElementOrder> = phf_map! {
    "none" => ElementOrder::None,
    "center" => ElementOrder::Center,
    "luminance" => ElementOrder::Luminance,
};

impl ElementOrder {

    pub fn apply(self, elements: &mut [TileElement], center: &Point2d) {
        match self {
            ElementOrder::None => {},
            ElementOrder::Center => sort_elements(elements, by_distance_from(*center)),
            ElementOrder::Luminance => sort_elements(elements, by_luminance)
        }
    }

}

//////////////////////////////////////////////////////////////////////
// raster output - each element becomes a flat patch of its color.
// later elements win on shared boundary pixels.

pub fn paint_elements<B: PixelBuffer>(img: &mut B, elements: &[TileElement]) {

    let channels = img.channels();

    for e in elements {
        for (c, &value) in e.color.iter().enumerate().take(channels) {
            fill(img, &e.scanlines, value, c);
        }
    }

}

pub fn draw_outlines<B: PixelBuffer>(img: &mut B, elements: &[TileElement], color: &[u8]) {
    for e in elements {
        draw_lines(img, &e.polygon, color);
    }
}

//////////////////////////////////////////////////////////////////////
// vector output

fn rgb(color: &[u8]) -> [u8; 3] {
    match color {
        [r, g, b, ..] => [*r, *g, *b],
        [v, ..] => [*v, *v, *v],
        [] => [0, 0, 0]
    }
}

pub fn hex_color(color: &[u8]) -> String {
    let [r, g, b] = rgb(color);
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

pub fn write_svg<W: Write>(out: &mut W,
                           w: usize,
                           h: usize,
                           elements: &[TileElement]) -> Result<()> {

    writeln!(out, "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">",
             w, h, w, h)?;

    for e in elements {

        let points: Vec<String> = e.polygon.iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect();

        let color = hex_color(&e.color);

        // stroke in the fill color so neighbors don't show hairline gaps
        writeln!(out, "<polygon points=\"{}\" style=\"stroke:{};stroke-width:1px;fill:{};\" />",
                 points.join(" "), color, color)?;

    }

    writeln!(out, "</svg>")?;

    Ok(())

}

trait CairoVecOps {
    fn setcolor(&self, color: &[u8]);
    fn drawpoly(&self, poly: &[Point2d]);
}

impl CairoVecOps for cairo::Context {

    fn setcolor(&self, color: &[u8]) {
        let [r, g, b] = rgb(color);
        self.set_source_rgb(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
    }

    fn drawpoly(&self, poly: &[Point2d]) {
        for (i, p) in poly.iter().enumerate() {
            if i == 0 {
                self.move_to(p.x, p.y);
            } else {
                self.line_to(p.x, p.y);
            }
        }
        self.close_path();
    }

}

// single page, one point per pixel, same y-down frame as the image
pub fn write_pdf<P: AsRef<Path>>(path: P,
                                 w: usize,
                                 h: usize,
                                 elements: &[TileElement]) -> Result<()> {

    let surface = cairo::PdfSurface::new(w as f64, h as f64, path)?;

    let ctx = cairo::Context::new(&surface);

    ctx.set_line_width(1.0);
    ctx.set_line_join(cairo::LineJoin::Round);

    for e in elements {
        ctx.setcolor(&e.color);
        ctx.drawpoly(&e.polygon);
        ctx.fill_preserve();
        ctx.stroke();
    }

    ctx.show_page();

    surface.finish();

    Ok(())

}

//////////////////////////////////////////////////////////////////////
