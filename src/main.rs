// bunch of standard library stuff
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{info, warn};

//////////////////////////////////////////////////////////////////////
// use error chain so we can use Result<> everywhere
// for error handling

#[macro_use]
extern crate error_chain;

mod errors {

    error_chain!{

        foreign_links {
            Fmt(::std::fmt::Error);
            Io(::std::io::Error);
            Cairo(::cairo::Error);
            Image(::image::ImageError);
            ParseFloat(::std::num::ParseFloatError);
            ParseInt(::std::num::ParseIntError);
        }

    }

}

use errors::*;

//////////////////////////////////////////////////////////////////////
// define some statically allocated maps for
// lookups during parsing

use phf::phf_map;

mod geometry;
mod raster;
mod render;
mod tiler;
mod tiles;

use render::{ElementOrder, RenderParams, ORDER_LOOKUP};

const DEFAULT_TILE_INDEX: usize = 10;
const OUTLINE_COLOR: [u8; 3] = [212, 212, 212];

#[derive(Debug,PartialEq,Clone,Copy)]
enum OutputFormat {
    Raster,
    Svg,
    Pdf
}

// lookup table matching file extensions to output formats
static FORMAT_LOOKUP: phf::Map<&'static str, OutputFormat> = phf_map! {
    "jpg" => OutputFormat::Raster,
    "jpeg" => OutputFormat::Raster,
    "png" => OutputFormat::Raster,
    "bmp" => OutputFormat::Raster,
    "tif" => OutputFormat::Raster,
    "tiff" => OutputFormat::Raster,
    "svg" => OutputFormat::Svg,
    "pdf" => OutputFormat::Pdf,
};

fn format_from_extension(filename: &str) -> Option<OutputFormat> {
    let ext = Path::new(filename).extension()?.to_str()?.to_lowercase();
    FORMAT_LOOKUP.get(ext.as_str()).copied()
}

//////////////////////////////////////////////////////////////////////
// command line

#[derive(Debug)]
struct Options {
    help: bool,
    list: bool,
    format: Option<OutputFormat>,
    tile_index: usize,
    tile_name: Option<String>,
    params: RenderParams,
    order: ElementOrder,
    outline: bool,
    input: Option<String>,
    output: Option<String>
}

impl Default for Options {
    fn default() -> Self {
        Options {
            help: false,
            list: false,
            format: None,
            tile_index: DEFAULT_TILE_INDEX,
            tile_name: None,
            params: RenderParams::default(),
            order: ElementOrder::None,
            outline: false,
            input: None,
            output: None
        }
    }
}

fn usage(program: &str) {
    eprintln!("usage: {} [options] INFILE OUTFILE", program);
    eprintln!();
    eprintln!("options:");
    eprintln!("  -h, --help              show this message");
    eprintln!("  -l, --list              list available tiles");
    eprintln!("  -j, --jpeg, --raster    write a raster image");
    eprintln!("  -v, --svg               write an SVG file");
    eprintln!("  -p, --pdf               write a PDF file");
    eprintln!("  -t, --tile-index N      tile to use by index (default {})", DEFAULT_TILE_INDEX);
    eprintln!("  -n, --tile NAME         tile to use by name");
    eprintln!("  -s, --scale F           tile scale in pixels (default 16)");
    eprintln!("  -a, --angle F           tile rotation in degrees (default 10)");
    eprintln!("  -x, --xoffset F         horizontal shift of the rotation center");
    eprintln!("  -y, --yoffset F         vertical shift of the rotation center");
    eprintln!("  -o, --order NAME        drawing order: none, center or luminance");
    eprintln!("  -L, --outline           outline polygons on raster output");
    eprintln!();
    eprintln!("without -j, -v or -p the format comes from the OUTFILE extension");
}

fn next_value<'a, I>(iter: &mut I, flag: &str) -> Result<&'a str>
where I: Iterator<Item = &'a String> {
    match iter.next() {
        Some(v) => Ok(v.as_str()),
        None => bail!("missing value for {}", flag)
    }
}

fn parse_float(s: &str, flag: &str) -> Result<f64> {
    s.parse::<f64>().chain_err(|| format!("invalid value for {}: {:?}", flag, s))
}

fn parse_args(args: &[String]) -> Result<Options> {

    let mut opts = Options::default();
    let mut positional = vec![];

    let mut iter = args.iter();

    while let Some(arg) = iter.next() {

        let flag = arg.as_str();

        match flag {

            "-h" | "--help" => opts.help = true,
            "-l" | "--list" => opts.list = true,

            "-j" | "--jpeg" | "--raster" => opts.format = Some(OutputFormat::Raster),
            "-v" | "--svg" => opts.format = Some(OutputFormat::Svg),
            "-p" | "--pdf" => opts.format = Some(OutputFormat::Pdf),

            "-t" | "--tile-index" => {
                let v = next_value(&mut iter, flag)?;
                opts.tile_index = v.parse::<usize>()
                    .chain_err(|| format!("invalid tile index: {:?}", v))?;
            },

            "-n" | "--tile" => {
                opts.tile_name = Some(next_value(&mut iter, flag)?.to_string());
            },

            "-s" | "--scale" => {
                opts.params.scale = parse_float(next_value(&mut iter, flag)?, flag)?;
            },

            "-a" | "--angle" => {
                opts.params.angle = parse_float(next_value(&mut iter, flag)?, flag)?;
            },

            "-x" | "--xoffset" => {
                opts.params.offset.x = parse_float(next_value(&mut iter, flag)?, flag)?;
            },

            "-y" | "--yoffset" => {
                opts.params.offset.y = parse_float(next_value(&mut iter, flag)?, flag)?;
            },

            "-o" | "--order" => {
                let v = next_value(&mut iter, flag)?;
                opts.order = match ORDER_LOOKUP.get(v) {
                    Some(&order) => order,
                    None => bail!("unknown order {:?}, expected none, center or luminance", v)
                };
            },

            "-L" | "--outline" => opts.outline = true,

            _ => {
                if flag.starts_with('-') && flag.len() > 1 {
                    bail!("unrecognized option: {}", flag);
                }
                positional.push(arg.clone());
            }

        }

    }

    if positional.len() > 2 {
        bail!("too many arguments: {:?}", &positional[2..]);
    }

    let mut positional = positional.into_iter();
    opts.input = positional.next();
    opts.output = positional.next();

    let p = &opts.params;

    if !(p.scale.is_finite() && p.scale > 0.0) {
        bail!("scale must be a positive number, got {}", p.scale);
    }

    if !p.angle.is_finite() || !p.offset.x.is_finite() || !p.offset.y.is_finite() {
        bail!("angle and offsets must be finite");
    }

    Ok(opts)

}

//////////////////////////////////////////////////////////////////////

fn run() -> Result<()> {

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(|s| s.as_str()).unwrap_or("image_tiler");

    let opts = parse_args(args.get(1..).unwrap_or(&[]))?;

    if opts.help {
        usage(program);
        return Ok(());
    }

    let tiles = tiles::create_tile_list();

    if opts.list {
        for (i, tile) in tiles.iter().enumerate() {
            println!("[{}]\t{}", i, tile.name);
        }
        return Ok(());
    }

    let tile_index = match &opts.tile_name {
        Some(name) => match tiles::find_tile(name) {
            Some(idx) => idx,
            None => bail!("unknown tile {:?}, expected one of: {}",
                          name, tiles::tile_names().join(", "))
        },
        None => opts.tile_index
    };

    let tile = match tiles.get(tile_index) {
        Some(tile) => tile,
        None => bail!("tile index {} is out of range, expected 0..{}",
                      tile_index, tiles.len())
    };

    let (input, output) = match (&opts.input, &opts.output) {
        (Some(i), Some(o)) => (i, o),
        (None, _) => bail!("no input image given (try --help)"),
        (_, None) => bail!("no output file given (try --help)")
    };

    let format = match opts.format.or_else(|| format_from_extension(output)) {
        Some(format) => format,
        None => bail!("can't tell output format from {:?}, use -j, -v or -p", output)
    };

    let params = &opts.params;

    info!("using tile [{}] {}", tile.id as usize, tile.name);
    info!("scale {}, angle {}, offset ({}, {})",
          params.scale, params.angle, params.offset.x, params.offset.y);

    let img = image::open(input)
        .chain_err(|| format!("could not read image {}", input))?
        .to_rgb8();

    let (width, height) = img.dimensions();
    let (cols, rows) = (width as usize, height as usize);

    info!("read {} ({}x{})", input, width, height);

    let mut elements = render::get_image_elements(&img, tile, params);

    opts.order.apply(&mut elements, &params.center(rows, cols));

    if opts.outline && format != OutputFormat::Raster {
        warn!("outlines are only drawn on raster output");
    }

    match format {

        OutputFormat::Raster => {

            let mut out = image::RgbImage::new(width, height);

            render::paint_elements(&mut out, &elements);

            if opts.outline {
                render::draw_outlines(&mut out, &elements, &OUTLINE_COLOR);
            }

            out.save(output)
                .chain_err(|| format!("could not write {}", output))?;

        },

        OutputFormat::Svg => {

            let f = File::create(output)
                .chain_err(|| format!("could not open {} for writing", output))?;

            let mut writer = BufWriter::new(f);

            render::write_svg(&mut writer, cols, rows, &elements)?;

            writer.flush()?;

        },

        OutputFormat::Pdf => {
            render::write_pdf(output, cols, rows, &elements)?;
        }

    }

    info!("wrote {}", output);

    Ok(())

}

quick_main!(run);

//////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use super::*;
    use crate::geometry::Vec2d;

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(|a| a.to_string()).collect()
    }

    #[test]
    fn defaults() {

        let opts = parse_args(&args("in.png out.svg")).unwrap();

        assert_eq!(opts.tile_index, DEFAULT_TILE_INDEX);
        assert_eq!(opts.params.scale, 16.0);
        assert_eq!(opts.params.angle, 10.0);
        assert_eq!(opts.params.offset, Vec2d::zeros());
        assert_eq!(opts.order, ElementOrder::None);
        assert_eq!(opts.format, None);
        assert_eq!(opts.input.as_deref(), Some("in.png"));
        assert_eq!(opts.output.as_deref(), Some("out.svg"));

    }

    #[test]
    fn all_options() {

        let opts = parse_args(&args("-t 3 --scale 7.5 -a -30 -x 4 --yoffset -2.5 \
                                     -o luminance -L --pdf -n hexagonal a.jpg b.out")).unwrap();

        assert_eq!(opts.tile_index, 3);
        assert_eq!(opts.tile_name.as_deref(), Some("hexagonal"));
        assert_eq!(opts.params.scale, 7.5);
        assert_eq!(opts.params.angle, -30.0);
        assert_eq!(opts.params.offset, Vec2d::new(4.0, -2.5));
        assert_eq!(opts.order, ElementOrder::Luminance);
        assert_eq!(opts.format, Some(OutputFormat::Pdf));
        assert!(opts.outline);

    }

    #[test]
    fn bad_arguments() {
        assert!(parse_args(&args("-s 0 a.png b.png")).is_err());
        assert!(parse_args(&args("-s -3 a.png b.png")).is_err());
        assert!(parse_args(&args("-s NaN a.png b.png")).is_err());
        assert!(parse_args(&args("-s")).is_err());
        assert!(parse_args(&args("-t two a.png b.png")).is_err());
        assert!(parse_args(&args("-o random a.png b.png")).is_err());
        assert!(parse_args(&args("--frobnicate a.png b.png")).is_err());
        assert!(parse_args(&args("a.png b.png c.png")).is_err());
    }

    #[test]
    fn formats_from_extension() {
        assert_eq!(format_from_extension("out.JPG"), Some(OutputFormat::Raster));
        assert_eq!(format_from_extension("dir/out.tiff"), Some(OutputFormat::Raster));
        assert_eq!(format_from_extension("out.svg"), Some(OutputFormat::Svg));
        assert_eq!(format_from_extension("out.pdf"), Some(OutputFormat::Pdf));
        assert_eq!(format_from_extension("out.txt"), None);
        assert_eq!(format_from_extension("out"), None);
    }

}
