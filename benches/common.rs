use pdf417_scan::models::{Channels, Raster};

/// Light photo with a block of 2 px bars in the middle and sparse dark dots
pub fn synthetic_photo(width: usize, height: usize) -> Raster {
    let mut raster = match Raster::filled(width, height, Channels::Gray, 225) {
        Ok(raster) => raster,
        Err(err) => panic!("bad bench dimensions: {err}"),
    };
    let (bx, by) = (width * 3 / 8, height * 3 / 8);
    let (bw, bh) = (width / 4, height / 4);
    for y in by..by + bh {
        for x in bx..bx + bw {
            if ((x - bx) / 2) % 2 == 0 {
                raster.set_pixel(x, y, 25);
            }
        }
    }
    for y in (7..height).step_by(53) {
        for x in (11..width).step_by(61) {
            raster.set_pixel(x, y, 40);
        }
    }
    raster
}
