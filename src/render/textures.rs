use glium::backend::Facade;
use glium::texture::{RawImage2d, SrgbTexture2d};
use std::path::Path;

const SURFACE_WIDTH: u32 = 256;
const SURFACE_HEIGHT: u32 = 128;

/// Procedural surface texture: the base color shaded by a few octaves of
/// simplex noise sampled over the sphere's surface directions. `seed`
/// offsets the noise domain so bodies sharing a color do not share a
/// surface.
pub fn surface_texture<F: ?Sized + Facade>(
    facade: &F,
    base_color: (f32, f32, f32),
    seed: f32,
) -> Result<SrgbTexture2d, Box<std::error::Error>> {
    use std::f32::consts::PI;

    let image = image::ImageBuffer::from_fn(SURFACE_WIDTH, SURFACE_HEIGHT, |x, y| {
        let u = x as f32 / SURFACE_WIDTH as f32;
        let v = y as f32 / SURFACE_HEIGHT as f32;

        let theta = v * PI;
        let phi = u * 2.0 * PI;
        let direction = [
            theta.sin() * phi.cos() + seed,
            theta.cos(),
            theta.sin() * phi.sin(),
        ];

        let brightness = 0.75 + 0.25 * fbm(&direction, 4.0, 0.5, 4);
        image::Rgba {
            data: [
                channel(base_color.0 * brightness),
                channel(base_color.1 * brightness),
                channel(base_color.2 * brightness),
                255,
            ],
        }
    });

    upload(facade, image)
}

/// Loads a texture image from disk.
pub fn load_texture<F: ?Sized + Facade>(
    facade: &F,
    path: &Path,
) -> Result<SrgbTexture2d, Box<std::error::Error>> {
    let image = image::open(path)?.to_rgba();
    upload(facade, image)
}

fn upload<F: ?Sized + Facade>(
    facade: &F,
    image: image::RgbaImage,
) -> Result<SrgbTexture2d, Box<std::error::Error>> {
    let dimensions = image.dimensions();
    let raw = RawImage2d::from_raw_rgba_reversed(&image.into_raw(), dimensions);
    Ok(SrgbTexture2d::new(facade, raw)?)
}

fn channel(value: f32) -> u8 {
    (value.max(0.0).min(1.0) * 255.0) as u8
}

fn fbm(direction: &[f32; 3], base_frequency: f32, persistence: f32, octaves: usize) -> f32 {
    let mut result = 0.0;
    let mut amplitude = 1.0;
    let mut max_amplitude = 0.0;
    let mut frequency = base_frequency;
    for _ in 0..octaves {
        result += simdnoise::scalar::simplex_3d(
            direction[0] * frequency,
            direction[1] * frequency,
            direction[2] * frequency,
        ) * amplitude;
        max_amplitude += amplitude;
        amplitude *= persistence;
        frequency *= 2.0;
    }
    result / max_amplitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_clamp_to_the_displayable_range() {
        assert_eq!(channel(-0.5), 0);
        assert_eq!(channel(0.0), 0);
        assert_eq!(channel(1.0), 255);
        assert_eq!(channel(2.0), 255);
    }

    #[test]
    fn fbm_stays_normalized() {
        for step in 0..32 {
            let t = step as f32 * 0.37;
            let value = fbm(&[t.cos(), t.sin(), t * 0.1], 4.0, 0.5, 4);
            assert!(value >= -1.0 && value <= 1.0);
        }
    }
}
