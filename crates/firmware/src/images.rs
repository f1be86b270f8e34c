//! Image sources for the badge's left panel.
//!
//! Hardware builds bake their images into flash as raw Gray4 data
//! ([`StaticImages`]); the emulator decodes PNG/JPEG files from disk
//! ([`FsImages`]).

use embedded_graphics::{
    image::{Image, ImageRaw},
    pixelcolor::Gray4,
    prelude::*,
};

/// Why an image could not be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageError<E> {
    /// No image is known under the path
    NotFound,
    /// The image data could not be decoded
    Decode,
    /// The draw target failed
    Draw(E),
}

impl<E: core::fmt::Display> core::fmt::Display for ImageError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "image not found"),
            Self::Decode => write!(f, "image could not be decoded"),
            Self::Draw(e) => write!(f, "draw target error: {e}"),
        }
    }
}

/// Something that can blit an image, by path, onto a Gray4 target.
pub trait ImageSource {
    /// Draw the image at `path` with its top-left corner at `origin`
    fn draw<D>(&mut self, path: &str, origin: Point, target: &mut D) -> Result<(), ImageError<D::Error>>
    where
        D: DrawTarget<Color = Gray4>;
}

impl<S: ImageSource + ?Sized> ImageSource for &mut S {
    fn draw<D>(&mut self, path: &str, origin: Point, target: &mut D) -> Result<(), ImageError<D::Error>>
    where
        D: DrawTarget<Color = Gray4>,
    {
        (**self).draw(path, origin, target)
    }
}

// ----------------------------------------------------------------------------
// Flash-resident images
// ----------------------------------------------------------------------------

/// Packed Gray4 image (two pixels per byte, high nibble first).
#[derive(Debug, Clone, Copy)]
pub struct StaticImage {
    /// Path the profile refers to it by
    pub path: &'static str,
    /// Width in pixels
    pub width: u32,
    /// Packed pixel data, rows padded to whole bytes
    pub data: &'static [u8],
}

/// Lookup table of flash-resident images.
#[derive(Debug, Clone, Copy)]
pub struct StaticImages {
    images: &'static [StaticImage],
}

impl StaticImages {
    /// Source serving `images`
    pub const fn new(images: &'static [StaticImage]) -> Self {
        Self { images }
    }

    /// Source with no images; every draw reports `NotFound`
    pub const fn empty() -> Self {
        Self { images: &[] }
    }

    fn find(&self, path: &str) -> Option<&'static StaticImage> {
        self.images.iter().find(|img| img.path == path)
    }
}

impl ImageSource for StaticImages {
    fn draw<D>(&mut self, path: &str, origin: Point, target: &mut D) -> Result<(), ImageError<D::Error>>
    where
        D: DrawTarget<Color = Gray4>,
    {
        let image = self.find(path).ok_or(ImageError::NotFound)?;
        if image.width == 0 {
            return Err(ImageError::Decode);
        }
        let raw = ImageRaw::<Gray4>::new(image.data, image.width);
        Image::new(&raw, origin).draw(target).map_err(ImageError::Draw)
    }
}

// ----------------------------------------------------------------------------
// Filesystem images (emulator)
// ----------------------------------------------------------------------------

#[cfg(any(test, feature = "emulator"))]
pub use fs::FsImages;

#[cfg(any(test, feature = "emulator"))]
mod fs {
    extern crate std;

    use std::{
        collections::HashMap,
        fs::File,
        io::BufReader,
        path::{Path, PathBuf},
        string::String,
        vec::Vec,
    };

    use embedded_graphics::{pixelcolor::Gray4, prelude::*, Pixel};
    use image::{GrayImage, ImageFormat};

    use super::{ImageError, ImageSource};

    /// Decodes badge images from a directory on the host.
    ///
    /// Profile paths are absolute on the badge (`/badges/badge.png`); they are
    /// resolved relative to `root`. Files ending in `.png` decode as PNG,
    /// everything else as JPEG. Decoded images are cached by path.
    #[derive(Debug)]
    pub struct FsImages {
        root: PathBuf,
        cache: HashMap<String, GrayImage>,
    }

    impl FsImages {
        /// Source rooted at `root`
        pub fn new(root: impl Into<PathBuf>) -> Self {
            Self {
                root: root.into(),
                cache: HashMap::new(),
            }
        }

        /// Host path for a profile path
        pub fn resolve(&self, path: &str) -> PathBuf {
            self.root.join(path.trim_start_matches('/'))
        }

        fn load(&self, path: &str) -> Result<GrayImage, ImageError<()>> {
            let file_path = self.resolve(path);
            let file = File::open(&file_path).map_err(|e| {
                tracing::warn!(path = %file_path.display(), error = %e, "badge image missing");
                ImageError::NotFound
            })?;
            let format = format_for(&file_path);
            let decoded = image::load(BufReader::new(file), format).map_err(|e| {
                tracing::warn!(path = %file_path.display(), error = %e, "badge image undecodable");
                ImageError::Decode
            })?;
            tracing::debug!(
                path = %file_path.display(),
                width = decoded.width(),
                height = decoded.height(),
                "decoded badge image"
            );
            Ok(decoded.to_luma8())
        }
    }

    fn format_for(path: &Path) -> ImageFormat {
        let is_png = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if is_png {
            ImageFormat::Png
        } else {
            ImageFormat::Jpeg
        }
    }

    fn to_gray4(luma: u8) -> Gray4 {
        Gray4::new(luma / 17)
    }

    impl ImageSource for FsImages {
        fn draw<D>(&mut self, path: &str, origin: Point, target: &mut D) -> Result<(), ImageError<D::Error>>
        where
            D: DrawTarget<Color = Gray4>,
        {
            if !self.cache.contains_key(path) {
                let decoded = self.load(path).map_err(|e| match e {
                    ImageError::Decode => ImageError::Decode,
                    ImageError::NotFound | ImageError::Draw(()) => ImageError::NotFound,
                })?;
                self.cache.insert(String::from(path), decoded);
            }
            let Some(image) = self.cache.get(path) else {
                return Err(ImageError::NotFound);
            };

            let pixels: Vec<Pixel<Gray4>> = image
                .enumerate_pixels()
                .map(|(x, y, p)| {
                    let at = origin + Point::new(x as i32, y as i32);
                    Pixel(at, to_gray4(p.0[0]))
                })
                .collect();
            target.draw_iter(pixels).map_err(ImageError::Draw)
        }
    }

}
