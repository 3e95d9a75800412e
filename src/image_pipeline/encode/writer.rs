use std::io::Write;

use image::DynamicImage;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::encode::format::OutputFormat;
use crate::image_pipeline::processor::types::Quality;

pub trait ImageWriter {
    fn write_image(
        &self,
        image: &DynamicImage,
        format: OutputFormat,
        quality: Quality,
        output: &mut dyn Write,
    ) -> Result<()>;
}

impl<W: ImageWriter + ?Sized> ImageWriter for &W {
    fn write_image(
        &self,
        image: &DynamicImage,
        format: OutputFormat,
        quality: Quality,
        output: &mut dyn Write,
    ) -> Result<()> {
        (**self).write_image(image, format, quality, output)
    }
}
