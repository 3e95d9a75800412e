//! SVG rasterization via `usvg` parsing and `resvg` rendering.

use std::borrow::Cow;
use std::str::FromStr;

use image::{DynamicImage, Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use tracing::debug;

use crate::image_pipeline::common::error::{ImageError, Result};

/// Canvas used when a document declares no usable size.
pub const DEFAULT_SVG_SIZE: (u32, u32) = (512, 512);

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

#[derive(Debug, Clone, Copy)]
pub struct SvgRasterizer {
    fallback_size: (u32, u32),
}

impl Default for SvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgRasterizer {
    pub fn new() -> Self {
        Self {
            fallback_size: DEFAULT_SVG_SIZE,
        }
    }

    pub fn with_fallback_size(width: u32, height: u32) -> Self {
        Self {
            fallback_size: (width.max(1), height.max(1)),
        }
    }

    pub fn fallback_size(&self) -> (u32, u32) {
        self.fallback_size
    }

    /// Renders the document onto a transparent canvas sized by its view-box.
    ///
    /// Without a view-box the absolute `width`/`height` are used, and without
    /// either the fallback size. User units map 1:1 to pixels unless the
    /// view-box is scaled by the document's own `width`/`height`.
    pub fn rasterize(&self, data: &[u8]) -> Result<DynamicImage> {
        debug!("Parsing SVG document, {} bytes", data.len());

        // Compressed documents are not inspected; usvg inflates them itself.
        let root = match std::str::from_utf8(data) {
            Ok(text) => Some(SvgRoot::parse(text)?),
            Err(_) => None,
        };

        let document = match root.as_ref().and_then(|root| root.namespace_at) {
            Some(offset) => Cow::Owned(insert_namespace(data, offset)),
            None => Cow::Borrowed(data),
        };

        let tree = usvg::Tree::from_data(&document, &usvg::Options::default())
            .map_err(|e| ImageError::SvgError(e.to_string()))?;
        let tree_size = tree.size();

        let declared = root.map_or(DeclaredSize::Absolute, |root| root.size);
        let (width, height, transform) = match declared {
            DeclaredSize::ViewBox(w, h) => match whole_pixels(w, h) {
                Some((width, height)) => (
                    width,
                    height,
                    Transform::from_scale(
                        (w / f64::from(tree_size.width())) as f32,
                        (h / f64::from(tree_size.height())) as f32,
                    ),
                ),
                None => self.fallback_canvas(),
            },
            DeclaredSize::Absolute => {
                match whole_pixels(tree_size.width().into(), tree_size.height().into()) {
                    Some((width, height)) => (width, height, Transform::identity()),
                    None => self.fallback_canvas(),
                }
            }
            DeclaredSize::Missing => self.fallback_canvas(),
        };

        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            ImageError::SvgError(format!("failed to allocate {}x{} canvas", width, height))
        })?;
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        debug!(?declared, "Rasterized SVG: {}x{}", width, height);
        Ok(DynamicImage::ImageRgba8(demultiply(&pixmap)))
    }

    fn fallback_canvas(&self) -> (u32, u32, Transform) {
        let (width, height) = self.fallback_size;
        (width, height, Transform::identity())
    }
}

/// Size information carried by the root `<svg>` element.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DeclaredSize {
    ViewBox(f64, f64),
    /// Both `width` and `height` in absolute units; usvg resolves them.
    Absolute,
    Missing,
}

#[derive(Debug)]
struct SvgRoot {
    size: DeclaredSize,
    /// Byte offset right after `<svg` when the root lacks the SVG namespace.
    namespace_at: Option<usize>,
}

impl SvgRoot {
    fn parse(text: &str) -> Result<Self> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let document = roxmltree::Document::parse_with_options(text, options)
            .map_err(|e| ImageError::SvgError(e.to_string()))?;
        let root = document.root_element();

        let view_box = root
            .attribute("viewBox")
            .and_then(|value| svgtypes::ViewBox::from_str(value).ok())
            .filter(|vb| vb.w > 0.0 && vb.h > 0.0);
        let size = match view_box {
            Some(vb) => DeclaredSize::ViewBox(vb.w, vb.h),
            None if is_absolute(root.attribute("width"))
                && is_absolute(root.attribute("height")) =>
            {
                DeclaredSize::Absolute
            }
            None => DeclaredSize::Missing,
        };

        let start = root.range().start;
        let namespace_at = (root.tag_name().name() == "svg"
            && root.tag_name().namespace().is_none()
            && text[start..].starts_with("<svg"))
        .then_some(start + "<svg".len());

        Ok(Self { size, namespace_at })
    }
}

fn is_absolute(value: Option<&str>) -> bool {
    value
        .and_then(|value| svgtypes::Length::from_str(value).ok())
        .is_some_and(|length| length.unit != svgtypes::LengthUnit::Percent && length.number > 0.0)
}

/// Truncates to whole pixels; `None` when either side ends up empty.
fn whole_pixels(width: f64, height: f64) -> Option<(u32, u32)> {
    if !width.is_finite() || !height.is_finite() || width < 1.0 || height < 1.0 {
        return None;
    }
    Some((width as u32, height as u32))
}

/// Converts tiny-skia's premultiplied pixels into straight-alpha RGBA8.
fn demultiply(pixmap: &Pixmap) -> RgbaImage {
    let mut rgba = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in rgba.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    rgba
}

/// usvg skips elements outside the SVG namespace, so a bare root gets it
/// declared before parsing.
fn insert_namespace(data: &[u8], offset: usize) -> Vec<u8> {
    let declaration = format!(" xmlns=\"{}\"", SVG_NAMESPACE);
    let mut patched = Vec::with_capacity(data.len() + declaration.len());
    patched.extend_from_slice(&data[..offset]);
    patched.extend_from_slice(declaration.as_bytes());
    patched.extend_from_slice(&data[offset..]);
    patched
}

#[cfg(test)]
mod tests {
    use super::{DeclaredSize, SvgRoot, insert_namespace};

    #[test]
    fn test_namespace_added_to_bare_root() {
        let doc = r#"<svg width="1" height="1"/>"#;
        let root = SvgRoot::parse(doc).unwrap();
        let patched = insert_namespace(doc.as_bytes(), root.namespace_at.unwrap());
        assert_eq!(
            std::str::from_utf8(&patched).unwrap(),
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#
        );
    }

    #[test]
    fn test_namespaced_document_untouched() {
        let doc = r#"<?xml version="1.0"?><svg xmlns="http://www.w3.org/2000/svg"/>"#;
        assert_eq!(SvgRoot::parse(doc).unwrap().namespace_at, None);
    }

    #[test]
    fn test_namespace_elsewhere_still_patches_root() {
        let doc = r#"<!-- http://www.w3.org/2000/svg --><svg width="4" height="4"><g xmlns="http://www.w3.org/2000/svg"/></svg>"#;
        let root = SvgRoot::parse(doc).unwrap();
        let offset = root.namespace_at.unwrap();
        assert_eq!(&doc[offset - 4..offset], "<svg");
    }

    #[test]
    fn test_declared_size_kinds() {
        let view_box = SvgRoot::parse(r#"<svg viewBox="0 0 200 100" width="10" height="10"/>"#);
        assert_eq!(view_box.unwrap().size, DeclaredSize::ViewBox(200.0, 100.0));

        let absolute = SvgRoot::parse(r#"<svg width="30px" height="2in"/>"#);
        assert_eq!(absolute.unwrap().size, DeclaredSize::Absolute);

        for doc in [
            r#"<svg/>"#,
            r#"<svg width="30"/>"#,
            r#"<svg width="100%" height="100%"/>"#,
            r#"<svg viewBox="0 0 0 10"/>"#,
        ] {
            assert_eq!(SvgRoot::parse(doc).unwrap().size, DeclaredSize::Missing, "{}", doc);
        }
    }
}
