// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborators consulted during a solve: text measurement and the viewport.

use kurbo::Size;

use crate::style::FontId;

/// Measures a single line of text.
///
/// Implemented for closures with the same signature:
///
/// ```
/// use kurbo::Size;
/// use understory_flex::{FontId, TextMeasure};
///
/// let measure = |_font: FontId, text: &str, size: f64, _spacing: f64| {
///     Size::new(text.len() as f64 * size * 0.5, size)
/// };
/// assert_eq!(measure.measure(FontId(0), "abcd", 10.0, 0.0), Size::new(20.0, 10.0));
/// ```
pub trait TextMeasure {
    /// Return the `(width, height)` of `text` set in `font` at `size` with `spacing`
    /// extra pixels between glyphs.
    fn measure(&self, font: FontId, text: &str, size: f64, spacing: f64) -> Size;
}

impl<F> TextMeasure for F
where
    F: Fn(FontId, &str, f64, f64) -> Size,
{
    fn measure(&self, font: FontId, text: &str, size: f64, spacing: f64) -> Size {
        self(font, text, size, spacing)
    }
}

/// A fixed-advance measurer for tests, tools and placeholder fonts.
///
/// Width is `chars × (size × advance + spacing) − spacing`, height is
/// `size × line_height`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MonospaceMeasure {
    /// Glyph advance as a fraction of the font size.
    pub advance: f64,
    /// Line height as a fraction of the font size.
    pub line_height: f64,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self {
            advance: 0.5,
            line_height: 1.2,
        }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&self, _font: FontId, text: &str, size: f64, spacing: f64) -> Size {
        let glyphs = text.chars().count();
        if glyphs == 0 {
            return Size::new(0.0, size * self.line_height);
        }
        let n = glyphs as f64;
        let width = n * (size * self.advance + spacing) - spacing;
        Size::new(width.max(0.0), size * self.line_height)
    }
}

/// Supplies the current viewport extent.
pub trait ViewportProvider {
    /// The viewport `(width, height)` in pixels.
    fn current_extent(&self) -> Size;
}

impl ViewportProvider for Size {
    fn current_extent(&self) -> Size {
        *self
    }
}

/// Collaborators for one solve.
///
/// A missing text measurer is allowed: text-sized nodes then resolve to zero and a
/// configuration warning is reported.
#[derive(Copy, Clone)]
pub struct LayoutContext<'a> {
    /// Viewport extent source.
    pub viewport: &'a dyn ViewportProvider,
    /// Text measurer, if one is installed.
    pub text: Option<&'a dyn TextMeasure>,
}

impl core::fmt::Debug for LayoutContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LayoutContext")
            .field("viewport", &self.viewport.current_extent())
            .field("text", &self.text.is_some())
            .finish()
    }
}

impl<'a> LayoutContext<'a> {
    /// A context without text measurement.
    pub fn new(viewport: &'a dyn ViewportProvider) -> Self {
        Self {
            viewport,
            text: None,
        }
    }

    /// Install a text measurer.
    pub fn with_text(mut self, text: &'a dyn TextMeasure) -> Self {
        self.text = Some(text);
        self
    }
}
