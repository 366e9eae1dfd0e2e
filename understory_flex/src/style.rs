// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declared layout style of a node, and its text content.

use alloc::string::String;
use kurbo::Vec2;

use crate::size::{SizeBounds, SizeExpression};
use crate::types::{Axis, Sides};

/// Direction children are laid out in. Defines the main axis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum FlexDirection {
    /// Children flow left to right; the main axis is horizontal.
    #[default]
    Row,
    /// Children flow top to bottom; the main axis is vertical.
    Column,
}

impl FlexDirection {
    /// The main axis of this direction.
    #[inline]
    pub const fn main_axis(self) -> Axis {
        match self {
            Self::Row => Axis::Horizontal,
            Self::Column => Axis::Vertical,
        }
    }
}

/// Main-axis distribution of children within a line.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum JustifyContent {
    /// Pack from the start of the content box.
    #[default]
    FlexStart,
    /// Pack against the end of the content box.
    FlexEnd,
    /// Split free space evenly before the first and after the last child.
    Center,
    /// Equal gaps strictly between children. With zero or one child this is
    /// [`JustifyContent::FlexStart`].
    SpaceBetween,
}

/// Cross-axis alignment of children within a line.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum AlignItems {
    /// Align to the cross start.
    #[default]
    FlexStart,
    /// Align to the cross end.
    FlexEnd,
    /// Center on the cross axis.
    Center,
    /// Grow non-exact cross sizes to the parent's cross content size.
    ///
    /// The target is the whole content box even when children wrap, so each
    /// stretched line is as tall as the parent and later lines overflow.
    Stretch,
}

/// Per-child override of the parent's [`AlignItems`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum AlignSelf {
    /// Use the parent's `align_items`.
    #[default]
    Auto,
    /// See [`AlignItems::FlexStart`].
    FlexStart,
    /// See [`AlignItems::FlexEnd`].
    FlexEnd,
    /// See [`AlignItems::Center`].
    Center,
    /// See [`AlignItems::Stretch`].
    Stretch,
}

impl AlignSelf {
    /// The effective alignment given the parent's `align_items`.
    #[inline]
    pub const fn resolve(self, parent: AlignItems) -> AlignItems {
        match self {
            Self::Auto => parent,
            Self::FlexStart => AlignItems::FlexStart,
            Self::FlexEnd => AlignItems::FlexEnd,
            Self::Center => AlignItems::Center,
            Self::Stretch => AlignItems::Stretch,
        }
    }
}

/// Whether children may break onto further lines.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum FlexWrap {
    /// Keep a single line; overflow is reported, not corrected.
    #[default]
    NoWrap,
    /// Start a new line when the next child would exceed the main content extent.
    Wrap,
}

/// How a node is positioned inside its parent.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Positioning {
    /// Placed by the parent's flex flow.
    #[default]
    Flow,
    /// Out of flow, at this offset from the parent's content-box origin.
    Absolute(Vec2),
}

impl Positioning {
    /// Whether the node is out of flow.
    #[inline]
    pub const fn is_absolute(self) -> bool {
        matches!(self, Self::Absolute(_))
    }
}

/// Declared layout style of a node.
///
/// Built by named-field construction:
///
/// ```
/// use understory_flex::{BoxStyle, FlexDirection, SizeExpression, Sides};
///
/// let panel = BoxStyle {
///     width: SizeExpression::percent(0.5),
///     height: SizeExpression::children(),
///     padding: Sides::all(SizeExpression::px(8.0)),
///     flex_direction: FlexDirection::Column,
///     ..Default::default()
/// };
/// assert!(panel.width.is_exact());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoxStyle {
    /// Requested width.
    pub width: SizeExpression,
    /// Requested height.
    pub height: SizeExpression,
    /// Bounds applied to the resolved width.
    pub width_bounds: SizeBounds,
    /// Bounds applied to the resolved height.
    pub height_bounds: SizeBounds,
    /// Space between the node's edge and its content box.
    pub padding: Sides<SizeExpression>,
    /// Space reserved around the node in its parent's flow.
    pub margin: Sides<SizeExpression>,
    /// Main axis for children.
    pub flex_direction: FlexDirection,
    /// Main-axis distribution of children.
    pub justify_content: JustifyContent,
    /// Cross-axis alignment of children.
    pub align_items: AlignItems,
    /// Override of the parent's `align_items` for this node.
    pub align_self: AlignSelf,
    /// Line breaking of children.
    pub flex_wrap: FlexWrap,
    /// Flow or absolute positioning.
    pub position: Positioning,
}

impl BoxStyle {
    /// Requested size on `axis`.
    #[inline]
    pub fn size(&self, axis: Axis) -> SizeExpression {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Bounds on `axis`.
    #[inline]
    pub fn bounds(&self, axis: Axis) -> SizeBounds {
        match axis {
            Axis::Horizontal => self.width_bounds,
            Axis::Vertical => self.height_bounds,
        }
    }

    /// Main axis for children.
    #[inline]
    pub fn main_axis(&self) -> Axis {
        self.flex_direction.main_axis()
    }
}

/// Identifier of a font known to the text-measurement collaborator.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct FontId(pub u32);

/// Text content of a node sized with [`SizeExpression::text`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextSpec {
    /// Font to measure with. Unset falls back to [`FontId::default`] with a warning.
    pub font: Option<FontId>,
    /// The label.
    pub text: String,
    /// Font size in pixels.
    pub size: f64,
    /// Extra spacing between glyphs in pixels.
    pub spacing: f64,
}

impl TextSpec {
    /// A label in `font` at `size` with no extra spacing.
    pub fn new(font: FontId, text: impl Into<String>, size: f64) -> Self {
        Self {
            font: Some(font),
            text: text.into(),
            size,
            spacing: 0.0,
        }
    }
}
