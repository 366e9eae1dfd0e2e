// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dimension requests and their resolution.

/// The kind of a [`SizeExpression`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum SizeKind {
    /// A literal pixel value.
    Pixels,
    /// A fraction of the parent's content extent on the same axis (`0.5` is half).
    Percent,
    /// A fraction of the viewport extent on the same axis.
    Viewport,
    /// Derived from the node's children.
    Children,
    /// Derived from the node's measured text.
    Text,
    /// No request. Sized like [`SizeKind::Children`] and eligible for stretching.
    #[default]
    Unconstrained,
}

/// A dimension request: a kind plus a number.
///
/// The number is only read for [`SizeKind::Pixels`], [`SizeKind::Percent`] and
/// [`SizeKind::Viewport`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SizeExpression {
    /// What the value refers to.
    pub kind: SizeKind,
    /// The requested amount.
    pub value: f64,
}

impl SizeExpression {
    /// No request.
    pub const UNCONSTRAINED: Self = Self::new(SizeKind::Unconstrained, 0.0);
    /// Zero pixels.
    pub const ZERO: Self = Self::px(0.0);

    /// Build an expression from its parts.
    pub const fn new(kind: SizeKind, value: f64) -> Self {
        Self { kind, value }
    }

    /// A literal pixel value.
    pub const fn px(value: f64) -> Self {
        Self::new(SizeKind::Pixels, value)
    }

    /// A fraction of the parent's content extent.
    pub const fn percent(fraction: f64) -> Self {
        Self::new(SizeKind::Percent, fraction)
    }

    /// A fraction of the viewport extent.
    pub const fn viewport(fraction: f64) -> Self {
        Self::new(SizeKind::Viewport, fraction)
    }

    /// Intrinsic size from children.
    pub const fn children() -> Self {
        Self::new(SizeKind::Children, 0.0)
    }

    /// Intrinsic size from measured text.
    pub const fn text() -> Self {
        Self::new(SizeKind::Text, 0.0)
    }

    /// Whether this request fixes an exact value once its reference extent is known.
    pub const fn is_exact(self) -> bool {
        matches!(
            self.kind,
            SizeKind::Pixels | SizeKind::Percent | SizeKind::Viewport
        )
    }

    /// Whether this request is derived from content.
    pub const fn is_intrinsic(self) -> bool {
        !self.is_exact()
    }

    /// Resolve to pixels.
    ///
    /// `parent` is the parent's content extent on the same axis, or `None` while it is
    /// still unknown (percent requests then resolve to zero). `intrinsic` is the
    /// content-derived size used by the intrinsic kinds.
    pub fn resolve(self, parent: Option<f64>, viewport: f64, intrinsic: f64) -> f64 {
        match self.kind {
            SizeKind::Pixels => self.value,
            SizeKind::Percent => parent.map_or(0.0, |extent| self.value * extent),
            SizeKind::Viewport => self.value * viewport,
            SizeKind::Children | SizeKind::Text | SizeKind::Unconstrained => intrinsic,
        }
    }

    /// Resolve a padding or margin side. Intrinsic kinds have no meaning there and
    /// resolve to zero.
    pub fn resolve_inset(self, parent: Option<f64>, viewport: f64) -> f64 {
        self.resolve(parent, viewport, 0.0)
    }
}

/// Optional lower and upper bounds on one axis. Unset bounds are unbounded.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SizeBounds {
    /// Lower bound.
    pub min: Option<f64>,
    /// Upper bound.
    pub max: Option<f64>,
}

impl SizeBounds {
    /// No bounds.
    pub const UNBOUNDED: Self = Self {
        min: None,
        max: None,
    };

    /// Clamp `value` into the bounds. When `min > max`, `min` wins.
    pub fn clamp(self, value: f64) -> f64 {
        let mut v = value;
        if let Some(max) = self.max {
            v = v.min(max);
        }
        if let Some(min) = self.min {
            v = v.max(min);
        }
        v
    }
}
