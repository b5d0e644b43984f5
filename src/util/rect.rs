use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in integer play-area pixels.
///
/// `x`/`y` is the top-left corner; y grows downward.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub const fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub const fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub const fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    #[inline]
    pub const fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    /// Strict overlap test: rectangles that merely share an edge do not
    /// count as overlapping.
    #[inline]
    pub const fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Returns a copy shifted by the given offsets.
    #[inline]
    pub const fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            w: self.w,
            h: self.h,
        }
    }

    /// Returns a copy clamped so that it lies fully inside `bounds`.
    ///
    /// Assumes `self` is no larger than `bounds` on either axis.
    pub fn clamp_within(&self, bounds: &Rect) -> Self {
        Self {
            x: self.x.clamp(bounds.x, bounds.right() - self.w),
            y: self.y.clamp(bounds.y, bounds.bottom() - self.h),
            w: self.w,
            h: self.h,
        }
    }
}
