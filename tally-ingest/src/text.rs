//! Positioned-text model: pages of decoded runs with absolute coordinates.
//!
//! The decoder reports runs in decode order, which is not layout order.
//! `row` and `column` recover layout order by grouping on one coordinate and
//! sorting along the other. Matching is exact: statements lay out their
//! tables on consistent baselines, so equal coordinates mean the same line
//! or the same column. A decoder with sub-pixel jitter must be normalized
//! through `quantize` before any grouping.

use serde::{Deserialize, Serialize};

/// One decoded run of text at an absolute page position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// One page of a statement, in decode order.
pub type Page = Vec<Fragment>;

/// Coordinate snap step applied by default: zero, i.e. no snapping.
pub const DEFAULT_SNAP_STEP: f64 = 0.0;

/// Fragments on one baseline: exact `y` match, ascending `x`.
pub fn row(page: &[Fragment], y: f64) -> Vec<&Fragment> {
    let mut out: Vec<&Fragment> = page.iter().filter(|f| f.y == y).collect();
    out.sort_by(|a, b| a.x.total_cmp(&b.x));
    out
}

/// Fragments in one column: exact `x` match, ascending `y`.
pub fn column(page: &[Fragment], x: f64) -> Vec<&Fragment> {
    let mut out: Vec<&Fragment> = page.iter().filter(|f| f.x == x).collect();
    out.sort_by(|a, b| a.y.total_cmp(&b.y));
    out
}

/// Snap every coordinate to the nearest multiple of `step`.
///
/// `step == 0` leaves the pages untouched.
pub fn quantize(pages: &mut [Page], step: f64) {
    if step == 0.0 {
        return;
    }
    for page in pages {
        for fragment in page {
            fragment.x = (fragment.x / step).round() * step;
            fragment.y = (fragment.y / step).round() * step;
        }
    }
}
