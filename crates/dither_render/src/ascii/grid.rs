use serde::Serialize;

/// One glyph draw instruction, anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GlyphPlacement {
    pub glyph: char,
    pub x: f64,
    pub y: f64,
}

impl GlyphPlacement {
    pub fn new(glyph: char, x: f64, y: f64) -> Self {
        Self { glyph, x, y }
    }
}

/// Iterates grid coordinates `0, pitch, 2 * pitch, ..` below `limit`.
///
/// Coordinates accumulate by repeated addition so fractional pitches land on
/// the same positions as a host that steps its loop the same way.
pub(crate) fn axis(limit: f64, pitch: f64) -> impl Iterator<Item = f64> {
    std::iter::successors(Some(0.0), move |&v| Some(v + pitch)).take_while(move |&v| v < limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_stops_before_limit() {
        let points: Vec<f64> = axis(36.0, 12.0).collect();
        assert_eq!(points, vec![0.0, 12.0, 24.0]);

        let points: Vec<f64> = axis(37.0, 12.0).collect();
        assert_eq!(points, vec![0.0, 12.0, 24.0, 36.0]);
    }

    #[test]
    fn empty_axis_yields_nothing() {
        assert_eq!(axis(0.0, 12.0).count(), 0);
    }
}
