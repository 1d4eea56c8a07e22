//! Value types for gesture recognition.
//!
//! A [`Gesture`] is what the capture surface produces: strokes in drawing
//! order. The recognizer only ever works on a [`Path`], the flattened,
//! non-empty point sequence obtained with [`Gesture::flatten`].

use std::fmt;
use std::ops::{Add, Mul, Sub};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::errors::GeometryError;

/// A point in the plane.
///
/// Serialized as a two-element `[x, y]` array.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to `other`
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        self.vec().distance(other.vec())
    }

    /// Point at fraction `t` of the way from `self` to `other`
    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        self.vec().lerp(other.vec(), t).into()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub(crate) fn vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Point { x: v.x, y: v.y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Point { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Angle in degrees
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle(pub f64);

impl Angle {
    #[inline]
    pub const fn degrees(val: f64) -> Angle {
        Angle(val)
    }

    #[inline]
    pub fn from_radians(rad: f64) -> Angle {
        Angle(rad.to_degrees())
    }

    #[inline]
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }

    /// Get the raw value in degrees
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl BBox {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: Point::new(f64::MAX, f64::MAX),
            max: Point::new(f64::MIN, f64::MIN),
        }
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

impl Default for BBox {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Point> for BBox {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut bbox = BBox::new();
        for p in iter {
            bbox.expand_point(p);
        }
        bbox
    }
}

/// An ordered, non-empty sequence of finite points.
///
/// Raw strokes, flattened gestures and normalized templates are all paths.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    /// Create a path, rejecting empty input and non-finite coordinates.
    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        if points.is_empty() {
            return Err(GeometryError::EmptyPath);
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(GeometryError::NonFiniteCoordinate { index });
        }
        Ok(Path { points })
    }

    /// Build a path whose points are known to be non-empty and finite.
    #[inline]
    pub(crate) fn from_vec_unchecked(points: Vec<Point>) -> Self {
        debug_assert!(!points.is_empty(), "path must have at least one point");
        Path { points }
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points (always at least one)
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn first(&self) -> Point {
        self.points[0]
    }

    #[inline]
    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Build a path from transformed points, rejecting any that overflowed.
    pub(crate) fn from_computed(points: Vec<Point>) -> Result<Self, GeometryError> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(GeometryError::Overflow { index });
        }
        Ok(Path::from_vec_unchecked(points))
    }

    /// Apply `f` to every point, keeping the order.
    pub(crate) fn map(&self, f: impl FnMut(Point) -> Point) -> Result<Path, GeometryError> {
        Path::from_computed(self.points.iter().copied().map(f).collect())
    }

    pub(crate) fn map_unchecked(&self, f: impl FnMut(Point) -> Point) -> Path {
        Path::from_vec_unchecked(self.points.iter().copied().map(f).collect())
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl TryFrom<Vec<Point>> for Path {
    type Error = GeometryError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Path::new(points)
    }
}

/// One continuous pen-down to pen-up trace.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<Point> for Stroke {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Stroke {
            points: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Point>> for Stroke {
    fn from(points: Vec<Point>) -> Self {
        Stroke { points }
    }
}

/// Strokes in drawing order.
///
/// Built point by point by a capture surface: [`Gesture::add_point`] extends
/// the stroke in progress and [`Gesture::end_stroke`] closes it.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Gesture {
    strokes: Vec<Stroke>,
    #[serde(skip)]
    pen_down: bool,
}

impl Gesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_strokes(strokes: Vec<Stroke>) -> Self {
        Gesture {
            strokes,
            pen_down: false,
        }
    }

    /// Single-stroke gesture from raw coordinates
    pub fn from_points(points: impl IntoIterator<Item = impl Into<Point>>) -> Self {
        let stroke: Stroke = points.into_iter().map(Into::<Point>::into).collect();
        Self::from_strokes(vec![stroke])
    }

    /// Append a point to the stroke in progress, opening one if needed.
    pub fn add_point(&mut self, point: Point) {
        if !self.pen_down {
            self.strokes.push(Stroke::new());
            self.pen_down = true;
        }
        if let Some(stroke) = self.strokes.last_mut() {
            stroke.push(point);
        }
    }

    /// Close the stroke in progress. The next point starts a new stroke.
    pub fn end_stroke(&mut self) {
        self.pen_down = false;
    }

    /// Append a finished stroke.
    pub fn push_stroke(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
        self.pen_down = false;
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(Stroke::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.pen_down = false;
    }

    /// Concatenate all strokes into one path.
    ///
    /// Stroke order is kept, stroke boundaries are dropped. Empty strokes
    /// contribute nothing; a gesture without any point is an error.
    pub fn flatten(&self) -> Result<Path, GeometryError> {
        let points: Vec<Point> = self
            .strokes
            .iter()
            .flat_map(|s| s.points().iter().copied())
            .collect();
        Path::new(points)
    }
}

impl From<Path> for Gesture {
    fn from(path: Path) -> Self {
        Gesture::from_strokes(vec![Stroke::from(path.into_points())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Point tests ====================

    #[test]
    fn point_arithmetic() {
        let a = Point::new(3.0, 4.0);
        let b = Point::new(1.0, 2.0);

        assert_eq!(a + b, Point::new(4.0, 6.0));
        assert_eq!(a - b, Point::new(2.0, 2.0));
        assert_eq!(a * 2.0, Point::new(6.0, 8.0));
    }

    #[test]
    fn point_distance() {
        assert_eq!(Point::ORIGIN.distance(Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn point_lerp() {
        let p = Point::new(0.0, 0.0).lerp(Point::new(10.0, -4.0), 0.25);
        assert_eq!(p, Point::new(2.5, -1.0));
    }

    #[test]
    fn point_serializes_as_pair() {
        let json = serde_json::to_string(&Point::new(1.5, -2.0)).unwrap();
        assert_eq!(json, "[1.5,-2.0]");
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Point::new(1.5, -2.0));
    }

    // ==================== Angle tests ====================

    #[test]
    fn angle_converts_to_radians() {
        let a = Angle::degrees(180.0);
        assert!((a.to_radians() - std::f64::consts::PI).abs() < 1e-12);
        assert!((Angle::from_radians(std::f64::consts::FRAC_PI_4).raw() - 45.0).abs() < 1e-12);
    }

    // ==================== BBox tests ====================

    #[test]
    fn bbox_new_is_empty() {
        assert!(BBox::new().is_empty());
    }

    #[test]
    fn bbox_from_points() {
        let bb: BBox = [Point::new(1.0, 2.0), Point::new(5.0, 8.0), Point::new(3.0, -1.0)]
            .into_iter()
            .collect();

        assert!(!bb.is_empty());
        assert_eq!(bb.min, Point::new(1.0, -1.0));
        assert_eq!(bb.max, Point::new(5.0, 8.0));
        assert_eq!(bb.width(), 4.0);
        assert_eq!(bb.height(), 9.0);
    }

    // ==================== Path tests ====================

    #[test]
    fn path_rejects_empty() {
        assert_eq!(Path::new(vec![]), Err(GeometryError::EmptyPath));
    }

    #[test]
    fn path_rejects_non_finite() {
        let err = Path::new(vec![Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)]).unwrap_err();
        assert_eq!(err, GeometryError::NonFiniteCoordinate { index: 1 });
    }

    #[test]
    fn path_first_last() {
        let path = Path::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 0.0)])
            .unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.first(), Point::new(0.0, 0.0));
        assert_eq!(path.last(), Point::new(2.0, 0.0));
    }

    // ==================== Gesture tests ====================

    #[test]
    fn gesture_builds_strokes_incrementally() {
        let mut g = Gesture::new();
        g.add_point(Point::new(0.0, 0.0));
        g.add_point(Point::new(1.0, 0.0));
        g.end_stroke();
        g.add_point(Point::new(5.0, 5.0));
        g.end_stroke();

        assert_eq!(g.strokes().len(), 2);
        assert_eq!(g.strokes()[0].len(), 2);
        assert_eq!(g.strokes()[1].len(), 1);
        assert_eq!(g.point_count(), 3);
    }

    #[test]
    fn gesture_flatten_keeps_stroke_order() {
        let g = Gesture::from_strokes(vec![
            Stroke::from(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]),
            Stroke::new(),
            Stroke::from(vec![Point::new(2.0, 2.0)]),
        ]);
        let path = g.flatten().unwrap();
        assert_eq!(
            path.points(),
            &[Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 2.0)]
        );
    }

    #[test]
    fn gesture_flatten_empty_is_error() {
        let g = Gesture::from_strokes(vec![Stroke::new()]);
        assert!(g.is_empty());
        assert_eq!(g.flatten(), Err(GeometryError::EmptyPath));
    }

    #[test]
    fn gesture_json_shape() {
        let g = Gesture::from_points([(0.0, 1.0), (2.0, 3.0)]);
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, r#"{"strokes":[[[0.0,1.0],[2.0,3.0]]]}"#);
    }
}
