//! defines data description

use num_traits::float::Float;

use std::fmt::Debug;

use crate::error::SpannerError;

/// data identifier, it is the rank of the point in its set
pub type PointId = usize;

#[derive(Debug, Clone)]
pub struct Point<T> {
    // id to identify points as coming from external client.
    id: PointId,
    /// data point
    p: Vec<T>,
    /// original label
    label: u32,
}

impl<T> Point<T>
where
    T: Float + Debug,
{
    ///a point is characterized by its Id (in fact a rank)
    pub fn new(id: PointId, p: Vec<T>, label: u32) -> Self {
        Point { id, p, label }
    }
    /// get the original label
    pub fn get_label(&self) -> u32 {
        self.label
    }

    /// get id
    pub fn get_id(&self) -> PointId {
        self.id
    }

    /// gets the points coordinate
    pub fn get_position(&self) -> &[T] {
        &self.p
    }

    pub fn get_dimension(&self) -> usize {
        self.p.len()
    }
} // end of impl Point

//==========================================

/// Euclidean distance between two coordinate slices of same length
#[inline]
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .fold(0., |acc, (x, y)| acc + (x - y) * (x - y))
        .sqrt()
}

/// A validated set of points: all points have the same dimension and finite coordinates.
/// Coordinates are kept in a flat f64 array (row major) on which all geometry is done.
#[derive(Debug, Clone)]
pub struct PointSet<T> {
    dim: usize,
    points: Vec<Point<T>>,
    // nb_points * dim coordinates converted to f64
    coords: Vec<f64>,
}

impl<T> PointSet<T>
where
    T: Float + Debug,
{
    /// builds a set from points. Point ids must be their rank in the vector.
    pub fn new(dim: usize, points: Vec<Point<T>>) -> Result<Self, SpannerError> {
        if dim == 0 {
            return Err(SpannerError::InvalidConfig(String::from(
                "dimension must be positive",
            )));
        }
        if points.is_empty() {
            return Err(SpannerError::InvalidInput(String::from("empty point set")));
        }
        let mut coords = Vec::<f64>::with_capacity(dim * points.len());
        for (rank, point) in points.iter().enumerate() {
            if point.get_id() != rank {
                return Err(SpannerError::InvalidInput(format!(
                    "point at rank {} has id {}",
                    rank,
                    point.get_id()
                )));
            }
            if point.get_dimension() != dim {
                return Err(SpannerError::InvalidInput(format!(
                    "point {} has dimension {}, expected {}",
                    rank,
                    point.get_dimension(),
                    dim
                )));
            }
            for (i, xi) in point.get_position().iter().enumerate() {
                match xi.to_f64() {
                    Some(x) if x.is_finite() => coords.push(x),
                    _ => {
                        log::error!("point {} has non finite coordinate {} : {:?}", rank, i, xi);
                        return Err(SpannerError::InvalidInput(format!(
                            "point {} has non finite coordinate at index {}",
                            rank, i
                        )));
                    }
                }
            }
        }
        Ok(PointSet {
            dim,
            points,
            coords,
        })
    }

    /// builds a set from raw coordinates, labels are set to 0
    pub fn from_vecs(dim: usize, data: &[Vec<T>]) -> Result<Self, SpannerError> {
        let points = data
            .iter()
            .enumerate()
            .map(|(i, v)| Point::new(i, v.clone(), 0))
            .collect();
        PointSet::new(dim, points)
    }

    /// builds a set from raw coordinates and original labels
    pub fn from_labelled(
        dim: usize,
        data: &[Vec<T>],
        labels: &[u32],
    ) -> Result<Self, SpannerError> {
        if data.len() != labels.len() {
            return Err(SpannerError::InvalidInput(format!(
                "{} points but {} labels",
                data.len(),
                labels.len()
            )));
        }
        let points = data
            .iter()
            .zip(labels.iter())
            .enumerate()
            .map(|(i, (v, l))| Point::new(i, v.clone(), *l))
            .collect();
        PointSet::new(dim, points)
    }

    /// return space dimension
    pub fn get_dim(&self) -> usize {
        self.dim
    }

    pub fn get_nb_points(&self) -> usize {
        self.points.len()
    }

    pub fn get_point(&self, id: PointId) -> &Point<T> {
        &self.points[id]
    }

    /// coordinates of point id, as f64
    #[inline]
    pub fn get_coords(&self, id: PointId) -> &[f64] {
        &self.coords[id * self.dim..(id + 1) * self.dim]
    }

    /// coordinate along axis of point id
    #[inline]
    pub fn get(&self, id: PointId, axis: usize) -> f64 {
        self.coords[id * self.dim + axis]
    }

    /// Euclidean distance between points u and v
    pub fn dist(&self, u: PointId, v: PointId) -> f64 {
        euclidean(self.get_coords(u), self.get_coords(v))
    }

    /// original labels in point order
    pub fn get_labels(&self) -> Vec<u32> {
        self.points.iter().map(|p| p.get_label()).collect()
    }
} // end of impl PointSet

//========================================================
