//! Synthetic clouds made of well separated groups of points, used to check clustering.
//!
//! Groups are centered on the nodes of a regular grid, so the distance between two group centers
//! is at least spacing * radius.

use rand::SeedableRng;
use rand::distr::{Distribution, Uniform};
use rand_distr::Normal;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::error::SpannerError;

/// distribution of points around their group center
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GroupShape {
    /// uniform in the cube of half width radius
    Uniform,
    /// each coordinate gaussian with standard deviation radius/2
    Gaussian,
}

/// points and the rank of the group that generated each of them
#[derive(Debug, Clone)]
pub struct Cloud {
    pub points: Vec<Vec<f64>>,
    pub labels: Vec<u32>,
}

impl Cloud {
    pub fn get_nb_points(&self) -> usize {
        self.points.len()
    }
}

// smallest side such that side^dim >= nb_groups
fn grid_side(dim: usize, nb_groups: usize) -> usize {
    let mut side = 1usize;
    while u32::try_from(dim)
        .ok()
        .and_then(|d| side.checked_pow(d))
        .is_some_and(|nb_nodes| nb_nodes < nb_groups)
    {
        side += 1;
    }
    side
}

/// center of group rank on the grid, first axis is the most significant digit
pub fn group_center(
    dim: usize,
    nb_groups: usize,
    rank: usize,
    radius: f64,
    spacing: f64,
) -> Vec<f64> {
    let side = grid_side(dim, nb_groups);
    let mut center = vec![0f64; dim];
    let mut rem = rank;
    for axis in (0..dim).rev() {
        center[axis] = (rem % side) as f64 * spacing * radius;
        rem /= side;
    }
    center
}

/// generates nb_groups groups of group_size points each, in dimension dim.
/// Group centers lie on a grid with step spacing * radius.
/// The generator is seeded so that clouds are reproducible.
pub fn grid_groups(
    dim: usize,
    nb_groups: usize,
    group_size: usize,
    radius: f64,
    spacing: f64,
    shape: GroupShape,
    seed: u64,
) -> Result<Cloud, SpannerError> {
    if dim == 0 || nb_groups == 0 || group_size == 0 {
        return Err(SpannerError::InvalidConfig(format!(
            "cloud needs dim, nb groups and group size > 0, got {}, {}, {}",
            dim, nb_groups, group_size
        )));
    }
    if !(radius.is_finite() && radius > 0. && spacing.is_finite() && spacing > 0.) {
        return Err(SpannerError::InvalidConfig(format!(
            "bad radius {} or spacing {}",
            radius, spacing
        )));
    }
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let uniform =
        Uniform::new(-radius, radius).map_err(|e| SpannerError::InvalidConfig(e.to_string()))?;
    let normal =
        Normal::new(0., radius / 2.).map_err(|e| SpannerError::InvalidConfig(e.to_string()))?;
    //
    let nb_points = nb_groups * group_size;
    let mut points = Vec::<Vec<f64>>::with_capacity(nb_points);
    let mut labels = Vec::<u32>::with_capacity(nb_points);
    for g in 0..nb_groups {
        let center = group_center(dim, nb_groups, g, radius, spacing);
        for _ in 0..group_size {
            let p: Vec<f64> = center
                .iter()
                .map(|c| match shape {
                    GroupShape::Uniform => c + uniform.sample(&mut rng),
                    GroupShape::Gaussian => c + normal.sample(&mut rng),
                })
                .collect();
            points.push(p);
            labels.push(g as u32);
        }
    }
    log::debug!(
        "generated {} groups of {} points in dim {}, grid side {}",
        nb_groups,
        group_size,
        dim,
        grid_side(dim, nb_groups)
    );
    Ok(Cloud { points, labels })
} // end of grid_groups
