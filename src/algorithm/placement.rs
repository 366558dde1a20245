//! Rejection-sampling marker placement with a minimum pairwise distance
//!
//! The grid is swept in row-major order. Every open, unoccupied cell draws one
//! uniform value and becomes a candidate only when the draw falls below the
//! candidate probability, which spreads markers across the map instead of
//! filling the first rows. A candidate closer than the minimum separation to
//! any marker is rejected. Sweeps repeat until enough markers are placed or
//! the sweep budget runs out.

use rand::Rng;
use tracing::{debug, warn};

use crate::io::configuration::{
    ARENA_MAX_COUNT, ARENA_MIN_SEPARATION, DEFAULT_CANDIDATE_PROBABILITY, DEFAULT_MAX_COUNT,
    DEFAULT_MAX_SWEEPS, DEFAULT_MIN_SEPARATION,
};
use crate::io::error::{LevelError, Result, invalid_parameter};
use crate::spatial::distance::{DistanceMetric, Octile};
use crate::spatial::grid::{Entity, Grid, Position};

/// Limits on where and how many markers are placed
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementConstraint {
    /// Smallest allowed metric distance between two markers
    pub min_separation: f64,
    /// Most markers a single placement call adds
    pub max_count: usize,
    /// Chance that an eligible cell is considered during a sweep
    pub candidate_probability: f64,
}

impl Default for PlacementConstraint {
    fn default() -> Self {
        Self {
            min_separation: DEFAULT_MIN_SEPARATION,
            max_count: DEFAULT_MAX_COUNT,
            candidate_probability: DEFAULT_CANDIDATE_PROBABILITY,
        }
    }
}

impl PlacementConstraint {
    /// A handful of markers that only need distinct cells, sized for small arenas
    pub const fn arena() -> Self {
        Self {
            min_separation: ARENA_MIN_SEPARATION,
            max_count: ARENA_MAX_COUNT,
            candidate_probability: DEFAULT_CANDIDATE_PROBABILITY,
        }
    }

    /// Check that every field is usable
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the separation is negative or not finite,
    /// or the candidate probability is outside `(0, 1]`
    pub fn validate(&self) -> Result<()> {
        if !self.min_separation.is_finite() || self.min_separation < 0.0 {
            return Err(invalid_parameter(
                "min_separation",
                &self.min_separation,
                &"must be a finite value of at least 0",
            ));
        }
        if !(self.candidate_probability > 0.0 && self.candidate_probability <= 1.0) {
            return Err(invalid_parameter(
                "candidate_probability",
                &self.candidate_probability,
                &"must be greater than 0 and at most 1",
            ));
        }
        Ok(())
    }
}

/// Outcome of a successful placement
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementReport {
    /// Markers added, in placement order
    pub placed: Vec<Position>,
    /// Full-grid sweeps used
    pub sweeps: u32,
}

/// Places markers on open cells under a `PlacementConstraint`
#[derive(Clone, Debug)]
pub struct EntityPlacer<M = Octile> {
    constraint: PlacementConstraint,
    max_sweeps: u32,
    metric: M,
}

impl EntityPlacer {
    /// Create a placer using octile distance
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the constraint is invalid or `max_sweeps` is zero
    pub fn new(constraint: PlacementConstraint, max_sweeps: u32) -> Result<Self> {
        Self::with_metric(constraint, max_sweeps, Octile)
    }
}

impl Default for EntityPlacer {
    fn default() -> Self {
        Self {
            constraint: PlacementConstraint::default(),
            max_sweeps: DEFAULT_MAX_SWEEPS,
            metric: Octile,
        }
    }
}

impl<M: DistanceMetric> EntityPlacer<M> {
    /// Create a placer with a custom distance metric
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the constraint is invalid or `max_sweeps` is zero
    pub fn with_metric(constraint: PlacementConstraint, max_sweeps: u32, metric: M) -> Result<Self> {
        constraint.validate()?;
        if max_sweeps == 0 {
            return Err(invalid_parameter(
                "max_sweeps",
                &max_sweeps,
                &"must be at least 1",
            ));
        }
        Ok(Self {
            constraint,
            max_sweeps,
            metric,
        })
    }

    /// Constraint this placer enforces
    pub const fn constraint(&self) -> &PlacementConstraint {
        &self.constraint
    }

    /// Sweep budget before giving up
    pub const fn max_sweeps(&self) -> u32 {
        self.max_sweeps
    }

    /// Whether `candidate` keeps at least the minimum separation from every marker
    pub fn is_separated<'a>(
        &self,
        candidate: Position,
        markers: impl IntoIterator<Item = &'a Position>,
    ) -> bool {
        markers.into_iter().all(|&marker| {
            f64::from(self.metric.distance(candidate, marker)) >= self.constraint.min_separation
        })
    }

    /// Scatter markers over the open cells of `grid`
    ///
    /// Markers already on the grid take part in separation checks but do not
    /// count towards `max_count`. The spawn cell never receives a marker. The
    /// grid is only modified when placement succeeds.
    ///
    /// # Errors
    ///
    /// Returns `PlacementUnsatisfiable` when `max_count` markers could not be
    /// placed within `max_sweeps` sweeps, or as soon as a sweep finds no
    /// eligible cell at all
    pub fn place<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) -> Result<PlacementReport> {
        let requested = self.constraint.max_count;
        if requested == 0 {
            return Ok(PlacementReport {
                placed: Vec::new(),
                sweeps: 0,
            });
        }

        let existing = grid.markers();
        let spawn = grid.spawn_cell();
        let mut placed: Vec<Position> = Vec::with_capacity(requested);
        let mut sweeps = 0;

        while sweeps < self.max_sweeps {
            sweeps += 1;
            let mut eligible = 0_usize;
            let mut rejected = 0_usize;

            for pos in grid.positions() {
                if pos == spawn
                    || !grid.is_open(pos)
                    || grid.has_marker(pos)
                    || placed.contains(&pos)
                {
                    continue;
                }
                eligible += 1;

                if rng.random::<f64>() >= self.constraint.candidate_probability {
                    continue;
                }
                if !self.is_separated(pos, existing.iter().chain(&placed)) {
                    rejected += 1;
                    continue;
                }

                placed.push(pos);
                if placed.len() == requested {
                    break;
                }
            }

            debug!(sweep = sweeps, eligible, rejected, placed = placed.len(), "placement sweep");

            if placed.len() == requested {
                for &pos in &placed {
                    grid.set_entity(pos, Entity::Marker)?;
                }
                return Ok(PlacementReport { placed, sweeps });
            }
            if eligible == 0 {
                break;
            }
        }

        warn!(
            placed = placed.len(),
            requested,
            sweeps,
            "marker placement unsatisfiable"
        );
        Err(LevelError::PlacementUnsatisfiable {
            placed: placed.len(),
            requested,
            sweeps,
        })
    }
}
