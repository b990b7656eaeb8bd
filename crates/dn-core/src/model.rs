//! Supply and demand nodes of the distribution network.
//!
//! Both types are plain immutable records.  Nothing in the toolkit mutates a
//! `Depot` or `DemandPoint` after construction; downstream components index
//! them by their position in the input slice.

use rustc_hash::FxHashSet;

use crate::{DepotId, DnError, DnResult, GeoPoint, PointId};

/// A supply node with finite shipping capacity.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Depot {
    pub id:       DepotId,
    pub capacity: f64,
    pub location: GeoPoint,
}

impl Depot {
    pub fn new(id: u32, capacity: f64, location: impl Into<GeoPoint>) -> Self {
        Self { id: DepotId(id), capacity, location: location.into() }
    }
}

/// A demand node requiring a quantity of goods.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemandPoint {
    pub id:       PointId,
    pub demand:   f64,
    pub location: GeoPoint,
}

impl DemandPoint {
    pub fn new(id: u32, demand: f64, location: impl Into<GeoPoint>) -> Self {
        Self { id: PointId(id), demand, location: location.into() }
    }
}

/// Validate a depot/demand-point batch as a whole.
///
/// Any malformed record rejects the entire batch:
///
/// - empty depot or demand-point list → [`DnError::Configuration`]
/// - out-of-range coordinates, negative or non-finite quantities, duplicate
///   ids → [`DnError::Validation`]
pub fn validate_network(depots: &[Depot], points: &[DemandPoint]) -> DnResult<()> {
    if depots.is_empty() {
        return Err(DnError::Configuration("depot list is empty".into()));
    }
    if points.is_empty() {
        return Err(DnError::Configuration("demand-point list is empty".into()));
    }

    let mut seen_depots = FxHashSet::default();
    for depot in depots {
        depot.location.validate().map_err(|e| context(e, depot.id))?;
        check_quantity(depot.capacity, "capacity", depot.id)?;
        if !seen_depots.insert(depot.id) {
            return Err(DnError::Validation(format!("duplicate depot id {}", depot.id)));
        }
    }

    let mut seen_points = FxHashSet::default();
    for point in points {
        point.location.validate().map_err(|e| context(e, point.id))?;
        check_quantity(point.demand, "demand", point.id)?;
        if !seen_points.insert(point.id) {
            return Err(DnError::Validation(format!("duplicate demand-point id {}", point.id)));
        }
    }
    Ok(())
}

fn check_quantity(value: f64, what: &str, owner: impl std::fmt::Display) -> DnResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DnError::Validation(format!("{owner}: {what} {value} must be finite and >= 0")));
    }
    Ok(())
}

fn context(err: DnError, owner: impl std::fmt::Display) -> DnError {
    match err {
        DnError::Validation(msg) => DnError::Validation(format!("{owner}: {msg}")),
        other => other,
    }
}
