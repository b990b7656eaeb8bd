//! Run-level performance metrics.

use dn_core::RouteId;

/// Timing of one completed route.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryRecord {
    pub route_id:   RouteId,
    pub day:        u32,
    pub stops:      usize,
    /// Minutes since run start.
    pub start_time: f64,
    pub end_time:   f64,
    pub duration:   f64,
}

/// Metrics accumulated over one simulation run.
///
/// Only ever grows during a run: counters increase and sequences are
/// append-only.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerformanceMetrics {
    pub deliveries_completed: u64,
    /// Kilometres over every completed leg.
    pub total_distance:       f64,
    /// Duration (minutes) of each completed delivery, in completion order.
    pub delivery_times:       Vec<f64>,
    pub routes_dispatched:    u64,
    pub legs_completed:       u64,
    pub records:              Vec<DeliveryRecord>,
}

impl PerformanceMetrics {
    pub fn record_leg(&mut self, km: f64) {
        self.total_distance += km;
        self.legs_completed += 1;
    }

    pub fn record_delivery(&mut self, record: DeliveryRecord) {
        self.deliveries_completed += 1;
        self.delivery_times.push(record.duration);
        self.records.push(record);
    }

    /// Deliveries dispatched but not completed when the run halted.
    pub fn in_flight(&self) -> u64 {
        self.routes_dispatched - self.deliveries_completed
    }

    pub fn mean_delivery_time(&self) -> Option<f64> {
        if self.delivery_times.is_empty() {
            return None;
        }
        Some(self.delivery_times.iter().sum::<f64>() / self.delivery_times.len() as f64)
    }

    pub fn max_delivery_time(&self) -> Option<f64> {
        self.delivery_times.iter().copied().reduce(f64::max)
    }
}
