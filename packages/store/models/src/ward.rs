//! The `wards` collection document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use waste_grid_waste_models::{SeverityBucket, UrgencyLevel};

/// Maximum number of entries retained in the cleanliness history.
///
/// Oldest entries are evicted first once the cap is reached (one entry
/// per daily recompute, so roughly a quarter of history).
pub const CLEANLINESS_HISTORY_CAP: usize = 90;

/// One administrative ward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ward {
    /// Document ID.
    pub id: String,
    /// Unique ward number (1-100).
    pub ward_number: u32,
    /// Ward name.
    pub name: String,
    /// Zone label (north/south/east/west/central).
    pub zone: Option<String>,
    /// Population and area figures.
    pub demographics: Demographics,
    /// Derived cleanliness score and its history. Cache, not truth.
    pub cleanliness_index: CleanlinessIndex,
    /// Derived open-report counters. Cache, not truth.
    pub active_reports: ActiveReports,
    /// Derived overflow risk. Cache, not truth.
    pub overflow_risk: OverflowRisk,
    /// Bin counts and capacity; the capacity is the overflow denominator.
    pub infrastructure: BinInfrastructure,
    /// Rolling performance figures.
    pub performance: Performance,
}

/// Ward population and area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    /// Resident population.
    pub population: u32,
    /// Household count.
    pub households: u32,
    /// Area in square kilometres.
    pub area_sq_km: f64,
}

/// Current cleanliness score plus bounded history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanlinessIndex {
    /// Current score, 0-100.
    pub current: f64,
    /// Most recent scores, oldest first, capped at
    /// [`CLEANLINESS_HISTORY_CAP`] entries.
    pub history: Vec<CleanlinessEntry>,
}

impl Default for CleanlinessIndex {
    fn default() -> Self {
        Self {
            current: 100.0,
            history: Vec::new(),
        }
    }
}

impl CleanlinessIndex {
    /// Sets the current score and appends a history entry, evicting the
    /// oldest entries beyond the cap.
    pub fn record(&mut self, score: f64, timestamp: DateTime<Utc>, factors: CleanlinessFactors) {
        self.current = score;
        self.history.push(CleanlinessEntry {
            score,
            timestamp,
            factors,
        });
        if self.history.len() > CLEANLINESS_HISTORY_CAP {
            let excess = self.history.len() - CLEANLINESS_HISTORY_CAP;
            self.history.drain(..excess);
        }
    }
}

/// One historical cleanliness computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanlinessEntry {
    /// Score at this point, 0-100.
    pub score: f64,
    /// When it was computed.
    pub timestamp: DateTime<Utc>,
    /// The four contributing factors.
    pub factors: CleanlinessFactors,
}

/// The four factors contributing to a cleanliness score, each 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanlinessFactors {
    /// Inverse of daily report rate.
    pub report_frequency: f64,
    /// Inverse of average resolution time.
    pub resolution_speed: f64,
    /// Inverse of average severity.
    pub severity_factor: f64,
    /// Share of reports resolved.
    pub resolution_rate: f64,
}

/// Open-report counters, recomputed from the report log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveReports {
    /// Total open reports.
    pub total: u32,
    /// Open reports by lifecycle state.
    pub by_status: StatusCounts,
    /// Open reports by severity bucket.
    pub by_severity: SeverityCounts,
}

/// Open-report counts per non-terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    /// In `reported`.
    pub reported: u32,
    /// In `verified`.
    pub verified: u32,
    /// In `assigned`.
    pub assigned: u32,
    /// In `in-progress`.
    pub in_progress: u32,
}

/// Open-report counts per severity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityCounts {
    /// Severity 1-2.
    pub low: u32,
    /// Severity 3.
    pub medium: u32,
    /// Severity 4.
    pub high: u32,
    /// Severity 5.
    pub critical: u32,
}

impl SeverityCounts {
    /// Increments the counter for the given bucket.
    pub const fn increment(&mut self, bucket: SeverityBucket) {
        match bucket {
            SeverityBucket::Low => self.low += 1,
            SeverityBucket::Medium => self.medium += 1,
            SeverityBucket::High => self.high += 1,
            SeverityBucket::Critical => self.critical += 1,
        }
    }
}

/// Persisted overflow-risk prediction state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverflowRisk {
    /// Urgency of the most recent prediction.
    pub current_level: UrgencyLevel,
    /// Overflow probability, 0-100.
    pub probability: f64,
    /// Projected overflow instant, if imminent.
    pub estimated_overflow_time: Option<DateTime<Utc>>,
    /// When the prediction was made, if ever.
    pub predicted_at: Option<DateTime<Utc>>,
}

impl Default for OverflowRisk {
    fn default() -> Self {
        Self {
            current_level: UrgencyLevel::Low,
            probability: 0.0,
            estimated_overflow_time: None,
            predicted_at: None,
        }
    }
}

/// Bin inventory for a ward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinInfrastructure {
    /// Total bin count.
    pub total_bins: u32,
    /// Sensor-equipped bins.
    pub smart_bins: u32,
    /// Total capacity in cubic metres; the overflow denominator.
    pub capacity: f64,
    /// Current estimated load in cubic metres.
    pub current_load: f64,
}

impl Default for BinInfrastructure {
    fn default() -> Self {
        Self {
            total_bins: 0,
            smart_bins: 0,
            capacity: 100.0,
            current_load: 0.0,
        }
    }
}

/// Rolling service-performance figures for a ward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    /// Average response time in minutes.
    pub average_response_time: f64,
    /// Share of reports resolved, 0-100.
    pub resolution_rate: f64,
}

impl Ward {
    /// Creates a ward with default derived state.
    #[must_use]
    pub fn new(id: String, ward_number: u32, name: String) -> Self {
        Self {
            id,
            ward_number,
            name,
            zone: None,
            demographics: Demographics::default(),
            cleanliness_index: CleanlinessIndex::default(),
            active_reports: ActiveReports::default(),
            overflow_risk: OverflowRisk::default(),
            infrastructure: BinInfrastructure::default(),
            performance: Performance::default(),
        }
    }
}
