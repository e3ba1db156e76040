#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Circular-economy valuation.
//!
//! Converts a collected waste type and weight into revenue, environmental
//! impact, and employment estimates from a fixed per-type unit-economics
//! table, and ranks candidate local processors by distance.
//!
//! Every monetary column in the table is rupees **per kilogram**; impact
//! columns are per-kilogram as well (kg CO₂, litres of water, kWh).
//! One convention throughout — callers never scale.

use serde::Serialize;
use thiserror::Error;
use waste_grid_waste_models::WasteType;

/// One SHG job is supported per this many kilograms processed.
pub const KG_PER_JOB: f64 = 50.0;

/// Errors from valuation operations.
#[derive(Debug, Error)]
pub enum ValuationError {
    /// Weight must be a non-negative, finite number of kilograms.
    #[error("invalid weight {weight_kg} kg: must be finite and non-negative")]
    InvalidWeight {
        /// The rejected weight.
        weight_kg: f64,
    },
}

/// Per-kilogram economics for one waste type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitEconomics {
    /// Collection fee earned, per kg.
    pub collection_fee: f64,
    /// Processing cost incurred, per kg.
    pub processing_cost: f64,
    /// Sale price of the recovered material, per kg.
    pub sale_price: f64,
    /// CO₂ avoided, kg per kg.
    pub co2_saved: f64,
    /// Water saved, litres per kg.
    pub water_saved: f64,
    /// Energy saved, kWh per kg.
    pub energy_saved: f64,
    /// Share of the material that is recoverable, percent.
    pub recyclable_percentage: f64,
}

impl UnitEconomics {
    /// Net revenue per kilogram: sale + collection fee − processing.
    ///
    /// The table is maintained so this is non-negative for every type;
    /// types that cost more to process than they fetch carry a
    /// correspondingly higher collection fee.
    #[must_use]
    pub fn net_per_kg(&self) -> f64 {
        self.sale_price + self.collection_fee - self.processing_cost
    }
}

/// Returns the unit-economics row for a waste type.
///
/// Total over the taxonomy; unclassified material is valued as mixed
/// waste, the conservative assumption for unsorted loads.
#[must_use]
pub const fn unit_economics(waste_type: WasteType) -> UnitEconomics {
    match waste_type {
        WasteType::Plastic => UnitEconomics {
            collection_fee: 0.15,
            processing_cost: 0.65,
            sale_price: 4.50,
            co2_saved: 0.95,
            water_saved: 650.0,
            energy_saved: 78.0,
            recyclable_percentage: 95.0,
        },
        WasteType::Organic => UnitEconomics {
            collection_fee: 0.10,
            processing_cost: 0.42,
            sale_price: 2.80,
            co2_saved: 1.20,
            water_saved: 450.0,
            energy_saved: 45.0,
            recyclable_percentage: 85.0,
        },
        WasteType::EWaste => UnitEconomics {
            collection_fee: 0.50,
            processing_cost: 2.10,
            sale_price: 8.50,
            co2_saved: 2.10,
            water_saved: 200.0,
            energy_saved: 125.0,
            recyclable_percentage: 78.0,
        },
        WasteType::Construction => UnitEconomics {
            collection_fee: 0.20,
            processing_cost: 0.80,
            sale_price: 3.20,
            co2_saved: 0.50,
            water_saved: 300.0,
            energy_saved: 35.0,
            recyclable_percentage: 60.0,
        },
        WasteType::Metal => UnitEconomics {
            collection_fee: 0.60,
            processing_cost: 1.20,
            sale_price: 6.00,
            co2_saved: 1.80,
            water_saved: 400.0,
            energy_saved: 95.0,
            recyclable_percentage: 90.0,
        },
        WasteType::Glass => UnitEconomics {
            collection_fee: 0.40,
            processing_cost: 0.60,
            sale_price: 2.00,
            co2_saved: 0.30,
            water_saved: 120.0,
            energy_saved: 30.0,
            recyclable_percentage: 80.0,
        },
        WasteType::Textile => UnitEconomics {
            collection_fee: 0.20,
            processing_cost: 0.55,
            sale_price: 2.40,
            co2_saved: 0.70,
            water_saved: 500.0,
            energy_saved: 40.0,
            recyclable_percentage: 65.0,
        },
        WasteType::Hazardous => UnitEconomics {
            collection_fee: 1.80,
            processing_cost: 2.50,
            sale_price: 4.00,
            co2_saved: 0.20,
            water_saved: 80.0,
            energy_saved: 15.0,
            recyclable_percentage: 20.0,
        },
        WasteType::Medical => UnitEconomics {
            collection_fee: 3.00,
            processing_cost: 2.80,
            sale_price: 0.0,
            co2_saved: 0.10,
            water_saved: 40.0,
            energy_saved: 10.0,
            recyclable_percentage: 10.0,
        },
        WasteType::Mixed | WasteType::Unclassified => UnitEconomics {
            collection_fee: 0.25,
            processing_cost: 0.90,
            sale_price: 1.80,
            co2_saved: 0.40,
            water_saved: 150.0,
            energy_saved: 20.0,
            recyclable_percentage: 45.0,
        },
    }
}

/// Revenue breakdown for one valuation, in rupees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Revenue {
    /// Collection fees earned.
    pub collection: f64,
    /// Material sale value.
    pub sale: f64,
    /// Processing cost incurred.
    pub processing: f64,
    /// Net: sale + collection − processing.
    pub net: f64,
}

/// Environmental impact for one valuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Environmental {
    /// CO₂ avoided, kg.
    pub co2_saved_kg: f64,
    /// Water saved, litres.
    pub water_saved_l: f64,
    /// Energy saved, kWh.
    pub energy_saved_kwh: f64,
}

/// A local processing facility.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Processor {
    /// Facility name.
    pub name: String,
    /// Distance from the collection zone, km.
    pub distance_km: f64,
    /// Intake capacity, kg.
    pub capacity_kg: f64,
    /// Processing rate, rupees per kg.
    pub rate: f64,
}

/// Full valuation of a collected load.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircularValuation {
    /// Valued waste type.
    pub waste_type: WasteType,
    /// Load weight, kg.
    pub weight_kg: f64,
    /// Revenue breakdown.
    pub revenue: Revenue,
    /// Environmental impact.
    pub environmental: Environmental,
    /// Share of the load that is recoverable, percent.
    pub recyclable_percentage: f64,
    /// SHG jobs supported: one per 50 kg processed.
    pub jobs_supported: u32,
    /// Candidate processors with capacity for this load, closest first.
    pub processors: Vec<Processor>,
}

/// Values a collected load of one waste type.
///
/// # Errors
///
/// Returns [`ValuationError::InvalidWeight`] for negative or non-finite
/// weights; zero is valid and yields an all-zero valuation.
pub fn value_waste(waste_type: WasteType, weight_kg: f64) -> Result<CircularValuation, ValuationError> {
    if !weight_kg.is_finite() || weight_kg < 0.0 {
        return Err(ValuationError::InvalidWeight { weight_kg });
    }

    let economics = unit_economics(waste_type);

    let collection = weight_kg * economics.collection_fee;
    let sale = weight_kg * economics.sale_price;
    let processing = weight_kg * economics.processing_cost;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let jobs_supported = (weight_kg / KG_PER_JOB).ceil() as u32;

    Ok(CircularValuation {
        waste_type,
        weight_kg,
        revenue: Revenue {
            collection,
            sale,
            processing,
            net: sale + collection - processing,
        },
        environmental: Environmental {
            co2_saved_kg: weight_kg * economics.co2_saved,
            water_saved_l: weight_kg * economics.water_saved,
            energy_saved_kwh: weight_kg * economics.energy_saved,
        },
        recyclable_percentage: economics.recyclable_percentage,
        jobs_supported,
        processors: find_processors(weight_kg),
    })
}

/// Returns processors with capacity for the load, sorted by distance
/// ascending.
#[must_use]
pub fn find_processors(weight_kg: f64) -> Vec<Processor> {
    let mut candidates: Vec<Processor> = processor_directory()
        .into_iter()
        .filter(|p| p.capacity_kg >= weight_kg)
        .collect();
    candidates.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    candidates
}

fn processor_directory() -> Vec<Processor> {
    vec![
        Processor {
            name: "Madurai Recycling Hub".to_string(),
            distance_km: 2.1,
            capacity_kg: 150.0,
            rate: 85.0,
        },
        Processor {
            name: "Green Earth Processing".to_string(),
            distance_km: 4.5,
            capacity_kg: 200.0,
            rate: 75.0,
        },
        Processor {
            name: "Eco Industries Tamil Nadu".to_string(),
            distance_km: 6.2,
            capacity_kg: 100.0,
            rate: 95.0,
        },
    ]
}
