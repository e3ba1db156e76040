//! Atomic truck assignment.

use waste_grid_store::{DocLocks, DocumentStore, StoreError, collections, typed};
use waste_grid_store_models::Truck;
use waste_grid_waste_models::TruckStatus;

/// Claims the first available truck for a ward.
///
/// The whole find-and-claim runs under the trucks collection lock:
/// concurrent alert passes serialize here, so two alerts can never
/// reference the same truck as freshly assigned. Returns `None` when the
/// fleet has no available truck — the caller emits its alert without an
/// assignment rather than blocking.
///
/// Selection is deliberately first-available, not nearest: geographic
/// proximity only matters for route ordering, which happens after
/// assignment.
///
/// # Errors
///
/// Returns [`StoreError`] if the trucks collection cannot be read or
/// written.
pub async fn claim_truck(
    store: &dyn DocumentStore,
    locks: &DocLocks,
    ward_number: u32,
) -> Result<Option<Truck>, StoreError> {
    let _guard = locks.acquire_collection(collections::TRUCKS).await;

    let trucks: Vec<Truck> = typed::all(store, collections::TRUCKS).await?;
    let Some(mut truck) = trucks
        .into_iter()
        .find(|t| t.status == TruckStatus::Available)
    else {
        log::debug!("No available truck for ward {ward_number}");
        return Ok(None);
    };

    truck.status = TruckStatus::Assigned;
    truck.assigned_ward = Some(ward_number);
    typed::replace(store, collections::TRUCKS, &truck.id, &truck).await?;

    log::info!("Assigned truck {} to ward {ward_number}", truck.name);
    Ok(Some(truck))
}

/// Releases a truck back to the available pool.
///
/// # Errors
///
/// Returns [`StoreError`] if the truck cannot be read or written.
pub async fn release_truck(
    store: &dyn DocumentStore,
    locks: &DocLocks,
    truck_id: &str,
) -> Result<(), StoreError> {
    let _guard = locks.acquire_collection(collections::TRUCKS).await;

    let Some(mut truck) = typed::by_id::<Truck>(store, collections::TRUCKS, truck_id).await?
    else {
        return Err(StoreError::NotFound {
            collection: collections::TRUCKS.to_string(),
            id: truck_id.to_string(),
        });
    };

    truck.status = TruckStatus::Available;
    truck.assigned_ward = None;
    typed::replace(store, collections::TRUCKS, &truck.id, &truck).await
}
