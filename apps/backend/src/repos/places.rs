//! Place catalog repository functions.

use sea_orm::ConnectionTrait;

use super::stored_position;
use crate::adapters::places_sea::{self as places_adapter, PlaceBounds, PlaceCreate};
use crate::domain::geo::{distance, BoundingBox, Position};
use crate::domain::place::Place;
use crate::entities::places;
use crate::errors::domain::DomainError;

fn to_domain(model: places::Model) -> Result<Place, DomainError> {
    let position = stored_position(model.latitude, model.longitude, "place")?;
    Ok(Place {
        id: model.id,
        name: model.name,
        description: model.description,
        position,
        registered_player_id: model.registered_player_id,
        created_at: model.created_at,
    })
}

/// Every place within `radius_km` of `center` (inclusive), ascending id.
pub async fn find_within_radius<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    center: Position,
    radius_km: f64,
) -> Result<Vec<Place>, DomainError> {
    let bbox = BoundingBox::around(center, radius_km);
    let rows = places_adapter::find_in_bounds(
        conn,
        PlaceBounds {
            min_latitude: bbox.min_latitude,
            max_latitude: bbox.max_latitude,
            longitude_range: bbox.longitude_range,
        },
    )
    .await?;

    let mut found = Vec::with_capacity(rows.len());
    for row in rows {
        let place = to_domain(row)?;
        if distance(center, place.position) <= radius_km {
            found.push(place);
        }
    }
    Ok(found)
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    place_id: i64,
) -> Result<Option<Place>, DomainError> {
    places_adapter::find_by_id(conn, place_id)
        .await?
        .map(to_domain)
        .transpose()
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    place_ids: &[i64],
) -> Result<Vec<Place>, DomainError> {
    places_adapter::find_by_ids(conn, place_ids)
        .await?
        .into_iter()
        .map(to_domain)
        .collect()
}

pub async fn create_place<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    description: &str,
    position: Position,
    registered_player_id: i64,
) -> Result<Place, DomainError> {
    let row = places_adapter::create_place(
        conn,
        PlaceCreate {
            name: name.to_string(),
            description: description.to_string(),
            latitude: position.latitude(),
            longitude: position.longitude(),
            registered_player_id,
        },
    )
    .await?;
    to_domain(row)
}
