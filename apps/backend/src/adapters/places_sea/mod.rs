//! SeaORM adapter for the place catalog - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::places;

#[derive(Debug, Clone)]
pub struct PlaceCreate {
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub registered_player_id: i64,
}

/// Rectangle prefilter; callers apply the exact distance check.
#[derive(Debug, Clone, Copy)]
pub struct PlaceBounds {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub longitude_range: Option<(f64, f64)>,
}

pub async fn create_place<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlaceCreate,
) -> Result<places::Model, sea_orm::DbErr> {
    let place = places::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        description: Set(dto.description),
        latitude: Set(dto.latitude),
        longitude: Set(dto.longitude),
        registered_player_id: Set(dto.registered_player_id),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };
    place.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    place_id: i64,
) -> Result<Option<places::Model>, sea_orm::DbErr> {
    places::Entity::find_by_id(place_id).one(conn).await
}

/// Places inside `bounds`, ascending id.
pub async fn find_in_bounds<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    bounds: PlaceBounds,
) -> Result<Vec<places::Model>, sea_orm::DbErr> {
    let mut query = places::Entity::find()
        .filter(places::Column::Latitude.between(bounds.min_latitude, bounds.max_latitude));
    if let Some((min_lng, max_lng)) = bounds.longitude_range {
        query = query.filter(places::Column::Longitude.between(min_lng, max_lng));
    }
    query.order_by_asc(places::Column::Id).all(conn).await
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    place_ids: &[i64],
) -> Result<Vec<places::Model>, sea_orm::DbErr> {
    if place_ids.is_empty() {
        return Ok(Vec::new());
    }
    places::Entity::find()
        .filter(places::Column::Id.is_in(place_ids.iter().copied()))
        .all(conn)
        .await
}
