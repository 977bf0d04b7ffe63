//! Place catalog, destination recommendation and place registration.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseTransaction};
use tracing::{debug, info, warn};

use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::domain::geo::{distance, Position};
use crate::domain::place::Place;
use crate::domain::recommend::Recommender;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::repos::{places, players};
use crate::state::app_state::AppState;

/// Geospatial lookup over the registered places.
#[async_trait]
pub trait PlaceCatalog: Send + Sync {
    /// Every place within `radius_km` of `center`, inclusive.
    async fn find_within_radius(
        &self,
        center: Position,
        radius_km: f64,
    ) -> Result<Vec<Place>, DomainError>;
}

/// [`PlaceCatalog`] over any SeaORM connection or transaction.
pub struct SeaPlaceCatalog<'c, C> {
    conn: &'c C,
}

impl<'c, C> SeaPlaceCatalog<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C: ConnectionTrait + Send + Sync> PlaceCatalog for SeaPlaceCatalog<'_, C> {
    async fn find_within_radius(
        &self,
        center: Position,
        radius_km: f64,
    ) -> Result<Vec<Place>, DomainError> {
        places::find_within_radius(self.conn, center, radius_km).await
    }
}

/// One uniformly chosen place within `radius_km` of `from`.
///
/// Queries the catalog on every call; `NotFound(Place)` when nothing is in range.
pub async fn recommend(
    catalog: &dyn PlaceCatalog,
    recommender: &Recommender,
    from: Position,
    radius_km: f64,
) -> Result<Place, DomainError> {
    let candidates = catalog.find_within_radius(from, radius_km).await?;
    debug!(candidates = candidates.len(), radius_km, "recommendation candidates");
    recommender.pick(&candidates)
}

/// `Conflict(AlreadyExistsNearby)` if any place lies strictly closer than
/// `nearby_km` to `candidate`.
pub async fn reject_if_too_close(
    catalog: &dyn PlaceCatalog,
    candidate: Position,
    nearby_km: f64,
) -> Result<(), DomainError> {
    let nearby = catalog.find_within_radius(candidate, nearby_km).await?;
    if let Some(existing) = nearby
        .iter()
        .find(|p| distance(candidate, p.position) < nearby_km)
    {
        return Err(DomainError::conflict(
            ConflictKind::AlreadyExistsNearby,
            format!(
                "place {} is within {nearby_km} km of the requested position",
                existing.id
            ),
        ));
    }
    Ok(())
}

/// Place domain service.
pub struct PlaceService {
    state: AppState,
}

impl PlaceService {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn recommend(&self, from: Position) -> Result<Place, AppError> {
        let conn = require_db(&self.state)?;
        let catalog = SeaPlaceCatalog::new(conn);
        let place = recommend(
            &catalog,
            &self.state.recommender,
            from,
            self.state.settings.recommend_radius_km,
        )
        .await?;
        Ok(place)
    }

    pub async fn register_place(
        &self,
        player_id: i64,
        name: &str,
        description: &str,
        position: Position,
    ) -> Result<Place, AppError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::Other("PlaceName".into()),
                "place name must not be empty",
            )
            .into());
        }
        let description = description.to_string();
        let nearby_km = self.state.settings.nearby_radius_km;

        let result = with_txn(&self.state, move |txn| {
            Box::pin(async move {
                insert_place(txn, player_id, &name, &description, position, nearby_km).await
            })
        })
        .await;

        match &result {
            Ok(place) => info!(player_id, place_id = place.id, "place registered"),
            Err(e) if e.is_domain() => warn!(player_id, code = %e.code(), "place registration rejected"),
            Err(_) => {}
        }
        result
    }
}

async fn insert_place(
    txn: &DatabaseTransaction,
    player_id: i64,
    name: &str,
    description: &str,
    position: Position,
    nearby_km: f64,
) -> Result<Place, AppError> {
    let player = players::require_player(txn, player_id).await?;
    reject_if_too_close(&SeaPlaceCatalog::new(txn), position, nearby_km).await?;
    Ok(places::create_place(txn, name, description, position, player.id).await?)
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;
    use crate::errors::domain::NotFoundKind;

    /// Catalog over a fixed list, applying the same inclusive radius check.
    struct FixedCatalog(Vec<Place>);

    #[async_trait]
    impl PlaceCatalog for FixedCatalog {
        async fn find_within_radius(
            &self,
            center: Position,
            radius_km: f64,
        ) -> Result<Vec<Place>, DomainError> {
            Ok(self
                .0
                .iter()
                .filter(|p| distance(center, p.position) <= radius_km)
                .cloned()
                .collect())
        }
    }

    fn place(id: i64, lat: f64, lng: f64) -> Place {
        Place {
            id,
            name: format!("place-{id}"),
            description: String::new(),
            position: Position::new(lat, lng).unwrap(),
            registered_player_id: 1,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn origin() -> Position {
        Position::new(37.5, 127.0).unwrap()
    }

    #[tokio::test]
    async fn recommend_never_leaves_the_radius() {
        // ~0.5 km, ~0.9 km and ~1.7 km north of the origin
        let catalog = FixedCatalog(vec![
            place(1, 37.5045, 127.0),
            place(2, 37.5081, 127.0),
            place(3, 37.5153, 127.0),
        ]);
        let recommender = Recommender::new(Some(3));
        for _ in 0..50 {
            let p = recommend(&catalog, &recommender, origin(), 1.0).await.unwrap();
            assert!(p.id == 1 || p.id == 2);
            assert!(distance(origin(), p.position) <= 1.0);
        }
    }

    #[tokio::test]
    async fn recommend_with_nothing_in_range_is_no_place() {
        let catalog = FixedCatalog(vec![place(3, 37.5153, 127.0)]);
        let err = recommend(&catalog, &Recommender::new(Some(1)), origin(), 1.0)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(NotFoundKind::Place, _)));
    }

    #[tokio::test]
    async fn proximity_guard_blocks_only_strictly_closer_places() {
        // ~0.011 km north: blocks
        let catalog = FixedCatalog(vec![place(1, 37.5001, 127.0)]);
        let err = reject_if_too_close(&catalog, origin(), 0.02).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::AlreadyExistsNearby, _)
        ));

        // Exactly on the boundary: allowed
        let existing = place(2, 37.5002, 127.0);
        let boundary = distance(origin(), existing.position);
        let catalog = FixedCatalog(vec![existing]);
        assert!(reject_if_too_close(&catalog, origin(), boundary).await.is_ok());

        // ~0.033 km away: allowed
        let catalog = FixedCatalog(vec![place(3, 37.5003, 127.0)]);
        assert!(reject_if_too_close(&catalog, origin(), 0.02).await.is_ok());
    }
}
