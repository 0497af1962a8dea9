use stayhub_core::{Room, RoomRepository};
use std::sync::Arc;
use tracing::debug;

use crate::{CatalogError, CatalogResult};

/// Public room browsing: the home page grid and the room details loader.
pub struct RoomCatalog {
    rooms: Arc<dyn RoomRepository>,
}

impl RoomCatalog {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    /// All rooms, narrowed to `category` when one is selected.
    pub async fn browse(&self, category: Option<&str>) -> CatalogResult<Vec<Room>> {
        let rooms = self.rooms.all_rooms().await?;
        let rooms = filter_by_category(rooms, category);
        debug!(count = rooms.len(), ?category, "Rooms loaded");
        Ok(rooms)
    }

    pub async fn room(&self, id: &str) -> CatalogResult<Room> {
        self.rooms
            .get_room(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Distinct categories in first-seen order, for the category bar.
    pub async fn categories(&self) -> CatalogResult<Vec<String>> {
        let mut seen: Vec<String> = Vec::new();
        for room in self.rooms.all_rooms().await? {
            if !seen.contains(&room.details.category) {
                seen.push(room.details.category);
            }
        }
        Ok(seen)
    }
}

pub fn filter_by_category(rooms: Vec<Room>, category: Option<&str>) -> Vec<Room> {
    match category {
        Some(category) if !category.is_empty() => rooms
            .into_iter()
            .filter(|r| r.details.category == category)
            .collect(),
        _ => rooms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{room, FakeRooms};

    fn catalog() -> RoomCatalog {
        RoomCatalog::new(Arc::new(FakeRooms::with(vec![
            room("1", "Beach", "a@example.com"),
            room("2", "Cabins", "b@example.com"),
            room("3", "Beach", "b@example.com"),
        ])))
    }

    #[tokio::test]
    async fn test_browse_by_category() {
        let catalog = catalog();

        assert_eq!(catalog.browse(None).await.unwrap().len(), 3);
        assert_eq!(catalog.browse(Some("")).await.unwrap().len(), 3);

        let beach: Vec<String> = catalog
            .browse(Some("Beach"))
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(beach, vec!["1", "3"]);

        // Exact match, like the query parameter it comes from.
        assert!(catalog.browse(Some("beach")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_room_details() {
        let catalog = catalog();
        assert_eq!(catalog.room("2").await.unwrap().details.category, "Cabins");
        assert!(matches!(
            catalog.room("404").await,
            Err(CatalogError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_categories_in_first_seen_order() {
        assert_eq!(catalog().categories().await.unwrap(), vec!["Beach", "Cabins"]);
    }
}
