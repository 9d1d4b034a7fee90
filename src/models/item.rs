use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

/// Item model for reading from database.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Item {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// NewItem model for inserting new records.
///
/// `owner_id` is stamped by the service layer from the acting user;
/// the repository persists whatever owner it is given.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::items)]
pub struct NewItem {
    pub title: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
}

/// ItemChanges model for partial updates.
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::items)]
pub struct ItemChanges {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl ItemChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_changeset_is_detected() {
        assert!(ItemChanges::default().is_empty());
        assert!(
            !ItemChanges {
                title: Some("t".to_string()),
                ..Default::default()
            }
            .is_empty()
        );
    }
}
