use crate::store::{StoreError, TodoItem, TodoRepository};
use std::sync::Arc;
use todo_api::models::{TodoItemModel, TodoListViewModel};
use uuid::Uuid;

/// Maps repository items to wire models for the HTTP surface.
pub struct TodoService {
    repository: Arc<dyn TodoRepository>,
}

impl TodoService {
    #[must_use]
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }

    pub async fn add_item(&self, text: &str) -> Result<String, StoreError> {
        let item = self.repository.add_item(text).await?;
        Ok(item.id.to_string())
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<TodoItemModel>, StoreError> {
        Ok(self.repository.get_item(id).await?.map(map_item))
    }

    pub async fn list(&self) -> Result<TodoListViewModel, StoreError> {
        let items = self.repository.list_items().await?;
        Ok(TodoListViewModel {
            items: items.into_iter().map(map_item).collect(),
        })
    }

    pub async fn complete_item(&self, id: Uuid) -> Result<Option<bool>, StoreError> {
        self.repository.complete_item(id).await
    }

    pub async fn delete_item(&self, id: Uuid) -> Result<bool, StoreError> {
        self.repository.delete_item(id).await
    }
}

fn map_item(item: TodoItem) -> TodoItemModel {
    let last_updated = item.completed_at.unwrap_or(item.created_at);
    TodoItemModel {
        id: item.id.to_string(),
        text: item.text,
        is_completed: item.completed_at.is_some(),
        last_updated: last_updated.format("%Y-%m-%d %H:%M:%SZ").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::map_item;
    use crate::store::TodoItem;
    use chrono::TimeZone;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn map_item_formats_the_last_updated_timestamp() {
        let created = Utc
            .with_ymd_and_hms(2024, 8, 6, 12, 0, 0)
            .single()
            .expect("timestamp");
        let item = TodoItem {
            id: Uuid::nil(),
            text: "task".to_string(),
            created_at: created,
            completed_at: None,
        };

        let model = map_item(item);
        assert_eq!(model.last_updated, "2024-08-06 12:00:00Z");
        assert!(!model.is_completed);
    }

    #[test]
    fn completed_items_report_the_completion_time() {
        let created = Utc
            .with_ymd_and_hms(2024, 8, 6, 12, 0, 0)
            .single()
            .expect("timestamp");
        let completed = created + chrono::Duration::minutes(5);
        let item = TodoItem {
            id: Uuid::nil(),
            text: "task".to_string(),
            created_at: created,
            completed_at: Some(completed),
        };

        let model = map_item(item);
        assert_eq!(model.last_updated, "2024-08-06 12:05:00Z");
        assert!(model.is_completed);
    }
}
