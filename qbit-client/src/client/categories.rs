//! Category endpoints (`torrents/*Categor*`)

use std::collections::HashMap;

use super::{Client, ClientError};
use crate::models::Category;

impl Client {
    /// Returns all categories, keyed by name.
    pub async fn categories(&self) -> Result<HashMap<String, Category>, ClientError> {
        self.get_json("torrents/categories", &[]).await
    }

    /// Creates a category; an empty `save_path` uses the default.
    pub async fn create_category(&self, name: &str, save_path: &str) -> Result<(), ClientError> {
        let form = [
            ("category", name.to_string()),
            ("savePath", save_path.to_string()),
        ];
        self.post_expect_ok("torrents/createCategory", &form).await
    }

    /// Changes the save path of an existing category.
    pub async fn edit_category(&self, name: &str, save_path: &str) -> Result<(), ClientError> {
        let form = [
            ("category", name.to_string()),
            ("savePath", save_path.to_string()),
        ];
        self.post_expect_ok("torrents/editCategory", &form).await
    }

    /// Removes categories; torrents in them become uncategorized.
    pub async fn remove_categories(&self, names: &[String]) -> Result<(), ClientError> {
        // categories are newline-separated, unlike the | used for hashes
        self.post_expect_ok("torrents/removeCategories", &[("categories", names.join("\n"))])
            .await
    }

    /// Moves torrents into a category; an empty name clears the category.
    pub async fn set_category(&self, hashes: &[String], category: &str) -> Result<(), ClientError> {
        let form = [
            ("hashes", Self::join_hashes(hashes)),
            ("category", category.to_string()),
        ];
        self.post_expect_ok("torrents/setCategory", &form).await
    }
}
