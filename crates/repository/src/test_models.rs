//! Models shared by the unit tests

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Model;
use crate::session::value::DatabaseValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub status: String,
    pub age: i32,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn sample(id: i32, email: &str) -> Self {
        Self {
            id,
            email: email.to_string(),
            status: "active".to_string(),
            age: 30,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap(),
        }
    }
}

impl Model for User {
    type PrimaryKey = i32;

    fn table_name() -> &'static str {
        "users"
    }

    fn field_names() -> &'static [&'static str] {
        &["id", "email", "status", "age", "created_at"]
    }

    fn primary_key(&self) -> Option<Self::PrimaryKey> {
        Some(self.id)
    }

    fn to_fields(&self) -> HashMap<String, DatabaseValue> {
        HashMap::from([
            ("id".to_string(), DatabaseValue::from(self.id)),
            ("email".to_string(), DatabaseValue::from(self.email.clone())),
            ("status".to_string(), DatabaseValue::from(self.status.clone())),
            ("age".to_string(), DatabaseValue::from(self.age)),
            ("created_at".to_string(), DatabaseValue::from(self.created_at)),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
}

impl Model for Post {
    type PrimaryKey = i32;

    fn table_name() -> &'static str {
        "posts"
    }

    fn field_names() -> &'static [&'static str] {
        &["id", "user_id", "title"]
    }

    fn primary_key(&self) -> Option<Self::PrimaryKey> {
        Some(self.id)
    }

    fn to_fields(&self) -> HashMap<String, DatabaseValue> {
        HashMap::from([
            ("id".to_string(), DatabaseValue::from(self.id)),
            ("user_id".to_string(), DatabaseValue::from(self.user_id)),
            ("title".to_string(), DatabaseValue::from(self.title.clone())),
        ])
    }
}
