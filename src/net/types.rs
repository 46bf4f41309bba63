//! Request and response shapes.
//!
//! The server is lenient about scalar types (ids come back as integers,
//! timestamps as preformatted strings), so text fields here accept any JSON
//! scalar and keep its display form.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ClientError;

/// Field values of one form submission. Later duplicates overwrite earlier ones.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormRecord(BTreeMap<String, String>);

impl FormRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// JSON body for the request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ClientError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// Credentials returned by a successful login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginGrant {
    pub token: String,
    pub user_id: Option<String>,
}

impl LoginGrant {
    /// Extract the grant from a login success payload.
    ///
    /// Accepts `token` or `access_token`, and `user_id` or `user.id`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingField`] when no token is present.
    pub fn from_payload(payload: &Value) -> Result<Self, ClientError> {
        let token = payload
            .get("token")
            .or_else(|| payload.get("access_token"))
            .and_then(scalar_text)
            .ok_or(ClientError::MissingField("token"))?;
        let user_id = payload
            .get("user_id")
            .or_else(|| payload.pointer("/user/id"))
            .and_then(scalar_text);
        Ok(Self { token, user_id })
    }
}

/// One entry of the comment feed.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Comment {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_at: String,
}

/// Body of `GET /get-comments`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CommentList {
    #[serde(default, deserialize_with = "nullable_list")]
    pub comments: Vec<Comment>,
}

/// Display text of a JSON scalar. `null`, arrays and objects yield `None`.
#[must_use]
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(&value).unwrap_or_default())
}

fn nullable_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Comment>, D::Error> {
    Ok(Option::<Vec<Comment>>::deserialize(deserializer)?.unwrap_or_default())
}
