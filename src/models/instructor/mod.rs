// Instructor module

use serde::{Deserialize, Serialize};

/// A staff member assigned to run a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instructor {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    /// URL or asset key for the avatar image, when one is set.
    pub avatar: Option<String>,
}

impl Instructor {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: None,
            avatar: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}
