pub mod billing;

use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};
use uuid::Uuid;

use crate::persistence::load_json_or_default;

const SESSION_FILE: &str = "session.json";

/// Subscription profile mirrored from the auth provider. Every field except
/// `id` is nullable on the provider side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub customer_id: Option<String>,
    pub price_id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    pub has_access: Option<bool>,
}

impl Profile {
    pub fn has_access(&self) -> bool {
        self.has_access.unwrap_or(false)
    }

    /// A customer id without access means a checkout happened before but
    /// the subscription lapsed. Legacy rows stored "NULL" or an email
    /// address in this column; neither counts as a payment customer.
    pub fn is_expired_trial(&self) -> bool {
        if self.has_access() {
            return false;
        }
        match self.customer_id.as_deref() {
            Some(customer_id) => customer_id != "NULL" && !customer_id.contains('@'),
            None => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
}

/// Opaque snapshot of the auth provider's `{user, profile, loading}` shape,
/// cached on disk by the sign-in flow. The grammar core never reads this;
/// only the account page does.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<User>,
    pub profile: Option<Profile>,
    #[serde(skip)]
    pub loading: bool,
}

impl Session {
    pub fn load() -> Self {
        load_json_or_default(SESSION_FILE)
    }

    pub fn signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn display_name(&self) -> String {
        if let Some(profile) = &self.profile {
            if let Some(name) = profile.name.as_deref().filter(|name| !name.is_empty()) {
                return name.to_string();
            }
        }
        self.user
            .as_ref()
            .and_then(|user| user.email.clone())
            .unwrap_or_else(|| "Guest".to_string())
    }

    pub fn has_access(&self) -> bool {
        self.profile.as_ref().map_or(false, Profile::has_access)
    }
}
