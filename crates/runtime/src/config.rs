use std::time::Duration;

use serde::Deserialize;

use roulette_core::PlayerId;

/// Runtime configuration shared by the service and the supervisor.
///
/// Deserializes from the host application's config; every field has a
/// default so an empty document is valid.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Users allowed to end any game, participants or not.
    pub admins: Vec<String>,

    /// How long a session may sit waiting for a second player before the
    /// supervisor cancels it.
    #[serde(with = "seconds")]
    pub max_wait: Duration,

    /// Upper bound on the adrenaline target prompt.
    #[serde(with = "seconds")]
    pub prompt_timeout: Duration,
}

impl RuntimeConfig {
    pub fn is_admin(&self, id: &PlayerId) -> bool {
        self.admins.iter().any(|admin| admin == id.as_str())
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            admins: Vec::new(),
            max_wait: Duration::from_secs(180),
            prompt_timeout: Duration::from_secs(30),
        }
    }
}

/// Durations are configured as whole seconds.
mod seconds {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
