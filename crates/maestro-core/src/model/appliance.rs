use serde::{Deserialize, Serialize};

use crate::config::ApplianceSelector;
use crate::error::CoreError;

/// A stove bound to the authenticated account.
///
/// Fetched once per run and treated as read-only. Every command built for
/// this appliance must use the schema of its `model_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appliance {
    pub id: String,
    pub model_id: String,
    pub sensor_set_type_id: String,
    pub name: Option<String>,
    pub unique_code: Option<String>,
}

impl Appliance {
    /// Display name, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    fn has_name(&self, name: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|n| n.to_lowercase() == name.to_lowercase())
    }
}

/// Pick the target appliance from the account's list.
///
/// An empty list is always [`CoreError::NoAppliance`], whatever the selector.
pub fn select_appliance(
    mut appliances: Vec<Appliance>,
    selector: &ApplianceSelector,
) -> Result<Appliance, CoreError> {
    if appliances.is_empty() {
        return Err(CoreError::NoAppliance);
    }

    match selector {
        ApplianceSelector::First => appliances.into_iter().next().ok_or(CoreError::NoAppliance),
        ApplianceSelector::Named(identifier) => {
            // Exact id matches take priority over display-name matches.
            let pos = appliances
                .iter()
                .position(|a| a.id == *identifier)
                .or_else(|| appliances.iter().position(|a| a.has_name(identifier)));
            match pos {
                Some(pos) => Ok(appliances.swap_remove(pos)),
                None => Err(CoreError::ApplianceNotFound {
                    identifier: identifier.clone(),
                }),
            }
        }
    }
}
