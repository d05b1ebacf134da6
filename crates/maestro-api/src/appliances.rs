// Appliance endpoints
//
// Account-level appliance listing and per-appliance live snapshots.

use reqwest::Method;
use serde_json::{Value, json};
use tracing::debug;

use crate::client::{MaestroClient, decode};
use crate::error::Error;
use crate::models::ApplianceEntry;

const APPLIANCES_PATH: &str = "/hlapi/v1.0/Nav/FirstVisibleObjectsPaginated";

impl MaestroClient {
    /// List the appliances visible to the authenticated account.
    ///
    /// `POST /hlapi/v1.0/Nav/FirstVisibleObjectsPaginated` with `{}`
    ///
    /// The payload must be a JSON array; anything else is a protocol error.
    pub async fn list_appliances(&self) -> Result<Vec<ApplianceEntry>, Error> {
        debug!("listing appliances");
        let value = self.post(APPLIANCES_PATH, &json!({})).await?;
        if !value.is_array() {
            return Err(Error::protocol(
                "appliance list is not an array",
                &value.to_string(),
            ));
        }
        decode(value)
    }

    /// Live state snapshot.
    ///
    /// `GET /mcz/v1.0/Appliance/{id}/State`
    ///
    /// Returns loosely-typed JSON because the field set varies by model
    /// and firmware.
    pub async fn get_state(&self, appliance_id: &str) -> Result<Value, Error> {
        debug!(appliance_id, "fetching appliance state");
        self.get(&format!("/mcz/v1.0/Appliance/{appliance_id}/State"))
            .await
    }

    /// Live status snapshot.
    ///
    /// `GET /mcz/v1.0/Appliance/{id}/Status`
    pub async fn get_status(&self, appliance_id: &str) -> Result<Value, Error> {
        debug!(appliance_id, "fetching appliance status");
        self.get(&format!("/mcz/v1.0/Appliance/{appliance_id}/Status"))
            .await
    }

    /// Ask the cloud to refresh its view of the appliance.
    ///
    /// `POST /mcz/v1.0/Program/Ping/{id}`
    pub async fn ping(&self, appliance_id: &str) -> Result<(), Error> {
        debug!(appliance_id, "pinging appliance");
        let url = self.url(&format!("/mcz/v1.0/Program/Ping/{appliance_id}"))?;
        self.request(Method::POST, url, None).await?;
        Ok(())
    }
}
