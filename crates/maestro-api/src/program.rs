// Model schema and program activation endpoints

use serde_json::Value;
use tracing::debug;

use crate::client::MaestroClient;
use crate::error::Error;
use crate::models::{ActivateProgramRequest, ModelSchema};

impl MaestroClient {
    /// Fetch the configuration schema for a stove model.
    ///
    /// `GET /hlapi/v1.0/Model/{model_id}`
    pub async fn get_model(&self, model_id: &str) -> Result<ModelSchema, Error> {
        debug!(model_id, "fetching model schema");
        self.get(&format!("/hlapi/v1.0/Model/{model_id}")).await
    }

    /// Submit a sensor command to an appliance.
    ///
    /// `POST /mcz/v1.0/Program/ActivateProgram/{id}`
    ///
    /// Returns `None` when the server answers with an empty or `null`
    /// acknowledgment.
    pub async fn activate_program(
        &self,
        appliance_id: &str,
        request: &ActivateProgramRequest,
    ) -> Result<Option<Value>, Error> {
        debug!(
            appliance_id,
            configuration_id = %request.configuration_id,
            "activating program"
        );
        let ack = self
            .post(
                &format!("/mcz/v1.0/Program/ActivateProgram/{appliance_id}"),
                request,
            )
            .await?;
        Ok((!ack.is_null()).then_some(ack))
    }
}
