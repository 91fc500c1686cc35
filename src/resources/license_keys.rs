//! License keys issued for digital products.

use bon::bon;

use crate::{
    core::{Strictness, Validate},
    enums::{ApiEnum, known_enum},
    errors::Result,
    model::raw_model,
    transport::{ApiRequest, Endpoint},
    types::Timestamp,
};

known_enum! {
    pub enum LicenseKeyStatus {
        Active => "active",
        Expired => "expired",
        Disabled => "disabled",
    }
}

raw_model! {
    pub struct LicenseKey;
}

impl LicenseKey {
    pub fn id(&self) -> Result<String> {
        self.raw.get("id")
    }

    pub fn key(&self) -> Result<String> {
        self.raw.get("key")
    }

    pub fn business_id(&self) -> Result<String> {
        self.raw.get("business_id")
    }

    pub fn customer_id(&self) -> Result<String> {
        self.raw.get("customer_id")
    }

    pub fn payment_id(&self) -> Result<String> {
        self.raw.get("payment_id")
    }

    pub fn product_id(&self) -> Result<String> {
        self.raw.get("product_id")
    }

    pub fn status(&self) -> Result<ApiEnum<LicenseKeyStatus>> {
        self.raw.get("status")
    }

    pub fn instances_count(&self) -> Result<i64> {
        self.raw.get("instances_count")
    }

    /// `None` means unlimited activations.
    pub fn activations_limit(&self) -> Result<Option<i64>> {
        self.raw.get_optional("activations_limit")
    }

    pub fn expires_at(&self) -> Result<Option<Timestamp>> {
        self.raw.get_optional("expires_at")
    }

    pub fn subscription_id(&self) -> Result<Option<String>> {
        self.raw.get_optional("subscription_id")
    }

    pub fn created_at(&self) -> Result<Timestamp> {
        self.raw.get("created_at")
    }
}

impl Validate for LicenseKey {
    fn check(&self, strictness: Strictness) -> Result<()> {
        self.id()?;
        self.key()?;
        self.business_id()?;
        self.customer_id()?;
        self.payment_id()?;
        self.product_id()?;
        self.status()?.check(strictness)?;
        self.instances_count()?;
        self.activations_limit()?;
        self.expires_at()?;
        self.subscription_id()?;
        self.created_at()?;
        Ok(())
    }
}

raw_model! {
    /// Body of `PATCH /license_keys/{id}`.
    pub struct UpdateLicenseKeyParams;
}

#[bon]
impl UpdateLicenseKeyParams {
    /// Unset fields are left out of the request. `.activations_limit(None)`
    /// sends an explicit `null`, which lifts the limit.
    #[builder]
    pub fn new(
        activations_limit: Option<Option<i64>>,
        disabled: Option<bool>,
        expires_at: Option<Timestamp>,
    ) -> Result<Self> {
        let mut model = Self::default();
        if let Some(limit) = activations_limit {
            model.set_activations_limit(limit)?;
        }
        model.set_disabled(disabled)?;
        model.raw.set_or_remove("expires_at", expires_at)?;
        Ok(model)
    }
}

impl UpdateLicenseKeyParams {
    pub fn activations_limit(&self) -> Result<Option<i64>> {
        self.raw.get_optional("activations_limit")
    }

    /// `None` stores `null`: no activation limit.
    pub fn set_activations_limit(&mut self, limit: Option<i64>) -> Result<()> {
        self.raw.set("activations_limit", limit)
    }

    pub fn disabled(&self) -> Result<Option<bool>> {
        self.raw.get_optional("disabled")
    }

    /// `None` removes the field.
    pub fn set_disabled(&mut self, disabled: Option<bool>) -> Result<()> {
        self.raw.set_or_remove("disabled", disabled)
    }

    pub fn expires_at(&self) -> Result<Option<Timestamp>> {
        self.raw.get_optional("expires_at")
    }
}

impl Validate for UpdateLicenseKeyParams {
    fn check(&self, _strictness: Strictness) -> Result<()> {
        self.activations_limit()?;
        self.disabled()?;
        self.expires_at()?;
        Ok(())
    }
}

/// `GET /license_keys/{id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetLicenseKey {
    pub id: String,
}

impl Endpoint for GetLicenseKey {
    type Response = LicenseKey;

    fn request(&self) -> Result<ApiRequest> {
        Ok(ApiRequest::get(["license_keys", self.id.as_str()]))
    }
}

/// `PATCH /license_keys/{id}`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateLicenseKey {
    pub id: String,
    pub params: UpdateLicenseKeyParams,
}

impl Endpoint for UpdateLicenseKey {
    type Response = LicenseKey;

    fn request(&self) -> Result<ApiRequest> {
        ApiRequest::patch(["license_keys", self.id.as_str()]).json(&self.params)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::JsonModel;

    #[test]
    fn empty_update_sends_nothing() {
        let params = UpdateLicenseKeyParams::builder().build().unwrap();
        assert_eq!(params.to_json(), json!({}));
        assert_eq!(params.activations_limit().unwrap(), None);
    }

    #[test]
    fn disabling_leaves_the_limit_untouched() {
        let params = UpdateLicenseKeyParams::builder()
            .disabled(true)
            .build()
            .unwrap();
        assert_eq!(params.to_json(), json!({ "disabled": true }));
        assert!(!params.raw().contains_key("activations_limit"));
    }

    #[test]
    fn explicit_none_lifts_the_limit() {
        let params = UpdateLicenseKeyParams::builder()
            .activations_limit(None)
            .build()
            .unwrap();
        assert_eq!(params.to_json(), json!({ "activations_limit": null }));
        assert!(params.raw().contains_key("activations_limit"));
        assert!(!params.raw().contains_key("disabled"));
    }

    #[test]
    fn setters_switch_between_null_and_absent() {
        let mut params = UpdateLicenseKeyParams::builder()
            .activations_limit(Some(5))
            .disabled(true)
            .build()
            .unwrap();
        assert_eq!(
            params.to_json(),
            json!({ "activations_limit": 5, "disabled": true })
        );

        params.set_activations_limit(None).unwrap();
        params.set_disabled(None).unwrap();
        assert_eq!(params.to_json(), json!({ "activations_limit": null }));
        assert_eq!(params.activations_limit().unwrap(), None);
    }

    #[test]
    fn update_uses_patch() {
        let request = UpdateLicenseKey {
            id: "lic_1".into(),
            params: UpdateLicenseKeyParams::builder()
                .disabled(false)
                .build()
                .unwrap(),
        }
        .request()
        .unwrap();
        assert_eq!(request.method, http::Method::PATCH);
        assert_eq!(request.path(), "/license_keys/lic_1");
        assert_eq!(
            request.body.unwrap(),
            json!({ "disabled": false })
        );
    }
}
