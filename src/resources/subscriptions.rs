//! Subscriptions and plan changes.

use bon::bon;

use crate::{
    core::{Strictness, Validate},
    enums::{ApiEnum, known_enum},
    errors::Result,
    model::raw_model,
    resources::{
        customers::CustomerLimitedDetails,
        pagination::{ListParams, Page},
        products::{Currency, TimeInterval},
    },
    transport::{ApiRequest, Endpoint},
    types::{Record, Timestamp},
};

known_enum! {
    /// How the price difference is charged when a subscription changes plan.
    pub enum ProrationBillingMode {
        ProratedImmediately => "prorated_immediately",
        FullImmediately => "full_immediately",
        DifferenceImmediately => "difference_immediately",
    }
}

known_enum! {
    pub enum SubscriptionStatus {
        Pending => "pending",
        Active => "active",
        OnHold => "on_hold",
        Cancelled => "cancelled",
        Failed => "failed",
        Expired => "expired",
    }
}

raw_model! {
    /// An addon and how many of it to attach.
    pub struct AttachAddon;
}

#[bon]
impl AttachAddon {
    #[builder]
    pub fn new(#[builder(into)] addon_id: String, quantity: i64) -> Result<Self> {
        let mut model = Self::default();
        model.raw.set("addon_id", addon_id)?;
        model.raw.set("quantity", quantity)?;
        Ok(model)
    }
}

impl AttachAddon {
    pub fn addon_id(&self) -> Result<String> {
        self.raw.get("addon_id")
    }

    pub fn quantity(&self) -> Result<i64> {
        self.raw.get("quantity")
    }
}

impl Validate for AttachAddon {
    fn check(&self, _strictness: Strictness) -> Result<()> {
        self.addon_id()?;
        self.quantity()?;
        Ok(())
    }
}

raw_model! {
    /// Body of `POST /subscriptions/{subscription_id}/change-plan`.
    pub struct SubscriptionChangePlanParams;
}

#[bon]
impl SubscriptionChangePlanParams {
    /// Unset `addons` and `metadata` are left out. `.addons(None)` sends an
    /// explicit `null`, which removes every existing addon.
    #[builder]
    pub fn new(
        #[builder(into)] product_id: String,
        #[builder(into)] proration_billing_mode: ApiEnum<ProrationBillingMode>,
        quantity: i64,
        addons: Option<Option<Vec<AttachAddon>>>,
        metadata: Option<Record<String>>,
    ) -> Result<Self> {
        let mut model = Self::default();
        model.raw.set("product_id", product_id)?;
        model.raw.set("proration_billing_mode", proration_billing_mode)?;
        model.raw.set("quantity", quantity)?;
        if let Some(addons) = addons {
            model.set_addons(addons)?;
        }
        model.set_metadata(metadata)?;
        Ok(model)
    }
}

impl SubscriptionChangePlanParams {
    pub fn product_id(&self) -> Result<String> {
        self.raw.get("product_id")
    }

    pub fn proration_billing_mode(&self) -> Result<ApiEnum<ProrationBillingMode>> {
        self.raw.get("proration_billing_mode")
    }

    pub fn quantity(&self) -> Result<i64> {
        self.raw.get("quantity")
    }

    pub fn addons(&self) -> Result<Option<Vec<AttachAddon>>> {
        self.raw.get_optional("addons")
    }

    /// `None` sends `"addons": null`, which removes every existing addon.
    pub fn set_addons(&mut self, addons: Option<Vec<AttachAddon>>) -> Result<()> {
        self.raw.set("addons", addons)
    }

    pub fn metadata(&self) -> Result<Option<Record<String>>> {
        self.raw.get_optional("metadata")
    }

    /// `None` leaves the field out, keeping the subscription's metadata.
    pub fn set_metadata(&mut self, metadata: Option<Record<String>>) -> Result<()> {
        self.raw.set_or_remove("metadata", metadata)
    }
}

impl Validate for SubscriptionChangePlanParams {
    fn check(&self, strictness: Strictness) -> Result<()> {
        self.product_id()?;
        self.proration_billing_mode()?.check(strictness)?;
        self.quantity()?;
        self.addons()?.check(strictness)?;
        self.metadata()?;
        Ok(())
    }
}

raw_model! {
    pub struct Subscription;
}

impl Subscription {
    pub fn subscription_id(&self) -> Result<String> {
        self.raw.get("subscription_id")
    }

    pub fn product_id(&self) -> Result<String> {
        self.raw.get("product_id")
    }

    pub fn customer(&self) -> Result<CustomerLimitedDetails> {
        self.raw.get("customer")
    }

    pub fn status(&self) -> Result<ApiEnum<SubscriptionStatus>> {
        self.raw.get("status")
    }

    pub fn currency(&self) -> Result<ApiEnum<Currency>> {
        self.raw.get("currency")
    }

    /// Amount charged per period, in the lowest denomination of the currency.
    pub fn recurring_pre_tax_amount(&self) -> Result<i64> {
        self.raw.get("recurring_pre_tax_amount")
    }

    pub fn quantity(&self) -> Result<i64> {
        self.raw.get("quantity")
    }

    pub fn addons(&self) -> Result<Vec<AttachAddon>> {
        self.raw.get("addons")
    }

    pub fn payment_frequency_count(&self) -> Result<i64> {
        self.raw.get("payment_frequency_count")
    }

    pub fn payment_frequency_interval(&self) -> Result<ApiEnum<TimeInterval>> {
        self.raw.get("payment_frequency_interval")
    }

    pub fn trial_period_days(&self) -> Result<i64> {
        self.raw.get("trial_period_days")
    }

    pub fn cancel_at_next_billing_date(&self) -> Result<bool> {
        self.raw.get("cancel_at_next_billing_date")
    }

    pub fn next_billing_date(&self) -> Result<Timestamp> {
        self.raw.get("next_billing_date")
    }

    pub fn previous_billing_date(&self) -> Result<Timestamp> {
        self.raw.get("previous_billing_date")
    }

    pub fn cancelled_at(&self) -> Result<Option<Timestamp>> {
        self.raw.get_optional("cancelled_at")
    }

    pub fn discount_id(&self) -> Result<Option<String>> {
        self.raw.get_optional("discount_id")
    }

    pub fn metadata(&self) -> Result<Record<String>> {
        self.raw.get("metadata")
    }

    pub fn created_at(&self) -> Result<Timestamp> {
        self.raw.get("created_at")
    }
}

impl Validate for Subscription {
    fn check(&self, strictness: Strictness) -> Result<()> {
        self.subscription_id()?;
        self.product_id()?;
        self.customer()?.check(strictness)?;
        self.status()?.check(strictness)?;
        self.currency()?.check(strictness)?;
        self.recurring_pre_tax_amount()?;
        self.quantity()?;
        self.addons()?.check(strictness)?;
        self.payment_frequency_count()?;
        self.payment_frequency_interval()?.check(strictness)?;
        self.trial_period_days()?;
        self.cancel_at_next_billing_date()?;
        self.next_billing_date()?;
        self.previous_billing_date()?;
        self.cancelled_at()?;
        self.discount_id()?;
        self.metadata()?;
        self.created_at()?;
        Ok(())
    }
}

/// `GET /subscriptions/{subscription_id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetSubscription {
    pub subscription_id: String,
}

impl Endpoint for GetSubscription {
    type Response = Subscription;

    fn request(&self) -> Result<ApiRequest> {
        Ok(ApiRequest::get([
            "subscriptions",
            self.subscription_id.as_str(),
        ]))
    }
}

/// `GET /subscriptions`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSubscriptions {
    pub page: ListParams,
    pub customer_id: Option<String>,
    pub status: Option<ApiEnum<SubscriptionStatus>>,
}

impl Endpoint for ListSubscriptions {
    type Response = Page<Subscription>;

    fn request(&self) -> Result<ApiRequest> {
        Ok(self
            .page
            .apply(ApiRequest::get(["subscriptions"]))
            .query_opt("customer_id", self.customer_id.as_deref())
            .query_opt("status", self.status.as_ref().map(ApiEnum::raw)))
    }
}

/// `POST /subscriptions/{subscription_id}/change-plan`
#[derive(Debug, Clone, PartialEq)]
pub struct ChangePlan {
    pub subscription_id: String,
    pub params: SubscriptionChangePlanParams,
}

impl Endpoint for ChangePlan {
    type Response = ();

    fn request(&self) -> Result<ApiRequest> {
        ApiRequest::post([
            "subscriptions",
            self.subscription_id.as_str(),
            "change-plan",
        ])
        .json(&self.params)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{errors::Error, model::JsonModel};

    #[test]
    fn change_plan_distinguishes_null_and_absent() {
        let params = SubscriptionChangePlanParams::builder()
            .product_id("pdt_1")
            .proration_billing_mode(ProrationBillingMode::ProratedImmediately)
            .quantity(1)
            .build()
            .unwrap();

        assert_eq!(
            params.to_json(),
            json!({
                "product_id": "pdt_1",
                "proration_billing_mode": "prorated_immediately",
                "quantity": 1,
            })
        );
        assert!(!params.raw().contains_key("addons"));
        assert_eq!(params.metadata().unwrap(), None);
        params.validate().unwrap();

        let cleared = SubscriptionChangePlanParams::builder()
            .product_id("pdt_1")
            .proration_billing_mode(ProrationBillingMode::ProratedImmediately)
            .quantity(1)
            .addons(None)
            .build()
            .unwrap();
        assert!(cleared.raw().contains_key("addons"));
        assert_eq!(cleared.to_json()["addons"], json!(null));
        assert_eq!(cleared.addons().unwrap(), None);
    }

    #[test]
    fn change_plan_request_carries_params() {
        let params = SubscriptionChangePlanParams::builder()
            .product_id("pdt_2")
            .proration_billing_mode(ProrationBillingMode::DifferenceImmediately)
            .quantity(2)
            .addons(Some(vec![
                AttachAddon::builder()
                    .addon_id("adn_1")
                    .quantity(3)
                    .build()
                    .unwrap(),
            ]))
            .metadata(Record::from([("source".to_string(), "upgrade".to_string())]))
            .build()
            .unwrap();

        let request = ChangePlan {
            subscription_id: "sub_1".into(),
            params,
        }
        .request()
        .unwrap();

        assert_eq!(request.method, http::Method::POST);
        assert_eq!(request.path(), "/subscriptions/sub_1/change-plan");
        assert_eq!(
            request.body.unwrap(),
            json!({
                "product_id": "pdt_2",
                "proration_billing_mode": "difference_immediately",
                "quantity": 2,
                "addons": [{ "addon_id": "adn_1", "quantity": 3 }],
                "metadata": { "source": "upgrade" },
            })
        );
    }

    #[test]
    fn unknown_status_surfaces_on_validate_only() {
        let subscription = Subscription::from_json(json!({
            "subscription_id": "sub_1",
            "status": "paused",
        }))
        .unwrap();

        let status = subscription.status().unwrap();
        assert_eq!(status.raw(), "paused");
        assert!(!status.is_known());

        let err = subscription.validate().unwrap_err();
        assert!(matches!(err, Error::MissingRequiredField { ref field } if field == "product_id"));
    }

    #[test]
    fn list_filters_by_status_raw_value() {
        let request = ListSubscriptions {
            status: Some(SubscriptionStatus::OnHold.into()),
            ..Default::default()
        }
        .request()
        .unwrap();
        assert_eq!(
            request.query,
            [("status".to_string(), "on_hold".to_string())]
        );
    }
}
