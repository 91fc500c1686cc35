use crate::{
    core::{Strictness, Validate},
    enums::{ApiEnum, known_enum},
    errors::Result,
    model::raw_model,
    resources::{customers::CustomerLimitedDetails, products::Currency},
    transport::{ApiRequest, Endpoint},
    types::{Record, Timestamp},
};

known_enum! {
    /// Lifecycle of a payment intent.
    pub enum IntentStatus {
        Succeeded => "succeeded",
        Failed => "failed",
        Cancelled => "cancelled",
        Processing => "processing",
        RequiresCustomerAction => "requires_customer_action",
        RequiresMerchantAction => "requires_merchant_action",
        RequiresPaymentMethod => "requires_payment_method",
        RequiresConfirmation => "requires_confirmation",
        RequiresCapture => "requires_capture",
        PartiallyCaptured => "partially_captured",
        PartiallyCapturedAndCapturable => "partially_captured_and_capturable",
    }
}

raw_model! {
    pub struct Payment;
}

impl Payment {
    pub fn payment_id(&self) -> Result<String> {
        self.raw.get("payment_id")
    }

    pub fn business_id(&self) -> Result<String> {
        self.raw.get("business_id")
    }

    pub fn customer(&self) -> Result<CustomerLimitedDetails> {
        self.raw.get("customer")
    }

    pub fn currency(&self) -> Result<ApiEnum<Currency>> {
        self.raw.get("currency")
    }

    /// Total charged, tax included, in the lowest denomination of the currency.
    pub fn total_amount(&self) -> Result<i64> {
        self.raw.get("total_amount")
    }

    pub fn tax(&self) -> Result<Option<i64>> {
        self.raw.get_optional("tax")
    }

    pub fn status(&self) -> Result<Option<ApiEnum<IntentStatus>>> {
        self.raw.get_optional("status")
    }

    pub fn subscription_id(&self) -> Result<Option<String>> {
        self.raw.get_optional("subscription_id")
    }

    pub fn payment_method(&self) -> Result<Option<String>> {
        self.raw.get_optional("payment_method")
    }

    pub fn payment_link(&self) -> Result<Option<String>> {
        self.raw.get_optional("payment_link")
    }

    pub fn error_code(&self) -> Result<Option<String>> {
        self.raw.get_optional("error_code")
    }

    pub fn error_message(&self) -> Result<Option<String>> {
        self.raw.get_optional("error_message")
    }

    pub fn metadata(&self) -> Result<Record<String>> {
        self.raw.get("metadata")
    }

    pub fn created_at(&self) -> Result<Timestamp> {
        self.raw.get("created_at")
    }

    pub fn updated_at(&self) -> Result<Option<Timestamp>> {
        self.raw.get_optional("updated_at")
    }
}

impl Validate for Payment {
    fn check(&self, strictness: Strictness) -> Result<()> {
        self.payment_id()?;
        self.business_id()?;
        self.customer()?.check(strictness)?;
        self.currency()?.check(strictness)?;
        self.total_amount()?;
        self.tax()?;
        self.status()?.check(strictness)?;
        self.subscription_id()?;
        self.payment_method()?;
        self.payment_link()?;
        self.error_code()?;
        self.error_message()?;
        self.metadata()?;
        self.created_at()?;
        self.updated_at()?;
        Ok(())
    }
}

/// `GET /payments/{payment_id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetPayment {
    pub payment_id: String,
}

impl Endpoint for GetPayment {
    type Response = Payment;

    fn request(&self) -> Result<ApiRequest> {
        Ok(ApiRequest::get(["payments", self.payment_id.as_str()]))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::JsonModel;

    fn payment() -> Payment {
        Payment::from_json(json!({
            "payment_id": "pay_1",
            "business_id": "bus_1",
            "customer": {
                "customer_id": "cus_1",
                "email": "a@b.co",
                "name": "Ada",
            },
            "currency": "USD",
            "total_amount": 1299,
            "tax": null,
            "status": "succeeded",
            "metadata": {},
            "created_at": "2025-01-02T03:04:05.000Z",
            "risk_score": 3,
        }))
        .unwrap()
    }

    #[test]
    fn decodes_nested_customer_and_status() {
        let payment = payment();
        assert_eq!(payment.customer().unwrap().email().unwrap(), "a@b.co");
        assert_eq!(payment.status().unwrap().unwrap(), IntentStatus::Succeeded);
        assert_eq!(payment.tax().unwrap(), None);
        payment.validate().unwrap();
    }

    #[test]
    fn keeps_undeclared_fields() {
        let payment = payment();
        assert_eq!(payment.raw().field("risk_score"), Some(&json!(3)));
        assert_eq!(payment.to_json()["risk_score"], 3);
    }

    #[test]
    fn nested_failure_surfaces_through_parent() {
        let mut payment = payment();
        payment
            .raw_mut()
            .set_raw("customer", json!({ "customer_id": "cus_1" }));
        assert!(payment.validate().unwrap_err().is_missing_required_field());
    }
}
