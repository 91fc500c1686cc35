//! Refunds against completed payments.

use bon::bon;

use crate::{
    core::{Strictness, Validate},
    enums::{ApiEnum, known_enum},
    errors::Result,
    model::raw_model,
    resources::products::Currency,
    transport::{ApiRequest, Endpoint},
    types::{Record, Timestamp},
};

known_enum! {
    pub enum RefundStatus {
        Succeeded => "succeeded",
        Failed => "failed",
        Pending => "pending",
        Review => "review",
    }
}

raw_model! {
    /// One line item of a partial refund.
    pub struct RefundItem;
}

#[bon]
impl RefundItem {
    #[builder]
    pub fn new(
        #[builder(into)] item_id: String,
        amount: Option<i64>,
        tax_inclusive: Option<bool>,
    ) -> Result<Self> {
        let mut model = Self::default();
        model.raw.set("item_id", item_id)?;
        model.raw.set_or_remove("amount", amount)?;
        model.raw.set_or_remove("tax_inclusive", tax_inclusive)?;
        Ok(model)
    }
}

impl RefundItem {
    pub fn item_id(&self) -> Result<String> {
        self.raw.get("item_id")
    }

    /// Amount to refund; the full item amount when absent.
    pub fn amount(&self) -> Result<Option<i64>> {
        self.raw.get_optional("amount")
    }

    pub fn tax_inclusive(&self) -> Result<Option<bool>> {
        self.raw.get_optional("tax_inclusive")
    }
}

impl Validate for RefundItem {
    fn check(&self, _strictness: Strictness) -> Result<()> {
        self.item_id()?;
        self.amount()?;
        self.tax_inclusive()?;
        Ok(())
    }
}

raw_model! {
    /// Body of `POST /refunds`.
    pub struct CreateRefundParams;
}

#[bon]
impl CreateRefundParams {
    #[builder]
    pub fn new(
        #[builder(into)] payment_id: String,
        items: Option<Vec<RefundItem>>,
        #[builder(into)] reason: Option<String>,
        metadata: Option<Record<String>>,
    ) -> Result<Self> {
        let mut model = Self::default();
        model.raw.set("payment_id", payment_id)?;
        model.raw.set_or_remove("items", items)?;
        model.raw.set_or_remove("reason", reason)?;
        model.raw.set_or_remove("metadata", metadata)?;
        Ok(model)
    }
}

impl CreateRefundParams {
    pub fn payment_id(&self) -> Result<String> {
        self.raw.get("payment_id")
    }

    /// Items to refund; the whole payment when absent.
    pub fn items(&self) -> Result<Option<Vec<RefundItem>>> {
        self.raw.get_optional("items")
    }

    pub fn reason(&self) -> Result<Option<String>> {
        self.raw.get_optional("reason")
    }

    pub fn metadata(&self) -> Result<Option<Record<String>>> {
        self.raw.get_optional("metadata")
    }
}

impl Validate for CreateRefundParams {
    fn check(&self, strictness: Strictness) -> Result<()> {
        self.payment_id()?;
        self.items()?.check(strictness)?;
        self.reason()?;
        self.metadata()?;
        Ok(())
    }
}

raw_model! {
    pub struct Refund;
}

impl Refund {
    pub fn refund_id(&self) -> Result<String> {
        self.raw.get("refund_id")
    }

    pub fn payment_id(&self) -> Result<String> {
        self.raw.get("payment_id")
    }

    pub fn business_id(&self) -> Result<String> {
        self.raw.get("business_id")
    }

    pub fn status(&self) -> Result<ApiEnum<RefundStatus>> {
        self.raw.get("status")
    }

    pub fn is_partial(&self) -> Result<bool> {
        self.raw.get("is_partial")
    }

    pub fn amount(&self) -> Result<Option<i64>> {
        self.raw.get_optional("amount")
    }

    pub fn currency(&self) -> Result<Option<ApiEnum<Currency>>> {
        self.raw.get_optional("currency")
    }

    pub fn reason(&self) -> Result<Option<String>> {
        self.raw.get_optional("reason")
    }

    pub fn metadata(&self) -> Result<Record<String>> {
        self.raw.get("metadata")
    }

    pub fn created_at(&self) -> Result<Timestamp> {
        self.raw.get("created_at")
    }
}

impl Validate for Refund {
    fn check(&self, strictness: Strictness) -> Result<()> {
        self.refund_id()?;
        self.payment_id()?;
        self.business_id()?;
        self.status()?.check(strictness)?;
        self.is_partial()?;
        self.amount()?;
        self.currency()?.check(strictness)?;
        self.reason()?;
        self.metadata()?;
        self.created_at()?;
        Ok(())
    }
}

/// `POST /refunds`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRefund {
    pub params: CreateRefundParams,
}

impl Endpoint for CreateRefund {
    type Response = Refund;

    fn request(&self) -> Result<ApiRequest> {
        ApiRequest::post(["refunds"]).json(&self.params)
    }
}

/// `GET /refunds/{refund_id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetRefund {
    pub refund_id: String,
}

impl Endpoint for GetRefund {
    type Response = Refund;

    fn request(&self) -> Result<ApiRequest> {
        Ok(ApiRequest::get(["refunds", self.refund_id.as_str()]))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::JsonModel;

    #[test]
    fn partial_refund_body() {
        let params = CreateRefundParams::builder()
            .payment_id("pay_1")
            .items(vec![
                RefundItem::builder()
                    .item_id("pdt_1")
                    .amount(500)
                    .build()
                    .unwrap(),
            ])
            .reason("damaged")
            .build()
            .unwrap();

        let request = CreateRefund { params }.request().unwrap();
        assert_eq!(request.path(), "/refunds");
        assert_eq!(
            request.body.unwrap(),
            json!({
                "payment_id": "pay_1",
                "items": [{ "item_id": "pdt_1", "amount": 500 }],
                "reason": "damaged",
            })
        );
    }

    #[test]
    fn full_refund_omits_optional_fields() {
        let params = CreateRefundParams::builder()
            .payment_id("pay_1")
            .build()
            .unwrap();
        assert_eq!(params.to_json(), json!({ "payment_id": "pay_1" }));
        assert_eq!(params.items().unwrap(), None);
    }

    #[test]
    fn refund_with_unknown_status_decodes() {
        let refund = Refund::from_json(json!({
            "refund_id": "ref_1",
            "status": "reversed",
        }))
        .unwrap();
        let status = refund.status().unwrap();
        assert_eq!(status.raw(), "reversed");
        assert!(status.known().unwrap_err().is_unrecognized_value());
    }
}
