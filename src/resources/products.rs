//! Products and their price shapes.

use bon::bon;

use crate::{
    core::{Strictness, Validate},
    enums::{ApiEnum, known_enum},
    errors::Result,
    model::raw_model,
    resources::pagination::{ListParams, Page},
    transport::{ApiRequest, Endpoint},
    types::{Decimal, Record, Timestamp},
    union::tagged_union,
};

known_enum! {
    /// ISO 4217 currency codes accepted for prices.
    pub enum Currency {
        Aed => "AED",
        Aud => "AUD",
        Brl => "BRL",
        Cad => "CAD",
        Chf => "CHF",
        Eur => "EUR",
        Gbp => "GBP",
        Inr => "INR",
        Jpy => "JPY",
        Sgd => "SGD",
        Usd => "USD",
    }
}

known_enum! {
    pub enum TimeInterval {
        Day => "Day",
        Week => "Week",
        Month => "Month",
        Year => "Year",
    }
}

known_enum! {
    /// Tax category a product is filed under.
    pub enum TaxCategory {
        DigitalProducts => "digital_products",
        Saas => "saas",
        EBook => "e_book",
        Edtech => "edtech",
    }
}

known_enum! {
    pub enum OneTimePriceType {
        OneTimePrice => "one_time_price",
    }
}

known_enum! {
    pub enum RecurringPriceType {
        RecurringPrice => "recurring_price",
    }
}

known_enum! {
    pub enum UsageBasedPriceType {
        UsageBasedPrice => "usage_based_price",
    }
}

raw_model! {
    /// A single payment price.
    pub struct OneTimePrice;
}

#[bon]
impl OneTimePrice {
    #[builder]
    pub fn new(
        #[builder(into)] currency: ApiEnum<Currency>,
        price: i64,
        #[builder(default)] discount: i64,
        #[builder(default)] purchasing_power_parity: bool,
        pay_what_you_want: Option<bool>,
        tax_inclusive: Option<bool>,
    ) -> Result<Self> {
        let mut model = Self::default();
        model
            .raw
            .set("type", ApiEnum::from(OneTimePriceType::OneTimePrice))?;
        model.raw.set("currency", currency)?;
        model.raw.set("price", price)?;
        model.raw.set("discount", discount)?;
        model
            .raw
            .set("purchasing_power_parity", purchasing_power_parity)?;
        model.raw.set_or_remove("pay_what_you_want", pay_what_you_want)?;
        model.raw.set_or_remove("tax_inclusive", tax_inclusive)?;
        Ok(model)
    }
}

impl OneTimePrice {
    pub fn r#type(&self) -> Result<ApiEnum<OneTimePriceType>> {
        self.raw.get("type")
    }

    pub fn currency(&self) -> Result<ApiEnum<Currency>> {
        self.raw.get("currency")
    }

    /// Price in the lowest denomination of the currency (e.g. cents).
    pub fn price(&self) -> Result<i64> {
        self.raw.get("price")
    }

    pub fn discount(&self) -> Result<i64> {
        self.raw.get("discount")
    }

    pub fn purchasing_power_parity(&self) -> Result<bool> {
        self.raw.get("purchasing_power_parity")
    }

    pub fn pay_what_you_want(&self) -> Result<Option<bool>> {
        self.raw.get_optional("pay_what_you_want")
    }

    /// Suggested price when `pay_what_you_want` is enabled.
    pub fn suggested_price(&self) -> Result<Option<i64>> {
        self.raw.get_optional("suggested_price")
    }

    pub fn tax_inclusive(&self) -> Result<Option<bool>> {
        self.raw.get_optional("tax_inclusive")
    }
}

impl Validate for OneTimePrice {
    fn check(&self, strictness: Strictness) -> Result<()> {
        self.r#type()?.validate()?;
        self.currency()?.check(strictness)?;
        self.price()?;
        self.discount()?;
        self.purchasing_power_parity()?;
        self.pay_what_you_want()?;
        self.suggested_price()?;
        self.tax_inclusive()?;
        Ok(())
    }
}

raw_model! {
    /// A price charged every billing period.
    pub struct RecurringPrice;
}

#[bon]
impl RecurringPrice {
    #[builder]
    pub fn new(
        #[builder(into)] currency: ApiEnum<Currency>,
        price: i64,
        #[builder(default)] discount: i64,
        #[builder(default)] purchasing_power_parity: bool,
        payment_frequency_count: i64,
        #[builder(into)] payment_frequency_interval: ApiEnum<TimeInterval>,
        subscription_period_count: i64,
        #[builder(into)] subscription_period_interval: ApiEnum<TimeInterval>,
        trial_period_days: Option<i64>,
    ) -> Result<Self> {
        let mut model = Self::default();
        model
            .raw
            .set("type", ApiEnum::from(RecurringPriceType::RecurringPrice))?;
        model.raw.set("currency", currency)?;
        model.raw.set("price", price)?;
        model.raw.set("discount", discount)?;
        model
            .raw
            .set("purchasing_power_parity", purchasing_power_parity)?;
        model
            .raw
            .set("payment_frequency_count", payment_frequency_count)?;
        model
            .raw
            .set("payment_frequency_interval", payment_frequency_interval)?;
        model
            .raw
            .set("subscription_period_count", subscription_period_count)?;
        model
            .raw
            .set("subscription_period_interval", subscription_period_interval)?;
        model.raw.set_or_remove("trial_period_days", trial_period_days)?;
        Ok(model)
    }
}

impl RecurringPrice {
    pub fn r#type(&self) -> Result<ApiEnum<RecurringPriceType>> {
        self.raw.get("type")
    }

    pub fn currency(&self) -> Result<ApiEnum<Currency>> {
        self.raw.get("currency")
    }

    pub fn price(&self) -> Result<i64> {
        self.raw.get("price")
    }

    pub fn discount(&self) -> Result<i64> {
        self.raw.get("discount")
    }

    pub fn purchasing_power_parity(&self) -> Result<bool> {
        self.raw.get("purchasing_power_parity")
    }

    pub fn payment_frequency_count(&self) -> Result<i64> {
        self.raw.get("payment_frequency_count")
    }

    pub fn payment_frequency_interval(&self) -> Result<ApiEnum<TimeInterval>> {
        self.raw.get("payment_frequency_interval")
    }

    pub fn subscription_period_count(&self) -> Result<i64> {
        self.raw.get("subscription_period_count")
    }

    pub fn subscription_period_interval(&self) -> Result<ApiEnum<TimeInterval>> {
        self.raw.get("subscription_period_interval")
    }

    pub fn trial_period_days(&self) -> Result<Option<i64>> {
        self.raw.get_optional("trial_period_days")
    }
}

impl Validate for RecurringPrice {
    fn check(&self, strictness: Strictness) -> Result<()> {
        self.r#type()?.validate()?;
        self.currency()?.check(strictness)?;
        self.price()?;
        self.discount()?;
        self.purchasing_power_parity()?;
        self.payment_frequency_count()?;
        self.payment_frequency_interval()?.check(strictness)?;
        self.subscription_period_count()?;
        self.subscription_period_interval()?.check(strictness)?;
        self.trial_period_days()?;
        Ok(())
    }
}

raw_model! {
    /// Attaches a usage meter to a usage-based price.
    pub struct AddMeterToPrice;
}

#[bon]
impl AddMeterToPrice {
    #[builder]
    pub fn new(
        #[builder(into)] meter_id: String,
        price_per_unit: Option<Decimal>,
        free_threshold: Option<i64>,
    ) -> Result<Self> {
        let mut model = Self::default();
        model.raw.set("meter_id", meter_id)?;
        model.raw.set_or_remove("price_per_unit", price_per_unit)?;
        model.raw.set_or_remove("free_threshold", free_threshold)?;
        Ok(model)
    }
}

impl AddMeterToPrice {
    pub fn meter_id(&self) -> Result<String> {
        self.raw.get("meter_id")
    }

    /// Price per unit, kept as exact decimal text.
    pub fn price_per_unit(&self) -> Result<Option<Decimal>> {
        self.raw.get_optional("price_per_unit")
    }

    /// Units consumed before charging starts.
    pub fn free_threshold(&self) -> Result<Option<i64>> {
        self.raw.get_optional("free_threshold")
    }

    pub fn description(&self) -> Result<Option<String>> {
        self.raw.get_optional("description")
    }
}

impl Validate for AddMeterToPrice {
    fn check(&self, _strictness: Strictness) -> Result<()> {
        self.meter_id()?;
        self.price_per_unit()?;
        self.free_threshold()?;
        self.description()?;
        Ok(())
    }
}

raw_model! {
    /// A fixed fee plus metered usage, billed every period.
    pub struct UsageBasedPrice;
}

impl UsageBasedPrice {
    pub fn r#type(&self) -> Result<ApiEnum<UsageBasedPriceType>> {
        self.raw.get("type")
    }

    pub fn currency(&self) -> Result<ApiEnum<Currency>> {
        self.raw.get("currency")
    }

    pub fn fixed_price(&self) -> Result<i64> {
        self.raw.get("fixed_price")
    }

    pub fn discount(&self) -> Result<i64> {
        self.raw.get("discount")
    }

    pub fn purchasing_power_parity(&self) -> Result<bool> {
        self.raw.get("purchasing_power_parity")
    }

    pub fn payment_frequency_count(&self) -> Result<i64> {
        self.raw.get("payment_frequency_count")
    }

    pub fn payment_frequency_interval(&self) -> Result<ApiEnum<TimeInterval>> {
        self.raw.get("payment_frequency_interval")
    }

    pub fn subscription_period_count(&self) -> Result<i64> {
        self.raw.get("subscription_period_count")
    }

    pub fn subscription_period_interval(&self) -> Result<ApiEnum<TimeInterval>> {
        self.raw.get("subscription_period_interval")
    }

    pub fn meters(&self) -> Result<Option<Vec<AddMeterToPrice>>> {
        self.raw.get_optional("meters")
    }
}

impl Validate for UsageBasedPrice {
    fn check(&self, strictness: Strictness) -> Result<()> {
        self.r#type()?.validate()?;
        self.currency()?.check(strictness)?;
        self.fixed_price()?;
        self.discount()?;
        self.purchasing_power_parity()?;
        self.payment_frequency_count()?;
        self.payment_frequency_interval()?.check(strictness)?;
        self.subscription_period_count()?;
        self.subscription_period_interval()?.check(strictness)?;
        self.meters()?.check(strictness)?;
        Ok(())
    }
}

tagged_union! {
    /// The price of a product, discriminated by its `type` field.
    pub enum Price {
        OneTime(OneTimePrice),
        Recurring(RecurringPrice),
        UsageBased(UsageBasedPrice),
    }
}

raw_model! {
    pub struct Product;
}

impl Product {
    pub fn product_id(&self) -> Result<String> {
        self.raw.get("product_id")
    }

    pub fn business_id(&self) -> Result<String> {
        self.raw.get("business_id")
    }

    pub fn name(&self) -> Result<Option<String>> {
        self.raw.get_optional("name")
    }

    pub fn description(&self) -> Result<Option<String>> {
        self.raw.get_optional("description")
    }

    pub fn price(&self) -> Result<Price> {
        self.raw.get("price")
    }

    pub fn is_recurring(&self) -> Result<bool> {
        self.raw.get("is_recurring")
    }

    pub fn tax_category(&self) -> Result<ApiEnum<TaxCategory>> {
        self.raw.get("tax_category")
    }

    pub fn metadata(&self) -> Result<Record<String>> {
        self.raw.get("metadata")
    }

    pub fn created_at(&self) -> Result<Timestamp> {
        self.raw.get("created_at")
    }

    pub fn updated_at(&self) -> Result<Timestamp> {
        self.raw.get("updated_at")
    }
}

impl Validate for Product {
    fn check(&self, strictness: Strictness) -> Result<()> {
        self.product_id()?;
        self.business_id()?;
        self.name()?;
        self.description()?;
        self.price()?.check(strictness)?;
        self.is_recurring()?;
        self.tax_category()?.check(strictness)?;
        self.metadata()?;
        self.created_at()?;
        self.updated_at()?;
        Ok(())
    }
}

/// `GET /products/{product_id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetProduct {
    pub product_id: String,
}

impl Endpoint for GetProduct {
    type Response = Product;

    fn request(&self) -> Result<ApiRequest> {
        Ok(ApiRequest::get(["products", self.product_id.as_str()]))
    }
}

/// `GET /products`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListProducts {
    pub page: ListParams,
    pub archived: Option<bool>,
    pub recurring: Option<bool>,
}

impl Endpoint for ListProducts {
    type Response = Page<Product>;

    fn request(&self) -> Result<ApiRequest> {
        Ok(self
            .page
            .apply(ApiRequest::get(["products"]))
            .query_opt("archived", self.archived)
            .query_opt("recurring", self.recurring))
    }
}
