//! Customers, and how a checkout refers to one.

use bon::bon;

use crate::{
    core::{Strictness, Validate},
    errors::Result,
    model::raw_model,
    transport::{ApiRequest, Endpoint},
    types::Timestamp,
    union::tagged_union,
};

raw_model! {
    /// Refers to a customer that already exists.
    pub struct AttachExistingCustomer;
}

#[bon]
impl AttachExistingCustomer {
    #[builder]
    pub fn new(#[builder(into)] customer_id: String) -> Result<Self> {
        let mut model = Self::default();
        model.raw.set("customer_id", customer_id)?;
        Ok(model)
    }
}

impl AttachExistingCustomer {
    pub fn customer_id(&self) -> Result<String> {
        self.raw.get("customer_id")
    }
}

impl Validate for AttachExistingCustomer {
    fn check(&self, _strictness: Strictness) -> Result<()> {
        self.customer_id()?;
        Ok(())
    }
}

raw_model! {
    /// Creates (or reuses, matched by email) a customer inline.
    pub struct NewCustomer;
}

#[bon]
impl NewCustomer {
    /// Unset fields are left out. `.phone_number(None)` sends an explicit
    /// `null`, clearing the number saved on a reused customer.
    #[builder]
    pub fn new(
        #[builder(into)] email: String,
        #[builder(into)] name: Option<String>,
        phone_number: Option<Option<String>>,
        create_new_customer: Option<bool>,
    ) -> Result<Self> {
        let mut model = Self::default();
        model.raw.set("email", email)?;
        model.raw.set_or_remove("name", name)?;
        if let Some(phone_number) = phone_number {
            model.set_phone_number(phone_number)?;
        }
        model.raw.set_or_remove("create_new_customer", create_new_customer)?;
        Ok(model)
    }
}

impl NewCustomer {
    pub fn email(&self) -> Result<String> {
        self.raw.get("email")
    }

    pub fn name(&self) -> Result<Option<String>> {
        self.raw.get_optional("name")
    }

    pub fn phone_number(&self) -> Result<Option<String>> {
        self.raw.get_optional("phone_number")
    }

    /// `None` stores an explicit `null`, clearing a previously saved number.
    pub fn set_phone_number(&mut self, phone_number: Option<String>) -> Result<()> {
        self.raw.set("phone_number", phone_number)
    }

    pub fn create_new_customer(&self) -> Result<Option<bool>> {
        self.raw.get_optional("create_new_customer")
    }
}

impl Validate for NewCustomer {
    fn check(&self, _strictness: Strictness) -> Result<()> {
        self.email()?;
        self.name()?;
        self.phone_number()?;
        self.create_new_customer()?;
        Ok(())
    }
}

tagged_union! {
    /// The customer a payment or subscription is created for.
    ///
    /// Not discriminated: an object carrying both `customer_id` and `email`
    /// decodes as [`CustomerRequest::AttachExisting`] because it is declared first.
    pub enum CustomerRequest {
        AttachExisting(AttachExistingCustomer),
        New(NewCustomer),
    }
}

raw_model! {
    /// The customer summary embedded in payments and subscriptions.
    pub struct CustomerLimitedDetails;
}

impl CustomerLimitedDetails {
    pub fn customer_id(&self) -> Result<String> {
        self.raw.get("customer_id")
    }

    pub fn email(&self) -> Result<String> {
        self.raw.get("email")
    }

    pub fn name(&self) -> Result<String> {
        self.raw.get("name")
    }

    pub fn phone_number(&self) -> Result<Option<String>> {
        self.raw.get_optional("phone_number")
    }
}

impl Validate for CustomerLimitedDetails {
    fn check(&self, _strictness: Strictness) -> Result<()> {
        self.customer_id()?;
        self.email()?;
        self.name()?;
        self.phone_number()?;
        Ok(())
    }
}

raw_model! {
    pub struct Customer;
}

impl Customer {
    pub fn customer_id(&self) -> Result<String> {
        self.raw.get("customer_id")
    }

    pub fn business_id(&self) -> Result<String> {
        self.raw.get("business_id")
    }

    pub fn email(&self) -> Result<String> {
        self.raw.get("email")
    }

    pub fn name(&self) -> Result<String> {
        self.raw.get("name")
    }

    pub fn phone_number(&self) -> Result<Option<String>> {
        self.raw.get_optional("phone_number")
    }

    pub fn created_at(&self) -> Result<Timestamp> {
        self.raw.get("created_at")
    }
}

impl Validate for Customer {
    fn check(&self, _strictness: Strictness) -> Result<()> {
        self.customer_id()?;
        self.business_id()?;
        self.email()?;
        self.name()?;
        self.phone_number()?;
        self.created_at()?;
        Ok(())
    }
}

/// `GET /customers/{customer_id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCustomer {
    pub customer_id: String,
}

impl Endpoint for GetCustomer {
    type Response = Customer;

    fn request(&self) -> Result<ApiRequest> {
        Ok(ApiRequest::get(["customers", self.customer_id.as_str()]))
    }
}
