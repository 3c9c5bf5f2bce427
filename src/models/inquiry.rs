use serde::{Deserialize, Serialize};

/// Required form field left empty
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !(value > 0.0) {
        return Err(ValidationError::InvalidValue {
            field,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(())
}

/// "Call me back" request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CallbackRequest {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_time: Option<String>,
}

impl CallbackRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("phone", &self.phone)
    }
}

/// Mortgage application sent to partner banks
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MortgageInquiry {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<String>,
    pub property_price: f64,
    pub down_payment: f64,
    pub term_years: u32,
}

impl MortgageInquiry {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("phone", &self.phone)?;
        require_positive("propertyPrice", self.property_price)?;
        if self.term_years == 0 {
            return Err(ValidationError::MissingField("termYears"));
        }
        Ok(())
    }
}

/// Input to the server-side mortgage calculator
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MortgageCalculation {
    pub property_price: f64,
    pub down_payment: f64,
    pub term_years: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<String>,
}

impl MortgageCalculation {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_positive("propertyPrice", self.property_price)?;
        if self.down_payment < 0.0 || self.down_payment >= self.property_price {
            return Err(ValidationError::InvalidValue {
                field: "downPayment",
                reason: "must be between zero and the property price".to_string(),
            });
        }
        if self.term_years == 0 {
            return Err(ValidationError::MissingField("termYears"));
        }
        Ok(())
    }
}

/// Calculator result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MortgageEstimate {
    pub monthly_payment: f64,
    #[serde(default)]
    pub loan_amount: Option<f64>,
    #[serde(default)]
    pub total_payment: Option<f64>,
    #[serde(default)]
    pub overpayment: Option<f64>,
    #[serde(default)]
    pub interest_rate: Option<f64>,
}

/// Partner bank offering mortgages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bank {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default, alias = "rate")]
    pub min_rate: Option<f64>,
    #[serde(default)]
    pub max_term_years: Option<u32>,
    #[serde(default)]
    pub min_down_payment_percent: Option<f64>,
}
