use crate::api::{ApiClient, ApiError, ApiResponse};
use crate::models::{Bank, CallbackRequest, MortgageCalculation, MortgageEstimate, MortgageInquiry, Page};
use tracing::info;

/// One-shot inquiries and the mortgage calculator
///
/// Every payload is presence-checked before anything goes over the wire.
#[derive(Clone)]
pub struct InquiryService {
    api: ApiClient,
}

impl InquiryService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn callback(&self, request: &CallbackRequest) -> Result<ApiResponse, ApiError> {
        request.validate()?;
        info!("Sending callback request");
        self.api.post("/inquiries/callback", request).await
    }

    pub async fn mortgage(&self, inquiry: &MortgageInquiry) -> Result<ApiResponse, ApiError> {
        inquiry.validate()?;
        info!("Sending mortgage inquiry");
        self.api.post("/inquiries/mortgage", inquiry).await
    }

    pub async fn calculate_mortgage(
        &self,
        calculation: &MortgageCalculation,
    ) -> Result<ApiResponse<MortgageEstimate>, ApiError> {
        calculation.validate()?;
        self.api.post("/mortgage/calculate", calculation).await?.decode()
    }

    /// Partner banks and their base terms
    pub async fn banks(&self) -> Result<ApiResponse<Vec<Bank>>, ApiError> {
        Ok(self
            .api
            .get("/mortgage/banks")
            .await?
            .decode::<Page<Bank>>()?
            .map(|page| page.items))
    }
}
