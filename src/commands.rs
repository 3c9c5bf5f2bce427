use crate::cli::{
    Cli, Commands, DeveloperCommand, MortgageCommand, OutputFormat, PromotionCommand,
    PropertyCommand, ResetPasswordCommand, UserCommand,
};
use crate::output::{self, Describe};
use anyhow::{bail, Context, Result};
use estate_portal::api::{ApiClient, ApiResponse};
use estate_portal::models::{
    CallbackRequest, LoginRequest, MortgageCalculation, MortgageInquiry, PasswordChange,
    PasswordResetConfirm, PasswordResetRequest, ProfileUpdate, RegisterRequest,
};
use estate_portal::services::properties::ImageUpload;
use estate_portal::services::{
    ApartmentFilters, AuthService, CatalogService, DeveloperFilters, DeveloperService, InquiryService,
    PromotionFilters, PromotionService, PropertyFilters, PropertyService, UserFilters, UserService,
};
use estate_portal::session::SessionStore;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// Execute one parsed command against the API
pub async fn run(cli: Cli, api: ApiClient) -> Result<()> {
    let format = cli.format;

    match cli.command {
        Commands::Properties { command } => properties(command, PropertyService::new(api), format).await,
        Commands::Apartment { id } => {
            let apartment = expect_data(PropertyService::new(api).apartment(&id).await?)?;
            output::print_item(&apartment, format)
        }
        Commands::Developers { command } => developers(command, DeveloperService::new(api), format).await,
        Commands::Promotions { command } => promotions(command, PromotionService::new(api), format).await,
        Commands::Login { email, password } => {
            let session = SessionStore::new(api);
            let user = session.login(&LoginRequest { email, password }).await?;
            output::print_item(&user, format)
        }
        Commands::Register {
            name,
            email,
            phone,
            password,
        } => {
            let session = SessionStore::new(api);
            let payload = RegisterRequest {
                name,
                email,
                phone,
                password,
            };
            let user = session.register(&payload).await?;
            output::print_item(&user, format)
        }
        Commands::Logout => {
            SessionStore::new(api).logout().await?;
            output::print_done("Signed out", &serde_json::json!({ "cleared": true }), format)
        }
        Commands::Whoami => {
            let session = SessionStore::new(api);
            match session.init().await {
                Some(user) => output::print_item(&user, format),
                None => bail!("Not signed in"),
            }
        }
        Commands::Profile(args) => {
            let session = SessionStore::new(api);
            let update = ProfileUpdate {
                name: args.name,
                phone: args.phone,
                email: args.email,
                avatar: args.avatar,
            };
            if update == ProfileUpdate::default() {
                bail!("Nothing to update");
            }
            let user = session.update_profile(&update).await?;
            output::print_item(&user, format)
        }
        Commands::Password {
            current,
            new_password,
        } => {
            let change = PasswordChange {
                current_password: current,
                new_password,
            };
            SessionStore::new(api).change_password(&change).await?;
            output::print_done("Password changed", &serde_json::json!({ "changed": true }), format)
        }
        Commands::ResetPassword { command } => reset_password(command, api, format).await,
        Commands::Callback(args) => {
            let request = CallbackRequest {
                name: args.name,
                phone: args.phone,
                email: args.email,
                message: args.message,
                property_id: args.property,
                preferred_time: args.preferred_time,
            };
            let response = InquiryService::new(api).callback(&request).await?;
            acknowledge("Callback requested, we will call you back", response, format)
        }
        Commands::Mortgage { command } => mortgage(command, InquiryService::new(api), format).await,
        Commands::Users { command } => users(command, UserService::new(api), format).await,
        Commands::ClearData => {
            SessionStore::new(api).clear_all_data().await?;
            output::print_done("Cleared all local data", &serde_json::json!({ "cleared": true }), format)
        }
    }
}

async fn properties(command: PropertyCommand, service: PropertyService, format: OutputFormat) -> Result<()> {
    match command {
        PropertyCommand::List(args) => {
            let filters = PropertyFilters {
                search: args.search,
                city: args.city,
                district: args.district,
                developer_id: args.developer,
                status: args.status,
                min_price: args.min_price,
                max_price: args.max_price,
                min_area: args.min_area,
                max_area: args.max_area,
                rooms: args.rooms,
                sort: args.sort,
                page: args.page,
                limit: args.limit,
            };
            list_catalog(&service, &filters, format).await
        }
        PropertyCommand::Get { id } => show_catalog_item(&service, &id, format).await,
        PropertyCommand::Apartments { id, filters } => {
            let filters = ApartmentFilters {
                rooms: filters.rooms,
                floor: filters.floor,
                min_price: filters.min_price,
                max_price: filters.max_price,
                status: filters.status,
                page: filters.page,
                limit: filters.limit,
            };
            let page = expect_data(service.apartments(&id, &filters).await?)?;
            output::print_page(&page, format)
        }
        PropertyCommand::Create { file } => {
            let body = read_json(&file).await?;
            let property = expect_data(service.create(&body).await?)?;
            output::print_item(&property, format)
        }
        PropertyCommand::Update { id, file } => {
            let body = read_json(&file).await?;
            let property = expect_data(service.update(&id, &body).await?)?;
            output::print_item(&property, format)
        }
        PropertyCommand::Delete { id } => {
            acknowledge(&format!("Deleted property {}", id), service.delete(&id).await?, format)
        }
        PropertyCommand::UploadImages { id, files } => {
            let mut images = Vec::with_capacity(files.len());
            for path in &files {
                let bytes = tokio::fs::read(path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "image".to_string());
                debug!("Read {} bytes from {}", bytes.len(), path.display());
                images.push(ImageUpload { file_name, bytes });
            }
            let count = images.len();
            acknowledge(
                &format!("Uploaded {} images to property {}", count, id),
                service.upload_images(&id, images).await?,
                format,
            )
        }
    }
}

async fn developers(command: DeveloperCommand, service: DeveloperService, format: OutputFormat) -> Result<()> {
    match command {
        DeveloperCommand::List {
            search,
            city,
            page,
            limit,
        } => {
            let filters = DeveloperFilters {
                search,
                city,
                page,
                limit,
            };
            list_catalog(&service, &filters, format).await
        }
        DeveloperCommand::Get { id } => show_catalog_item(&service, &id, format).await,
        DeveloperCommand::Create { file } => {
            let body = read_json(&file).await?;
            output::print_item(&expect_data(service.create(&body).await?)?, format)
        }
        DeveloperCommand::Update { id, file } => {
            let body = read_json(&file).await?;
            output::print_item(&expect_data(service.update(&id, &body).await?)?, format)
        }
        DeveloperCommand::Delete { id } => {
            acknowledge(&format!("Deleted developer {}", id), service.delete(&id).await?, format)
        }
    }
}

async fn promotions(command: PromotionCommand, service: PromotionService, format: OutputFormat) -> Result<()> {
    match command {
        PromotionCommand::List {
            developer,
            property,
            active,
            page,
            limit,
        } => {
            let filters = PromotionFilters {
                developer_id: developer,
                property_id: property,
                active: active.then_some(true),
                page,
                limit,
            };
            list_catalog(&service, &filters, format).await
        }
        PromotionCommand::Get { id } => show_catalog_item(&service, &id, format).await,
        PromotionCommand::Create { file } => {
            let body = read_json(&file).await?;
            output::print_item(&expect_data(service.create(&body).await?)?, format)
        }
        PromotionCommand::Update { id, file } => {
            let body = read_json(&file).await?;
            output::print_item(&expect_data(service.update(&id, &body).await?)?, format)
        }
        PromotionCommand::Delete { id } => {
            acknowledge(&format!("Deleted promotion {}", id), service.delete(&id).await?, format)
        }
    }
}

async fn reset_password(command: ResetPasswordCommand, api: ApiClient, format: OutputFormat) -> Result<()> {
    let auth = AuthService::new(api);
    match command {
        ResetPasswordCommand::Request { email } => {
            let response = auth.request_password_reset(&PasswordResetRequest { email }).await?;
            acknowledge("Reset link sent, check your inbox", response, format)
        }
        ResetPasswordCommand::Confirm { token, new_password } => {
            let response = auth
                .confirm_password_reset(&PasswordResetConfirm { token, new_password })
                .await?;
            acknowledge("Password has been reset", response, format)
        }
    }
}

async fn mortgage(command: MortgageCommand, service: InquiryService, format: OutputFormat) -> Result<()> {
    match command {
        MortgageCommand::Calculate {
            price,
            down_payment,
            years,
            rate,
            bank,
        } => {
            let calculation = MortgageCalculation {
                property_price: price,
                down_payment,
                term_years: years,
                interest_rate: rate,
                bank_id: bank,
            };
            let estimate = expect_data(service.calculate_mortgage(&calculation).await?)?;
            output::print_item(&estimate, format)
        }
        MortgageCommand::Banks => {
            let banks = expect_data(service.banks().await?)?;
            output::print_list(&banks, banks.len(), format)
        }
        MortgageCommand::Apply {
            name,
            phone,
            email,
            property,
            bank,
            price,
            down_payment,
            years,
        } => {
            let inquiry = MortgageInquiry {
                name,
                phone,
                email,
                property_id: property,
                bank_id: bank,
                property_price: price,
                down_payment,
                term_years: years,
            };
            let response = service.mortgage(&inquiry).await?;
            acknowledge("Mortgage application sent", response, format)
        }
    }
}

async fn users(command: UserCommand, service: UserService, format: OutputFormat) -> Result<()> {
    match command {
        UserCommand::List {
            search,
            role,
            page,
            limit,
        } => {
            let filters = UserFilters {
                search,
                role,
                page,
                limit,
            };
            let page = expect_data(service.list(&filters).await?)?;
            output::print_page(&page, format)
        }
        UserCommand::Delete { id } => {
            acknowledge(&format!("Deleted user {}", id), service.delete(&id).await?, format)
        }
    }
}

async fn list_catalog<S>(service: &S, filters: &S::Filters, format: OutputFormat) -> Result<()>
where
    S: CatalogService,
    S::Item: Describe,
{
    info!("Fetching {}...", service.resource_name());
    let page = expect_data(service.list(filters).await?)?;
    info!("Received {} of {} {}", page.len(), page.total, service.resource_name());
    output::print_page(&page, format)
}

async fn show_catalog_item<S>(service: &S, id: &str, format: OutputFormat) -> Result<()>
where
    S: CatalogService,
    S::Item: Describe,
{
    debug!("Fetching {} {}", service.resource_name(), id);
    let item = expect_data(service.get(id).await?)?;
    output::print_item(&item, format)
}

/// Payload of a successful response, otherwise the server's reason
fn expect_data<T>(response: ApiResponse<T>) -> Result<T> {
    if !response.success {
        bail!("{}", response.error_text());
    }
    match response.data {
        Some(data) => Ok(data),
        None => bail!("Response (status {}) carried no data", response.status),
    }
}

fn acknowledge(message: &str, response: ApiResponse, format: OutputFormat) -> Result<()> {
    if !response.success {
        bail!("{}", response.error_text());
    }
    output::print_done(message, &response, format)
}

async fn read_json(path: &Path) -> Result<Value> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))
}
