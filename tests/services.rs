mod common;

use common::{MockBackend, Route};
use estate_portal::api::ApiError;
use estate_portal::models::{CallbackRequest, MortgageCalculation, PropertyStatus, ValidationError};
use estate_portal::services::properties::ImageUpload;
use estate_portal::services::{
    ApartmentFilters, CatalogService, DeveloperFilters, DeveloperService, InquiryService,
    PromotionFilters, PromotionService, PropertyFilters, PropertyService, UserFilters, UserService,
};
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn property_list_sends_filters_in_order() {
    let backend = MockBackend::start(vec![Route::json(
        "GET",
        "/properties",
        200,
        json!({
            "data": [
                {"id": "p-1", "title": "Riverside", "status": "construction"},
                {"id": "p-2", "title": "Old Town", "status": "completed"}
            ],
            "total": 24,
            "page": 2,
            "limit": 2
        }),
    )])
    .await;
    let (api, _) = backend.client();
    let service = PropertyService::new(api);

    let filters = PropertyFilters {
        city: Some("Almaty".into()),
        max_price: Some(60_000_000),
        page: Some(2),
        limit: Some(2),
        ..Default::default()
    };
    let response = service.list(&filters).await.unwrap();

    assert_eq!(
        backend.last_request().target,
        "/api/properties?city=Almaty&maxPrice=60000000&page=2&limit=2"
    );
    let page = response.data.unwrap();
    assert_eq!(page.total, 24);
    assert_eq!(page.items[1].status, Some(PropertyStatus::Completed));
    assert_eq!(service.resource_name(), "properties");
}

#[tokio::test]
async fn property_detail_and_apartments() {
    let backend = MockBackend::start(vec![
        Route::json("GET", "/properties/p-1", 200, json!({"id": "p-1", "title": "Riverside"})),
        Route::json(
            "GET",
            "/properties/p-1/apartments",
            200,
            json!([{"id": "a-1", "rooms": 2, "floor": 5, "price": 31000000.0}]),
        ),
        Route::json("GET", "/apartments/a-1", 200, json!({"id": "a-1", "area": 64.2})),
    ])
    .await;
    let (api, _) = backend.client();
    let service = PropertyService::new(api);

    let property = service.get("p-1").await.unwrap().data.unwrap();
    assert_eq!(property.title, "Riverside");

    let filters = ApartmentFilters {
        rooms: Some(2),
        ..Default::default()
    };
    let apartments = service.apartments("p-1", &filters).await.unwrap().data.unwrap();
    assert_eq!(backend.last_request().target, "/api/properties/p-1/apartments?rooms=2");
    assert_eq!(apartments.items[0].floor, Some(5));

    let apartment = service.apartment("a-1").await.unwrap().data.unwrap();
    assert_eq!(apartment.area, Some(64.2));
}

#[tokio::test]
async fn missing_property_keeps_message() {
    let backend = MockBackend::start(vec![Route::json(
        "GET",
        "/properties/gone",
        404,
        json!({"statusCode": 404, "message": "Property not found"}),
    )])
    .await;
    let (api, _) = backend.client();

    let response = PropertyService::new(api).get("gone").await.unwrap();
    assert!(!response.success);
    assert_eq!(response.data, None);
    assert_eq!(response.error_text(), "Property not found");
}

#[tokio::test]
async fn admin_property_maintenance() {
    let backend = MockBackend::start(vec![
        Route::json("POST", "/properties", 201, json!({"id": "p-9", "title": "New Quarter"})),
        Route::json("PUT", "/properties/p-9", 200, json!({"id": "p-9", "title": "New Quarter II"})),
        Route::json("DELETE", "/properties/p-9", 200, json!({"deleted": true})),
        Route::json("POST", "/properties/p-9/images", 201, json!({"uploaded": 1})),
    ])
    .await;
    let (api, _) = backend.client();
    let service = PropertyService::new(api);

    let created = service.create(&json!({"title": "New Quarter"})).await.unwrap();
    assert_eq!(created.status, 201);
    assert_eq!(created.data.unwrap().id, "p-9");

    let updated = service.update("p-9", &json!({"title": "New Quarter II"})).await.unwrap();
    assert_eq!(updated.data.unwrap().title, "New Quarter II");
    assert_eq!(backend.last_request().json(), json!({"title": "New Quarter II"}));

    let image = ImageUpload {
        file_name: "facade.jpg".into(),
        bytes: vec![0xff, 0xd8, 0xff],
    };
    assert!(service.upload_images("p-9", vec![image]).await.unwrap().success);
    assert!(backend
        .last_request()
        .header("content-type")
        .unwrap()
        .starts_with("multipart/form-data"));

    assert!(service.delete("p-9").await.unwrap().success);
}

#[tokio::test]
async fn developers_and_promotions() {
    let backend = MockBackend::start(vec![
        Route::json("GET", "/developers", 200, json!([{"id": "d-1", "name": "BI Group"}])),
        Route::json(
            "GET",
            "/developers/d-1",
            200,
            json!({"id": "d-1", "name": "BI Group", "properties": [{"id": "p-1", "title": "Riverside"}]}),
        ),
        Route::json(
            "GET",
            "/promotions",
            200,
            json!({"data": [{"id": "pr-1", "title": "Spring", "discount": 5.0}], "total": 1}),
        ),
        Route::json("GET", "/promotions/pr-1", 200, json!({"id": "pr-1", "title": "Spring"})),
    ])
    .await;
    let (api, _) = backend.client();

    let developers = DeveloperService::new(api.clone());
    let filters = DeveloperFilters {
        search: Some("BI".into()),
        ..Default::default()
    };
    let list = developers.list(&filters).await.unwrap().data.unwrap();
    assert_eq!(backend.last_request().target, "/api/developers?search=BI");
    assert_eq!(list.items[0].name, "BI Group");

    let profile = developers.get("d-1").await.unwrap().data.unwrap();
    assert_eq!(profile.properties.len(), 1);

    let promotions = PromotionService::new(api);
    let filters = PromotionFilters {
        active: Some(true),
        ..Default::default()
    };
    let list = promotions.list(&filters).await.unwrap().data.unwrap();
    assert_eq!(backend.last_request().target, "/api/promotions?active=true");
    assert_eq!(list.items[0].discount, Some(5.0));
    assert_eq!(promotions.get("pr-1").await.unwrap().data.unwrap().title, "Spring");
}

#[tokio::test]
async fn inquiries_are_validated_before_sending() {
    let backend = MockBackend::start(vec![Route::json(
        "POST",
        "/inquiries/callback",
        201,
        json!({"id": "inq-1"}),
    )])
    .await;
    let (api, _) = backend.client();
    let service = InquiryService::new(api);

    let incomplete = CallbackRequest {
        name: "Aigerim".into(),
        ..Default::default()
    };
    let err = service.callback(&incomplete).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(ValidationError::MissingField("phone"))));
    assert!(backend.requests().is_empty());

    let request = CallbackRequest {
        name: "Aigerim".into(),
        phone: "+77011234567".into(),
        property_id: Some("p-1".into()),
        ..Default::default()
    };
    assert!(service.callback(&request).await.unwrap().success);
    assert_eq!(
        backend.last_request().json(),
        json!({"name": "Aigerim", "phone": "+77011234567", "propertyId": "p-1"})
    );
}

#[tokio::test]
async fn mortgage_calculator_and_banks() {
    let backend = MockBackend::start(vec![
        Route::json(
            "POST",
            "/mortgage/calculate",
            200,
            json!({"monthlyPayment": 241000.5, "loanAmount": 24000000.0, "interestRate": 7.0}),
        ),
        Route::json(
            "GET",
            "/mortgage/banks",
            200,
            json!([{"id": "b-1", "name": "Otbasy", "minRate": 5.0}]),
        ),
    ])
    .await;
    let (api, _) = backend.client();
    let service = InquiryService::new(api);

    let calculation = MortgageCalculation {
        property_price: 30_000_000.0,
        down_payment: 6_000_000.0,
        term_years: 20,
        ..Default::default()
    };
    let estimate = service.calculate_mortgage(&calculation).await.unwrap().data.unwrap();
    assert_eq!(estimate.monthly_payment, 241000.5);
    assert_eq!(
        backend.last_request().json(),
        json!({"propertyPrice": 30000000.0, "downPayment": 6000000.0, "termYears": 20})
    );

    let banks = service.banks().await.unwrap().data.unwrap();
    assert_eq!(banks.len(), 1);
    assert_eq!(banks[0].min_rate, Some(5.0));
}

#[tokio::test]
async fn admin_user_listing() {
    let backend = MockBackend::start(vec![
        Route::json(
            "GET",
            "/users",
            200,
            json!({"data": [{"id": "u1", "email": "admin@portal.kz", "role": "admin"}], "total": 1}),
        ),
        Route::json("DELETE", "/users/u2", 403, json!({"message": "Forbidden resource"})),
    ])
    .await;
    let (api, _) = backend.client();
    let service = UserService::new(api);

    let filters = UserFilters {
        role: Some("admin".into()),
        ..Default::default()
    };
    let users = service.list(&filters).await.unwrap().data.unwrap();
    assert!(users.items[0].is_admin());
    assert_eq!(backend.last_request().target, "/api/users?role=admin");

    let denied = service.delete("u2").await.unwrap();
    assert!(!denied.success);
    assert_eq!(denied.message.as_deref(), Some("Forbidden resource"));
}
