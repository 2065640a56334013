use crate::{services::country_service::CountryClient, utils::error::AppError};
use actix_web::{web, HttpResponse};

#[utoipa::path(
    get,
    path = "/api/v1/countries",
    tag = "Countries",
    responses(
        (status = 200, description = "Country names sorted A-Z", body = [String]),
        (status = 500, description = "Country API unavailable")
    )
)]
pub async fn get_countries(client: web::Data<CountryClient>) -> Result<HttpResponse, AppError> {
    log::info!("🌍 GET /countries");

    let countries = client.fetch_country_names().await?;

    log::info!("✅ Retrieved {} countries", countries.len());
    Ok(HttpResponse::Ok().json(countries))
}
