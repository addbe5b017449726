use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod consultation;
pub mod db;
pub mod report;
pub mod storage;

pub use crate::db::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

pub async fn run() -> std::io::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    #[derive(OpenApi)]
    #[openapi(
        paths(
            crate::consultation::handlers::submit_consultation,
            crate::consultation::handlers::get_consultation,
            crate::consultation::handlers::download_report,
        ),
        components(
            schemas(
                consultation::models::Consultation,
                consultation::models::SubmittedForm,
                consultation::handlers::ValidationFailedResponse,
                consultation::handlers::ConsultationResponse,
                ErrorResponse,
            )
        ),
        tags(
            (name = "Consultation Service", description = "Consultation submission and report endpoints.")
        ),
        servers(
            (url = "http://127.0.0.1:8080", description = "Localhost server")
        )
    )]
    struct ApiDoc;

    dotenvy::dotenv().ok(); // Load .env file
    let media_config = config::MediaConfig::from_env();
    std::fs::create_dir_all(media_config.media_root.join(storage::LOGO_SUBDIR))?;

    let app_state = match AppState::new_with_config(media_config).await {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!("Failed to connect to database. Please check your DATABASE_URL in .env and ensure the database is running. Error: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("Starting server at http://0.0.0.0:8080");

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let cors = Cors::default()
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://localhost:8080")
            .allowed_origin("http://127.0.0.1:8080")
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
            ])
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(cors)
            .app_data(app_state)
            .service(
                web::scope("/api")
                    .service(
                        web::resource("/consultations")
                            .route(web::post().to(consultation::handlers::submit_consultation)),
                    )
                    .service(
                        web::resource("/consultations/{id}")
                            .route(web::get().to(consultation::handlers::get_consultation)),
                    )
                    .service(
                        web::resource("/consultations/{id}/report")
                            .route(web::get().to(consultation::handlers::download_report)),
                    ),
            )
            .service(
                web::resource("/media/clinic_logos/{filename:.*}")
                    .route(web::get().to(consultation::handlers::serve_logo)),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(("0.0.0.0", 8080))?
    .run()
    .await
}
