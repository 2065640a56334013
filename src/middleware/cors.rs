use actix_cors::Cors;
use actix_web::http::header;

/// Only exact matches of `origins` get CORS headers; requests without an
/// `Origin` header pass untouched.
pub fn cors(origins: Vec<String>) -> Cors {
    Cors::default()
        .allowed_origin_fn(move |origin, _req| {
            origins.iter().any(|allowed| origin.as_bytes() == allowed.as_bytes())
        })
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![header::CONTENT_TYPE, header::RETRY_AFTER])
        .supports_credentials()
        .max_age(3600)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    const FRONTEND: &str = "https://hr.example.com";

    macro_rules! init_app {
        () => {
            test::init_service(
                App::new()
                    .wrap(cors(vec![FRONTEND.to_string()]))
                    .route("/ping", web::get().to(|| async { HttpResponse::Ok().body("pong") })),
            )
            .await
        };
    }

    #[actix_rt::test]
    async fn allowed_origin_gets_cors_headers() {
        let app = init_app!();

        let req = test::TestRequest::get()
            .uri("/ping")
            .insert_header((header::ORIGIN, FRONTEND))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let headers = res.headers();
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), FRONTEND);
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(), "true");
    }

    #[actix_rt::test]
    async fn origin_must_match_exactly() {
        let app = init_app!();

        for origin in ["https://evil.example.com", "https://hr.example.com.evil.io", "http://hr.example.com"] {
            let req = test::TestRequest::get()
                .uri("/ping")
                .insert_header((header::ORIGIN, origin))
                .to_request();
            let res = test::call_service(&app, req).await;

            assert!(
                res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none(),
                "{} should not be allowed",
                origin
            );
        }
    }

    #[actix_rt::test]
    async fn request_without_origin_passes() {
        let app = init_app!();

        let res = test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[actix_rt::test]
    async fn preflight_lists_allowed_methods() {
        let app = init_app!();

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/ping")
            .insert_header((header::ORIGIN, FRONTEND))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "PUT"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), FRONTEND);
        let methods = res
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(methods.contains("PUT"));
    }
}
