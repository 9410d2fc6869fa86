#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::{
        App,
        http::StatusCode, test, web,
    };
    use futures::FutureExt;
    use serde_json::json;
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use wiremock::matchers::{any, method, path, query_param};

    use crate::api::display::current_display;
    use crate::api::lookup::lookup_address;
    use crate::display::{
        DisplayState, NO_MATCH_ADDRESS, PLACEHOLDER, SharedDisplay,
        STATUS_FAILED, STATUS_RESOLVED, STATUS_UNSUPPORTED,
    };
    use crate::geo::resolver::AddressResolver;

    const GEOCODER_PATH: &str = "/reverse-geocoder/LonLatToAddress";

    async fn run_test<F, R>(test: F) -> R
    where
        F: std::future::Future<Output = R>,
    {
        setup().await;
        // Make the fut UnwindSafe in order to catch unwind it.
        // That way we can run teardown even in case of failure.
        let test_fut = std::panic::AssertUnwindSafe(test).catch_unwind();
        let result = test_fut.await;
        teardown().await;
        assert!(result.is_ok());
        result.unwrap()
    }

    async fn setup() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    async fn teardown () {}

    fn resolver(server: &MockServer) -> web::Data<AddressResolver> {
        let resolver = AddressResolver::new(
            &format!("{}{}", server.uri(), GEOCODER_PATH),
            Duration::from_secs(5)
        )
        .expect("Could not build resolver");
        web::Data::new(resolver)
    }

    async fn mount_address(server: &MockServer, lat: &str, lon: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(GEOCODER_PATH))
            .and(query_param("lat", lat))
            .and(query_param("lon", lon))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }

    #[actix_rt::test]
    async fn test_lookup_found() {
        run_test(async {
            let server = MockServer::start().await;
            mount_address(&server, "35.6938", "139.7534", json!({
                "results": { "muniCd": "13101", "lv01Nm": "東京都千代田区九段南一丁目" }
            }))
            .await;

            let app = test::init_service(
                App::new()
                    .app_data(resolver(&server))
                    .app_data(web::Data::new(SharedDisplay::default()))
                    .route("/lookup", web::get().to(lookup_address))
            )
            .await;

            let req = test::TestRequest::get()
                .uri("/lookup?lat=35.6938&lon=139.7534")
                .to_request();

            let resp: DisplayState = test::call_and_read_body_json(&app, req).await;
            assert_eq!(resp.latitude, "35.6938");
            assert_eq!(resp.longitude, "139.7534");
            assert_eq!(resp.address, "東京都千代田区九段南一丁目");
            assert_eq!(resp.municipality_code, "13101");
            assert_eq!(resp.municipality_name, "千代田区");
            assert_eq!(resp.status, STATUS_RESOLVED);
        })
        .await
    }

    #[actix_rt::test]
    async fn test_lookup_county_town() {
        run_test(async {
            let server = MockServer::start().await;
            mount_address(&server, "36.3489", "138.5972", json!({
                "results": { "muniCd": "20321", "lv01Nm": "長野県北佐久郡軽井沢町大字軽井沢" }
            }))
            .await;

            let app = test::init_service(
                App::new()
                    .app_data(resolver(&server))
                    .app_data(web::Data::new(SharedDisplay::default()))
                    .route("/lookup", web::get().to(lookup_address))
            )
            .await;

            let req = test::TestRequest::get()
                .uri("/lookup?lat=36.3489&lon=138.5972")
                .to_request();

            let resp: DisplayState = test::call_and_read_body_json(&app, req).await;
            assert_eq!(resp.municipality_code, "20321");
            assert_eq!(resp.municipality_name, "北佐久郡軽井沢町");
        })
        .await
    }

    #[actix_rt::test]
    async fn test_lookup_upstream_error() {
        run_test(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path(GEOCODER_PATH))
                .respond_with(ResponseTemplate::new(500))
                .expect(1)
                .mount(&server)
                .await;

            let app = test::init_service(
                App::new()
                    .app_data(resolver(&server))
                    .app_data(web::Data::new(SharedDisplay::default()))
                    .route("/lookup", web::get().to(lookup_address))
            )
            .await;

            let req = test::TestRequest::get()
                .uri("/lookup?lat=35.6938&lon=139.7534")
                .to_request();

            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            let rendered: DisplayState = test::read_body_json(resp).await;
            assert_eq!(rendered.latitude, "35.6938");
            assert_eq!(rendered.address, PLACEHOLDER);
            assert_eq!(rendered.municipality_code, PLACEHOLDER);
            assert_eq!(rendered.municipality_name, PLACEHOLDER);
            assert_eq!(rendered.status, STATUS_FAILED);
        })
        .await
    }

    #[actix_rt::test]
    async fn test_lookup_location_timeout() {
        run_test(async {
            let server = MockServer::start().await;
            Mock::given(any())
                .respond_with(ResponseTemplate::new(200))
                .expect(0)
                .mount(&server)
                .await;

            let app = test::init_service(
                App::new()
                    .app_data(resolver(&server))
                    .app_data(web::Data::new(SharedDisplay::default()))
                    .route("/lookup", web::get().to(lookup_address))
            )
            .await;

            let req = test::TestRequest::get()
                .uri("/lookup?error_code=3")
                .to_request();

            let resp: DisplayState = test::call_and_read_body_json(&app, req).await;
            assert_eq!(resp.status, "位置情報の取得がタイムアウトしました。");
            assert_eq!(resp.latitude, PLACEHOLDER);
            assert_eq!(resp.address, PLACEHOLDER);
        })
        .await
    }

    #[actix_rt::test]
    async fn test_lookup_without_position() {
        run_test(async {
            let server = MockServer::start().await;

            let app = test::init_service(
                App::new()
                    .app_data(resolver(&server))
                    .app_data(web::Data::new(SharedDisplay::default()))
                    .route("/lookup", web::get().to(lookup_address))
            )
            .await;

            let req = test::TestRequest::get()
                .uri("/lookup")
                .to_request();

            let resp: DisplayState = test::call_and_read_body_json(&app, req).await;
            assert_eq!(resp.status, STATUS_UNSUPPORTED);
            assert_eq!(resp.municipality_name, PLACEHOLDER);
        })
        .await
    }

    #[actix_rt::test]
    async fn test_lookup_invalid_query_param() {
        run_test(async {
            let server = MockServer::start().await;

            let app = test::init_service(
                App::new()
                    .app_data(resolver(&server))
                    .app_data(web::Data::new(SharedDisplay::default()))
                    .route("/lookup", web::get().to(lookup_address))
            )
            .await;

            let req = test::TestRequest::get()
                .uri("/lookup?lat=north&lon=139.7534")
                .to_request();

            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        })
        .await
    }

    #[actix_rt::test]
    async fn test_display_shows_last_lookup() {
        run_test(async {
            let server = MockServer::start().await;
            mount_address(&server, "35.6938", "139.7534", json!({
                "results": { "muniCd": "13101", "lv01Nm": "東京都千代田区九段南一丁目" }
            }))
            .await;
            mount_address(&server, "30", "140", json!({})).await;

            let app = test::init_service(
                App::new()
                    .app_data(resolver(&server))
                    .app_data(web::Data::new(SharedDisplay::default()))
                    .route("/lookup", web::get().to(lookup_address))
                    .route("/display", web::get().to(current_display))
            )
            .await;

            let req = test::TestRequest::get()
                .uri("/display")
                .to_request();
            let initial: DisplayState = test::call_and_read_body_json(&app, req).await;
            assert_eq!(initial, DisplayState::default());

            let req = test::TestRequest::get()
                .uri("/lookup?lat=35.6938&lon=139.7534")
                .to_request();
            let first: DisplayState = test::call_and_read_body_json(&app, req).await;

            let req = test::TestRequest::get()
                .uri("/lookup?lat=30&lon=140")
                .to_request();
            let second: DisplayState = test::call_and_read_body_json(&app, req).await;
            assert_eq!(second.address, NO_MATCH_ADDRESS);
            assert_eq!(second.status, "");

            let req = test::TestRequest::get()
                .uri("/display")
                .to_request();
            let shown: DisplayState = test::call_and_read_body_json(&app, req).await;
            assert_eq!(shown.request_id, second.request_id);
            assert_ne!(shown.request_id, first.request_id);
            assert_eq!(shown.latitude, "30");
            assert_eq!(shown.address, NO_MATCH_ADDRESS);
            assert_eq!(shown.municipality_code, PLACEHOLDER);
            assert_eq!(shown.municipality_name, PLACEHOLDER);
        })
        .await
    }
}
