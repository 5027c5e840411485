use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use parkscout::core::geo::GeoPosition;
use parkscout::platform::location::{LocationError, LocationOptions, LocationProvider};
use parkscout::platform::providers::IpLocationProvider;

#[tokio::test]
async fn test_resolves_a_position_from_the_ip_api() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"latitude": 40.7, "longitude": -74.0, "city": "Hoboken", "country_name": "United States"}"#,
        ))
        .mount(&mock_server)
        .await;

    let provider = IpLocationProvider::new(Some(mock_server.uri()));
    let fix = provider
        .current_position(&LocationOptions::default())
        .await
        .unwrap();

    assert_eq!(fix.position, GeoPosition::new(40.7, -74.0));
}

#[tokio::test]
async fn test_missing_coordinates_are_an_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"city": "Hoboken"}"#))
        .mount(&mock_server)
        .await;

    let provider = IpLocationProvider::new(Some(mock_server.uri()));
    let result = provider.current_position(&LocationOptions::default()).await;

    assert!(matches!(result, Err(LocationError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_http_error_is_a_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let provider = IpLocationProvider::new(Some(mock_server.uri()));
    let result = provider.current_position(&LocationOptions::default()).await;

    assert!(matches!(result, Err(LocationError::Network(_))));
}

#[tokio::test]
async fn test_a_fresh_fix_is_served_from_cache() {
    let mock_server = MockServer::start().await;

    // One upstream call, two lookups: the second is the cached fix.
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"latitude": 40.7, "longitude": -74.0}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = IpLocationProvider::new(Some(mock_server.uri()));
    let options = LocationOptions::default();

    let first = provider.current_position(&options).await.unwrap();
    let second = provider.current_position(&options).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_zero_max_age_forces_a_fresh_lookup() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"latitude": 40.7, "longitude": -74.0}"#),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let provider = IpLocationProvider::new(Some(mock_server.uri()));
    let options = LocationOptions {
        max_cache_age: Duration::ZERO,
        ..LocationOptions::default()
    };

    provider.current_position(&options).await.unwrap();
    // The cached fix is already too old for a zero max age.
    tokio::time::sleep(Duration::from_millis(5)).await;
    provider.current_position(&options).await.unwrap();
}
