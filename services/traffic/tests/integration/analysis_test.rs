use chrono::{TimeZone, Utc};

use tss_core::error::AppError;
use tss_traffic::usecase::analysis::{AnalyzeTrafficInput, AnalyzeTrafficUseCase};

use crate::helpers::{FailingSign, FixedDensity, FixedSign};

fn input(image_url: &str) -> AnalyzeTrafficInput {
    AnalyzeTrafficInput {
        camera_id: "cam-12".into(),
        location: "Ring Road / Exit 4".into(),
        image_url: image_url.into(),
        timestamp: None,
    }
}

#[tokio::test]
async fn should_combine_both_detections() {
    let density = FixedDensity::new(64);
    let usecase = AnalyzeTrafficUseCase {
        density: density.clone(),
        signs: FixedSign::limit(40),
    };

    let analysis = usecase
        .execute(input("https://cams.example/12/latest.jpg"))
        .await
        .unwrap();

    assert_eq!(analysis.camera_id, "cam-12");
    assert_eq!(analysis.location, "Ring Road / Exit 4");
    assert_eq!(analysis.traffic.density, 64);
    assert_eq!(analysis.traffic.speed_violations, 2);
    assert_eq!(analysis.speed_limit.speed_limit, Some(40));

    let seen = density.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].camera_id, "cam-12");
    assert_eq!(seen[0].image_url.host_str(), Some("cams.example"));
}

#[tokio::test]
async fn should_keep_supplied_timestamp() {
    let at = Utc.with_ymd_and_hms(2026, 10, 1, 8, 30, 0).unwrap();
    let usecase = AnalyzeTrafficUseCase {
        density: FixedDensity::new(10),
        signs: FixedSign::limit(30),
    };
    let mut req = input("https://cams.example/12/latest.jpg");
    req.timestamp = Some(at);

    let analysis = usecase.execute(req).await.unwrap();

    assert_eq!(analysis.timestamp, at);
}

#[tokio::test]
async fn should_reject_invalid_image_url_without_running_detectors() {
    let density = FixedDensity::new(10);
    let usecase = AnalyzeTrafficUseCase {
        density: density.clone(),
        signs: FixedSign::limit(30),
    };

    let result = usecase.execute(input("not a url")).await;

    assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    assert!(density.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_blank_camera_id() {
    let usecase = AnalyzeTrafficUseCase {
        density: FixedDensity::new(10),
        signs: FixedSign::limit(30),
    };
    let mut req = input("https://cams.example/12/latest.jpg");
    req.camera_id = "   ".into();

    let result = usecase.execute(req).await;

    assert!(matches!(result, Err(AppError::InvalidRequest(_))));
}

#[tokio::test]
async fn should_surface_detector_failure_as_internal() {
    let usecase = AnalyzeTrafficUseCase {
        density: FixedDensity::new(10),
        signs: FailingSign,
    };

    let result = usecase
        .execute(input("https://cams.example/12/latest.jpg"))
        .await;

    assert!(matches!(result, Err(AppError::Internal(_))));
}
