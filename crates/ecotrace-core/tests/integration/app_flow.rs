//! End-to-end flows through the application state.

use ecotrace_core::estimator::{FootprintForm, TransportMode};
use ecotrace_core::{Error, FootprintInput, LoginForm, ReportStatus, Severity, WasteType};

use crate::common::{TestHarness, registration_form};

#[test]
fn test_register_calculate_report_restart() {
    let harness = TestHarness::new();
    let (mut app, presenter) = harness.start();

    let session = app.register(&registration_form()).unwrap();
    assert_eq!(session.points, 100);
    assert_eq!(session.carbon_footprint, 0.0);

    let input = FootprintInput {
        transport_mode: Some(TransportMode::Car),
        transport_distance: 50.0,
        electricity_usage: 300.0,
        gas_usage: 20.0,
        meat_consumption: 7.0,
        shopping_freq: 2.0,
    };
    let estimate = app.calculate(&input).unwrap();
    assert!(!estimate.comparison.is_good());

    let report = app.report_waste("Plastic", "Atta Market").unwrap();
    assert_eq!(report.reporter, "Asha Verma");
    assert_eq!(report.status, ReportStatus::Reported);
    assert_eq!(presenter.last_notice().severity, Severity::Success);

    let dashboard = presenter.dashboards.borrow().last().cloned().unwrap();
    assert_eq!(dashboard.points, 150);
    assert_eq!(dashboard.carbon_footprint, estimate.total);
    drop(app);

    let (restarted, presenter) = harness.start();
    let restored = restarted.current_user().unwrap();
    assert_eq!(restored.id, session.id);
    assert_eq!(restored.points, 150);
    assert_eq!(restored.carbon_footprint, estimate.total);
    assert_eq!(restored.badges, vec!["Welcome Warrior"]);
    assert_eq!(presenter.dashboards.borrow().len(), 1);

    // Reports are process-local.
    assert_eq!(restarted.reports().len(), 2);
}

#[test]
fn test_partial_calculator_form_never_fails() {
    let harness = TestHarness::new();
    let (mut app, _) = harness.start();
    app.register(&registration_form()).unwrap();

    let form = FootprintForm {
        transport_mode: Some("hovercraft".to_string()),
        transport_distance: Some("far".to_string()),
        electricity_usage: Some("120 kWh".to_string()),
        ..FootprintForm::default()
    };
    let estimate = app.calculate(&FootprintInput::from_form(&form)).unwrap();
    assert!((estimate.total - 120.0 * 0.82).abs() < 1e-9);
    assert_eq!(app.current_user().unwrap().carbon_footprint, estimate.total);
}

#[test]
fn test_login_replaces_registered_session() {
    let harness = TestHarness::new();
    let (mut app, _) = harness.start();
    let registered = app.register(&registration_form()).unwrap();

    let logged_in = app
        .login(&LoginForm {
            email: "ravi@example.com".to_string(),
            password: "pw".to_string(),
        })
        .unwrap();

    assert_ne!(registered.id, logged_in.id);
    assert_eq!(app.current_user().unwrap().name, "ravi");
    let on_disk = std::fs::read_to_string(harness.snapshot_path()).unwrap();
    assert!(on_disk.contains("ravi@example.com"));
    assert!(!on_disk.contains("asha@example.com"));
}

#[test]
fn test_signed_out_actions_route_to_login() {
    let harness = TestHarness::new();
    let (mut app, _) = harness.start();

    assert!(matches!(
        app.report_waste("Paper", "Library"),
        Err(Error::NoActiveSession)
    ));
    assert!(matches!(app.dashboard(), Err(Error::NoActiveSession)));
    assert!(matches!(app.join_challenge(1), Err(Error::NoActiveSession)));
    assert!(!harness.snapshot_path().exists());
}

#[test]
fn test_filter_after_reports() {
    let harness = TestHarness::new();
    let (mut app, _) = harness.start();
    app.register(&registration_form()).unwrap();
    app.report_waste("2", "Lodhi Garden").unwrap();
    app.report_waste("organic", "Hauz Khas").unwrap();

    let organic = app.filter_reports(Some(WasteType::Organic));
    assert_eq!(organic.len(), 3);
    assert_eq!(app.current_user().unwrap().points, 200);
}
