use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Mutex;

use tripwise::api::{BookingConfirmation, OrderRequest, OrderService};
use tripwise::catalog::{Accommodation, Activity, Catalog, Destination, TransportKind, TransportOption};
use tripwise::{ApiError, CatalogRates, PackageBuilderWizard, WizardError, WizardPhase, WizardStep};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn lisbon_catalog() -> Catalog {
    Catalog {
        destinations: vec![Destination {
            id: "1".into(),
            name: "Lisbon".into(),
            country: Some("Portugal".into()),
            description: None,
        }],
        accommodations: vec![Accommodation {
            id: "h1".into(),
            name: "Alfama Inn".into(),
            destination_id: Some("1".into()),
            price_per_night: Decimal::from(150),
            rating: Some(4.5),
        }],
        transport_options: vec![
            TransportOption {
                id: "f1".into(),
                kind: TransportKind::Flight,
                name: "JFK-LIS".into(),
                price: Some(Decimal::from(420)),
                price_per_day: None,
            },
            TransportOption {
                id: "c1".into(),
                kind: TransportKind::CarRental,
                name: "Compact".into(),
                price: None,
                price_per_day: Some(Decimal::from(40)),
            },
        ],
        activities: vec![
            Activity {
                id: "a1".into(),
                name: "Fado night".into(),
                destination_id: Some("1".into()),
                duration_hours: Some(3.0),
            },
            Activity {
                id: "a2".into(),
                name: "Sintra day trip".into(),
                destination_id: Some("1".into()),
                duration_hours: Some(8.0),
            },
        ],
    }
}

/// Plays back a fixed list of responses and records every request body
struct ScriptedOrders {
    responses: Mutex<Vec<Result<serde_json::Value, ApiError>>>,
    requests: Mutex<Vec<serde_json::Value>>,
}

impl ScriptedOrders {
    fn new(mut responses: Vec<Result<serde_json::Value, ApiError>>) -> Self {
        responses.reverse();
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl OrderService for ScriptedOrders {
    async fn create_order(&self, order: &OrderRequest) -> Result<BookingConfirmation, ApiError> {
        self.requests
            .lock()
            .unwrap()
            .push(serde_json::to_value(order).unwrap());
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop()
            .expect("unexpected extra order request");
        next.map(BookingConfirmation::from_value)
    }
}

fn filled_wizard() -> PackageBuilderWizard<CatalogRates> {
    let catalog = lisbon_catalog();
    let rates = CatalogRates::from_catalog(&catalog, Decimal::from(25));
    let mut wizard = PackageBuilderWizard::new(rates, "USD");

    wizard.select_destination("1".into()).unwrap();
    wizard.next().unwrap();
    wizard.set_dates(date("2024-06-01"), date("2024-06-04")).unwrap();
    wizard.set_traveler_count(2).unwrap();
    wizard.next().unwrap();
    wizard.select_accommodation("h1".into()).unwrap();
    wizard.next().unwrap();
    wizard.select_flight("f1".into()).unwrap();
    wizard.select_car_rental(Some("c1".into())).unwrap();
    wizard.next().unwrap();
    wizard.toggle_activity("a1".into()).unwrap();
    wizard.toggle_activity("a2".into()).unwrap();
    wizard.next().unwrap();
    wizard
}

#[test]
fn catalog_priced_package() {
    let wizard = filled_wizard();
    let pricing = wizard.pricing();

    assert_eq!(wizard.step(), WizardStep::Review);
    assert_eq!(pricing.accommodation, Decimal::from(900)); // 150 x 3 x 2
    assert_eq!(pricing.transportation, Decimal::from(840)); // 420 x 2
    assert_eq!(pricing.car_rental, Decimal::from(120)); // 40 x 3
    assert_eq!(pricing.activities, Decimal::from(100)); // 2 x 25 x 2
    assert_eq!(pricing.total, Decimal::from(1960));
}

#[tokio::test]
async fn booking_survives_a_failed_attempt() {
    let orders = ScriptedOrders::new(vec![
        Err(ApiError::Transport("connection reset".into())),
        Ok(serde_json::json!({"bookingId": "TW-9001"})),
    ]);
    let mut wizard = filled_wizard();

    let err = wizard.save(&orders).await.unwrap_err();
    assert!(matches!(err, WizardError::Submission(ApiError::Transport(_))));
    assert_eq!(wizard.step(), WizardStep::Review);
    assert!(matches!(wizard.phase(), WizardPhase::SaveFailed { .. }));

    let confirmation = wizard.save(&orders).await.unwrap();
    assert_eq!(confirmation.reference(), "TW-9001");
    assert!(wizard.phase().is_confirmed());

    let requests = orders.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0], requests[1]);

    let body = &requests[1];
    assert_eq!(body["currency"], "USD");
    assert_eq!(body["selection"]["destinationId"], "1");
    assert_eq!(body["selection"]["dateRange"]["travelerCount"], 2);
    assert_eq!(body["selection"]["transportation"]["carRentalId"], "c1");
    assert_eq!(body["selection"]["activityIds"], serde_json::json!(["a1", "a2"]));
    assert_eq!(body["pricing"]["total"], "1960");
}

#[tokio::test]
async fn malformed_response_is_a_failed_save() {
    let orders = ScriptedOrders::new(vec![Err(ApiError::MalformedResponse(
        "expected value at line 1".into(),
    ))]);
    let mut wizard = filled_wizard();

    assert!(wizard.save(&orders).await.is_err());
    match wizard.phase() {
        WizardPhase::SaveFailed { message } => assert!(message.contains("unexpected response")),
        other => panic!("Expected SaveFailed, got {:?}", other),
    }

    // Editing again clears the failure notice
    wizard.toggle_activity("a2".into()).unwrap();
    assert_eq!(wizard.phase(), &WizardPhase::Editing);
}

#[tokio::test]
async fn incomplete_package_never_reaches_the_backend() {
    let orders = ScriptedOrders::new(vec![]);
    let catalog = lisbon_catalog();
    let rates = CatalogRates::from_catalog(&catalog, Decimal::from(25));
    let mut wizard = PackageBuilderWizard::new(rates, "USD");

    wizard.select_destination("1".into()).unwrap();
    assert!(wizard.jump_to(WizardStep::Review).is_err());
    assert!(matches!(wizard.save(&orders).await, Err(WizardError::NotAtReview)));
    assert!(orders.requests.lock().unwrap().is_empty());
}
