use corner_points::db::{Ledger, Snapshot};
use corner_points::error::CornerError;
use corner_points::graphql::build_schema;
use corner_points::models::report::MonthReport;
use serde_json::{json, Value};

/// Three million-ISK sites split between Ayla and Bram, plus a pending
/// Gas site and some mining that only counts toward value.
fn ledger(site_hours: [u8; 3]) -> Value {
    let sites = site_hours
        .iter()
        .enumerate()
        .map(|(index, hour)| {
            json!({
                "id": index + 1,
                "description": format!("Site {}", index + 1),
                "value": 1_000_000.0,
                "category": "C5 Site",
                "time": format!("2024-03-14T{:02}:30:00Z", hour),
                "approval": {"approver": 1, "time": "2024-03-15T00:00:00Z"}
            })
        })
        .collect::<Vec<_>>();

    let mut events = sites;
    events.push(json!({
        "id": 4,
        "description": "Unapproved gas",
        "value": 250_000.0,
        "category": "Gas",
        "time": "2024-03-20T18:00:00Z",
        "submission": {"submitter": 2, "time": "2024-03-20T19:00:00Z"}
    }));
    events.push(json!({
        "id": 5,
        "description": "Moon mining",
        "value": 400_000.0,
        "category": "Mining",
        "time": "2024-03-21T18:00:00Z",
        "approval": {"approver": 1, "time": "2024-03-22T00:00:00Z"}
    }));
    events.push(json!({
        "id": 6,
        "description": "Leap day site",
        "value": 2_000_000.0,
        "category": "C3 Site",
        "time": "2024-02-29T23:59:00Z",
        "approval": {"approver": 1, "time": "2024-03-01T00:00:00Z"}
    }));

    json!({
        "settings": {"minimum_value": 80000.0},
        "players": [
            {"id": 2, "name": "Bram"},
            {"id": 1, "name": "Ayla", "admin": true},
            {"id": 3, "name": "Cass"}
        ],
        "characters": [
            {"id": 10, "name": "Ayla Main", "player": 1},
            {"id": 11, "name": "Ayla Hauler", "player": 1},
            {"id": 20, "name": "Bram Main", "player": 2},
            {"id": 30, "name": "Cass Main", "player": 3}
        ],
        "events": events,
        "attendances": [
            {"character": 10, "event": 1},
            {"character": 11, "event": 1},
            {"character": 20, "event": 1},
            {"character": 10, "event": 2},
            {"character": 20, "event": 2},
            {"character": 11, "event": 3},
            {"character": 20, "event": 3},
            {"character": 20, "event": 4},
            {"character": 30, "event": 5},
            {"character": 30, "event": 6}
        ]
    })
}

fn snapshot(site_hours: [u8; 3]) -> Snapshot {
    Snapshot::from_json(&ledger(site_hours).to_string()).unwrap()
}

#[test]
fn one_point_per_day_regardless_of_event_count() {
    let report = MonthReport::compute(&snapshot([12, 12, 12]), 3, 2024, None).unwrap();

    assert_eq!(report.minimum_value, 80_000.0);
    assert_eq!(report.pending_event_count, 1);
    assert_eq!(
        report.events.iter().map(|e| e.id).collect::<Vec<_>>(),
        vec![1, 2, 3, 5]
    );

    let rows = report
        .players
        .iter()
        .map(|row| (row.player.name.as_str(), row.points, row.value))
        .collect::<Vec<_>>();
    assert_eq!(
        rows,
        vec![
            ("Ayla", 1, 1_500_000.0),
            ("Bram", 1, 1_500_000.0),
            ("Cass", 0, 0.0),
        ]
    );

    // (3M + 400k) * 0.8
    assert_eq!(report.value_total, 2_720_000);
    assert_eq!(report.point_total, 2);
    assert_eq!(report.max_points, 1);
    assert_eq!(report.value_per_point, 1_360_000);
}

#[test]
fn pre_reset_site_belongs_to_the_previous_day() {
    let report =
        MonthReport::compute(&snapshot([9, 12, 12]), 3, 2024, Some(1_200_000.0)).unwrap();

    // 500k on the 13th and 1M on the 14th: neither clears 1.2M
    for row in &report.players {
        assert_eq!(row.points, 0, "{} earned points", row.player.name);
    }
    assert_eq!(report.value_per_point, 0);

    let report = MonthReport::compute(&snapshot([9, 12, 12]), 3, 2024, None).unwrap();
    assert_eq!(report.point_total, 4);
}

#[test]
fn previous_month_is_separate() {
    let report = MonthReport::compute(&snapshot([12, 12, 12]), 2, 2024, None).unwrap();

    assert_eq!(report.events.len(), 1);
    assert_eq!(report.players.len(), 1);
    assert_eq!(report.players[0].player.name, "Cass");
    assert_eq!(report.point_total, 1);
    assert_eq!(report.value_total, 1_600_000);
}

#[test]
fn pending_queue_is_oldest_first() {
    let pending = snapshot([12, 12, 12]).pending_events().unwrap();
    assert_eq!(pending.iter().map(|e| e.id).collect::<Vec<_>>(), vec![4]);
}

#[test]
fn invalid_month_is_rejected() {
    let err = MonthReport::compute(&snapshot([12, 12, 12]), 0, 2024, None).unwrap_err();
    assert!(matches!(err, CornerError::InvalidMonth(0)));
}

#[tokio::test]
async fn month_report_over_graphql() {
    let schema = build_schema(snapshot([12, 12, 12]), None);
    let response = schema
        .execute(
            "{ monthReport(month: 3, year: 2024) {
                monthName pointTotal valuePerPoint pendingEventCount
                players { player { name } points eventsAttended }
                events { id operationalDay approved }
                attendees { event characters }
            } }",
        )
        .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    let report = &data["monthReport"];

    assert_eq!(report["monthName"], "March");
    assert_eq!(report["pointTotal"], 2);
    assert_eq!(report["valuePerPoint"], 1_360_000);
    assert_eq!(report["pendingEventCount"], 1);
    assert_eq!(report["players"][0]["player"]["name"], "Ayla");
    assert_eq!(report["players"][0]["eventsAttended"], 3);
    assert_eq!(report["players"][2]["eventsAttended"], 1);
    assert_eq!(report["events"][0]["operationalDay"], "2024-03-14");
    assert_eq!(report["events"][0]["approved"], true);
    assert_eq!(report["attendees"][0]["event"], 1);
    assert_eq!(
        report["attendees"][0]["characters"],
        json!(["Ayla Main", "Ayla Hauler", "Bram Main"])
    );
    assert_eq!(report["attendees"][3]["characters"], json!(["Cass Main"]));
}

#[tokio::test]
async fn player_month_over_graphql() {
    let schema = build_schema(snapshot([9, 12, 12]), None);
    let response = schema
        .execute(
            r#"{ playerMonth(name: "Bram", month: 3, year: 2024) {
                approvedEvents { id }
                pendingEvents { id submittedBy }
                points { points days { day value earnedPoint } }
            } }"#,
        )
        .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    let month = &data["playerMonth"];

    assert_eq!(month["approvedEvents"].as_array().unwrap().len(), 3);
    assert_eq!(month["pendingEvents"][0]["id"], 4);
    assert_eq!(month["pendingEvents"][0]["submittedBy"], 2);
    assert_eq!(month["points"]["points"], 2);
    assert_eq!(month["points"]["days"][0]["day"], "2024-03-13");
    assert_eq!(month["points"]["days"][0]["value"], 500_000.0);
}

#[tokio::test]
async fn bad_arguments_surface_as_errors() {
    let schema = build_schema(snapshot([12, 12, 12]), None);

    let response = schema
        .execute("{ monthReport(month: 13, year: 2024) { pointTotal } }")
        .await;
    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message.contains("month 13"));

    let response = schema
        .execute(r#"{ playerMonth(name: "Dax", month: 3, year: 2024) { month } }"#)
        .await;
    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message.contains("Dax"));
}

#[tokio::test]
async fn roster_and_settings_over_graphql() {
    let schema = build_schema(snapshot([12, 12, 12]), None);
    let response = schema
        .execute(
            "{ players { name admin }
               characters(player: 1) { name }
               settings { minimumValue categories { name class } } }",
        )
        .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();

    assert_eq!(data["players"][0]["name"], "Ayla");
    assert_eq!(data["players"][0]["admin"], true);
    assert_eq!(data["characters"].as_array().unwrap().len(), 2);
    assert_eq!(data["settings"]["minimumValue"], 80_000.0);
    assert_eq!(data["settings"]["categories"][5]["class"], "NON_POINTABLE");
}
