//! Integration tests for allotment generation and retrieval.

mod helpers;

use std::collections::{BTreeMap, HashSet};

use http::StatusCode;
use serde_json::{Value, json};

use examhall_core::types::ExamId;

fn seats_by_room(view: &Value) -> BTreeMap<i64, Vec<i64>> {
    let mut seats = BTreeMap::new();
    for group in view["rooms"].as_array().expect("rooms") {
        let room_id = group["room"]["roomId"].as_i64().expect("roomId");
        let numbers: Vec<i64> = group["allotments"]
            .as_array()
            .expect("allotments")
            .iter()
            .map(|a| a["seatNumber"].as_i64().expect("seatNumber"))
            .collect();
        seats.insert(room_id, numbers);
    }
    seats
}

fn seated_students(view: &Value) -> Vec<String> {
    view["rooms"]
        .as_array()
        .expect("rooms")
        .iter()
        .flat_map(|group| group["allotments"].as_array().expect("allotments").iter())
        .map(|a| a["studentId"].as_str().expect("studentId").to_string())
        .collect()
}

#[tokio::test]
async fn test_generate_seats_every_registrant_once() {
    let app = helpers::TestApp::new().await;
    let registered = app.register_many(1, 15).await;

    let response = app.generate(json!({ "examId": 1, "roomIds": [4, 1, 2] })).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Allotment generated successfully");
    assert_eq!(response.body["allotments"], 15);

    let view = app.find(1).await;
    assert_eq!(view.status, StatusCode::OK);

    let seated = seated_students(&view.body);
    assert_eq!(seated.len(), 15);
    let unique: HashSet<&String> = seated.iter().collect();
    let expected: HashSet<&String> = registered.iter().collect();
    assert_eq!(unique, expected);
}

#[tokio::test]
async fn test_seat_numbers_are_contiguous_per_room() {
    let app = helpers::TestApp::new().await;
    app.register_many(1, 15).await;

    app.generate(json!({ "examId": 1, "roomIds": [4, 1, 2] })).await;
    let view = app.find(1).await;

    let seats = seats_by_room(&view.body);
    assert_eq!(seats.get(&4).map(Vec::len), Some(12));
    assert_eq!(seats.get(&1).map(Vec::len), Some(2));
    assert_eq!(seats.get(&2).map(Vec::len), Some(1));
    for numbers in seats.values() {
        let expected: Vec<i64> = (1..=numbers.len() as i64).collect();
        assert_eq!(numbers, &expected);
    }
}

#[tokio::test]
async fn test_insufficient_capacity_writes_nothing() {
    let app = helpers::TestApp::new().await;
    app.register_many(1, 5).await;

    let response = app.generate(json!({ "examId": 1, "roomIds": [1, 2] })).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.reason(), Some("INSUFFICIENT_CAPACITY"));
    assert!(app.db.allotments_for(ExamId(1)).await.is_empty());
    assert_eq!(app.find(1).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_exact_capacity_is_accepted() {
    let app = helpers::TestApp::new().await;
    app.register_many(1, 4).await;

    let response = app.generate(json!({ "examId": 1, "roomIds": [1, 2] })).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["allotments"], 4);
}

#[tokio::test]
async fn test_regenerate_replaces_previous_allotment() {
    let app = helpers::TestApp::new().await;
    app.register_many(1, 10).await;

    app.generate(json!({ "examId": 1, "roomIds": [3] })).await;
    let first: HashSet<i32> = app
        .db
        .allotments_for(ExamId(1))
        .await
        .iter()
        .map(|a| a.allotment_id)
        .collect();
    assert_eq!(first.len(), 10);

    let response = app.generate(json!({ "examId": 1, "roomIds": [4] })).await;
    assert_eq!(response.status, StatusCode::OK);

    let second = app.db.allotments_for(ExamId(1)).await;
    assert_eq!(second.len(), 10);
    assert!(second.iter().all(|a| !first.contains(&a.allotment_id)));

    let seats = seats_by_room(&app.find(1).await.body);
    assert_eq!(seats.keys().copied().collect::<Vec<_>>(), vec![4]);
}

#[tokio::test]
async fn test_exam_without_registrations_is_rejected() {
    let app = helpers::TestApp::new().await;

    let response = app.generate(json!({ "examId": 2, "roomIds": [3] })).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.reason(), Some("NOT_REGISTERED"));
}

#[tokio::test]
async fn test_unknown_exam_and_rooms() {
    let app = helpers::TestApp::new().await;
    app.register_many(1, 3).await;

    let response = app.generate(json!({ "examId": 99, "roomIds": [3] })).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.reason(), Some("EXAM_NOT_FOUND"));
    assert_eq!(response.body["message"], "Exam with ID 99 not found");

    let response = app.generate(json!({ "examId": 1, "roomIds": [98, 99] })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.reason(), Some("NO_VALID_ROOMS"));
}

#[tokio::test]
async fn test_two_small_rooms_separate_departments() {
    for seed in 0..16 {
        let app = helpers::TestApp::with_seed(seed).await;
        app.register(1, &[("A1", 1), ("A2", 1), ("B1", 2), ("B2", 2)])
            .await;

        let response = app.generate(json!({ "examId": 1, "roomIds": [1, 2] })).await;
        assert_eq!(response.status, StatusCode::OK, "seed {seed}");

        let view = app.find(1).await;
        for group in view.body["rooms"].as_array().expect("rooms") {
            let departments: Vec<i64> = group["allotments"]
                .as_array()
                .expect("allotments")
                .iter()
                .map(|a| a["departmentId"].as_i64().expect("departmentId"))
                .collect();
            assert_eq!(departments.len(), 2, "seed {seed}");
            assert_ne!(departments[0], departments[1], "seed {seed}");
        }
    }
}

#[tokio::test]
async fn test_empty_staff_directory_fails_despite_explicit_assignments() {
    let app = helpers::TestApp::without_staff().await;
    app.register_many(1, 3).await;

    let response = app
        .generate(json!({
            "examId": 1,
            "roomIds": [1, 2],
            "staffAssignments": { "1": [1], "2": [2] },
        }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.reason(), Some("NO_STAFF_AVAILABLE"));
    assert!(app.db.allotments_for(ExamId(1)).await.is_empty());
}

#[tokio::test]
async fn test_find_before_generate_is_not_found() {
    let app = helpers::TestApp::new().await;
    app.register_many(1, 3).await;

    let response = app.find(1).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
    assert_eq!(response.reason(), Some("NO_ALLOTMENTS"));
    assert_eq!(response.body["message"], "No allotments found for exam ID 1");
}

#[tokio::test]
async fn test_grouped_view_carries_exam_and_invigilators() {
    let app = helpers::TestApp::new().await;
    app.register_many(1, 6).await;

    let response = app
        .generate(json!({
            "examId": 1,
            "roomIds": [4],
            "staffAssignments": { "4": [2, 9, 1, 2] },
        }))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let view = app.find(1).await.body;
    assert_eq!(view["exam"]["subjectCode"], "CS301");
    assert_eq!(view["exam"]["session"], "Morning");

    let group = &view["rooms"][0];
    assert_eq!(group["room"]["roomNumber"], "L-01");
    assert_eq!(group["assignedStaff"]["staffId"], 2);
    assert_eq!(group["assignedStaff"]["staffName"], "Brian Okafor");

    let invigilators: Vec<i64> = group["invigilators"]
        .as_array()
        .expect("invigilators")
        .iter()
        .map(|s| s["staffId"].as_i64().expect("staffId"))
        .collect();
    assert_eq!(invigilators, vec![2, 1]);

    let first = &group["allotments"][0];
    assert_eq!(first["seatNumber"], 1);
    assert!(first["departmentName"].is_string());
    assert!(first["studentName"].is_string());
}

#[tokio::test]
async fn test_room_without_assignment_has_no_staff() {
    let app = helpers::TestApp::new().await;
    app.register_many(1, 3).await;

    app.generate(json!({ "examId": 1, "roomIds": [3] })).await;

    let view = app.find(1).await.body;
    assert!(view["rooms"][0]["assignedStaff"].is_null());
    assert_eq!(view["rooms"][0]["invigilators"], json!([]));
    assert!(app.db.invigilators_for(ExamId(1)).await.is_empty());
}

#[tokio::test]
async fn test_malformed_requests_are_rejected() {
    let app = helpers::TestApp::new().await;

    let response = app.generate(json!({ "examId": 1, "roomIds": [] })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.reason(), Some("INVALID_REQUEST"));

    let response = app
        .raw_request("POST", "/api/allotments", "{\"examId\": ".to_string())
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.reason(), Some("MALFORMED_BODY"));

    let response = app.request("GET", "/api/allotments/abc", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_regeneration_is_serialized() {
    let app = helpers::TestApp::new().await;
    let registered = app.register_many(1, 12).await;

    let (a, b, c, d) = tokio::join!(
        app.generate(json!({ "examId": 1, "roomIds": [3] })),
        app.generate(json!({ "examId": 1, "roomIds": [4] })),
        app.generate(json!({ "examId": 1, "roomIds": [4, 3] })),
        app.generate(json!({ "examId": 1, "roomIds": [1, 2, 3] })),
    );
    for response in [a, b, c, d] {
        assert_eq!(response.status, StatusCode::OK);
    }

    let stored = app.db.allotments_for(ExamId(1)).await;
    assert_eq!(stored.len(), registered.len());
    let unique: HashSet<_> = stored.iter().map(|a| a.student_id.clone()).collect();
    assert_eq!(unique.len(), registered.len());
}
