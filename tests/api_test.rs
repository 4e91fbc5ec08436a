use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use course_tracker::{api::router, db, state::AppState};
use serde_json::{Value, json};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

async fn setup_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create database");

    db::migrate(&pool).await.expect("Failed to run migrations");

    router(AppState { db: pool })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(match body {
            Some(json) => Body::from(json.to_string()),
            None => Body::empty(),
        })
        .expect("Failed to build request");

    let response = app.clone().oneshot(request).await.expect("Request failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Body is not JSON")
    };
    (status, value)
}

fn course_body(name: &str, days: &str, start: &str, end: &str) -> Value {
    json!({
        "courseName": name,
        "credits": 3,
        "startDate": "2026-01-05",
        "endDate": "2026-04-30",
        "daysOfWeek": days,
        "startTime": start,
        "endTime": end,
    })
}

#[tokio::test]
async fn test_health() {
    let app = setup_app().await;
    let (status, _) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_course_returns_expanded_sessions() {
    let app = setup_app().await;

    let (status, events) = send(
        &app,
        "POST",
        "/api/courses",
        Some(course_body("CWEB280", "M,W", "08:00:00", "10:00:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let events = events.as_array().expect("expected an array");
    assert_eq!(events[0]["start"], "2026-01-05T08:00:00");
    assert_eq!(events[0]["end"], "2026-01-05T10:00:00");
    assert_eq!(events[0]["type"], "course");
    assert_eq!(events[0]["allDay"], false);
    assert_eq!(events[0]["title"], "CWEB280");
    assert_eq!(events[1]["start"], "2026-01-07T08:00:00");
    assert!(events.iter().all(|e| !e["start"].as_str().unwrap().starts_with("2026-01-06")));
}

#[tokio::test]
async fn test_overlapping_course_is_rejected_with_details() {
    let app = setup_app().await;

    send(&app, "POST", "/api/courses", Some(course_body("Algebra", "M", "09:00:00", "10:00:00"))).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/courses",
        Some(course_body("Biology", "M", "08:30:00", "09:30:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let message = body["message"].as_str().expect("expected a message");
    assert!(message.contains("'Algebra'"));
    assert!(message.contains("2026-01-05 to 2026-04-30"));
    assert!(message.contains("Days: M"));
    assert!(message.contains("09:00:00 to 10:00:00"));

    let (_, courses) = send(&app, "GET", "/api/courses", None).await;
    assert_eq!(courses.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_back_to_back_and_disjoint_days_are_accepted() {
    let app = setup_app().await;

    let (status, _) = send(&app, "POST", "/api/courses", Some(course_body("Algebra", "M", "09:00:00", "10:00:00"))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, "POST", "/api/courses", Some(course_body("Biology", "M", "08:00:00", "09:00:00"))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, "POST", "/api/courses", Some(course_body("Chemistry", "Tu,Th", "09:00:00", "10:00:00"))).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_invalid_course_is_rejected() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/courses",
        Some(course_body("Algebra", "M,Sa", "09:00:00", "10:00:00")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Invalid day: Sa"));

    let (status, _) = send(
        &app,
        "POST",
        "/api/courses",
        Some(course_body("Algebra", "M", "10:00:00", "09:00:00")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_course_name_is_rejected() {
    let app = setup_app().await;

    send(&app, "POST", "/api/courses", Some(course_body("Algebra", "M", "09:00:00", "10:00:00"))).await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/courses",
        Some(course_body("Algebra", "F", "09:00:00", "10:00:00")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Course with this name already exists");
}

#[tokio::test]
async fn test_update_course_ignores_itself_but_not_others() {
    let app = setup_app().await;

    send(&app, "POST", "/api/courses", Some(course_body("Algebra", "M", "09:00:00", "10:00:00"))).await;
    send(&app, "POST", "/api/courses", Some(course_body("Biology", "W", "09:00:00", "10:00:00"))).await;

    let (_, courses) = send(&app, "GET", "/api/courses", None).await;
    let algebra_id = courses[0]["id"].as_str().unwrap().to_string();
    assert_eq!(courses[0]["courseName"], "Algebra");

    // Shifting within its own slot only overlaps itself.
    let (status, events) = send(
        &app,
        "PATCH",
        &format!("/api/courses/{}", algebra_id),
        Some(json!({ "startTime": "09:30:00", "endTime": "10:30:00" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(events[0]["start"], "2026-01-05T09:30:00");

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/courses/{}", algebra_id),
        Some(json!({ "daysOfWeek": "M,W" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains("'Biology'"));
}

#[tokio::test]
async fn test_unknown_course_is_not_found() {
    let app = setup_app().await;

    let (status, _) = send(&app, "GET", "/api/courses/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/api/courses/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/api/courses/missing/events", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_all_events_combines_courses_assignments_and_exams() {
    let app = setup_app().await;

    let mut body = course_body("Algebra", "M", "09:00:00", "10:00:00");
    body["endDate"] = json!("2026-01-12");
    send(&app, "POST", "/api/courses", Some(body)).await;

    let (_, courses) = send(&app, "GET", "/api/courses", None).await;
    let course_id = courses[0]["id"].as_str().unwrap().to_string();

    let (status, assignment) = send(
        &app,
        "POST",
        "/api/assignments",
        Some(json!({
            "assignmentTitle": "Problem set 1",
            "courseId": course_id,
            "dueDate": "2026-01-09",
            "dueTime": "23:59:00",
            "worth": 5.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(assignment["type"], "assignment");
    assert_eq!(assignment["start"], assignment["end"]);

    let (status, exam) = send(
        &app,
        "POST",
        "/api/exams",
        Some(json!({
            "title": "Quiz 1",
            "dateOf": "2026-01-10",
            "weight": 10.0,
            "courseId": course_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(exam["start"], "2026-01-10T09:00:00");

    let (status, events) = send(&app, "GET", "/api/all", None).await;
    assert_eq!(status, StatusCode::OK);
    let kinds: Vec<&str> = events
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["type"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["course", "course", "assignment", "exam"]);
}

#[tokio::test]
async fn test_assignment_and_exam_need_existing_course() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/assignments",
        Some(json!({
            "assignmentTitle": "Orphan",
            "courseId": "missing",
            "dueDate": "2026-01-09",
            "dueTime": "23:59:00",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Course not found");

    let (status, _) = send(
        &app,
        "POST",
        "/api/exams",
        Some(json!({
            "title": "Orphan",
            "dateOf": "2026-01-10",
            "weight": 10.0,
            "courseId": "missing",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deleting_course_removes_its_exams() {
    let app = setup_app().await;

    send(&app, "POST", "/api/courses", Some(course_body("Algebra", "M", "09:00:00", "10:00:00"))).await;
    let (_, courses) = send(&app, "GET", "/api/courses", None).await;
    let course_id = courses[0]["id"].as_str().unwrap().to_string();

    send(
        &app,
        "POST",
        "/api/exams",
        Some(json!({ "title": "Final", "dateOf": "2026-04-20", "weight": 40.0, "courseId": course_id })),
    )
    .await;

    let (status, _) = send(&app, "DELETE", &format!("/api/courses/{}", course_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, exams) = send(&app, "GET", "/api/exams", None).await;
    assert_eq!(exams.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_upcoming_rejects_huge_horizon() {
    let app = setup_app().await;

    let (status, _) = send(&app, "GET", "/api/upcoming?days=5000", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, events) = send(&app, "GET", "/api/upcoming?days=3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(events.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_events_carry_their_record_fields() {
    let app = setup_app().await;

    let (_, sessions) = send(
        &app,
        "POST",
        "/api/courses",
        Some(course_body("Algebra", "W,M", "09:00:00", "10:00:00")),
    )
    .await;
    let session = &sessions[0];
    assert_eq!(session["has_file"], false);
    assert!(session.get("hasFile").is_none());
    assert_eq!(session["credits"], 3);
    assert_eq!(session["daysOfWeek"], "M,W");
    assert_eq!(session["startDate"], "2026-01-05");
    assert_eq!(session["endDate"], "2026-04-30");
    assert_eq!(session["startTime"], "09:00:00");
    assert_eq!(session["endTime"], "10:00:00");
    assert!(session.get("weight").is_none());
    let course_id = session["courseId"].as_str().unwrap().to_string();

    let (_, assignment) = send(
        &app,
        "POST",
        "/api/assignments",
        Some(json!({
            "assignmentTitle": "Problem set 1",
            "description": "Chapters 1 and 2",
            "courseId": course_id,
            "dueDate": "2026-01-09",
            "dueTime": "23:59:00",
            "worth": 5.0,
        })),
    )
    .await;
    assert_eq!(assignment["has_file"], false);
    assert_eq!(assignment["worth"], 5.0);
    assert_eq!(assignment["description"], "Chapters 1 and 2");
    assert!(assignment.get("credits").is_none());

    let (_, exam) = send(
        &app,
        "POST",
        "/api/exams",
        Some(json!({ "title": "Quiz 1", "dateOf": "2026-01-10", "weight": 10.0, "courseId": course_id })),
    )
    .await;
    assert_eq!(exam["date"], "2026-01-10");
    assert_eq!(exam["weight"], 10.0);
    assert_eq!(exam["has_file"], false);
    assert!(exam.get("worth").is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_clashing_creates_admit_exactly_one() {
    // A file database, so the pool really hands out separate connections.
    let path = std::env::temp_dir().join(format!("course-tracker-{}.db", uuid::Uuid::new_v4()));
    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect(&format!("sqlite://{}?mode=rwc", path.display()))
        .await
        .expect("Failed to create database");
    db::migrate(&pool).await.expect("Failed to run migrations");
    let app = router(AppState { db: pool.clone() });

    let requests = (0..4).map(|i| {
        let app = app.clone();
        tokio::spawn(async move {
            let body = course_body(&format!("Section {}", i), "M", "09:00:00", "10:00:00");
            send(&app, "POST", "/api/courses", Some(body)).await.0
        })
    });

    let mut statuses = Vec::new();
    for handle in requests.collect::<Vec<_>>() {
        statuses.push(handle.await.expect("Request task panicked"));
    }

    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let rejected = statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count();
    assert_eq!((created, rejected), (1, 3), "statuses: {:?}", statuses);

    let (_, courses) = send(&app, "GET", "/api/courses", None).await;
    assert_eq!(courses.as_array().map(Vec::len), Some(1));

    pool.close().await;
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
    }
}

#[tokio::test]
async fn test_student_enrollment_lifecycle() {
    let app = setup_app().await;

    send(&app, "POST", "/api/courses", Some(course_body("Algebra", "M", "09:00:00", "10:00:00"))).await;
    let (_, courses) = send(&app, "GET", "/api/courses", None).await;
    let course_id = courses[0]["id"].as_str().unwrap().to_string();

    let (status, student) = send(
        &app,
        "POST",
        "/api/students",
        Some(json!({ "firstName": " Ada ", "lastName": "Lovelace", "userId": 7 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(student["name"], "Ada Lovelace");
    assert_eq!(student["userId"], 7);
    let student_id = student["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/api/students",
        Some(json!({ "firstName": "Other", "lastName": "Person", "userId": 7 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User already has a student record");

    let enroll_uri = format!("/api/students/{}/enroll", student_id);
    let (status, enrollment) = send(&app, "POST", &enroll_uri, Some(json!({ "courseId": course_id }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(enrollment["courseId"], course_id.as_str());
    assert!(enrollment["enrolledAt"].is_string());

    let (status, body) = send(&app, "POST", &enroll_uri, Some(json!({ "courseId": course_id }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Already enrolled in this course");

    let (status, _) = send(&app, "POST", &enroll_uri, Some(json!({ "courseId": "missing" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, detail) = send(&app, "GET", &format!("/api/students/{}", student_id), None).await;
    assert_eq!(detail["courses"], json!([{ "id": course_id, "courseName": "Algebra" }]));

    let (status, enrolled) = send(&app, "GET", &format!("/api/students/{}/courses", student_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(enrolled[0]["daysOfWeek"], "M");

    let unenroll_uri = format!("/api/students/{}/courses/{}", student_id, course_id);
    let (status, _) = send(&app, "DELETE", &unenroll_uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "DELETE", &unenroll_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, updated) = send(
        &app,
        "PATCH",
        &format!("/api/students/{}", student_id),
        Some(json!({ "lastName": "King" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Ada King");

    let (status, _) = send(&app, "DELETE", &format!("/api/students/{}", student_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &format!("/api/students/{}/courses", student_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, students) = send(&app, "GET", "/api/students", None).await;
    assert_eq!(students.as_array().map(Vec::len), Some(0));
}
