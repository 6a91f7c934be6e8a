mod common;

use axum::http::{Method, StatusCode};
use classroom_core::domain::Role;
use classroom_server::entity::feedback;
use common::{Account, MAX_UPLOAD_BYTES, TestApp};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{Value, json};

const PHYSICS_ID: &str = "abcd1234-5678-4abc-8def-0123456789ab";

async fn create_course(app: &TestApp, teacher: &Account, name: &str) -> String {
    let (status, body) = app
        .post("/api/teacher/courses", teacher, json!({ "name": name }))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().expect("course id").to_string()
}

async fn enroll(app: &TestApp, teacher: &Account, course_id: &str, student: &Account) {
    let (status, body) = app
        .post(
            "/api/teacher/students",
            teacher,
            json!({ "courseId": course_id, "email": student.user.email }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
}

async fn create_assignment(app: &TestApp, teacher: &Account, course_id: &str, title: &str) -> String {
    let (status, body) = app
        .post(
            "/api/teacher/assignments",
            teacher,
            json!({
                "courseId": course_id,
                "title": title,
                "description": "Show your work",
                "dueDate": "2026-12-01T09:00:00Z",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["assignment"]["id"].as_str().expect("assignment id").to_string()
}

async fn submit(app: &TestApp, student: &Account, assignment_id: &str) -> String {
    let (status, body) = app
        .post(
            &format!("/api/student/assignments/{assignment_id}/submit"),
            student,
            json!({ "summary": "My answer" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["submission"]["id"].as_str().expect("submission id").to_string()
}

async fn grade(
    app: &TestApp,
    teacher: &Account,
    submission_id: &str,
    comment: &str,
    grade: Option<u8>,
) -> Value {
    let mut request = json!({ "comment": comment });
    if let Some(grade) = grade {
        request["grade"] = json!(grade);
    }
    let (status, body) = app
        .post(
            &format!("/api/teacher/assignments/submissions/{submission_id}/feedback"),
            teacher,
            request,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body
}

#[tokio::test]
async fn health_check_needs_no_session() {
    let app = TestApp::spawn().await;

    let (status, body) = app.send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn student_joins_with_code_once() {
    let app = TestApp::spawn().await;
    let teacher = app.account("Ada", "ada@school.edu", Role::Teacher).await;
    let student = app.account("Ben", "ben@school.edu", Role::Student).await;
    app.course_with_id(PHYSICS_ID, "Physics 101", &teacher).await;
    app.course_with_id("ffff0000-5678-4abc-8def-0123456789ab", "Chemistry", &teacher)
        .await;

    let (status, people) = app
        .get(&format!("/api/teacher/people?courseId={PHYSICS_ID}"), &teacher)
        .await;
    assert_eq!(status, StatusCode::OK, "{people}");
    assert_eq!(people["studentCode"], "STUD-PHYS-ABCD");
    assert_eq!(people["teacherCode"], "TEACH-PHYS-ABCD");
    assert_eq!(people["isMainTeacher"], true);
    assert_eq!(
        people["shareableLink"],
        format!("https://lms.example.edu/student/enroll?courseId={PHYSICS_ID}")
    );

    let (status, joined) = app
        .post(
            "/api/student/courses/join",
            &student,
            json!({ "code": "STUD-PHYS-ABCD" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{joined}");
    assert_eq!(joined["message"], "Successfully joined the course");
    assert_eq!(joined["course"]["id"], PHYSICS_ID);

    let (status, again) = app
        .post(
            "/api/student/courses/join",
            &student,
            json!({ "code": "STUD-PHYS-ABCD" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(again["code"], "ALREADY_ENROLLED");

    let (_, courses) = app.get("/api/student/courses", &student).await;
    let courses = courses["courses"].as_array().expect("courses array");
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["name"], "Physics 101");
}

#[tokio::test]
async fn malformed_and_unknown_codes_are_told_apart() {
    let app = TestApp::spawn().await;
    let student = app.account("Ben", "ben@school.edu", Role::Student).await;

    let (status, body) = app
        .post("/api/student/courses/join", &student, json!({ "code": "PHYS-ABCD" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_CODE_FORMAT");

    let (status, body) = app
        .post(
            "/api/student/courses/join",
            &student,
            json!({ "code": "STUD-NOPE-0000" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Invalid course code");
}

#[tokio::test]
async fn missing_session_and_wrong_role_are_unauthorized() {
    let app = TestApp::spawn().await;
    let student = app.account("Ben", "ben@school.edu", Role::Student).await;

    let (status, body) = app
        .send(Method::GET, "/api/teacher/courses", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = app.get("/api/teacher/courses", &student).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(
            Method::GET,
            "/api/student/courses",
            Some("not-a-token"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn foreign_and_missing_courses_look_the_same() {
    let app = TestApp::spawn().await;
    let owner = app.account("Ada", "ada@school.edu", Role::Teacher).await;
    let outsider = app.account("Cy", "cy@school.edu", Role::Teacher).await;
    let course_id = create_course(&app, &owner, "Physics 101").await;

    let (foreign_status, foreign) = app
        .get(&format!("/api/teacher/assignments?courseId={course_id}"), &outsider)
        .await;
    let (missing_status, missing) = app
        .get(
            "/api/teacher/assignments?courseId=00000000-0000-4000-8000-000000000000",
            &outsider,
        )
        .await;
    let (garbled_status, garbled) = app
        .get("/api/teacher/assignments?courseId=not-a-uuid", &outsider)
        .await;

    assert_eq!(foreign_status, StatusCode::NOT_FOUND);
    assert_eq!(foreign, missing);
    assert_eq!(missing_status, garbled_status);
    assert_eq!(missing, garbled);
    assert_eq!(foreign["error"], "Course not found or access denied");

    let (status, body) = app.get("/api/teacher/assignments", &outsider).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Course ID is required");
}

#[tokio::test]
async fn co_teacher_removal_is_idempotent() {
    let app = TestApp::spawn().await;
    let owner = app.account("Ada", "ada@school.edu", Role::Teacher).await;
    let helper = app.account("Cy", "cy@school.edu", Role::Teacher).await;
    let course_id = create_course(&app, &owner, "Physics 101").await;

    let (status, invited) = app
        .send(
            Method::PUT,
            "/api/teacher/co-teachers",
            Some(&owner.token),
            Some(json!({ "email": "cy@school.edu", "courseId": course_id })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{invited}");
    assert_eq!(invited["message"], "Successfully invited Cy as co-teacher");

    let (status, again) = app
        .send(
            Method::PUT,
            "/api/teacher/co-teachers",
            Some(&owner.token),
            Some(json!({ "email": "cy@school.edu", "courseId": course_id })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(again["code"], "ALREADY_CO_TEACHER");

    let (_, courses) = app.get("/api/teacher/courses", &helper).await;
    assert_eq!(courses["courses"].as_array().map(Vec::len), Some(1));

    let uri = format!(
        "/api/teacher/co-teachers?courseId={course_id}&coTeacherId={}",
        helper.user.id
    );
    for _ in 0..2 {
        let (status, body) = app
            .send(Method::DELETE, &uri, Some(&owner.token), None)
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["message"], "Co-teacher removed successfully");
    }

    let (_, people) = app
        .get(&format!("/api/teacher/people?courseId={course_id}"), &owner)
        .await;
    assert_eq!(people["coTeachers"], json!([]));
    assert_eq!(people["teamMembers"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn feedback_resubmission_replaces_the_single_row() {
    let app = TestApp::spawn().await;
    let teacher = app.account("Ada", "ada@school.edu", Role::Teacher).await;
    let student = app.account("Ben", "ben@school.edu", Role::Student).await;
    let course_id = create_course(&app, &teacher, "Physics 101").await;
    enroll(&app, &teacher, &course_id, &student).await;
    let assignment_id = create_assignment(&app, &teacher, &course_id, "Kinematics").await;
    let submission_id = submit(&app, &student, &assignment_id).await;

    let first = grade(&app, &teacher, &submission_id, "Check units", Some(70)).await;
    let second = grade(&app, &teacher, &submission_id, "Units fixed, well done", Some(88)).await;
    assert_eq!(second["feedback"]["grade"], 88);
    assert_eq!(second["feedback"]["comment"], "Units fixed, well done");
    assert_eq!(second["feedback"]["id"], first["feedback"]["id"]);

    let rows = feedback::Entity::find()
        .count(&app.db)
        .await
        .expect("feedback rows should count");
    assert_eq!(rows, 1);

    let (_, assignments) = app
        .get(&format!("/api/student/assignments?courseId={course_id}"), &student)
        .await;
    let entry = &assignments["assignments"][0];
    assert_eq!(entry["status"], "graded");
    assert_eq!(entry["grade"], "88/100");
    assert_eq!(entry["feedback"], "Units fixed, well done");
    assert_eq!(entry["submission"], "My answer");

    let (_, submissions) = app
        .get(
            &format!("/api/teacher/assignments/{assignment_id}/submissions"),
            &teacher,
        )
        .await;
    let feedback = &submissions["submissions"][0]["feedback"];
    assert_eq!(feedback["comment"], "Units fixed, well done");
    assert_eq!(feedback["grade"], 88);
}

#[tokio::test]
async fn feedback_validation_and_ownership() {
    let app = TestApp::spawn().await;
    let teacher = app.account("Ada", "ada@school.edu", Role::Teacher).await;
    let outsider = app.account("Cy", "cy@school.edu", Role::Teacher).await;
    let student = app.account("Ben", "ben@school.edu", Role::Student).await;
    let course_id = create_course(&app, &teacher, "Physics 101").await;
    enroll(&app, &teacher, &course_id, &student).await;
    let assignment_id = create_assignment(&app, &teacher, &course_id, "Kinematics").await;
    let submission_id = submit(&app, &student, &assignment_id).await;
    let uri = format!("/api/teacher/assignments/submissions/{submission_id}/feedback");

    let (status, body) = app
        .post(&uri, &teacher, json!({ "comment": "Good", "grade": 101 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["details"][0]["field"], "grade");

    let (status, _) = app
        .post(&uri, &outsider, json!({ "comment": "Good", "grade": 90 }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .post(
            "/api/teacher/assignments/submissions/00000000-0000-4000-8000-000000000000/feedback",
            &teacher,
            json!({ "comment": "Good" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Submission not found");
}

#[tokio::test]
async fn roster_aggregates_grades_and_ranks_graded_students() {
    let app = TestApp::spawn().await;
    let teacher = app.account("Ada", "ada@school.edu", Role::Teacher).await;
    let graded = app.account("Ben", "ben@school.edu", Role::Student).await;
    let silent = app.account("Dee", "dee@school.edu", Role::Student).await;
    let course_id = create_course(&app, &teacher, "Physics 101").await;
    enroll(&app, &teacher, &course_id, &graded).await;
    enroll(&app, &teacher, &course_id, &silent).await;

    let first = create_assignment(&app, &teacher, &course_id, "Kinematics").await;
    let second = create_assignment(&app, &teacher, &course_id, "Dynamics").await;
    let submission = submit(&app, &graded, &first).await;
    grade(&app, &teacher, &submission, "Reviewed", Some(60)).await;
    let submission = submit(&app, &graded, &second).await;
    grade(&app, &teacher, &submission, "Reviewed", Some(89)).await;
    let ungraded = submit(&app, &silent, &first).await;
    grade(&app, &teacher, &ungraded, "Reviewed", None).await;

    let (status, people) = app
        .get(&format!("/api/teacher/people?courseId={course_id}"), &teacher)
        .await;
    assert_eq!(status, StatusCode::OK, "{people}");
    let performance = people["studentPerformance"].as_array().expect("performance");
    let ben = performance
        .iter()
        .find(|entry| entry["name"] == "Ben")
        .expect("Ben in roster");
    assert_eq!(ben["averageGrade"], 75);
    assert_eq!(ben["status"], "Good");
    assert_eq!(ben["completedAssignments"], 2);
    assert_eq!(ben["totalAssignments"], 2);
    let dee = performance
        .iter()
        .find(|entry| entry["name"] == "Dee")
        .expect("Dee in roster");
    assert_eq!(dee["averageGrade"], 0);
    assert_eq!(dee["status"], "Needs Improvement");

    let (status, student_view) = app
        .get(&format!("/api/student/people?courseId={course_id}"), &silent)
        .await;
    assert_eq!(status, StatusCode::OK, "{student_view}");
    assert_eq!(student_view["currentStudentAverage"], 0);
    assert_eq!(student_view["roster"].as_array().map(Vec::len), Some(2));
    let top = student_view["topPerformers"].as_array().expect("top performers");
    assert_eq!(top.len(), 1);
    assert_eq!(top[0]["rank"], 1);
    assert_eq!(top[0]["name"], "Ben");
    assert_eq!(top[0]["percentage"], 75);
}

#[tokio::test]
async fn student_assignment_status_follows_progress() {
    let app = TestApp::spawn().await;
    let teacher = app.account("Ada", "ada@school.edu", Role::Teacher).await;
    let student = app.account("Ben", "ben@school.edu", Role::Student).await;
    let course_id = create_course(&app, &teacher, "Physics 101").await;
    enroll(&app, &teacher, &course_id, &student).await;
    let pending = create_assignment(&app, &teacher, &course_id, "Optics").await;
    let submitted = create_assignment(&app, &teacher, &course_id, "Waves").await;
    submit(&app, &student, &submitted).await;

    let (_, body) = app
        .get(&format!("/api/student/assignments?courseId={course_id}"), &student)
        .await;
    let assignments = body["assignments"].as_array().expect("assignments");
    let status_of = |id: &str| {
        assignments
            .iter()
            .find(|entry| entry["id"] == id)
            .map(|entry| entry["status"].clone())
    };
    assert_eq!(status_of(&pending), Some(json!("pending")));
    assert_eq!(status_of(&submitted), Some(json!("submitted")));

    let (_, teacher_view) = app
        .get(&format!("/api/teacher/assignments?courseId={course_id}"), &teacher)
        .await;
    let counts: Vec<(String, u64)> = teacher_view["assignments"]
        .as_array()
        .expect("assignments")
        .iter()
        .map(|entry| {
            (
                entry["id"].as_str().unwrap_or_default().to_string(),
                entry["submissions"].as_u64().unwrap_or_default(),
            )
        })
        .collect();
    assert!(counts.contains(&(pending, 0)));
    assert!(counts.contains(&(submitted, 1)));
}

#[tokio::test]
async fn enrolling_checks_the_target_account() {
    let app = TestApp::spawn().await;
    let teacher = app.account("Ada", "ada@school.edu", Role::Teacher).await;
    let other_teacher = app.account("Cy", "cy@school.edu", Role::Teacher).await;
    let student = app.account("Ben", "ben@school.edu", Role::Student).await;
    let course_id = create_course(&app, &teacher, "Physics 101").await;

    let (status, body) = app
        .post(
            "/api/teacher/students",
            &teacher,
            json!({ "courseId": course_id, "email": other_teacher.user.email }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "NOT_A_STUDENT");

    let (status, body) = app
        .post(
            "/api/teacher/students",
            &teacher,
            json!({ "courseId": course_id, "email": "nobody@school.edu" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Student with this email not found");

    enroll(&app, &teacher, &course_id, &student).await;
    let (status, body) = app
        .post(
            "/api/teacher/students",
            &teacher,
            json!({ "courseId": course_id, "email": student.user.email }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "This student is already enrolled in this course");
}

#[tokio::test]
async fn schedules_and_resources_are_listed_for_members() {
    let app = TestApp::spawn().await;
    let teacher = app.account("Ada", "ada@school.edu", Role::Teacher).await;
    let student = app.account("Ben", "ben@school.edu", Role::Student).await;
    let stranger = app.account("Eve", "eve@school.edu", Role::Student).await;
    let course_id = create_course(&app, &teacher, "Physics 101").await;
    enroll(&app, &teacher, &course_id, &student).await;

    for (topic, time) in [("Later", "2026-11-02T10:00:00Z"), ("Sooner", "2026-11-01T10:00:00Z")] {
        let (status, body) = app
            .post(
                "/api/teacher/schedule",
                &teacher,
                json!({
                    "courseId": course_id,
                    "subject": "Physics",
                    "topic": topic,
                    "time": time,
                    "meetingLink": "https://meet.example.com/phys",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
    }

    let (status, body) = app
        .post(
            "/api/teacher/resources",
            &teacher,
            json!({
                "courseId": course_id,
                "title": "Slides",
                "type": "PDF_DOCUMENT",
                "attachment": "resource/slides.pdf",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (_, schedules) = app
        .get(&format!("/api/student/schedule?courseId={course_id}"), &student)
        .await;
    assert_eq!(schedules["schedules"][0]["topic"], "Sooner");
    assert_eq!(schedules["schedules"][1]["topic"], "Later");

    let (_, resources) = app
        .get(&format!("/api/student/resources?courseId={course_id}"), &student)
        .await;
    assert_eq!(resources["resources"][0]["type"], "PDF_DOCUMENT");
    assert_eq!(
        resources["resources"][0]["attachment"],
        "https://lms.example.edu/files/resource/slides.pdf"
    );

    let (status, _) = app
        .get(&format!("/api/student/resources?courseId={course_id}"), &stranger)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_or_mistyped_body_fields_are_validation_errors() {
    let app = TestApp::spawn().await;
    let teacher = app.account("Ada", "ada@school.edu", Role::Teacher).await;
    let student = app.account("Ben", "ben@school.edu", Role::Student).await;
    let course_id = create_course(&app, &teacher, "Physics 101").await;
    enroll(&app, &teacher, &course_id, &student).await;
    let assignment_id = create_assignment(&app, &teacher, &course_id, "Kinematics").await;
    let submission_id = submit(&app, &student, &assignment_id).await;
    let feedback_uri = format!("/api/teacher/assignments/submissions/{submission_id}/feedback");

    let cases = [
        (&student, "/api/student/courses/join".to_string(), json!({}), "code"),
        (&student, "/api/student/courses/join".to_string(), json!({ "code": 5 }), "code"),
        (&teacher, feedback_uri.clone(), json!({}), "comment"),
        (&teacher, feedback_uri, json!({ "grade": 50 }), "comment"),
    ];
    for (account, uri, request, field) in cases {
        let (status, body) = app.post(&uri, account, request.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri} {request}: {body}");
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"][0]["field"], field, "{uri} {request}");
    }

    let (status, body) = app
        .send(
            Method::PUT,
            "/api/teacher/co-teachers",
            Some(&teacher.token),
            Some(json!({ "courseId": course_id })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["details"][0]["field"], "email");
}

#[tokio::test]
async fn malformed_query_strings_use_the_error_envelope() {
    let app = TestApp::spawn().await;
    let teacher = app.account("Ada", "ada@school.edu", Role::Teacher).await;

    let (status, body) = app
        .get("/api/teacher/people?courseId=x&courseId=y", &teacher)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "INVALID_QUERY");
    assert!(body["error"].as_str().is_some_and(|text| text.contains("courseId")), "{body}");
}

#[tokio::test]
async fn inviting_co_teachers_checks_the_invitee() {
    let app = TestApp::spawn().await;
    let owner = app.account("Ada", "ada@school.edu", Role::Teacher).await;
    app.account("Ben", "ben@school.edu", Role::Student).await;
    let course_id = create_course(&app, &owner, "Physics 101").await;

    let cases = [
        ("nobody@school.edu", StatusCode::NOT_FOUND, "NOT_FOUND", "Teacher with this email not found"),
        (
            "ben@school.edu",
            StatusCode::BAD_REQUEST,
            "NOT_A_TEACHER",
            "User with this email is not a teacher",
        ),
        (
            "ada@school.edu",
            StatusCode::BAD_REQUEST,
            "ALREADY_MAIN_TEACHER",
            "This teacher is already the main teacher of the course",
        ),
    ];
    for (email, expected_status, code, error) in cases {
        let (status, body) = app
            .send(
                Method::PUT,
                "/api/teacher/co-teachers",
                Some(&owner.token),
                Some(json!({ "courseId": course_id, "email": email })),
            )
            .await;
        assert_eq!(status, expected_status, "{email}: {body}");
        assert_eq!(body["code"], code, "{email}");
        assert_eq!(body["error"], error, "{email}");
    }

    let (_, people) = app
        .get(&format!("/api/teacher/people?courseId={course_id}"), &owner)
        .await;
    assert_eq!(people["coTeachers"], json!([]));
}

#[tokio::test]
async fn assignment_upload_stores_pdfs_only() {
    let app = TestApp::spawn().await;
    let teacher = app.account("Ada", "ada@school.edu", Role::Teacher).await;
    let uri = "/api/teacher/assignments/upload";
    let pdf: &[u8] = b"%PDF-1.4 brief";

    let (status, body) = app
        .upload(uri, &teacher, &[("file", "brief.pdf", "application/pdf", pdf)])
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["success"], true);
    let key = body["key"].as_str().expect("upload key");
    assert!(key.starts_with("assignment/") && key.ends_with("-brief.pdf"), "{key}");
    assert_eq!(body["url"], format!("https://lms.example.edu/files/{key}"));

    let (status, stored) = app.fetch(&format!("/files/{key}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored, pdf);

    let (status, body) = app
        .upload(uri, &teacher, &[("attachment", "brief.pdf", "application/pdf", pdf)])
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "File is required");

    let (status, body) = app
        .upload(uri, &teacher, &[("file", "notes.txt", "text/plain", &b"plain notes"[..])])
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Only PDF files are allowed");
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let app = TestApp::spawn().await;
    let teacher = app.account("Ada", "ada@school.edu", Role::Teacher).await;
    let oversized = vec![b'x'; MAX_UPLOAD_BYTES * 2];

    let (status, body) = app
        .upload(
            "/api/teacher/assignments/upload",
            &teacher,
            &[("file", "huge.pdf", "application/pdf", oversized.as_slice())],
        )
        .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE, "{body}");
    assert_eq!(body["code"], "INVALID_UPLOAD");
}
