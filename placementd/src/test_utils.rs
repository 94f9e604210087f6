//! Test utilities: test server construction and entity factories.

use crate::api::models::{
    applications::ApplicationResponse, companies::CompanyResponse, notifications::NotificationResponse,
    students::StudentResponse, users::UserResponse,
};
use crate::db::handlers::{
    Repository, application_windows::ApplicationWindows, applications::Applications, companies::Companies,
    notifications::Notifications, students::Students, users::Users,
};
use crate::db::models::{
    application_windows::WindowCreateDBRequest,
    applications::ApplicationCreateDBRequest,
    companies::CompanyCreateDBRequest,
    notifications::NotificationCreateDBRequest,
    students::StudentCreateDBRequest,
    users::UserCreateDBRequest,
};
use crate::types::{CompanyId, UserId};
use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use sqlx::PgPool;

pub async fn create_test_app(pool: PgPool) -> TestServer {
    let config = create_test_config();

    let app = crate::Application::new_with_pool(config, pool).expect("Failed to create application");
    app.into_test_server()
}

pub fn create_test_config() -> crate::config::Config {
    crate::config::Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        pool: crate::config::PoolSettings {
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// JSON body for registering a student, suitable for tweaking per test.
pub fn student_payload(roll_number: &str, branch: &str, batch: i32) -> Value {
    json!({
        "roll_number": roll_number,
        "name": format!("Student {roll_number}"),
        "email": format!("{}@college.edu", roll_number.to_lowercase()),
        "branch": branch,
        "batch": batch,
        "cgpa": 8.0,
        "backlogs": 0
    })
}

pub async fn create_test_user(pool: &PgPool, role: &str) -> UserResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = Users::new(&mut conn);
    let suffix = uuid::Uuid::new_v4().simple().to_string();

    let request = UserCreateDBRequest {
        email: format!("user_{suffix}@college.edu"),
        name: "Test User".to_string(),
        role: role.to_string(),
    };
    let user = repo.create(&request).await.expect("Failed to create test user");
    UserResponse::from(user)
}

pub async fn create_test_student(
    pool: &PgPool,
    roll_number: &str,
    branch: &str,
    batch: i32,
    cgpa: f64,
    backlogs: i32,
) -> StudentResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = Students::new(&mut conn);

    let request = StudentCreateDBRequest {
        roll_number: roll_number.to_string(),
        name: format!("Student {roll_number}"),
        email: format!("{}@college.edu", roll_number.to_lowercase()),
        branch: branch.to_string(),
        batch,
        cgpa,
        backlogs,
    };
    let student = repo.create(&request).await.expect("Failed to create test student");
    StudentResponse::from(student)
}

pub async fn create_test_company(
    pool: &PgPool,
    name: &str,
    min_cgpa: f64,
    max_backlogs: i32,
    allowed_branches: &[&str],
    allowed_batches: &[i32],
) -> CompanyResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = Companies::new(&mut conn);

    let request = CompanyCreateDBRequest {
        name: name.to_string(),
        description: None,
        package_lpa: Some(10.0),
        min_cgpa,
        max_backlogs,
        allowed_branches: allowed_branches.iter().map(|s| s.to_string()).collect(),
        allowed_batches: allowed_batches.to_vec(),
    };
    let company = repo.create(&request).await.expect("Failed to create test company");
    CompanyResponse::from(company)
}

/// Open a window for the company spanning the current moment.
pub async fn open_window_for(pool: &PgPool, company_id: CompanyId) {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = ApplicationWindows::new(&mut conn);

    let request = WindowCreateDBRequest {
        company_id,
        starts_at: Utc::now() - Duration::hours(1),
        ends_at: Utc::now() + Duration::hours(24),
        note: None,
    };
    repo.create(&request).await.expect("Failed to create test window");
}

/// A submitted application with its student, company, and open window.
pub async fn create_test_application(pool: &PgPool) -> ApplicationResponse {
    let student = create_test_student(pool, "21CS001", "CSE", 2026, 8.0, 0).await;
    let company = create_test_company(pool, "Test Corp", 0.0, 10, &[], &[]).await;
    open_window_for(pool, company.id).await;

    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = Applications::new(&mut conn);
    let request = ApplicationCreateDBRequest {
        student_id: student.id,
        company_id: company.id,
        resume_url: None,
    };
    let application = repo.create(&request).await.expect("Failed to create test application");
    ApplicationResponse::from(application)
}

pub async fn notify(pool: &PgPool, user_id: UserId, title: &str) -> NotificationResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = Notifications::new(&mut conn);

    let request = NotificationCreateDBRequest {
        user_id,
        title: title.to_string(),
        body: format!("{title} body"),
    };
    let notification = repo.create(&request).await.expect("Failed to create test notification");
    NotificationResponse::from(notification)
}
