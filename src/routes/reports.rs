use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::reports::requests::{
    BornAfterParams, FailingStudentsParams, TopStudentsParams,
};
use crate::services::ReportService;

// 懒加载的全局 ReportService 实例
static REPORT_SERVICE: Lazy<ReportService> = Lazy::new(ReportService::new_lazy);

// HTTP处理程序
pub async fn student_grades(
    req: HttpRequest,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.student_grades(path.into_inner(), &req).await
}

pub async fn student_averages(req: HttpRequest) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.student_averages(&req).await
}

pub async fn top_students(
    req: HttpRequest,
    query: web::Query<TopStudentsParams>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.top_students(query.into_inner(), &req).await
}

pub async fn born_after(
    req: HttpRequest,
    query: web::Query<BornAfterParams>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.born_after(query.into_inner(), &req).await
}

pub async fn subject_averages(req: HttpRequest) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.subject_averages(&req).await
}

pub async fn failing_students(
    req: HttpRequest,
    query: web::Query<FailingStudentsParams>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE
        .failing_students(query.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_report_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .route(
                "/students/born-after",
                web::get().to(born_after),
            )
            .route(
                "/students/{full_name}/grades",
                web::get().to(student_grades),
            )
            .route("/student-averages", web::get().to(student_averages))
            .route("/top-students", web::get().to(top_students))
            .route("/subject-averages", web::get().to(subject_averages))
            .route("/failing-students", web::get().to(failing_students)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use serde_json::Value;
    use std::sync::Arc;

    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    async fn seeded_storage() -> web::Data<Arc<dyn Storage>> {
        let storage: Arc<dyn Storage> = Arc::new(
            SeaOrmStorage::new_in_memory()
                .await
                .expect("in-memory storage"),
        );
        storage.seed_gradebook().await.expect("seed gradebook");
        web::Data::new(storage)
    }

    macro_rules! test_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(seeded_storage().await)
                    .configure(configure_report_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_student_grades_endpoint() {
        let app = test_app!();

        let req = test::TestRequest::get()
            .uri("/reports/students/Alice%20Johnson/grades")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["code"], 0);
        assert_eq!(body["data"]["full_name"], "Alice Johnson");
        assert_eq!(body["data"]["grades"].as_array().unwrap().len(), 3);

        let req = test::TestRequest::get()
            .uri("/reports/students/Nobody/grades")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 4042);
    }

    #[actix_web::test]
    async fn test_student_averages_ranked() {
        let app = test_app!();

        let req = test::TestRequest::get()
            .uri("/reports/student-averages")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let rows = body["data"].as_array().unwrap();
        assert_eq!(rows.len(), 9);
        assert_eq!(rows[0]["full_name"], "Isabella Martinez");
        assert_eq!(rows[0]["average_grade"], 91.7);
        assert_eq!(rows[8]["full_name"], "Daniel Kim");
        assert_eq!(rows[8]["average_grade"], 71.7);
    }

    #[actix_web::test]
    async fn test_top_students_limit() {
        let app = test_app!();

        let req = test::TestRequest::get()
            .uri("/reports/top-students?limit=3")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let rows = body["data"].as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1]["full_name"], "Carla Reyes");
        assert_eq!(rows[2]["full_name"], "Emma Wilson");

        let req = test::TestRequest::get()
            .uri("/reports/top-students?limit=0")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);
    }

    #[actix_web::test]
    async fn test_born_after_default_cutoff() {
        let app = test_app!();

        let req = test::TestRequest::get()
            .uri("/reports/students/born-after")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body["data"]["students"],
            serde_json::json!([
                "Carla Reyes",
                "Felix Nguyen",
                "Grace Patel",
                "Isabella Martinez"
            ])
        );

        let req = test::TestRequest::get()
            .uri("/reports/students/born-after?year=2006")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["students"], serde_json::json!(["Grace Patel"]));
    }

    #[actix_web::test]
    async fn test_subject_averages_endpoint() {
        let app = test_app!();

        let req = test::TestRequest::get()
            .uri("/reports/subject-averages")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let rows = body["data"].as_array().unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0]["subject"], "English");
        assert_eq!(rows[0]["average_grade"], 86.0);
        assert_eq!(rows[3]["subject"], "Science");
        assert_eq!(rows[3]["average_grade"], 88.1);
    }

    #[actix_web::test]
    async fn test_failing_students_threshold() {
        let app = test_app!();

        let req = test::TestRequest::get()
            .uri("/reports/failing-students")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body["data"]["students"],
            serde_json::json!([
                "Brian Smith",
                "Daniel Kim",
                "Felix Nguyen",
                "Henry Lopez"
            ])
        );

        let req = test::TestRequest::get()
            .uri("/reports/failing-students?threshold=101")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);
    }
}
