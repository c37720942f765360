pub mod born_after;
pub mod failing_students;
pub mod student_averages;
pub mod student_grades;
pub mod subject_averages;
pub mod top_students;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::reports::requests::{
    BornAfterParams, FailingStudentsParams, TopStudentsParams,
};
use crate::storage::Storage;

pub struct ReportService {
    storage: Option<Arc<dyn Storage>>,
}

impl ReportService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 查询某个学生的全部成绩
    pub async fn student_grades(
        &self,
        full_name: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        student_grades::student_grades(self, full_name, request).await
    }

    // 学生平均分排名
    pub async fn student_averages(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        student_averages::student_averages(self, request).await
    }

    // 平均分前 N 名
    pub async fn top_students(
        &self,
        params: TopStudentsParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        top_students::top_students(self, params, request).await
    }

    // 出生年份晚于 cutoff 的学生
    pub async fn born_after(
        &self,
        params: BornAfterParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        born_after::born_after(self, params, request).await
    }

    // 科目平均分
    pub async fn subject_averages(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        subject_averages::subject_averages(self, request).await
    }

    // 存在低分成绩的学生
    pub async fn failing_students(
        &self,
        params: FailingStudentsParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        failing_students::failing_students(self, params, request).await
    }
}
