use serde::Serialize;

// 单科成绩
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubjectGrade {
    pub subject: String,
    pub grade: i32,
}

// 某个学生的全部成绩
#[derive(Debug, Serialize)]
pub struct StudentGradesResponse {
    pub full_name: String,
    pub grades: Vec<SubjectGrade>,
}

// 学生平均分（按平均分降序排名）
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StudentAverage {
    pub full_name: String,
    pub average_grade: f64,
}

// 科目平均分（按科目名升序）
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubjectAverage {
    pub subject: String,
    pub average_grade: f64,
}

// 仅包含姓名列表的报表（出生年份筛选、低分名单）
#[derive(Debug, Serialize)]
pub struct StudentNamesResponse {
    pub students: Vec<String>,
}
