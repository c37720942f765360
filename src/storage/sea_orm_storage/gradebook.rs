//! 学生成绩数据集与分析查询
//!
//! 数据集为固定种子：首次启动写入，之后只读。分析查询的筛选、
//! 去重与排序下推到 SQL，分组均值在一次联表取数后于内存聚合。

use std::collections::BTreeMap;

use super::SeaOrmStorage;
use crate::entity::grades::{Column as GradeColumn, Entity as Grades};
use crate::entity::prelude::{GradeActiveModel, StudentActiveModel};
use crate::entity::students::{Column as StudentColumn, Entity as Students, Relation};
use crate::errors::{BookshelfError, Result};
use crate::models::reports::responses::{StudentAverage, SubjectAverage, SubjectGrade};
use sea_orm::{
    ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set,
};

// 种子学生: (id, 姓名, 出生年份)
const SEED_STUDENTS: &[(i64, &str, i32)] = &[
    (1, "Alice Johnson", 2003),
    (2, "Brian Smith", 2004),
    (3, "Carla Reyes", 2006),
    (4, "Daniel Kim", 2002),
    (5, "Emma Wilson", 2004),
    (6, "Felix Nguyen", 2005),
    (7, "Grace Patel", 2007),
    (8, "Henry Lopez", 2003),
    (9, "Isabella Martinez", 2006),
];

// 种子成绩: (student_id, 科目, 分数)，每个学生每科一条
const SEED_GRADES: &[(i64, &str, i32)] = &[
    (1, "Math", 88),
    (1, "English", 92),
    (1, "Science", 85),
    (2, "Math", 84),
    (2, "English", 79),
    (2, "Science", 88),
    (3, "Math", 92),
    (3, "Science", 91),
    (3, "English", 90),
    (4, "Math", 72),
    (4, "History", 68),
    (4, "English", 75),
    (5, "Science", 95),
    (5, "Math", 90),
    (5, "History", 86),
    (6, "Math", 78),
    (6, "Science", 82),
    (6, "English", 88),
    (7, "English", 93),
    (7, "History", 87),
    (7, "Science", 84),
    (8, "History", 77),
    (8, "Math", 81),
    (8, "English", 85),
    (9, "Math", 94),
    (9, "Science", 92),
    (9, "History", 89),
];

/// 平均分四舍五入到一位小数（half-up，正数域与 half-away-from-zero 等价）
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl SeaOrmStorage {
    /// 写入种子数据集；学生表非空时跳过，返回是否实际写入
    pub async fn seed_gradebook_impl(&self) -> Result<bool> {
        if self.count_students_impl().await? > 0 {
            return Ok(false);
        }

        let students = SEED_STUDENTS
            .iter()
            .map(|(id, full_name, birth_year)| StudentActiveModel {
                id: Set(*id),
                full_name: Set((*full_name).to_string()),
                birth_year: Set(*birth_year),
            })
            .collect::<Vec<_>>();

        Students::insert_many(students)
            .exec(&self.db)
            .await
            .map_err(|e| BookshelfError::database_operation(format!("写入种子学生失败: {e}")))?;

        let grades = SEED_GRADES
            .iter()
            .map(|(student_id, subject, grade)| GradeActiveModel {
                student_id: Set(*student_id),
                subject: Set((*subject).to_string()),
                grade: Set(*grade),
                ..Default::default()
            })
            .collect::<Vec<_>>();

        Grades::insert_many(grades)
            .exec(&self.db)
            .await
            .map_err(|e| BookshelfError::database_operation(format!("写入种子成绩失败: {e}")))?;

        Ok(true)
    }

    /// 统计学生数量
    pub async fn count_students_impl(&self) -> Result<u64> {
        let count = Students::find()
            .count(&self.db)
            .await
            .map_err(|e| BookshelfError::database_operation(format!("统计学生数量失败: {e}")))?;

        Ok(count)
    }

    /// 删除学生，成绩行随 ON DELETE CASCADE 一并删除
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let result = Students::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| BookshelfError::database_operation(format!("删除学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 查询 1: 按姓名取某个学生的全部 (科目, 成绩)
    pub async fn student_grades_impl(&self, full_name: &str) -> Result<Option<Vec<SubjectGrade>>> {
        let student = Students::find()
            .filter(StudentColumn::FullName.eq(full_name))
            .one(&self.db)
            .await
            .map_err(|e| BookshelfError::database_operation(format!("查询学生失败: {e}")))?;

        let Some(student) = student else {
            return Ok(None);
        };

        let grades = Grades::find()
            .filter(GradeColumn::StudentId.eq(student.id))
            .order_by_asc(GradeColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| BookshelfError::database_operation(format!("查询学生成绩失败: {e}")))?;

        Ok(Some(
            grades
                .into_iter()
                .map(|g| SubjectGrade {
                    subject: g.subject,
                    grade: g.grade,
                })
                .collect(),
        ))
    }

    /// 查询 2 / 5: 每个学生的平均分，降序排名；limit 截取前 N
    pub async fn student_averages_impl(&self, limit: Option<u64>) -> Result<Vec<StudentAverage>> {
        // 一次联表取出 (姓名, 分数)，在内存中分组求均值
        let rows: Vec<(String, i32)> = Students::find()
            .select_only()
            .column(StudentColumn::FullName)
            .column(GradeColumn::Grade)
            .join(JoinType::InnerJoin, Relation::Grades.def())
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| BookshelfError::database_operation(format!("查询成绩失败: {e}")))?;

        let mut sums: BTreeMap<String, (i64, i64)> = BTreeMap::new();
        for (full_name, grade) in rows {
            let entry = sums.entry(full_name).or_insert((0, 0));
            entry.0 += grade as i64;
            entry.1 += 1;
        }

        // 先按未取整均值降序排序，避免显示取整引入并列；同分按姓名升序
        let mut averages: Vec<(String, f64)> = sums
            .into_iter()
            .map(|(full_name, (sum, count))| (full_name, sum as f64 / count as f64))
            .collect();
        averages.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        if let Some(limit) = limit {
            averages.truncate(limit as usize);
        }

        Ok(averages
            .into_iter()
            .map(|(full_name, avg)| StudentAverage {
                full_name,
                average_grade: round_to_tenth(avg),
            })
            .collect())
    }

    /// 查询 3: 出生年份晚于 cutoff 的学生姓名，升序
    pub async fn students_born_after_impl(&self, cutoff_year: i32) -> Result<Vec<String>> {
        let names: Vec<String> = Students::find()
            .select_only()
            .column(StudentColumn::FullName)
            .filter(StudentColumn::BirthYear.gt(cutoff_year))
            .order_by_asc(StudentColumn::FullName)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| BookshelfError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(names)
    }

    /// 查询 4: 每个科目的平均分，按科目名升序
    pub async fn subject_averages_impl(&self) -> Result<Vec<SubjectAverage>> {
        let rows: Vec<(String, i32)> = Grades::find()
            .select_only()
            .column(GradeColumn::Subject)
            .column(GradeColumn::Grade)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| BookshelfError::database_operation(format!("查询成绩失败: {e}")))?;

        // BTreeMap 迭代天然按科目名升序
        let mut sums: BTreeMap<String, (i64, i64)> = BTreeMap::new();
        for (subject, grade) in rows {
            let entry = sums.entry(subject).or_insert((0, 0));
            entry.0 += grade as i64;
            entry.1 += 1;
        }

        Ok(sums
            .into_iter()
            .map(|(subject, (sum, count))| SubjectAverage {
                subject,
                average_grade: round_to_tenth(sum as f64 / count as f64),
            })
            .collect())
    }

    /// 查询 6: 存在低于 threshold 成绩的学生姓名，去重升序
    pub async fn students_with_grade_below_impl(&self, threshold: i32) -> Result<Vec<String>> {
        let names: Vec<String> = Students::find()
            .select_only()
            .column(StudentColumn::FullName)
            .join(JoinType::InnerJoin, Relation::Grades.def())
            .filter(GradeColumn::Grade.lt(threshold))
            .distinct()
            .order_by_asc(StudentColumn::FullName)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| BookshelfError::database_operation(format!("查询低分名单失败: {e}")))?;

        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded_storage() -> SeaOrmStorage {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        assert!(storage.seed_gradebook_impl().await.unwrap());
        storage
    }

    #[test]
    fn test_round_to_tenth() {
        assert_eq!(round_to_tenth(91.666_666), 91.7);
        assert_eq!(round_to_tenth(88.0), 88.0);
        assert_eq!(round_to_tenth(83.65), 83.7);
        assert_eq!(round_to_tenth(71.64), 71.6);
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let storage = seeded_storage().await;
        assert_eq!(storage.count_students_impl().await.unwrap(), 9);

        // 二次调用不重复写入
        assert!(!storage.seed_gradebook_impl().await.unwrap());
        assert_eq!(storage.count_students_impl().await.unwrap(), 9);
    }

    #[tokio::test]
    async fn test_student_grades_by_name() {
        let storage = seeded_storage().await;

        let grades = storage
            .student_grades_impl("Isabella Martinez")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(grades.len(), 3);
        assert!(grades.contains(&SubjectGrade {
            subject: "Math".to_string(),
            grade: 94,
        }));

        let missing = storage.student_grades_impl("Nobody Here").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_student_averages_ranked() {
        let storage = seeded_storage().await;

        let averages = storage.student_averages_impl(None).await.unwrap();
        assert_eq!(averages.len(), 9);

        // 种子数据排名固定：Isabella 91.7 > Carla 91.0 > Emma 90.3 ...
        assert_eq!(averages[0].full_name, "Isabella Martinez");
        assert_eq!(averages[0].average_grade, 91.7);
        assert_eq!(averages[1].full_name, "Carla Reyes");
        assert_eq!(averages[1].average_grade, 91.0);
        assert_eq!(averages[2].full_name, "Emma Wilson");
        assert_eq!(averages[2].average_grade, 90.3);
        assert_eq!(averages[8].full_name, "Daniel Kim");
        assert_eq!(averages[8].average_grade, 71.7);

        // 降序不增
        for pair in averages.windows(2) {
            assert!(pair[0].average_grade >= pair[1].average_grade);
        }
    }

    #[tokio::test]
    async fn test_top_three_students() {
        let storage = seeded_storage().await;

        let top = storage.student_averages_impl(Some(3)).await.unwrap();
        assert_eq!(
            top.iter().map(|s| s.full_name.as_str()).collect::<Vec<_>>(),
            vec!["Isabella Martinez", "Carla Reyes", "Emma Wilson"]
        );
    }

    #[tokio::test]
    async fn test_students_born_after_2004() {
        let storage = seeded_storage().await;

        let names = storage.students_born_after_impl(2004).await.unwrap();
        assert_eq!(
            names,
            vec![
                "Carla Reyes",
                "Felix Nguyen",
                "Grace Patel",
                "Isabella Martinez"
            ]
        );
    }

    #[tokio::test]
    async fn test_subject_averages_sorted_by_subject() {
        let storage = seeded_storage().await;

        let averages = storage.subject_averages_impl().await.unwrap();
        let subjects: Vec<&str> = averages.iter().map(|s| s.subject.as_str()).collect();
        assert_eq!(subjects, vec!["English", "History", "Math", "Science"]);

        // English: (92+79+90+75+88+93+85) / 7 = 86.0
        assert_eq!(averages[0].average_grade, 86.0);
        // History: (68+86+87+77+89) / 5 = 81.4
        assert_eq!(averages[1].average_grade, 81.4);
    }

    #[tokio::test]
    async fn test_students_with_grade_below_80() {
        let storage = seeded_storage().await;

        let names = storage.students_with_grade_below_impl(80).await.unwrap();
        // Daniel Kim 有多条低于 80 的成绩，也只出现一次
        assert_eq!(
            names,
            vec!["Brian Smith", "Daniel Kim", "Felix Nguyen", "Henry Lopez"]
        );
    }

    #[tokio::test]
    async fn test_delete_student_cascades_grades() {
        let storage = seeded_storage().await;

        assert!(storage.delete_student_impl(1).await.unwrap());

        let orphans = Grades::find()
            .filter(GradeColumn::StudentId.eq(1))
            .all(&storage.db)
            .await
            .unwrap();
        assert!(orphans.is_empty());

        // 其余学生不受影响
        assert_eq!(storage.count_students_impl().await.unwrap(), 8);
        let averages = storage.student_averages_impl(None).await.unwrap();
        assert_eq!(averages.len(), 8);
    }
}
