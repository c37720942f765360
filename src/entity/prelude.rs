//! 预导入模块，方便使用

pub use super::books::{ActiveModel as BookActiveModel, Entity as Books, Model as BookModel};
pub use super::grades::{ActiveModel as GradeActiveModel, Entity as Grades, Model as GradeModel};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
