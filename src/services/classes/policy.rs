//! 班级授权策略
//!
//! 所有会修改班级、成员集合或班级课程内容的操作都经由 [`authorize`] 判定。
//! 学生成就的读写以“教师是否教授该学生”为依据，也在此处判定。

use crate::errors::{ClassHubError, Result};
use crate::models::{auth::Identity, classes::entities::Class};

#[derive(Debug, Clone, Copy)]
pub enum ClassAction<'a> {
    Create,
    Update(&'a Class),
    Delete(&'a Class),
    Join(&'a Class),
    // 资料与作业的增删改
    ManageCoursework(&'a Class),
    // 提交作业答案，仅限班级学生
    Submit { class: &'a Class, is_member: bool },
    // 查看学生成就
    ViewAchievements { student_id: i64, teaches_student: bool },
    // 记录学生成就
    RecordAchievement { teaches_student: bool },
}

pub fn authorize(identity: &Identity, action: ClassAction<'_>) -> Result<()> {
    match action {
        ClassAction::Create => {
            if identity.is_teacher() {
                Ok(())
            } else {
                Err(ClassHubError::forbidden("Only teachers can create classes"))
            }
        }
        ClassAction::Update(class) | ClassAction::Delete(class) => {
            if class.is_owned_by(identity.user_id) {
                Ok(())
            } else {
                Err(ClassHubError::forbidden(
                    "Only the class owner can modify this class",
                ))
            }
        }
        // 教师不能成为自己班级的学生
        ClassAction::Join(class) => {
            if class.is_owned_by(identity.user_id) {
                Err(ClassHubError::forbidden("Class owner cannot join their own class"))
            } else {
                Ok(())
            }
        }
        ClassAction::ManageCoursework(class) => {
            if class.is_owned_by(identity.user_id) {
                Ok(())
            } else {
                Err(ClassHubError::forbidden(
                    "Only the class owner can manage materials and assignments",
                ))
            }
        }
        ClassAction::Submit { class, is_member } => {
            if class.is_owned_by(identity.user_id) {
                Err(ClassHubError::forbidden("Class owner cannot submit answers"))
            } else if !is_member {
                Err(ClassHubError::forbidden(
                    "Only students of this class can submit answers",
                ))
            } else {
                Ok(())
            }
        }
        ClassAction::ViewAchievements {
            student_id,
            teaches_student,
        } => {
            if identity.user_id == student_id || (identity.is_teacher() && teaches_student) {
                Ok(())
            } else {
                Err(ClassHubError::forbidden(
                    "Achievements are visible to the student and their teachers",
                ))
            }
        }
        ClassAction::RecordAchievement { teaches_student } => {
            if identity.is_teacher() && teaches_student {
                Ok(())
            } else {
                Err(ClassHubError::forbidden(
                    "Only a teacher of this student can record achievements",
                ))
            }
        }
    }
}
