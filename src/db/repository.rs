use sqlx::{Executor, Sqlite};

use crate::models::{Assignment, Course, Exam, Student, StudentCourse};

// Every function takes any SQLite executor so handlers can run the same
// queries against the pool or inside a transaction.

const COURSE_COLUMNS: &str = "SELECT id, course_name, credits, start_date, end_date, days_of_week, start_time, end_time, filename, file_path, content_type FROM courses";

const ASSIGNMENT_COLUMNS: &str = "SELECT id, assignment_title, description, course_id, due_date, due_time, worth, filename, file_path, content_type FROM assignments";

const EXAM_COLUMNS: &str = "SELECT id, title, date_of, weight, course_id FROM exams";

const STUDENT_COLUMNS: &str = "SELECT id, first_name, last_name, user_id FROM students";

const ENROLLMENT_COLUMNS: &str = "SELECT id, student_id, course_id, enrolled_at FROM student_courses";

/// All courses in insertion order, which is the order conflicts are reported in.
pub async fn fetch_courses<'e, E>(db: E) -> Result<Vec<Course>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Course>(&format!("{} ORDER BY rowid", COURSE_COLUMNS))
        .fetch_all(db)
        .await
}

pub async fn find_course_by_id<'e, E>(db: E, id: &str) -> Result<Option<Course>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Course>(&format!("{} WHERE id = ?", COURSE_COLUMNS))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn find_course_by_name<'e, E>(db: E, name: &str) -> Result<Option<Course>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Course>(&format!("{} WHERE course_name = ?", COURSE_COLUMNS))
        .bind(name)
        .fetch_optional(db)
        .await
}

pub async fn insert_course<'e, E>(db: E, course: &Course) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO courses
            (id, course_name, credits, start_date, end_date, days_of_week,
            start_time, end_time, filename, file_path, content_type)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
        "#,
    )
    .bind(&course.id)
    .bind(&course.course_name)
    .bind(course.credits)
    .bind(course.start_date)
    .bind(course.end_date)
    .bind(course.days_of_week.to_string())
    .bind(course.start_time)
    .bind(course.end_time)
    .bind(&course.filename)
    .bind(&course.file_path)
    .bind(&course.content_type)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn update_course<'e, E>(db: E, course: &Course) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        UPDATE courses
        SET course_name = ?1,
            credits = ?2,
            start_date = ?3,
            end_date = ?4,
            days_of_week = ?5,
            start_time = ?6,
            end_time = ?7,
            filename = ?8,
            file_path = ?9,
            content_type = ?10
        WHERE id = ?11
        "#,
    )
    .bind(&course.course_name)
    .bind(course.credits)
    .bind(course.start_date)
    .bind(course.end_date)
    .bind(course.days_of_week.to_string())
    .bind(course.start_time)
    .bind(course.end_time)
    .bind(&course.filename)
    .bind(&course.file_path)
    .bind(&course.content_type)
    .bind(&course.id)
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}

/// Assignments and exams of the course go with it.
pub async fn delete_course<'e, E>(db: E, id: &str) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM courses WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn fetch_assignments<'e, E>(db: E) -> Result<Vec<Assignment>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Assignment>(&format!(
        "{} ORDER BY due_date, due_time",
        ASSIGNMENT_COLUMNS
    ))
    .fetch_all(db)
    .await
}

pub async fn find_assignment_by_id<'e, E>(
    db: E,
    id: &str,
) -> Result<Option<Assignment>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Assignment>(&format!("{} WHERE id = ?", ASSIGNMENT_COLUMNS))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn find_assignment_by_title<'e, E>(
    db: E,
    title: &str,
) -> Result<Option<Assignment>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Assignment>(&format!("{} WHERE assignment_title = ?", ASSIGNMENT_COLUMNS))
        .bind(title)
        .fetch_optional(db)
        .await
}

pub async fn insert_assignment<'e, E>(db: E, assignment: &Assignment) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO assignments
            (id, assignment_title, description, course_id, due_date, due_time,
            worth, filename, file_path, content_type)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        "#,
    )
    .bind(&assignment.id)
    .bind(&assignment.assignment_title)
    .bind(&assignment.description)
    .bind(&assignment.course_id)
    .bind(assignment.due_date)
    .bind(assignment.due_time)
    .bind(assignment.worth)
    .bind(&assignment.filename)
    .bind(&assignment.file_path)
    .bind(&assignment.content_type)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn update_assignment<'e, E>(db: E, assignment: &Assignment) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        UPDATE assignments
        SET assignment_title = ?1,
            description = ?2,
            course_id = ?3,
            due_date = ?4,
            due_time = ?5,
            worth = ?6,
            filename = ?7,
            file_path = ?8,
            content_type = ?9
        WHERE id = ?10
        "#,
    )
    .bind(&assignment.assignment_title)
    .bind(&assignment.description)
    .bind(&assignment.course_id)
    .bind(assignment.due_date)
    .bind(assignment.due_time)
    .bind(assignment.worth)
    .bind(&assignment.filename)
    .bind(&assignment.file_path)
    .bind(&assignment.content_type)
    .bind(&assignment.id)
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}

pub async fn delete_assignment<'e, E>(db: E, id: &str) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM assignments WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn fetch_exams<'e, E>(db: E) -> Result<Vec<Exam>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Exam>(&format!("{} ORDER BY date_of", EXAM_COLUMNS))
        .fetch_all(db)
        .await
}

pub async fn find_exam_by_id<'e, E>(db: E, id: &str) -> Result<Option<Exam>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Exam>(&format!("{} WHERE id = ?", EXAM_COLUMNS))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn insert_exam<'e, E>(db: E, exam: &Exam) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO exams (id, title, date_of, weight, course_id)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&exam.id)
    .bind(&exam.title)
    .bind(exam.date_of)
    .bind(exam.weight)
    .bind(&exam.course_id)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn update_exam<'e, E>(db: E, exam: &Exam) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        UPDATE exams
        SET title = ?1,
            date_of = ?2,
            weight = ?3,
            course_id = ?4
        WHERE id = ?5
        "#,
    )
    .bind(&exam.title)
    .bind(exam.date_of)
    .bind(exam.weight)
    .bind(&exam.course_id)
    .bind(&exam.id)
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}

pub async fn delete_exam<'e, E>(db: E, id: &str) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM exams WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn fetch_students<'e, E>(db: E) -> Result<Vec<Student>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Student>(&format!("{} ORDER BY rowid", STUDENT_COLUMNS))
        .fetch_all(db)
        .await
}

pub async fn find_student_by_id<'e, E>(db: E, id: &str) -> Result<Option<Student>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Student>(&format!("{} WHERE id = ?", STUDENT_COLUMNS))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn find_student_by_user_id<'e, E>(
    db: E,
    user_id: i64,
) -> Result<Option<Student>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Student>(&format!("{} WHERE user_id = ?", STUDENT_COLUMNS))
        .bind(user_id)
        .fetch_optional(db)
        .await
}

pub async fn insert_student<'e, E>(db: E, student: &Student) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO students (id, first_name, last_name, user_id)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&student.id)
    .bind(&student.first_name)
    .bind(&student.last_name)
    .bind(student.user_id)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn update_student<'e, E>(db: E, student: &Student) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        UPDATE students
        SET first_name = ?1,
            last_name = ?2
        WHERE id = ?3
        "#,
    )
    .bind(&student.first_name)
    .bind(&student.last_name)
    .bind(&student.id)
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}

/// Enrollments of the student go with it.
pub async fn delete_student<'e, E>(db: E, id: &str) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM students WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

/// Courses the student is enrolled in, in course insertion order.
pub async fn fetch_student_courses<'e, E>(db: E, student_id: &str) -> Result<Vec<Course>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Course>(&format!(
        "{} WHERE id IN (SELECT course_id FROM student_courses WHERE student_id = ?) ORDER BY rowid",
        COURSE_COLUMNS
    ))
    .bind(student_id)
    .fetch_all(db)
    .await
}

pub async fn find_enrollment<'e, E>(
    db: E,
    student_id: &str,
    course_id: &str,
) -> Result<Option<StudentCourse>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, StudentCourse>(&format!(
        "{} WHERE student_id = ? AND course_id = ?",
        ENROLLMENT_COLUMNS
    ))
    .bind(student_id)
    .bind(course_id)
    .fetch_optional(db)
    .await
}

pub async fn insert_enrollment<'e, E>(db: E, enrollment: &StudentCourse) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO student_courses (id, student_id, course_id, enrolled_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&enrollment.id)
    .bind(&enrollment.student_id)
    .bind(&enrollment.course_id)
    .bind(enrollment.enrolled_at)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn delete_enrollment<'e, E>(
    db: E,
    student_id: &str,
    course_id: &str,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM student_courses WHERE student_id = ? AND course_id = ?")
        .bind(student_id)
        .bind(course_id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}
