use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(string_len(User::Id, 36).primary_key())
                    .col(string_len(User::Name, 100))
                    .col(string_len(User::Email, 255).unique_key())
                    // Role enum is represented in app code. 0=teacher, 1=student
                    .col(
                        small_integer(User::Role)
                            .check(Expr::col(User::Role).gte(0))
                            .check(Expr::col(User::Role).lte(1)),
                    )
                    .col(timestamp(User::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(User::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Course::Table)
                    .if_not_exists()
                    .col(string_len(Course::Id, 36).primary_key())
                    .col(string_len(Course::Name, 100))
                    .col(text_null(Course::Description))
                    .col(text_null(Course::Thumbnail))
                    .col(string_len(Course::TeacherId, 36))
                    .col(timestamp(Course::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Course::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course-teacher_id")
                            .from(Course::Table, Course::TeacherId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Membership relations use a composite primary key so that adding an
        // existing member is a conflict, never a duplicate row.
        manager
            .create_table(
                Table::create()
                    .table(CourseStudent::Table)
                    .if_not_exists()
                    .col(string_len(CourseStudent::CourseId, 36))
                    .col(string_len(CourseStudent::StudentId, 36))
                    .col(timestamp(CourseStudent::JoinedAt).default(Expr::current_timestamp()))
                    .primary_key(
                        Index::create()
                            .col(CourseStudent::CourseId)
                            .col(CourseStudent::StudentId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_student-course_id")
                            .from(CourseStudent::Table, CourseStudent::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_student-student_id")
                            .from(CourseStudent::Table, CourseStudent::StudentId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CourseCoTeacher::Table)
                    .if_not_exists()
                    .col(string_len(CourseCoTeacher::CourseId, 36))
                    .col(string_len(CourseCoTeacher::TeacherId, 36))
                    .col(timestamp(CourseCoTeacher::JoinedAt).default(Expr::current_timestamp()))
                    .primary_key(
                        Index::create()
                            .col(CourseCoTeacher::CourseId)
                            .col(CourseCoTeacher::TeacherId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_co_teacher-course_id")
                            .from(CourseCoTeacher::Table, CourseCoTeacher::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_co_teacher-teacher_id")
                            .from(CourseCoTeacher::Table, CourseCoTeacher::TeacherId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Assignment::Table)
                    .if_not_exists()
                    .col(string_len(Assignment::Id, 36).primary_key())
                    .col(string_len(Assignment::CourseId, 36))
                    .col(string_len(Assignment::Title, 200))
                    .col(text(Assignment::Description))
                    .col(timestamp(Assignment::DueDate))
                    .col(text_null(Assignment::Attachment))
                    .col(timestamp(Assignment::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Assignment::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-assignment-course_id")
                            .from(Assignment::Table, Assignment::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // No uniqueness on (assignment_id, student_id): resubmission semantics
        // are undecided, readers pick the most recent row.
        manager
            .create_table(
                Table::create()
                    .table(Submission::Table)
                    .if_not_exists()
                    .col(string_len(Submission::Id, 36).primary_key())
                    .col(string_len(Submission::AssignmentId, 36))
                    .col(string_len(Submission::StudentId, 36))
                    .col(text_null(Submission::Summary))
                    .col(text_null(Submission::FileUrl))
                    .col(timestamp(Submission::SubmittedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-submission-assignment_id")
                            .from(Submission::Table, Submission::AssignmentId)
                            .to(Assignment::Table, Assignment::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-submission-student_id")
                            .from(Submission::Table, Submission::StudentId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(string_len(Feedback::Id, 36).primary_key())
                    .col(string_len(Feedback::SubmissionId, 36).unique_key())
                    .col(string_len(Feedback::TeacherId, 36))
                    .col(text(Feedback::Comment))
                    .col(
                        small_integer_null(Feedback::Grade)
                            .check(Expr::col(Feedback::Grade).gte(0))
                            .check(Expr::col(Feedback::Grade).lte(100)),
                    )
                    .col(timestamp(Feedback::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Feedback::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-feedback-submission_id")
                            .from(Feedback::Table, Feedback::SubmissionId)
                            .to(Submission::Table, Submission::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-feedback-teacher_id")
                            .from(Feedback::Table, Feedback::TeacherId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Schedule::Table)
                    .if_not_exists()
                    .col(string_len(Schedule::Id, 36).primary_key())
                    .col(string_len(Schedule::CourseId, 36))
                    .col(string_len(Schedule::TeacherId, 36))
                    .col(string_len(Schedule::Subject, 200))
                    .col(string_len(Schedule::Topic, 200))
                    .col(timestamp(Schedule::Time))
                    .col(text(Schedule::MeetingLink))
                    .col(timestamp(Schedule::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Schedule::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-schedule-course_id")
                            .from(Schedule::Table, Schedule::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-schedule-teacher_id")
                            .from(Schedule::Table, Schedule::TeacherId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Resource::Table)
                    .if_not_exists()
                    .col(string_len(Resource::Id, 36).primary_key())
                    .col(string_len(Resource::CourseId, 36))
                    .col(string_len(Resource::Title, 200))
                    // ResourceType enum is represented in app code.
                    // 0=pdf_document, 1=video_class, 2=image
                    .col(
                        small_integer(Resource::ResourceType)
                            .check(Expr::col(Resource::ResourceType).gte(0))
                            .check(Expr::col(Resource::ResourceType).lte(2)),
                    )
                    .col(text(Resource::Attachment))
                    .col(timestamp(Resource::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Resource::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-resource-course_id")
                            .from(Resource::Table, Resource::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        create_index(manager, "idx_course_teacher_id", Course::Table, Course::TeacherId).await?;
        create_index(
            manager,
            "idx_course_student_student_id",
            CourseStudent::Table,
            CourseStudent::StudentId,
        )
        .await?;
        create_index(
            manager,
            "idx_course_co_teacher_teacher_id",
            CourseCoTeacher::Table,
            CourseCoTeacher::TeacherId,
        )
        .await?;
        create_index(
            manager,
            "idx_assignment_course_id",
            Assignment::Table,
            Assignment::CourseId,
        )
        .await?;
        create_index(
            manager,
            "idx_submission_assignment_id",
            Submission::Table,
            Submission::AssignmentId,
        )
        .await?;
        create_index(
            manager,
            "idx_submission_student_id",
            Submission::Table,
            Submission::StudentId,
        )
        .await?;
        create_index(manager, "idx_schedule_course_id", Schedule::Table, Schedule::CourseId).await?;
        create_index(manager, "idx_resource_course_id", Resource::Table, Resource::CourseId).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_table(manager, Resource::Table).await?;
        drop_table(manager, Schedule::Table).await?;
        drop_table(manager, Feedback::Table).await?;
        drop_table(manager, Submission::Table).await?;
        drop_table(manager, Assignment::Table).await?;
        drop_table(manager, CourseCoTeacher::Table).await?;
        drop_table(manager, CourseStudent::Table).await?;
        drop_table(manager, Course::Table).await?;
        drop_table(manager, User::Table).await?;

        Ok(())
    }
}

async fn create_index<T, C>(
    manager: &SchemaManager<'_>,
    name: &str,
    table: T,
    column: C,
) -> Result<(), DbErr>
where
    T: Iden + 'static,
    C: Iden + 'static,
{
    manager
        .create_index(
            Index::create()
                .name(name)
                .table(table)
                .col(column)
                .to_owned(),
        )
        .await
}

async fn drop_table<T>(manager: &SchemaManager<'_>, table: T) -> Result<(), DbErr>
where
    T: Iden + 'static,
{
    manager
        .drop_table(Table::drop().table(table).to_owned())
        .await
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    Name,
    Email,
    Role,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Course {
    Table,
    Id,
    Name,
    Description,
    Thumbnail,
    TeacherId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CourseStudent {
    Table,
    CourseId,
    StudentId,
    JoinedAt,
}

#[derive(DeriveIden)]
enum CourseCoTeacher {
    Table,
    CourseId,
    TeacherId,
    JoinedAt,
}

#[derive(DeriveIden)]
enum Assignment {
    Table,
    Id,
    CourseId,
    Title,
    Description,
    DueDate,
    Attachment,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Submission {
    Table,
    Id,
    AssignmentId,
    StudentId,
    Summary,
    FileUrl,
    SubmittedAt,
}

#[derive(DeriveIden)]
enum Feedback {
    Table,
    Id,
    SubmissionId,
    TeacherId,
    Comment,
    Grade,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Schedule {
    Table,
    Id,
    CourseId,
    TeacherId,
    Subject,
    Topic,
    Time,
    MeetingLink,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Resource {
    Table,
    Id,
    CourseId,
    Title,
    ResourceType,
    Attachment,
    CreatedAt,
    UpdatedAt,
}
