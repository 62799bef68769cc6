//! Projects service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        clients::records::ClientId,
        lifecycle::RecordState,
        projects::{
            data::{NewProject, ProjectDetails},
            errors::ProjectsServiceError,
            records::{ProjectId, ProjectRecord},
            repository::PgProjectsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgProjectsService {
    db: Db,
    repository: PgProjectsRepository,
}

impl PgProjectsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProjectsRepository::new(),
        }
    }
}

#[async_trait]
impl ProjectsService for PgProjectsService {
    #[tracing::instrument(
        name = "projects.service.insert_project",
        skip(self, project),
        fields(client_id = %project.client, project_id = tracing::field::Empty),
        err
    )]
    async fn insert_project(&self, project: NewProject) -> Result<ProjectId, ProjectsServiceError> {
        let mut tx = self.db.begin().await?;

        let id = self.repository.insert_project(&mut tx, &project).await?;

        tx.commit().await?;

        tracing::Span::current().record("project_id", tracing::field::display(id));

        info!(project_id = %id, "inserted project");

        Ok(id)
    }

    async fn get_project(&self, project: ProjectId) -> Result<ProjectRecord, ProjectsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_project(&mut tx, project).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn get_projects_by_client(
        &self,
        client: ClientId,
    ) -> Result<Vec<ProjectRecord>, ProjectsServiceError> {
        let mut tx = self.db.begin().await?;

        let projects = self
            .repository
            .get_projects_by_client(&mut tx, client)
            .await?;

        tx.commit().await?;

        Ok(projects)
    }

    #[tracing::instrument(
        name = "projects.service.update_project",
        skip(self, details),
        fields(project_id = %project),
        err
    )]
    async fn update_project(
        &self,
        project: ProjectId,
        details: ProjectDetails,
    ) -> Result<(), ProjectsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .update_project(&mut tx, project, &details)
            .await?;

        tx.commit().await?;

        debug!(rows_affected, "updated project");

        Ok(())
    }

    #[tracing::instrument(
        name = "projects.service.soft_delete_project",
        skip(self),
        fields(project_id = %project),
        err
    )]
    async fn soft_delete_project(&self, project: ProjectId) -> Result<(), ProjectsServiceError> {
        let mut tx = self.db.begin().await?;

        match self.repository.get_project_state(&mut tx, project).await? {
            Some(RecordState::Active) => {
                self.repository.soft_delete_project(&mut tx, project).await?;

                info!(project_id = %project, "deleted project");
            }
            Some(RecordState::Deleted { at }) => {
                debug!(deleted_at = %at, "project already deleted");
            }
            None => debug!("project does not exist"),
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProjectsService: Send + Sync {
    /// Store a new project for a client and return its id.
    async fn insert_project(&self, project: NewProject) -> Result<ProjectId, ProjectsServiceError>;

    /// Retrieve a single active project.
    async fn get_project(&self, project: ProjectId) -> Result<ProjectRecord, ProjectsServiceError>;

    /// Retrieve the active projects of a client, newest first.
    async fn get_projects_by_client(
        &self,
        client: ClientId,
    ) -> Result<Vec<ProjectRecord>, ProjectsServiceError>;

    /// Replace a project's details. Does nothing when the project does not exist.
    async fn update_project(
        &self,
        project: ProjectId,
        details: ProjectDetails,
    ) -> Result<(), ProjectsServiceError>;

    /// Mark a project as deleted. Deleting an absent or deleted project is not an error.
    async fn soft_delete_project(&self, project: ProjectId) -> Result<(), ProjectsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{clients::ClientsService, projects::data::ProjectStatus},
        test::{
            TestContext,
            helpers::{client_details, project_details},
        },
    };

    use super::*;

    #[tokio::test]
    async fn insert_project_then_get_returns_details() -> TestResult {
        let ctx = TestContext::new().await;
        let client = ctx.clients.insert_client(client_details("Acme")).await?;

        let mut details = project_details("Rebuild");
        details.discount_percent = Some(12.5);
        details.discount_reason = Some("Loyalty".to_string());
        details.adjustment_amount = Some(-20.0);

        let project = ctx
            .projects
            .insert_project(NewProject {
                client,
                details: details.clone(),
            })
            .await?;

        let record = ctx.projects.get_project(project).await?;

        assert_eq!(record.client, client);
        assert_eq!(record.details, details);

        Ok(())
    }

    #[tokio::test]
    async fn insert_project_for_unknown_client_is_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx
            .projects
            .insert_project(NewProject {
                client: ClientId::from_i64(31_337),
                details: project_details("Orphan"),
            })
            .await;

        assert!(
            matches!(result, Err(ProjectsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_projects_by_client_without_projects_is_empty() -> TestResult {
        let ctx = TestContext::new().await;
        let client = ctx.clients.insert_client(client_details("Acme")).await?;

        let projects = ctx.projects.get_projects_by_client(client).await?;

        assert!(projects.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn get_projects_by_client_skips_deleted_and_foreign_projects() -> TestResult {
        let ctx = TestContext::new().await;
        let acme = ctx.clients.insert_client(client_details("Acme")).await?;
        let other = ctx.clients.insert_client(client_details("Other")).await?;

        let kept = ctx
            .projects
            .insert_project(NewProject {
                client: acme,
                details: project_details("Kept"),
            })
            .await?;

        let deleted = ctx
            .projects
            .insert_project(NewProject {
                client: acme,
                details: project_details("Deleted"),
            })
            .await?;

        ctx.projects
            .insert_project(NewProject {
                client: other,
                details: project_details("Foreign"),
            })
            .await?;

        ctx.projects.soft_delete_project(deleted).await?;

        let ids: Vec<ProjectId> = ctx
            .projects
            .get_projects_by_client(acme)
            .await?
            .into_iter()
            .map(|record| record.id)
            .collect();

        assert_eq!(ids, vec![kept]);

        Ok(())
    }

    #[tokio::test]
    async fn update_project_changes_status() -> TestResult {
        let ctx = TestContext::new().await;
        let client = ctx.clients.insert_client(client_details("Acme")).await?;
        let project = ctx
            .projects
            .insert_project(NewProject {
                client,
                details: project_details("Rebuild"),
            })
            .await?;

        let mut details = project_details("Rebuild");
        details.status = ProjectStatus::Complete;

        ctx.projects.update_project(project, details).await?;

        let record = ctx.projects.get_project(project).await?;

        assert_eq!(record.details.status, ProjectStatus::Complete);

        Ok(())
    }

    #[tokio::test]
    async fn update_deleted_project_is_a_no_op() -> TestResult {
        let ctx = TestContext::new().await;
        let client = ctx.clients.insert_client(client_details("Acme")).await?;
        let project = ctx
            .projects
            .insert_project(NewProject {
                client,
                details: project_details("Rebuild"),
            })
            .await?;

        ctx.projects.soft_delete_project(project).await?;
        ctx.projects
            .update_project(project, project_details("Renamed"))
            .await?;

        let result = ctx.projects.get_project(project).await;

        assert!(
            matches!(result, Err(ProjectsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn soft_delete_project_twice_succeeds() -> TestResult {
        let ctx = TestContext::new().await;
        let client = ctx.clients.insert_client(client_details("Acme")).await?;
        let project = ctx
            .projects
            .insert_project(NewProject {
                client,
                details: project_details("Rebuild"),
            })
            .await?;

        ctx.projects.soft_delete_project(project).await?;
        ctx.projects.soft_delete_project(project).await?;

        assert!(ctx.projects.get_projects_by_client(client).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn discount_over_one_hundred_percent_is_invalid_data() -> TestResult {
        let ctx = TestContext::new().await;
        let client = ctx.clients.insert_client(client_details("Acme")).await?;

        let mut details = project_details("Rebuild");
        details.discount_percent = Some(150.0);

        let result = ctx
            .projects
            .insert_project(NewProject { client, details })
            .await;

        assert!(
            matches!(result, Err(ProjectsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }
}
