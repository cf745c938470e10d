use crate::client::archive::ProjectArchive;
use crate::client::error_classification;
use crate::client::options::ExecutionOptions;
use crate::client::permissions::{PermissionOptions, Permissions};
use crate::client::session::{normalize_host, Session};
use crate::client::types::{
    as_id, field, field_id, field_text, ExecutionReceipt, ScheduleReceipt, UploadReceipt,
};
use crate::protocol::{ApiRequest, Attachment, Operation, RequestBuilder};
use crate::transport::Transport;
use crate::{Error, ErrorContext, Result};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Client for one Azkaban server login.
///
/// Every call except [`login`](Self::login) and [`logout`](Self::logout)
/// needs an active session and fails with [`Error::NotLoggedIn`] before
/// touching the network otherwise. Replies are classified by
/// [`error_classification`] before any payload is read.
pub struct AzkabanClient {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) session: Session,
}

impl AzkabanClient {
    /// Client with configuration taken from the environment.
    pub fn new() -> Result<Self> {
        crate::client::builder::AzkabanClientBuilder::new().build()
    }

    pub fn builder() -> crate::client::builder::AzkabanClientBuilder {
        crate::client::builder::AzkabanClientBuilder::new()
    }

    /// Current host, user and token.
    pub fn get_logged_session(&self) -> &Session {
        &self.session
    }

    /// Adopt a session obtained elsewhere (e.g. loaded from disk).
    pub fn set_logged_session(
        &mut self,
        host: impl Into<String>,
        user: impl Into<String>,
        session_id: impl Into<String>,
    ) {
        self.session = Session::new(host, user, session_id);
    }

    pub fn restore_session(&mut self, session: Session) {
        self.session = session;
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    /// Forget host, user and token.
    pub fn logout(&mut self) {
        self.session = Session::default();
    }

    /// Log in and keep the returned session token.
    ///
    /// The current session is left untouched when the login fails.
    pub fn login(&mut self, host: &str, user: &str, password: &str) -> Result<()> {
        let host = normalize_host(host);
        url::Url::parse(&host).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid host: {}", e),
                ErrorContext::new()
                    .with_field_path("host")
                    .with_details(host.clone())
                    .with_source("login"),
            )
        })?;

        let request = RequestBuilder::new(Operation::Login, &host, None)
            .param("username", user)
            .param("password", password)
            .build();
        let payload = self.call(request)?;
        let session_id = field_text(Operation::Login, &payload, "session.id")?;

        self.session = Session::new(host, user, session_id);
        info!("Logged as {}", user);
        Ok(())
    }

    /// Upload a project.
    ///
    /// `path` is either a project directory, zipped into a temporary archive
    /// for the duration of the call, or an existing zip. `project` defaults
    /// to the directory name (or the archive's file stem); `zip_name`, the
    /// name the archive is sent under, defaults to the project.
    pub fn upload(
        &self,
        path: impl AsRef<Path>,
        project: Option<&str>,
        zip_name: Option<&str>,
    ) -> Result<UploadReceipt> {
        let request = self.request(Operation::Upload)?;
        let path = path.as_ref();
        let is_dir = path.is_dir();

        let project = match project {
            Some(p) => p.to_string(),
            None => default_project_name(path, is_dir)?,
        };
        let (mut archive, file_name) = if is_dir {
            let zip_name = zip_name.unwrap_or(&project);
            (
                ProjectArchive::from_directory(path, zip_name)?,
                format!("{}.zip", zip_name),
            )
        } else {
            let file_name = match zip_name {
                Some(name) => format!("{}.zip", name),
                None => path
                    .file_name()
                    .and_then(|s| s.to_str())
                    .map(String::from)
                    .unwrap_or_else(|| format!("{}.zip", project)),
            };
            (ProjectArchive::from_file(path)?, file_name)
        };

        let request = request
            .param("project", &project)
            .attach(Attachment {
                field: "file",
                file_name,
                mime: "application/zip",
                bytes: std::mem::take(&mut archive.bytes),
            })
            .build();
        let result = self.call(request);
        drop(archive);
        let payload = result?;

        let version = field_text(Operation::Upload, &payload, "version")?;
        info!("Project {} updated to version {}", project, version);
        Ok(UploadReceipt {
            project_id: payload.get("projectId").and_then(as_id),
            project,
            version,
        })
    }

    pub fn create(&self, project: &str, description: &str) -> Result<()> {
        let request = self
            .request(Operation::Create)?
            .param("name", project)
            .param("description", description)
            .build();
        self.call(request)?;
        info!("Project {} created successfully", project);
        Ok(())
    }

    /// Delete a project. The server answers with an empty body.
    pub fn delete(&self, project: &str) -> Result<()> {
        let request = self
            .request(Operation::Delete)?
            .param("project", project)
            .build();
        self.call(request)?;
        info!("Project {} deleted", project);
        Ok(())
    }

    /// The project listing page. The server renders HTML here, so only
    /// login-page detection applies.
    pub fn fetch_projects(&self) -> Result<String> {
        let request = self.request(Operation::FetchProjects)?.build();
        match self.call(request)? {
            Value::String(html) => Ok(html),
            other => Ok(other.to_string()),
        }
    }

    pub fn fetch_flows(&self, project: &str) -> Result<Value> {
        let request = self
            .request(Operation::FetchFlows)?
            .param("project", project)
            .build();
        let payload = self.call(request)?;
        let project_id = field_text(Operation::FetchFlows, &payload, "projectId")?;
        info!("Project ID: {}", project_id);
        Ok(payload)
    }

    /// Job graph of one flow.
    pub fn fetch_jobs_from_flow(&self, project: &str, flow: &str) -> Result<Value> {
        let request = self
            .request(Operation::FetchJobsFromFlow)?
            .param("project", project)
            .param("flow", flow)
            .build();
        self.call(request)
    }

    /// Grant `group` access to `project`. Returns the normalized flags sent.
    pub fn add_permission(
        &self,
        project: &str,
        group: &str,
        options: &PermissionOptions,
    ) -> Result<Permissions> {
        let permissions = Permissions::normalize(options);
        self.send_permissions(Operation::AddPermission, project, group, permissions)?;
        info!(
            "Group [{}] added with permissions [{}] in project [{}]",
            group, permissions, project
        );
        Ok(permissions)
    }

    /// Replace the flags `group` holds on `project`.
    pub fn change_permission(
        &self,
        project: &str,
        group: &str,
        options: &PermissionOptions,
    ) -> Result<Permissions> {
        let permissions = Permissions::normalize(options);
        self.send_permissions(Operation::ChangePermission, project, group, permissions)?;
        info!(
            "Group [{}] received new permissions [{}] in project [{}]",
            group, permissions, project
        );
        Ok(permissions)
    }

    /// Revoke every flag of `group` on `project`.
    pub fn remove_permission(&self, project: &str, group: &str) -> Result<()> {
        self.send_permissions(Operation::RemovePermission, project, group, Permissions::NONE)?;
        info!("Group [{}] permissions removed from project [{}]", group, project);
        Ok(())
    }

    fn send_permissions(
        &self,
        operation: Operation,
        project: &str,
        group: &str,
        permissions: Permissions,
    ) -> Result<Value> {
        let request = self
            .request(operation)?
            .param("project", project)
            .param("name", group)
            .params(permissions.to_params())
            .param("group", true)
            .build();
        self.call(request)
    }

    /// Schedule a flow with a Quartz cron expression (e.g. `0 */10 * ? * *`).
    pub fn schedule(
        &self,
        project: &str,
        flow: &str,
        cron: &str,
        options: &ExecutionOptions,
    ) -> Result<ScheduleReceipt> {
        let request = self
            .request(Operation::Schedule)?
            .param("projectName", project)
            .param("flow", flow)
            .param("cronExpression", cron)
            .params(options.to_params())
            .build();
        let payload = self.call(request)?;

        let message = field_text(Operation::Schedule, &payload, "message")?;
        let schedule_id = field_id(Operation::Schedule, &payload, "scheduleId")?;
        info!("{}", message);
        info!("scheduleId: {}", schedule_id);
        Ok(ScheduleReceipt {
            schedule_id,
            message,
        })
    }

    pub fn unschedule(&self, schedule_id: u64) -> Result<String> {
        let request = self
            .request(Operation::Unschedule)?
            .param("scheduleId", schedule_id)
            .build();
        let payload = self.call(request)?;
        let message = field_text(Operation::Unschedule, &payload, "message")?;
        info!("{}", message);
        Ok(message)
    }

    /// Schedule of a flow, looked up by numeric project id.
    pub fn fetch_schedule(&self, project_id: u64, flow: &str) -> Result<Value> {
        let request = self
            .request(Operation::FetchSchedule)?
            .param("projectId", project_id)
            .param("flowId", flow)
            .build();
        let payload = self.call(request)?;
        let schedule = field(Operation::FetchSchedule, &payload, "schedule")?;
        let schedule_id = field_text(Operation::FetchSchedule, schedule, "scheduleId")?;
        info!("Schedule ID: {}", schedule_id);
        Ok(payload)
    }

    pub fn fetch_sla(&self, schedule_id: u64) -> Result<Value> {
        let request = self
            .request(Operation::FetchSla)?
            .param("scheduleId", schedule_id)
            .build();
        self.call(request)
    }

    pub fn execute(
        &self,
        project: &str,
        flow: &str,
        options: &ExecutionOptions,
    ) -> Result<ExecutionReceipt> {
        let request = self
            .request(Operation::Execute)?
            .param("project", project)
            .param("flow", flow)
            .params(options.to_params())
            .build();
        let payload = self.call(request)?;

        let message = field_text(Operation::Execute, &payload, "message")?;
        info!("{}", message);
        Ok(ExecutionReceipt {
            exec_id: payload.get("execid").and_then(as_id),
            message,
        })
    }

    /// Cancel a running execution. Fails if the flow is not running.
    pub fn cancel(&self, exec_id: u64) -> Result<()> {
        let request = self
            .request(Operation::Cancel)?
            .param("execid", exec_id)
            .build();
        self.call(request)?;
        info!("Execution {} cancelled", exec_id);
        Ok(())
    }

    pub fn resume_flow_execution(&self, exec_id: u64) -> Result<Value> {
        let request = self
            .request(Operation::ResumeFlowExecution)?
            .param("execid", exec_id)
            .build();
        self.call(request)
    }

    pub fn fetch_flow_execution(&self, exec_id: u64) -> Result<Value> {
        let request = self
            .request(Operation::FetchFlowExecution)?
            .param("execid", exec_id)
            .build();
        self.call(request)
    }

    /// Job updates since `last_update_time` (epoch millis). `None` lets the
    /// server use its default; `Some(-1)` asks for every job.
    pub fn fetch_flow_execution_updates(
        &self,
        exec_id: u64,
        last_update_time: Option<i64>,
    ) -> Result<Value> {
        let request = self
            .request(Operation::FetchFlowExecutionUpdates)?
            .param("execid", exec_id)
            .param_opt("lastUpdateTime", last_update_time)
            .build();
        self.call(request)
    }

    /// Page of past executions, `start` inclusive.
    pub fn fetch_executions_of_a_flow(
        &self,
        project: &str,
        flow: &str,
        start: u32,
        length: u32,
    ) -> Result<Value> {
        let request = self
            .request(Operation::FetchExecutionsOfAFlow)?
            .param("project", project)
            .param("flow", flow)
            .param("start", start)
            .param("length", length)
            .build();
        self.call(request)
    }

    pub fn fetch_running_executions_of_a_flow(&self, project: &str, flow: &str) -> Result<Value> {
        let request = self
            .request(Operation::FetchRunningExecutionsOfAFlow)?
            .param("project", project)
            .param("flow", flow)
            .build();
        self.call(request)
    }

    /// Slice of a job's log: `length` characters starting at `offset`.
    pub fn fetch_execution_job_log(
        &self,
        exec_id: u64,
        job_id: &str,
        offset: u64,
        length: u64,
    ) -> Result<Value> {
        let request = self
            .request(Operation::FetchExecutionJobLog)?
            .param("execid", exec_id)
            .param("jobId", job_id)
            .param("offset", offset)
            .param("length", length)
            .build();
        self.call(request)
    }

    /// Start a request for an authenticated operation.
    fn request(&self, operation: Operation) -> Result<RequestBuilder> {
        let (host, session_id) = self.session.credentials()?;
        Ok(RequestBuilder::new(operation, host, Some(session_id)))
    }

    /// Send one request and classify the reply as its endpoint declares.
    fn call(&self, request: ApiRequest) -> Result<Value> {
        let operation = request.operation;
        let response = self.transport.execute(&request)?;
        debug!(operation = %operation, status = response.status, "classifying response");
        error_classification::check(operation, &response.body)
    }
}

/// Directory name for a project directory, file stem for an archive.
fn default_project_name(path: &Path, is_dir: bool) -> Result<String> {
    let resolved = if is_dir {
        std::fs::canonicalize(path).ok()
    } else {
        None
    };
    let name = match &resolved {
        Some(dir) => dir.file_name(),
        None if is_dir => path.file_name(),
        None => path.file_stem(),
    };
    name.and_then(|s| s.to_str())
        .map(String::from)
        .ok_or_else(|| {
            Error::api(
                Operation::Upload,
                format!("Cannot derive a project name from {}", path.display()),
            )
        })
}
