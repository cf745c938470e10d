//! Operation kinds and the endpoint table.

use std::fmt;

/// HTTP method used by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much of the response funnel an endpoint goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Login-page checks, JSON decoding, error/status keys and emptiness.
    Full,
    /// Login-page checks only; the success body is HTML and returned as text.
    LoginPageOnly,
}

/// Static descriptor of one remote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub method: HttpMethod,
    /// Appended to the normalized host. May carry a fixed query (`/index?all`).
    pub path: &'static str,
    /// Selector parameter Azkaban dispatches on (`ajax=...`, `action=...`).
    pub action: Option<(&'static str, &'static str)>,
    /// Whether `session.id` is sent.
    pub authenticated: bool,
    /// Whether an empty decoded body counts as success.
    pub allow_empty: bool,
    pub classification: Classification,
}

impl Endpoint {
    const fn get(path: &'static str, key: &'static str, value: &'static str) -> Self {
        Self {
            method: HttpMethod::Get,
            path,
            action: Some((key, value)),
            authenticated: true,
            allow_empty: false,
            classification: Classification::Full,
        }
    }

    const fn post(path: &'static str, key: &'static str, value: &'static str) -> Self {
        Self {
            method: HttpMethod::Post,
            ..Self::get(path, key, value)
        }
    }

    const fn allowing_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }
}

/// Every remote operation the client performs.
///
/// The variant name doubles as the label of the domain error raised when the
/// server rejects the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    Upload,
    Create,
    Delete,
    FetchFlows,
    FetchJobsFromFlow,
    FetchProjects,
    AddPermission,
    ChangePermission,
    RemovePermission,
    Schedule,
    Unschedule,
    FetchSchedule,
    FetchSla,
    Execute,
    Cancel,
    ResumeFlowExecution,
    FetchFlowExecution,
    FetchFlowExecutionUpdates,
    FetchExecutionsOfAFlow,
    FetchRunningExecutionsOfAFlow,
    FetchExecutionJobLog,
}

impl Operation {
    pub const ALL: [Operation; 22] = [
        Operation::Login,
        Operation::Upload,
        Operation::Create,
        Operation::Delete,
        Operation::FetchFlows,
        Operation::FetchJobsFromFlow,
        Operation::FetchProjects,
        Operation::AddPermission,
        Operation::ChangePermission,
        Operation::RemovePermission,
        Operation::Schedule,
        Operation::Unschedule,
        Operation::FetchSchedule,
        Operation::FetchSla,
        Operation::Execute,
        Operation::Cancel,
        Operation::ResumeFlowExecution,
        Operation::FetchFlowExecution,
        Operation::FetchFlowExecutionUpdates,
        Operation::FetchExecutionsOfAFlow,
        Operation::FetchRunningExecutionsOfAFlow,
        Operation::FetchExecutionJobLog,
    ];

    pub fn endpoint(self) -> Endpoint {
        match self {
            Operation::Login => Endpoint {
                authenticated: false,
                ..Endpoint::post("/", "action", "login")
            },
            Operation::Upload => Endpoint::post("/manager", "ajax", "upload"),
            Operation::Create => Endpoint::post("/manager", "action", "create"),
            Operation::Delete => Endpoint::get("/manager", "delete", "true").allowing_empty(),
            Operation::FetchFlows => Endpoint::get("/manager", "ajax", "fetchprojectflows"),
            Operation::FetchJobsFromFlow => Endpoint::get("/manager", "ajax", "fetchflowgraph"),
            Operation::FetchProjects => Endpoint {
                action: None,
                classification: Classification::LoginPageOnly,
                ..Endpoint::get("/index?all", "", "")
            },
            Operation::AddPermission => {
                Endpoint::get("/manager", "ajax", "addPermission").allowing_empty()
            }
            Operation::ChangePermission | Operation::RemovePermission => {
                Endpoint::get("/manager", "ajax", "changePermission").allowing_empty()
            }
            Operation::Schedule => Endpoint::post("/schedule", "ajax", "scheduleCronFlow"),
            Operation::Unschedule => Endpoint::post("/schedule", "action", "removeSched"),
            Operation::FetchSchedule => Endpoint::get("/schedule", "ajax", "fetchSchedule"),
            Operation::FetchSla => Endpoint::get("/schedule", "ajax", "slaInfo"),
            Operation::Execute => Endpoint::get("/executor", "ajax", "executeFlow"),
            Operation::Cancel => Endpoint::get("/executor", "ajax", "cancelFlow"),
            Operation::ResumeFlowExecution => {
                Endpoint::get("/executor", "ajax", "resumeFlow").allowing_empty()
            }
            Operation::FetchFlowExecution => Endpoint::get("/executor", "ajax", "fetchexecflow"),
            Operation::FetchFlowExecutionUpdates => {
                Endpoint::get("/executor", "ajax", "fetchexecflowupdate")
            }
            Operation::FetchExecutionsOfAFlow => {
                Endpoint::get("/manager", "ajax", "fetchFlowExecutions")
            }
            Operation::FetchRunningExecutionsOfAFlow => {
                Endpoint::get("/executor", "ajax", "getRunning")
            }
            Operation::FetchExecutionJobLog => {
                Endpoint::get("/executor", "ajax", "fetchExecJobLogs")
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::Login => "Login",
            Operation::Upload => "Upload",
            Operation::Create => "Create",
            Operation::Delete => "Delete",
            Operation::FetchFlows => "FetchFlows",
            Operation::FetchJobsFromFlow => "FetchJobsFromFlow",
            Operation::FetchProjects => "FetchProjects",
            Operation::AddPermission => "AddPermission",
            Operation::ChangePermission => "ChangePermission",
            Operation::RemovePermission => "RemovePermission",
            Operation::Schedule => "Schedule",
            Operation::Unschedule => "Unschedule",
            Operation::FetchSchedule => "FetchSchedule",
            Operation::FetchSla => "FetchSLA",
            Operation::Execute => "Execute",
            Operation::Cancel => "Cancel",
            Operation::ResumeFlowExecution => "ResumeFlowExecution",
            Operation::FetchFlowExecution => "FetchFlowExecution",
            Operation::FetchFlowExecutionUpdates => "FetchFlowExecutionUpdates",
            Operation::FetchExecutionsOfAFlow => "FetchExecutionsOfAFlow",
            Operation::FetchRunningExecutionsOfAFlow => "FetchRunningExecutionsOfAFlow",
            Operation::FetchExecutionJobLog => "FetchExecutionJobLog",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
