//! Route policy table
//!
//! Every protected route has exactly one entry here: the roles allowed to
//! call it and how ownership is checked. [`require_route`] is the only
//! consumer, so two routes that share a policy cannot drift apart.
//!
//! [`require_route`]: super::middleware::require_route

use shared::{AppError, Role};
use uuid::Uuid;

use super::principal::Principal;
use super::resource::ResourceType;

/// Any authenticated principal
pub const ANY_ROLE: &[Role] = &Role::ALL;
pub const ADMIN_DIRECTOR: &[Role] = &[Role::Admin, Role::Director];
pub const HR_STAFF: &[Role] = &[Role::Admin, Role::Director, Role::Hr];
pub const PAYROLL_WRITERS: &[Role] = &[Role::Admin, Role::Director, Role::Hr, Role::Finance];
pub const PAYROLL_APPROVERS: &[Role] = &[Role::Admin, Role::Director, Role::Finance];

/// How a route restricts callers to their own records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Role gate only
    Unscoped,
    /// The `{id}` path parameter is an owning employee id; checked before lookup
    PathOwner,
    /// Acts on the caller's own employee profile, which must exist
    SelfService,
    /// Rows are filtered by the visibility predicate in the handler
    Visible(ResourceType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutePolicy {
    pub roles: &'static [Role],
    pub ownership: Ownership,
}

impl RoutePolicy {
    const fn new(roles: &'static [Role], ownership: Ownership) -> Self {
        Self { roles, ownership }
    }
}

/// Protected route identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    // auth
    Register,
    AdminResetPassword,
    Me,
    // employees
    EmployeeList,
    EmployeeGet,
    EmployeeUpdate,
    EmployeeStatus,
    // attendance
    AttendanceCheckIn,
    AttendanceCheckOut,
    AttendanceToday,
    AttendanceList,
    // leaves
    LeaveApply,
    LeaveList,
    LeaveApprove,
    LeaveReject,
    // salary
    SalaryCreate,
    SalaryList,
    SalaryGet,
    SalaryStatus,
    // documents
    DocumentUpload,
    DocumentList,
    DocumentDelete,
    // announcements
    AnnouncementCreate,
    AnnouncementList,
    AnnouncementDelete,
    // tickets
    TicketCreate,
    TicketList,
    TicketStatus,
    // audit / reports
    AuditLogList,
    ReportAttendance,
    ReportLeaves,
    ReportEmployees,
    // settings
    SettingsAll,
    SettingsByCategory,
    SettingsUpdate,
    SettingsInitialize,
}

impl Route {
    pub const fn policy(self) -> RoutePolicy {
        use Ownership::*;
        use ResourceType as R;

        match self {
            // Principal creation and admin password reset re-check
            // Admin/Director inside the operation.
            Route::Register | Route::AdminResetPassword | Route::Me => {
                RoutePolicy::new(ANY_ROLE, Unscoped)
            }

            Route::EmployeeList => RoutePolicy::new(ANY_ROLE, Visible(R::Employee)),
            Route::EmployeeGet => RoutePolicy::new(ANY_ROLE, PathOwner),
            Route::EmployeeUpdate => RoutePolicy::new(HR_STAFF, Unscoped),
            Route::EmployeeStatus => RoutePolicy::new(ADMIN_DIRECTOR, Unscoped),

            Route::AttendanceCheckIn | Route::AttendanceCheckOut | Route::AttendanceToday => {
                RoutePolicy::new(ANY_ROLE, SelfService)
            }
            Route::AttendanceList => RoutePolicy::new(ANY_ROLE, Visible(R::Attendance)),

            Route::LeaveApply => RoutePolicy::new(ANY_ROLE, SelfService),
            Route::LeaveList => RoutePolicy::new(ANY_ROLE, Visible(R::Leave)),
            Route::LeaveApprove | Route::LeaveReject => RoutePolicy::new(HR_STAFF, Unscoped),

            Route::SalaryCreate => RoutePolicy::new(PAYROLL_WRITERS, Unscoped),
            Route::SalaryList | Route::SalaryGet => RoutePolicy::new(ANY_ROLE, Visible(R::Salary)),
            Route::SalaryStatus => RoutePolicy::new(PAYROLL_APPROVERS, Unscoped),

            Route::DocumentUpload => RoutePolicy::new(ANY_ROLE, SelfService),
            Route::DocumentList => RoutePolicy::new(ANY_ROLE, Visible(R::Document)),
            Route::DocumentDelete => RoutePolicy::new(HR_STAFF, Unscoped),

            Route::AnnouncementCreate => RoutePolicy::new(HR_STAFF, Unscoped),
            Route::AnnouncementList => RoutePolicy::new(ANY_ROLE, Unscoped),
            Route::AnnouncementDelete => RoutePolicy::new(ADMIN_DIRECTOR, Unscoped),

            Route::TicketCreate => RoutePolicy::new(ANY_ROLE, SelfService),
            Route::TicketList => RoutePolicy::new(ANY_ROLE, Visible(R::Ticket)),
            Route::TicketStatus => RoutePolicy::new(HR_STAFF, Unscoped),

            Route::AuditLogList => RoutePolicy::new(ADMIN_DIRECTOR, Unscoped),
            Route::ReportAttendance | Route::ReportLeaves | Route::ReportEmployees => {
                RoutePolicy::new(HR_STAFF, Unscoped)
            }

            Route::SettingsAll | Route::SettingsUpdate | Route::SettingsInitialize => {
                RoutePolicy::new(ADMIN_DIRECTOR, Unscoped)
            }
            Route::SettingsByCategory => RoutePolicy::new(ANY_ROLE, Unscoped),
        }
    }
}

/// Role gate: Allow iff `principal.role ∈ allowed`
pub fn authorize(principal: &Principal, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&principal.role) {
        Ok(())
    } else {
        Err(AppError::forbidden())
    }
}

/// Ownership gate for routes any role may call.
///
/// Admin, Director and HR always pass. Everyone else passes only when the
/// requested owner is their own linked employee; a missing link or an
/// unparseable owner id denies.
pub fn scope_to_owner(principal: &Principal, requested_owner: Option<Uuid>) -> Result<(), AppError> {
    if principal.role.is_elevated() {
        return Ok(());
    }
    match requested_owner {
        Some(owner) if principal.owns(owner) => Ok(()),
        _ => Err(AppError::forbidden()),
    }
}

/// Self-service gate: the caller's linked employee id
pub fn own_employee(principal: &Principal) -> Result<Uuid, AppError> {
    principal.employee_id.ok_or_else(AppError::forbidden)
}
