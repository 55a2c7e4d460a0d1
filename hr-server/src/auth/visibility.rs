//! Row-visibility predicate
//!
//! A declarative owner filter that listing handlers render into their
//! `QueryBuilder`. Other filters (date range, department, status) are pushed
//! by the handler and AND-combined with it.

use shared::Role;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use super::principal::Principal;
use super::resource::ResourceType;

/// Which owners' rows a caller may see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerScope {
    /// Every owner
    All,
    /// Exactly one owning employee
    Owner(Uuid),
    /// No rows at all
    Nothing,
}

/// Visibility of `resource` rows for `principal`.
///
/// Admin, Director and HR see all rows; Finance sees all salary rows; every
/// other combination is restricted to the caller's own employee id, and to
/// nothing when the caller has no employee profile.
pub fn visibility_filter(principal: &Principal, resource: ResourceType) -> OwnerScope {
    if !resource.is_owned() {
        return OwnerScope::All;
    }

    let unrestricted = match principal.role {
        Role::Director | Role::Admin | Role::Hr => true,
        Role::Finance => resource == ResourceType::Salary,
        Role::Employee => false,
    };

    if unrestricted {
        OwnerScope::All
    } else {
        principal
            .employee_id
            .map_or(OwnerScope::Nothing, OwnerScope::Owner)
    }
}

impl OwnerScope {
    /// Apply a caller-supplied `employee_id` filter.
    ///
    /// Only an unrestricted scope can be narrowed; a restricted one ignores
    /// the request, so it can never be widened or redirected.
    pub fn narrow(self, requested_owner: Option<Uuid>) -> Self {
        match (self, requested_owner) {
            (OwnerScope::All, Some(owner)) => OwnerScope::Owner(owner),
            (scope, _) => scope,
        }
    }

    pub fn permits(&self, owner: Uuid) -> bool {
        match self {
            OwnerScope::All => true,
            OwnerScope::Owner(id) => *id == owner,
            OwnerScope::Nothing => false,
        }
    }

    /// Render as ` AND <column> = $n` into a query that already has a WHERE clause
    pub fn push_predicate(&self, qb: &mut QueryBuilder<'_, Postgres>, column: &str) {
        match self {
            OwnerScope::All => {}
            OwnerScope::Owner(id) => {
                qb.push(" AND ").push(column).push(" = ").push_bind(*id);
            }
            OwnerScope::Nothing => {
                qb.push(" AND FALSE");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNED: [ResourceType; 6] = [
        ResourceType::Employee,
        ResourceType::Attendance,
        ResourceType::Leave,
        ResourceType::Salary,
        ResourceType::Document,
        ResourceType::Ticket,
    ];

    fn principal(role: Role, employee_id: Option<Uuid>) -> Principal {
        Principal {
            id: Uuid::new_v4(),
            email: "someone@example.com".to_string(),
            role,
            employee_id,
        }
    }

    fn render(scope: OwnerScope) -> String {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM leaves l WHERE TRUE");
        scope.push_predicate(&mut qb, "l.employee_id");
        qb.sql().to_string()
    }

    #[test]
    fn test_employee_sees_only_own_rows() {
        let own = Uuid::new_v4();
        let p = principal(Role::Employee, Some(own));
        for resource in OWNED {
            assert_eq!(visibility_filter(&p, resource), OwnerScope::Owner(own));
        }
    }

    #[test]
    fn test_employee_query_override_is_ignored() {
        let own = Uuid::new_v4();
        let other = Uuid::new_v4();
        let p = principal(Role::Employee, Some(own));

        let scope = visibility_filter(&p, ResourceType::Leave).narrow(Some(other));
        assert_eq!(scope, OwnerScope::Owner(own));
        assert!(!scope.permits(other));
    }

    #[test]
    fn test_unlinked_employee_sees_nothing() {
        let p = principal(Role::Employee, None);
        for resource in OWNED {
            let scope = visibility_filter(&p, resource).narrow(Some(Uuid::new_v4()));
            assert_eq!(scope, OwnerScope::Nothing);
        }
        assert!(render(OwnerScope::Nothing).ends_with(" AND FALSE"));
    }

    #[test]
    fn test_elevated_roles_see_all_and_can_narrow() {
        let target = Uuid::new_v4();
        for role in [Role::Admin, Role::Director, Role::Hr] {
            let p = principal(role, None);
            for resource in OWNED {
                assert_eq!(visibility_filter(&p, resource), OwnerScope::All);
                assert_eq!(
                    visibility_filter(&p, resource).narrow(Some(target)),
                    OwnerScope::Owner(target)
                );
            }
        }
    }

    #[test]
    fn test_finance_unrestricted_on_salary_only() {
        let own = Uuid::new_v4();
        let p = principal(Role::Finance, Some(own));

        assert_eq!(visibility_filter(&p, ResourceType::Salary), OwnerScope::All);
        assert_eq!(
            visibility_filter(&p, ResourceType::Leave),
            OwnerScope::Owner(own)
        );
        assert_eq!(
            visibility_filter(&p, ResourceType::Attendance),
            OwnerScope::Owner(own)
        );
    }

    #[test]
    fn test_unowned_resources_are_visible_to_all() {
        let p = principal(Role::Employee, None);
        assert_eq!(
            visibility_filter(&p, ResourceType::Announcement),
            OwnerScope::All
        );
        assert_eq!(visibility_filter(&p, ResourceType::Setting), OwnerScope::All);
    }

    #[test]
    fn test_permits_matches_scope() {
        let own = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert!(OwnerScope::All.permits(other));
        assert!(OwnerScope::Owner(own).permits(own));
        assert!(!OwnerScope::Owner(own).permits(other));
        assert!(!OwnerScope::Nothing.permits(own));
    }

    #[test]
    fn test_predicate_rendering() {
        assert_eq!(render(OwnerScope::All), "SELECT * FROM leaves l WHERE TRUE");
        assert_eq!(
            render(OwnerScope::Owner(Uuid::new_v4())),
            "SELECT * FROM leaves l WHERE TRUE AND l.employee_id = $1"
        );
    }
}
