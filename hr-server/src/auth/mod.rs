//! Authentication and authorization
//!
//! - [`jwt`]: access token signing and validation
//! - [`principal`]: the authenticated caller and its store lookup
//! - [`policy`]: route policy table, role gate and ownership scoping
//! - [`visibility`]: row-visibility predicate for listing queries
//! - [`middleware`]: `require_auth` and the per-route gate
//! - [`extractor`]: handler extractors for the caller

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod policy;
pub mod principal;
pub mod rate_limit;
pub mod resource;
pub mod visibility;

pub use extractor::OwnEmployee;
pub use jwt::{Claims, JwtError, JwtService, bearer_token};
pub use middleware::{authenticate, require_auth, require_route};
pub use policy::{Ownership, Route, RoutePolicy, authorize, scope_to_owner};
pub use principal::{PgPrincipalStore, Principal, PrincipalStore};
pub use resource::ResourceType;
pub use visibility::{OwnerScope, visibility_filter};
