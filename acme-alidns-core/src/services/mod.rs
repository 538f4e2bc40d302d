//! 业务逻辑服务层

mod authenticator;
mod record_reconciler;
mod zone_resolver;

pub use authenticator::{Challenge, DEFAULT_PROPAGATION_SECONDS, DnsAuthenticator};
pub use record_reconciler::{CHALLENGE_TTL, RecordReconciler};
pub use zone_resolver::{ResolvedZone, ZoneResolver, candidate_zones, relative_name};
