/// Stateless identifier resolver.
///
/// See [`IdentityResolver::resolve`](crate::identity::structs::identity_resolver::IdentityResolver::resolve).
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;
