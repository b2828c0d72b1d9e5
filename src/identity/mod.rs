//! Identifier resolution.
//!
//! Turns whatever a caller hands us (a magnet URI or a bare hash) into the
//! canonical content hash that keys every session, plus the cheap extras the
//! identifier carries: the display name, tracker hints and direct peer hints.
//!
//! Nothing here touches the network or a descriptor file. Everything beyond
//! the hash and the name is recovered later through metadata exchange.
//!
//! # Accepted forms
//!
//! - `magnet:?xt=urn:btih:<40 hex | 32 base32>&dn=<name>&tr=<url>&x.pe=<ip:port>`
//! - a bare 40 character hex hash
//! - a bare 32 character base32 hash
//!
//! # Example
//!
//! ```rust
//! use magnet_swarm::identity::structs::identity_resolver::IdentityResolver;
//!
//! let resolved = IdentityResolver::resolve(
//!     "magnet:?xt=urn:btih:c12fe1c06bba254a9dc9f519b335aa7c1367a88a&dn=Example"
//! ).unwrap();
//! assert_eq!(resolved.display_name, "Example");
//! ```

/// Resolution error types.
pub mod enums;

/// Implementation blocks for the resolver and the content hash.
pub mod impls;

/// Resolver, content hash and resolution result structs.
pub mod structs;
