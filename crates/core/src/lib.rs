//! Domain types for the stylepanel generation client.
//!
//! Holds the pieces shared by the REST client and the job orchestrator:
//! job and status types, the static work-type registry that maps a
//! `(category, option)` pair from the host panel to a server pipeline
//! code, submission parameter assembly, and the narrow contracts the
//! host application fulfils (viewport capture, UI chrome).

pub mod host;
pub mod params;
pub mod types;
pub mod worktype;
