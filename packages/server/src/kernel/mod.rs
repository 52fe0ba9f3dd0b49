//! Process-wide infrastructure, initialized once at startup (spec.md §9's
//! "module-level global state" redesign flag: no ambient lookups, every
//! dependency is an explicit parameter threaded through `AppState` or into
//! the worker constructors).

pub mod jobs;
