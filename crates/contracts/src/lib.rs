//! Wire types shared between the dashboard frontend and the remote admin API.

pub mod system;
