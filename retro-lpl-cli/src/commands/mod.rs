pub(crate) mod config;
pub(crate) mod consoles;
pub(crate) mod launch;
pub(crate) mod update;
