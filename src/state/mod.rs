pub(crate) mod history;
pub(crate) mod orchestrator;
pub(crate) mod rules;
