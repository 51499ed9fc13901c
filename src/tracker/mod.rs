pub(crate) mod region_metadata;
