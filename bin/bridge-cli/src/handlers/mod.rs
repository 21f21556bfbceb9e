pub(crate) mod replay;
pub(crate) mod resource_id;
