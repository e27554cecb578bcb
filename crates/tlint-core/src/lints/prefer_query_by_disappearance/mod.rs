pub(crate) mod prefer_query_by_disappearance;
