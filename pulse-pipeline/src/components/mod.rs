pub mod category_filter;
pub mod date_range_query_hydrator;
pub mod digest_log_side_effect;
pub mod item_context_hydrator;
pub mod performance_source;
pub mod top_k_selector;
pub mod urgency_scorer;
