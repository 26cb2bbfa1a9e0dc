/// Strip the module path from a fully qualified type name.
///
/// `"pulse_pipeline::components::category_filter::CategoryFilter"`
/// becomes `"CategoryFilter"`.
pub fn short_type_name(full: &str) -> &str {
    full.rsplit("::").next().unwrap_or(full)
}
