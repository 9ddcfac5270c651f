//! HTML for the browser UI.
//!
//! Embedded at compile time using `include_str!`.

/// Single-page todo UI. Talks to the `/todos` API on the same origin.
pub const INDEX_TEMPLATE: &str = include_str!("templates/index.html");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_helper_parses_only_json_bodies() {
        let helper = INDEX_TEMPLATE
            .split("async function api(")
            .nth(1)
            .and_then(|rest| rest.split("async function load(").next())
            .expect("api helper present");

        let type_check = helper
            .find("res.headers.get(\"Content-Type\")")
            .expect("content type checked");
        let ok_check = helper.find("if (!res.ok)").expect("status checked");
        let first_parse = helper.find("res.json()").expect("json parsed");
        assert!(type_check < first_parse);
        assert!(ok_check < first_parse);
        assert!(helper.contains("res.status"));
    }

    #[test]
    fn failed_save_is_not_shown_in_form() {
        assert!(!INDEX_TEMPLATE.contains("textContent = err.message"));
        assert!(INDEX_TEMPLATE.contains("Title must not be empty"));
    }
}
