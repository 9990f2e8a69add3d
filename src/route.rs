//! Dual-mode route description: one templated pattern for registration and
//! documentation, one concrete-URL builder for hyperlink generation.
//!
//! The two modes share a single placeholder map checked at construction, so
//! template and builder can never disagree on the placeholder set.

use crate::descriptor::ParamType;
use crate::hateoas::url_with_query;
use regex::Regex;

/// An endpoint's path: `/greetings/{greeting_id}` plus the ordered mapping
/// from placeholder name to scalar type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    template: String,
    params: Vec<(String, ParamType)>,
}

impl RouteSpec {
    /// Build a route spec, verifying that the placeholders written in the
    /// template and the declared parameter map agree exactly.
    ///
    /// # Panics
    ///
    /// Panics when the placeholder sets differ. This is a startup
    /// configuration error in the endpoint declaration, never a runtime
    /// condition.
    pub fn new(template: &str, params: Vec<(&str, ParamType)>) -> Self {
        let declared: Vec<String> = params.iter().map(|(name, _)| name.to_string()).collect();
        let found = placeholder_names(template);
        assert!(
            found == declared,
            "route template '{template}' placeholders {found:?} do not match declared parameters {declared:?}"
        );
        RouteSpec {
            template: template.to_string(),
            params: params
                .into_iter()
                .map(|(name, ty)| (name.to_string(), ty))
                .collect(),
        }
    }

    /// Template mode: the documentation/registration pattern with `{name}`
    /// placeholders left in place.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Placeholder name → scalar type, in template order.
    pub fn params(&self) -> &[(String, ParamType)] {
        &self.params
    }

    /// Concrete mode: substitute every placeholder with the supplied value.
    ///
    /// Supplying a value for every placeholder is the caller's
    /// responsibility; a missing value leaves its `{name}` token unresolved
    /// in the result and is not validated here.
    pub fn build_url(&self, values: &[(&str, &str)]) -> String {
        let mut url = self.template.clone();
        for (name, value) in values {
            url = url.replace(&format!("{{{name}}}"), value);
        }
        url
    }

    /// Concrete mode for placeholder-free routes: the template path plus a
    /// query string built from the allow-listed pairs.
    pub fn url_with_query(&self, pairs: &[(&str, String)], allowed: &[&str]) -> String {
        url_with_query(&self.template, pairs, allowed)
    }

    /// Compile the template into a path matcher, one capture per
    /// placeholder in template order.
    pub fn to_regex(&self) -> Regex {
        let mut pattern = String::with_capacity(self.template.len() + 8);
        pattern.push('^');
        for segment in self.template.split('/') {
            if segment.starts_with('{') && segment.ends_with('}') {
                pattern.push_str("/([^/]+)");
            } else if !segment.is_empty() {
                pattern.push('/');
                pattern.push_str(&regex::escape(segment));
            }
        }
        if pattern.len() == 1 {
            pattern.push('/');
        }
        pattern.push('$');
        Regex::new(&pattern).expect("Failed to compile path regex")
    }
}

fn placeholder_names(template: &str) -> Vec<String> {
    template
        .split('/')
        .filter(|segment| segment.starts_with('{') && segment.ends_with('}'))
        .map(|segment| {
            segment
                .trim_start_matches('{')
                .trim_end_matches('}')
                .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_and_params_agree() {
        let spec = RouteSpec::new("/greetings/{greeting_id}", vec![("greeting_id", ParamType::Uuid)]);
        assert_eq!(spec.template(), "/greetings/{greeting_id}");
        assert_eq!(spec.params().len(), 1);
    }

    #[test]
    #[should_panic(expected = "do not match declared parameters")]
    fn test_undeclared_placeholder_panics() {
        let _ = RouteSpec::new("/greetings/{greeting_id}", vec![]);
    }

    #[test]
    #[should_panic(expected = "do not match declared parameters")]
    fn test_extra_declared_parameter_panics() {
        let _ = RouteSpec::new("/greetings", vec![("greeting_id", ParamType::Uuid)]);
    }

    #[test]
    fn test_build_url_substitutes_all_placeholders() {
        let spec = RouteSpec::new("/greetings/{greeting_id}", vec![("greeting_id", ParamType::Uuid)]);
        let url = spec.build_url(&[("greeting_id", "abc-123")]);
        assert_eq!(url, "/greetings/abc-123");
        assert!(!url.contains('{'));
    }

    #[test]
    fn test_to_regex_captures_placeholders() {
        let spec = RouteSpec::new("/greetings/{greeting_id}", vec![("greeting_id", ParamType::Uuid)]);
        let re = spec.to_regex();
        let caps = re.captures("/greetings/42").unwrap();
        assert_eq!(&caps[1], "42");
        assert!(re.captures("/greetings").is_none());
        assert!(re.captures("/greetings/42/extra").is_none());
    }

    #[test]
    fn test_root_template_matches_root_only() {
        let spec = RouteSpec::new("/", vec![]);
        let re = spec.to_regex();
        assert!(re.is_match("/"));
        assert!(!re.is_match("/greetings"));
    }
}
