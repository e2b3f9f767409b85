/// One `name[:parameter]` token from a rule specification string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRule {
    pub name: String,
    pub parameter: Option<String>,
}

impl ParsedRule {
    pub fn new(name: impl Into<String>, parameter: Option<&str>) -> Self {
        ParsedRule {
            name: name.into(),
            parameter: parameter.map(str::to_string),
        }
    }
}

/// Parse a field's rule specification, e.g. `"required|max:40"`.
///
/// Tokens are split on `|` and each token on its first `:`. Rule names are
/// not checked here and whitespace is kept as written.
pub fn parse_rules(spec: &str) -> Vec<ParsedRule> {
    spec.split('|')
        .map(|token| match token.split_once(':') {
            Some((name, parameter)) => ParsedRule::new(name, Some(parameter)),
            None => ParsedRule::new(token, None),
        })
        .collect()
}
