use colored::*;
use models::ValidationResult;
use validators::ValidationError;

pub const EXIT_VALID: i32 = 0;
pub const EXIT_INVALID: i32 = 1;
pub const EXIT_CONFIG: i32 = 2;
pub const EXIT_STORE: i32 = 3;

pub fn exit_code(result: &ValidationResult) -> i32 {
    if result.valid {
        EXIT_VALID
    } else {
        EXIT_INVALID
    }
}

pub fn error_exit_code(error: &ValidationError) -> i32 {
    match error {
        ValidationError::Config(_) => EXIT_CONFIG,
        ValidationError::Store(_) => EXIT_STORE,
    }
}

/// Human readable summary, one line per failure.
pub fn render_text(result: &ValidationResult) -> String {
    if result.valid {
        return format!("{} All rules passed", "✓".green());
    }

    let mut out = format!(
        "{} {} rule(s) failed\n",
        "✗".red(),
        result.errors.len()
    );
    for failure in &result.errors {
        out.push_str(&format!(
            "  {} {} {}\n",
            format!("[{}]", failure.key).bold(),
            failure.rule.yellow(),
            failure.error
        ));
    }
    out
}

pub fn render_json(result: &ValidationResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}
