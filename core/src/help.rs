//! Help page rendering.

use crate::flag::{DELIMITER, Flag};
use crate::spec::{OptionSpec, Placeholder};

const DEFAULT_LABEL: &str = "VALUE";

fn labels(spec: &OptionSpec) -> Option<(Vec<String>, bool)> {
    let contract = spec.parameter()?;
    if contract.arity() == 0 {
        return None;
    }
    let labels = match contract.placeholder() {
        Some(Placeholder::Single(label)) => vec![label.clone()],
        Some(Placeholder::List(labels)) => labels.clone(),
        None => vec![DEFAULT_LABEL.to_string(); contract.arity()],
    };
    Some((labels, contract.is_required()))
}

fn format_flag(flag: &Flag, labels: Option<&(Vec<String>, bool)>) -> String {
    let Some((labels, required)) = labels else {
        return flag.to_string();
    };
    let (prefix, separator) = if flag.is_short() { (" ", " ") } else { ("=", ",") };
    let params = labels.join(separator);
    match (flag.is_short(), required) {
        (_, true) => format!("{flag}{prefix}{params}"),
        (true, false) => format!("{flag} [{params}]"),
        (false, false) => format!("{flag}[={params}]"),
    }
}

fn format_left(spec: &OptionSpec) -> String {
    let labels = labels(spec);
    spec.flags()
        .iter()
        .map(|flag| format_flag(flag, labels.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_help(spec: &OptionSpec) -> String {
    let mut out = spec.description().unwrap_or_default().trim().to_string();
    if spec.is_required() {
        if out.is_empty() {
            out.push_str("required");
        } else {
            out.push_str(" (required)");
        }
    }
    out
}

/// Renders the help page for `options`, in the order given.
///
/// The page lists every option's flags with parameter placeholders (short
/// flags space-separated, long flags after `=` and comma-separated; optional
/// parameters in brackets), its description, and the `--` delimiter.
///
/// # Examples
///
/// ```
/// use optparse_core::{OptionSpec, ParameterContract, help};
///
/// let sum = OptionSpec::new(["s", "sum"])
///     .unwrap()
///     .with_description("Returns the sum of x and y")
///     .with_parameter(ParameterContract::new().count(2).required().with_placeholder(["x", "y"]));
///
/// let page = help::render("Calculator", [&sum]);
/// assert!(page.starts_with("Calculator\n\nOptions:\n"));
/// assert!(page.contains("-s x y, --sum=x,y  Returns the sum of x and y"));
/// assert!(page.trim_end().ends_with("Terminate option list."));
/// ```
pub fn render<'a>(description: &str, options: impl IntoIterator<Item = &'a OptionSpec>) -> String {
    let mut rows: Vec<(String, String)> = options
        .into_iter()
        .map(|spec| (format_left(spec), format_help(spec)))
        .collect();
    rows.push((DELIMITER.to_string(), "Terminate option list.".to_string()));

    let mut out = String::new();
    if !description.trim().is_empty() {
        out.push_str(description.trim_end());
        out.push_str("\n\n");
    }

    out.push_str("Options:\n");
    let width = rows
        .iter()
        .map(|(left, _)| left.chars().count())
        .max()
        .unwrap_or(0);
    for (left, help) in rows {
        if help.is_empty() {
            out.push_str(&format!("  {left}\n"));
        } else {
            out.push_str(&format!("  {left:width$}  {help}\n"));
        }
    }
    out
}
