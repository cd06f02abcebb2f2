// Text splicing over the whole dashboard document.
//
// None of these skip silently: a missing anchor is an error so the caller
// never writes a half-updated page.
use crate::error::{DashboardError, Result};
use regex::{NoExpand, Regex};

/// Replace everything from `start` up to (not including) the first `end`
/// that follows it.
pub fn replace_between(text: &str, start: &str, end: &str, replacement: &str) -> Result<String> {
    let start_idx = text
        .find(start)
        .ok_or_else(|| DashboardError::StartMarkerNotFound(start.to_string()))?;
    let end_idx = text[start_idx..]
        .find(end)
        .map(|i| start_idx + i)
        .ok_or_else(|| DashboardError::EndMarkerNotFound(end.to_string()))?;
    Ok(splice(text, start_idx, end_idx, replacement))
}

/// Replace a region from `open` through `close`, both tags included.
pub fn replace_region(text: &str, open: &str, close: &str, replacement: &str) -> Result<String> {
    let start_idx = text
        .find(open)
        .ok_or_else(|| DashboardError::StartMarkerNotFound(open.to_string()))?;
    let end_idx = text[start_idx..]
        .find(close)
        .map(|i| start_idx + i + close.len())
        .ok_or_else(|| DashboardError::EndMarkerNotFound(close.to_string()))?;
    Ok(splice(text, start_idx, end_idx, replacement))
}

fn splice(text: &str, from: usize, to: usize, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len() - (to - from) + replacement.len());
    out.push_str(&text[..from]);
    out.push_str(replacement);
    out.push_str(&text[to..]);
    out
}

/// Substitute the first match of `re`. The replacement is taken literally.
pub fn replace_once(text: &str, re: &Regex, replacement: &str, what: &'static str) -> Result<String> {
    if !re.is_match(text) {
        return Err(DashboardError::PatternNotFound(what));
    }
    Ok(re.replacen(text, 1, NoExpand(replacement)).into_owned())
}

/// Swap the items of `const <name> = [...];` in embedded script text.
pub fn replace_array_const(text: &str, name: &'static str, values: &str) -> Result<String> {
    let re = Regex::new(&format!(r"const {} = \[[^\]]*\];", regex::escape(name)))
        .expect("escaped identifier is a valid pattern");
    if !re.is_match(text) {
        return Err(DashboardError::ArrayNotFound(name));
    }
    let replacement = format!("const {} = [{}];", name, values);
    Ok(re.replacen(text, 1, NoExpand(&replacement)).into_owned())
}
