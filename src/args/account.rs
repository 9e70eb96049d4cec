//! Account placeholder extraction — raw args → account name.

/// Return the account named by a `{account}` placeholder in `token`.
///
/// A token qualifies only when it holds exactly one `{` and one `}`, in that
/// order, with a non-empty name between them. Tokens with stray braces
/// such as `a}{b}` are skipped rather than resolved to `b`.
pub fn placeholder(token: &str) -> Option<&str> {
    if token.matches('{').count() != 1 || token.matches('}').count() != 1 {
        return None;
    }
    let open = token.find('{')?;
    let rest = &token[open + 1..];
    let close = rest.find('}')?;
    let name = &rest[..close];
    if name.is_empty() {
        return None;
    }
    Some(name)
}

/// Scan args in order and return the first placeholder account.
pub fn find_account(raw_args: &[String]) -> Option<&str> {
    raw_args.iter().find_map(|arg| placeholder(arg))
}

/// Replace every literal `{account}` across all args with the bare name.
pub fn substitute(raw_args: &[String], account: &str) -> Vec<String> {
    let pattern = format!("{{{}}}", account);
    raw_args
        .iter()
        .map(|arg| arg.replace(&pattern, account))
        .collect()
}
