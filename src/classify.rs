//! Classifier rules shared by every platform.
//!
//! The action cascade is order-sensitive: rules are evaluated top to bottom
//! and the first match wins. `update` is checked before the write verbs
//! because identifiers such as `setOrCreate` must resolve to `update`.

use crate::model::NodeAction;

struct ActionRule {
    action: NodeAction,
    prefixes: &'static [&'static str],
    contains: &'static [&'static str],
}

const ACTION_RULES: [ActionRule; 4] = [
    ActionRule {
        action: NodeAction::Update,
        prefixes: &["update", "set"],
        contains: &["update", "set"],
    },
    ActionRule {
        action: NodeAction::Write,
        prefixes: &["add", "create", "generate", "insert", "run", "upload"],
        contains: &["make", "send", "add", "create", "append", "generate"],
    },
    ActionRule {
        action: NodeAction::Delete,
        prefixes: &["delete", "remove"],
        contains: &["delete", "remove"],
    },
    ActionRule {
        action: NodeAction::Read,
        prefixes: &[
            "get", "read", "evaluate", "watch", "retrieve", "list", "filter", "download",
            "translate", "search",
        ],
        contains: &["getall"],
    },
];

/// Tokens dropped from synthesized operation names.
const BOILERPLATE_CONTAINS: &[&str] = &["trigger"];
const BOILERPLATE_PREFIXES: &[&str] = &["action"];
const BOILERPLATE_EXACT: &[&str] = &["v2"];

/// Run the textual cascade only. `None` when no rule fires.
pub fn match_action(operation: &str) -> Option<NodeAction> {
    let op = operation.to_lowercase();
    ACTION_RULES
        .iter()
        .find(|rule| {
            rule.prefixes.iter().any(|p| op.starts_with(p))
                || rule.contains.iter().any(|c| op.contains(c))
        })
        .map(|rule| rule.action)
}

/// Full cascade: textual rules, then the trigger default.
pub fn infer_action(operation: &str, is_trigger: bool) -> Option<NodeAction> {
    match_action(operation).or(if is_trigger {
        Some(NodeAction::Read)
    } else {
        None
    })
}

/// Turn `watchRows`, `ParseJSON` or `new_row_v2` into `Watch Rows`,
/// `Parse JSON`, `New Row`.
pub fn humanize_operation(operation: &str) -> String {
    split_words(operation)
        .into_iter()
        .filter(|word| !is_boilerplate(word))
        .map(|word| capitalize(&word))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_boilerplate(word: &str) -> bool {
    let w = word.to_lowercase();
    BOILERPLATE_CONTAINS.iter().any(|t| w.contains(t))
        || BOILERPLATE_PREFIXES.iter().any(|t| w.starts_with(t))
        || BOILERPLATE_EXACT.contains(&w.as_str())
}

/// Split on separators and camel-case boundaries. A run of capitals stays
/// one word (`JSON`), but its last capital starts the next word when a
/// lowercase letter follows (`HTTPRequest` -> `HTTP`, `Request`).
fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if !prev.is_uppercase() || next_is_lower {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
