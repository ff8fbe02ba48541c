//! Text command matcher behind the header command bar.
//!
//! DESIGN
//! ======
//! Commands are matched in two passes: the first route with a phrase
//! contained in the command wins outright; otherwise the route whose phrase
//! shares the most whole words with the command wins. Routes are tried in
//! declaration order, so earlier routes win ties.

#[cfg(test)]
#[path = "command_test.rs"]
mod command_test;

/// Leading filler stripped once before matching.
const PREFIXES: [&str; 9] = [
    "go to",
    "open",
    "show",
    "navigate to",
    "take me to",
    "i want to",
    "please",
    "can you",
    "could you",
];

/// A navigable destination and the phrases that reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRoute {
    pub path: String,
    pub phrases: Vec<String>,
}

impl CommandRoute {
    #[must_use]
    pub fn new(path: &str, phrases: &[&str]) -> Self {
        Self { path: path.to_owned(), phrases: phrases.iter().map(|p| p.to_lowercase()).collect() }
    }
}

/// Lowercase, trim, and drop one leading prefix.
#[must_use]
pub fn normalize_command(input: &str) -> String {
    let command = input.trim().to_lowercase();
    for prefix in PREFIXES {
        if let Some(rest) = command.strip_prefix(prefix) {
            if rest.is_empty() || rest.starts_with(' ') {
                return rest.trim().to_owned();
            }
        }
    }
    command
}

/// Path of the best route for `input`, if any phrase matches at all.
#[must_use]
pub fn match_command<'a>(input: &str, routes: &'a [CommandRoute]) -> Option<&'a str> {
    let command = normalize_command(input);
    if command.is_empty() {
        return None;
    }

    for route in routes {
        if route.phrases.iter().any(|p| !p.is_empty() && command.contains(p.as_str())) {
            return Some(&route.path);
        }
    }

    let words: Vec<&str> = command.split_whitespace().collect();
    let mut best: Option<(&str, usize)> = None;
    for route in routes {
        for phrase in &route.phrases {
            let score = phrase.split_whitespace().filter(|w| words.contains(w)).count();
            if score > best.map_or(0, |(_, s)| s) {
                best = Some((&route.path, score));
            }
        }
    }
    best.map(|(path, _)| path)
}
