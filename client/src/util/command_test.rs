use super::*;

fn routes() -> Vec<CommandRoute> {
    vec![
        CommandRoute::new("/", &["home", "main dashboard"]),
        CommandRoute::new("/r/leave-requests", &["leave requests", "time requests"]),
        CommandRoute::new("/r/expense-claims", &["expense claims", "claim expenses"]),
        CommandRoute::new("/r/company-policies", &["company policies", "policies"]),
    ]
}

#[test]
fn normalize_strips_one_prefix() {
    assert_eq!(normalize_command("  Go To Expense Claims "), "expense claims");
    assert_eq!(normalize_command("please open policies"), "open policies");
    assert_eq!(normalize_command("opening hours"), "opening hours");
}

#[test]
fn contained_phrase_wins() {
    let routes = routes();
    assert_eq!(match_command("show me the leave requests", &routes), Some("/r/leave-requests"));
    assert_eq!(match_command("Navigate to company policies", &routes), Some("/r/company-policies"));
}

#[test]
fn earlier_route_wins_when_both_contained() {
    let routes = routes();
    assert_eq!(match_command("home policies", &routes), Some("/"));
}

#[test]
fn word_overlap_picks_best_route() {
    let routes = routes();
    assert_eq!(match_command("expense report", &routes), Some("/r/expense-claims"));
    assert_eq!(match_command("requests for time off", &routes), Some("/r/leave-requests"));
}

#[test]
fn no_overlap_is_none() {
    let routes = routes();
    assert_eq!(match_command("weather tomorrow", &routes), None);
    assert_eq!(match_command("   ", &routes), None);
    assert_eq!(match_command("go to", &routes), None);
}
