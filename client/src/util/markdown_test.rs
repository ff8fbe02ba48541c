use super::*;

#[test]
fn renders_basic_markdown() {
    let html = render_markdown_html("**Taxi** to site");
    assert!(html.contains("<strong>Taxi</strong>"));
}

#[test]
fn drops_raw_html() {
    let html = render_markdown_html("hello <script>alert(1)</script> world");
    assert!(!html.contains("<script>"));
    assert!(html.contains("hello"));
}

#[test]
fn plain_text_flattens_blocks() {
    assert_eq!(markdown_to_plain("# Leave\n\n- two *weeks*\n- `paid`"), "Leave two weeks paid");
}

#[test]
fn plain_text_of_plain_string_is_unchanged() {
    assert_eq!(markdown_to_plain("Quarterly sales push"), "Quarterly sales push");
}
